use leptos::*;

use waylog_boundary::Credentials;
use waylog_frontend_api::{Error, PublicApi, UserApi};

use crate::components::*;

#[component]
pub fn Login<F>(public_api: PublicApi, on_success: F) -> impl IntoView
where
    F: Fn(UserApi) + 'static + Clone,
{
    let (login_error, set_login_error) = create_signal(None::<String>);
    let (wait_for_response, set_wait_for_response) = create_signal(false);

    let login_action = Action::new(move |credentials: &Credentials| {
        log::info!("Logging in with {email}", email = credentials.email);
        let credentials = credentials.to_owned();
        let public_api = public_api.clone();
        let on_success = on_success.clone();
        async move {
            set_wait_for_response.update(|w| *w = true);
            let result = public_api.login(&credentials).await;
            set_wait_for_response.update(|w| *w = false);
            match result {
                Ok(api) => {
                    set_login_error.update(|e| *e = None);
                    on_success(api);
                }
                Err(err) => {
                    let msg = match err {
                        Error::Fetch(msg) => msg,
                        Error::Api { message, .. } => message,
                    };
                    log::error!("Unable to login with {}: {msg}", credentials.email);
                    set_login_error.update(|e| *e = Some(msg));
                }
            }
        }
    });

    let disabled = Signal::derive(move || wait_for_response.get());

    view! {
      <section>
        <div class="container mx-auto py-12 px-6">
          <div class="mx-auto max-w-md rounded-lg bg-white p-8 shadow-lg">
            <CredentialsForm
                title = "Login"
                action_label = "Log in"
                action = login_action
                error = login_error.into()
                disabled
            />
          </div>
        </div>
      </section>
    }
}
