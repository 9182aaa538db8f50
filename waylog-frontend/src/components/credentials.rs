use leptos::{ev, *};

use waylog_boundary::Credentials;

const INPUT_CLASS: &str = "block w-full px-3 py-1.5 text-base font-normal text-gray-700 \
     bg-white border border-solid border-gray-300 rounded focus:outline-none";

#[component]
pub fn CredentialsForm(
    title: &'static str,
    action_label: &'static str,
    action: Action<Credentials, ()>,
    error: Signal<Option<String>>,
    disabled: Signal<bool>,
) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let credentials = Signal::derive(move || {
        let email = email.with(|v| v.trim().to_string());
        let password = password.with(|v| v.trim().to_string());
        if email.is_empty() || password.is_empty() {
            return None;
        }
        Some(Credentials { email, password })
    });

    let submit_disabled = Signal::derive(move || disabled.get() || credentials.get().is_none());

    let submit = move || {
        if let Some(credentials) = credentials.get() {
            action.dispatch(credentials);
        }
    };

    view! {
      <form on:submit=|ev| ev.prevent_default()>
        <h4 class="text-xl font-semibold mb-6">{ title }</h4>
        {move || error.get().map(|err| view!{
          <p class="mb-4 text-red-700">{ err }</p>
        })}
        <div class="mb-4">
          <input
            type = "email"
            required
            placeholder = "Email address"
            class = INPUT_CLASS
            prop:disabled = move || disabled.get()
            on:keyup = move |ev: ev::KeyboardEvent| {
              let val = event_target_value(&ev);
              set_email.update(|v| *v = val);
            }
            // The `change` event fires when the browser fills the form automatically,
            on:change = move |ev| {
              let val = event_target_value(&ev);
              set_email.update(|v| *v = val);
            }
          />
        </div>
        <div class="mb-4">
          <input
            type = "password"
            required
            placeholder = "Password"
            class = INPUT_CLASS
            prop:disabled = move || disabled.get()
            on:keyup = move |ev: ev::KeyboardEvent| {
              match &*ev.key() {
                  "Enter" => {
                    submit();
                  }
                  _ => {
                     let val = event_target_value(&ev);
                     set_password.update(|p| *p = val);
                  }
              }
            }
            on:change = move |ev| {
              let val = event_target_value(&ev);
              set_password.update(|p| *p = val);
            }
          />
        </div>
        <button
          prop:disabled = move || submit_disabled.get()
          on:click = move |_| submit()
          class="w-full rounded bg-gray-900 px-6 py-2.5 font-medium text-xs uppercase text-white disabled:bg-gray-400"
        >
          { action_label }
        </button>
      </form>
    }
}
