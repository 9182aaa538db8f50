use leptos::*;
use leptos_router::*;

use waylog_core::gateways::TokenStore as _;
use waylog_frontend_api::{PublicApi, UserApi};

mod api;
mod components;
mod pages;
mod storage;

use components::*;
use pages::*;
use storage::BrowserTokenStore;

const DEFAULT_API_URL: &str = "/api";
const API_TOKEN_STORAGE_KEY: &str = "api-token";

#[component]
#[must_use]
pub fn App() -> impl IntoView {
    let token_store = BrowserTokenStore::new(API_TOKEN_STORAGE_KEY);

    // -- signals -- //

    let user_api = RwSignal::new(None::<UserApi>);
    let logged_in = Signal::derive(move || user_api.get().is_some());

    // -- callbacks -- //

    let on_logout = move || {
        log::info!("Logging out");
        user_api.update(|a| *a = None);
    };

    // -- init API -- //

    let public_api = PublicApi::new(DEFAULT_API_URL.to_string());

    if let Some(token) = token_store.get() {
        log::debug!("Restoring the stored API token");
        let api = UserApi::from_token(DEFAULT_API_URL.to_string(), token);
        user_api.update(|a| *a = Some(api));
    }

    // -- effects -- //

    Effect::new(move |_| match user_api.get() {
        Some(api) => {
            log::debug!("API is authorized: save token");
            token_store.set(&api.token().access_token);
        }
        None => {
            log::debug!("API is no longer authorized: delete token");
            token_store.remove();
        }
    });

    view! {
      <Router>
        <NavBar logged_in on_logout />
        <main>
          <Routes>
            <Route
              path=Page::Entries.path()
              view=move || view! { <Entries user_api = user_api.into() /> }
            />
            <Route
              path=Page::Insights.path()
              view=move || view! { <Insights user_api = user_api.into() /> }
            />
            <Route
              path=Page::Login.path()
              view={
                let public_api = public_api.clone();
                move || {
                    let public_api = public_api.clone();
                    view! {
                      <Login
                        public_api
                        on_success = move |api| {
                            log::info!("Successfully logged in");
                            user_api.update(|v| *v = Some(api));
                            let navigate = use_navigate();
                            navigate(Page::Entries.path(), NavigateOptions::default());
                        } />
                    }
                }
              }
            />
          </Routes>
        </main>
      </Router>
    }
}
