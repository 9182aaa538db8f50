use gloo_storage::{LocalStorage, Storage};

use waylog_core::gateways::TokenStore;

/// Bearer-token persistence in the browser's local storage.
#[derive(Debug, Clone, Copy)]
pub struct BrowserTokenStore {
    key: &'static str,
}

impl BrowserTokenStore {
    #[must_use]
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl TokenStore for BrowserTokenStore {
    fn get(&self) -> Option<String> {
        LocalStorage::get(self.key).ok()
    }

    fn set(&self, token: &str) {
        if let Err(err) = LocalStorage::set(self.key, token) {
            log::error!("Unable to persist the API token: {err}");
        }
    }

    fn remove(&self) {
        LocalStorage::delete(self.key);
    }
}
