use gloo_net::http::Request;

use waylog_boundary::{AccessToken, Credentials};

use crate::{util::into_json, Result, UserApi};

/// Public Waylog API.
#[derive(Clone)]
pub struct PublicApi {
    url: String,
}

impl PublicApi {
    #[must_use]
    pub const fn new(url: String) -> Self {
        Self { url }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<UserApi> {
        let url = format!("{}/auth/login", self.url);
        let response = Request::post(&url).json(credentials)?.send().await?;
        let token: AccessToken = into_json(response).await?;
        Ok(UserApi::new(self.url.clone(), token))
    }
}
