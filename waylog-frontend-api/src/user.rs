use gloo_net::http::RequestBuilder;
use serde::{de::DeserializeOwned, Serialize};
use web_sys::RequestCredentials;

use waylog_boundary::AccessToken;

use crate::{
    util::{auth_header_value, expect_no_content, into_json},
    Result,
};

/// Authorized Waylog API. Cheap to clone; one instance serves the
/// records, places and aggregation endpoints alike.
#[derive(Clone)]
pub struct UserApi {
    url: String,
    token: AccessToken,
}

impl UserApi {
    #[must_use]
    pub const fn new(url: String, token: AccessToken) -> Self {
        Self { url, token }
    }

    /// Rebuilds the client from a token restored at startup.
    #[must_use]
    pub const fn from_token(url: String, access_token: String) -> Self {
        Self::new(
            url,
            AccessToken {
                access_token,
            },
        )
    }

    #[must_use]
    pub const fn token(&self) -> &AccessToken {
        &self.token
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }

    pub(crate) fn add_auth_headers(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(
            "Authorization",
            &auth_header_value(&self.token.access_token),
        )
        .credentials(RequestCredentials::Include)
    }

    pub(crate) async fn send<T>(&self, req: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .add_auth_headers(req)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        into_json(response).await
    }

    pub(crate) async fn send_json<D, T>(&self, req: RequestBuilder, data: &D) -> Result<T>
    where
        T: DeserializeOwned,
        D: Serialize,
    {
        let response = self.add_auth_headers(req).json(data)?.send().await?;
        into_json(response).await
    }

    pub(crate) async fn send_no_content(&self, req: RequestBuilder) -> Result<()> {
        let response = self.add_auth_headers(req).send().await?;
        expect_no_content(response).await
    }
}
