use gloo_net::http::Response;
use serde::de::DeserializeOwned;

use waylog_boundary::ErrorResponse;

use crate::{Error, Result};

pub(crate) fn auth_header_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Deserializes a 2xx response; anything else is mapped onto the API
/// error body.
pub(crate) async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    if response.ok() {
        Ok(response.json().await?)
    } else {
        Err(api_error(response).await)
    }
}

/// For 2xx responses without a body (204 on deletions).
pub(crate) async fn expect_no_content(response: Response) -> Result<()> {
    if response.ok() {
        Ok(())
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: Response) -> Error {
    let http_status = response.status();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.detail,
        Err(_) => response.status_text(),
    };
    Error::Api {
        http_status,
        message,
    }
}
