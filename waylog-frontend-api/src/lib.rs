use thiserror::Error;

mod aggregations;
mod places;
mod public;
mod records;
mod user;
mod util;

pub use self::{public::*, records::RecordQuery, user::*};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The request never produced a response.
    #[error("{0}")]
    Fetch(String),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { http_status: u16, message: String },
}

impl From<gloo_net::Error> for Error {
    fn from(err: gloo_net::Error) -> Self {
        Self::Fetch(format!("{err}"))
    }
}
