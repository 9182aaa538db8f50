use async_trait::async_trait;
use thiserror::Error;

use waylog_boundary::{
    NewTravelRecord, Photo, PlaceDetails, PlaceSuggestion, RecordsPage, TravelRecord,
};

use crate::util::sort::SortOrder;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures reported by the remote collaborators.
///
/// Validation never appears here: invalid drafts are rejected locally and
/// nothing is sent. An expired session is mapped for completeness, but
/// tearing the session down is the auth collaborator's job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("Not authorized")]
    Unauthorized,
    #[error("{0}")]
    Transport(String),
}

/// CRUD and photo operations over the travel-record collection.
#[async_trait(?Send)]
pub trait RecordsGateway {
    /// Browser file handle, or a test stand-in, for photo uploads.
    type PhotoSource;

    async fn list(&self, limit: u64, offset: u64, order: SortOrder) -> Result<RecordsPage>;

    async fn get(&self, id: i64) -> Result<TravelRecord>;

    async fn create(&self, record: &NewTravelRecord) -> Result<TravelRecord>;

    async fn update(&self, id: i64, record: &NewTravelRecord) -> Result<TravelRecord>;

    async fn remove(&self, id: i64) -> Result<()>;

    /// Attaches or replaces the record's single photo.
    async fn upload_photo(&self, id: i64, file: &Self::PhotoSource) -> Result<Photo>;

    async fn list_photos(&self, id: i64) -> Result<Vec<Photo>>;

    async fn delete_photo(&self, id: i64, photo_id: i64) -> Result<()>;
}

/// Autocomplete suggestions and place-detail lookups.
#[async_trait(?Send)]
pub trait PlacesGateway {
    async fn autocomplete(
        &self,
        query: &str,
        session_token: Option<&str>,
    ) -> Result<Vec<PlaceSuggestion>>;

    async fn details(&self, place_id: &str) -> Result<PlaceDetails>;
}

/// Client-side persistence of the opaque bearer token.
pub trait TokenStore {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn remove(&self);
}
