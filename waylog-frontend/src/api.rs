use async_trait::async_trait;
use web_sys::File;

use waylog_boundary::{
    NewTravelRecord, Photo, PlaceDetails, PlaceSuggestion, RecordsPage, TravelRecord,
};
use waylog_core::{
    gateways::{GatewayError, PlacesGateway, RecordsGateway, Result},
    util::sort::SortOrder,
};
use waylog_frontend_api::{Error, RecordQuery, UserApi};

/// The authorized API client in the role of the controllers' gateways.
#[derive(Clone)]
pub struct Gateway {
    api: UserApi,
}

impl Gateway {
    #[must_use]
    pub const fn new(api: UserApi) -> Self {
        Self { api }
    }
}

fn to_gateway_error(err: Error) -> GatewayError {
    match err {
        Error::Fetch(msg) => GatewayError::Transport(msg),
        Error::Api {
            http_status: 404, ..
        } => GatewayError::NotFound,
        Error::Api {
            http_status: 401, ..
        } => GatewayError::Unauthorized,
        Error::Api { message, .. } => GatewayError::Transport(message),
    }
}

#[async_trait(?Send)]
impl RecordsGateway for Gateway {
    type PhotoSource = File;

    async fn list(&self, limit: u64, offset: u64, order: SortOrder) -> Result<RecordsPage> {
        let query = RecordQuery {
            limit: Some(limit),
            offset: Some(offset),
            order_by: Some(order.to_string()),
            ..RecordQuery::default()
        };
        self.api.records(&query).await.map_err(to_gateway_error)
    }

    async fn get(&self, id: i64) -> Result<TravelRecord> {
        self.api.record(id).await.map_err(to_gateway_error)
    }

    async fn create(&self, record: &NewTravelRecord) -> Result<TravelRecord> {
        self.api
            .create_record(record)
            .await
            .map_err(to_gateway_error)
    }

    async fn update(&self, id: i64, record: &NewTravelRecord) -> Result<TravelRecord> {
        self.api
            .update_record(id, record)
            .await
            .map_err(to_gateway_error)
    }

    async fn remove(&self, id: i64) -> Result<()> {
        self.api.delete_record(id).await.map_err(to_gateway_error)
    }

    async fn upload_photo(&self, id: i64, file: &File) -> Result<Photo> {
        self.api
            .upload_photo(id, file)
            .await
            .map_err(to_gateway_error)
    }

    async fn list_photos(&self, id: i64) -> Result<Vec<Photo>> {
        self.api.photos(id).await.map_err(to_gateway_error)
    }

    async fn delete_photo(&self, id: i64, photo_id: i64) -> Result<()> {
        self.api
            .delete_photo(id, photo_id)
            .await
            .map_err(to_gateway_error)
    }
}

#[async_trait(?Send)]
impl PlacesGateway for Gateway {
    async fn autocomplete(
        &self,
        query: &str,
        session_token: Option<&str>,
    ) -> Result<Vec<PlaceSuggestion>> {
        self.api
            .autocomplete_places(query, session_token)
            .await
            .map_err(to_gateway_error)
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails> {
        self.api
            .place_details(place_id)
            .await
            .map_err(to_gateway_error)
    }
}
