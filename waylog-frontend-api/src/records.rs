use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use web_sys::{File, FormData};

use waylog_boundary::{DestinationType, NewTravelRecord, Photo, RecordsPage, TravelRecord};

use crate::{util::into_json, Error, Result, UserApi};

/// Server-side record filters of `GET /records`.
#[derive(Debug, Clone, Default)]
pub struct RecordQuery {
    /// Matches against title, notes, city and region.
    pub q: Option<String>,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub dest_type: Option<DestinationType>,
    pub rating_min: Option<u8>,
    pub rating_max: Option<u8>,
    pub date_from: Option<OffsetDateTime>,
    pub date_to: Option<OffsetDateTime>,
    /// `field:asc|desc` ordering token.
    pub order_by: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl RecordQuery {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let Self {
            q,
            country_code,
            city,
            dest_type,
            rating_min,
            rating_max,
            date_from,
            date_to,
            order_by,
            limit,
            offset,
        } = self;
        q.is_none()
            && country_code.is_none()
            && city.is_none()
            && dest_type.is_none()
            && rating_min.is_none()
            && rating_max.is_none()
            && date_from.is_none()
            && date_to.is_none()
            && order_by.is_none()
            && limit.is_none()
            && offset.is_none()
    }

    fn query_string(&self) -> String {
        let mut params = vec![];
        if let Some(q) = &self.q {
            params.push(("q", utf8_percent_encode(q, NON_ALPHANUMERIC).to_string()));
        }
        if let Some(code) = &self.country_code {
            params.push(("country_code", code.clone()));
        }
        if let Some(city) = &self.city {
            params.push(("city", utf8_percent_encode(city, NON_ALPHANUMERIC).to_string()));
        }
        if let Some(dest_type) = self.dest_type {
            params.push(("dest_type", dest_type.label().to_string()));
        }
        if let Some(rating) = self.rating_min {
            params.push(("rating_min", rating.to_string()));
        }
        if let Some(rating) = self.rating_max {
            params.push(("rating_max", rating.to_string()));
        }
        if let Some(ts) = encode_timestamp(self.date_from) {
            params.push(("date_from", ts));
        }
        if let Some(ts) = encode_timestamp(self.date_to) {
            params.push(("date_to", ts));
        }
        if let Some(order_by) = &self.order_by {
            params.push(("order_by", order_by.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
            .into_iter()
            .map(|(key, value)| [key, &value].join("="))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn encode_timestamp(ts: Option<OffsetDateTime>) -> Option<String> {
    let formatted = ts?.format(&Rfc3339).ok()?;
    Some(utf8_percent_encode(&formatted, NON_ALPHANUMERIC).to_string())
}

impl UserApi {
    pub async fn records(&self, query: &RecordQuery) -> Result<RecordsPage> {
        let mut url = format!("{}/records", self.url());
        if !query.is_empty() {
            url = format!("{url}?{}", query.query_string());
        }
        self.send(Request::get(&url)).await
    }

    pub async fn record(&self, id: i64) -> Result<TravelRecord> {
        let url = format!("{}/records/{id}", self.url());
        self.send(Request::get(&url)).await
    }

    pub async fn create_record(&self, record: &NewTravelRecord) -> Result<TravelRecord> {
        let url = format!("{}/records", self.url());
        self.send_json(Request::post(&url), record).await
    }

    pub async fn update_record(&self, id: i64, record: &NewTravelRecord) -> Result<TravelRecord> {
        let url = format!("{}/records/{id}", self.url());
        self.send_json(Request::patch(&url), record).await
    }

    pub async fn delete_record(&self, id: i64) -> Result<()> {
        let url = format!("{}/records/{id}", self.url());
        self.send_no_content(Request::delete(&url)).await
    }

    /// Attaches or replaces the record's single photo. The browser
    /// supplies the multipart boundary.
    pub async fn upload_photo(&self, id: i64, file: &File) -> Result<Photo> {
        let url = format!("{}/records/{id}/photos", self.url());
        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob("file", file).map_err(js_error)?;
        let response = self
            .add_auth_headers(Request::post(&url))
            .body(form)?
            .send()
            .await?;
        into_json(response).await
    }

    pub async fn photos(&self, id: i64) -> Result<Vec<Photo>> {
        let url = format!("{}/records/{id}/photos", self.url());
        self.send(Request::get(&url)).await
    }

    pub async fn delete_photo(&self, id: i64, photo_id: i64) -> Result<()> {
        let url = format!("{}/records/{id}/photos/{photo_id}", self.url());
        self.send_no_content(Request::delete(&url)).await
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> Error {
    Error::Fetch(format!("{err:?}"))
}
