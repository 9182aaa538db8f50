use gloo_net::http::Request;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use waylog_boundary::{PlaceDetails, PlaceSuggestion};

use crate::{Result, UserApi};

impl UserApi {
    pub async fn autocomplete_places(
        &self,
        query: &str,
        session_token: Option<&str>,
    ) -> Result<Vec<PlaceSuggestion>> {
        let encoded_query = utf8_percent_encode(query, NON_ALPHANUMERIC);
        let mut url = format!("{}/places/autocomplete?q={encoded_query}", self.url());
        if let Some(token) = session_token {
            let encoded_token = utf8_percent_encode(token, NON_ALPHANUMERIC);
            url = format!("{url}&session_token={encoded_token}");
        }
        self.send(Request::get(&url)).await
    }

    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let encoded_id = utf8_percent_encode(place_id, NON_ALPHANUMERIC);
        let url = format!("{}/places/details?place_id={encoded_id}", self.url());
        self.send(Request::get(&url)).await
    }
}
