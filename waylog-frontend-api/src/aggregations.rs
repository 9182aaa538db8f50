use gloo_net::http::Request;

use waylog_boundary::{AvgRatingByCountry, TopDestinationPerMonth};

use crate::{Result, UserApi};

impl UserApi {
    pub async fn avg_rating_by_country(&self) -> Result<Vec<AvgRatingByCountry>> {
        let url = format!("{}/aggregations/avg-rating-by-country", self.url());
        self.send(Request::get(&url)).await
    }

    pub async fn top_destination_per_month(&self) -> Result<Vec<TopDestinationPerMonth>> {
        let url = format!("{}/aggregations/top-destination-per-month", self.url());
        self.send(Request::get(&url)).await
    }
}
