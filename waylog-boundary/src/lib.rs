use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Closed set of destination categories, lowercase on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DestinationType {
    #[default]
    City,
    Nature,
    Beach,
    Museum,
    Park,
    Mountain,
    Desert,
    Historical,
    Food,
    Other,
}

impl DestinationType {
    pub const ALL: [Self; 10] = [
        Self::City,
        Self::Nature,
        Self::Beach,
        Self::Museum,
        Self::Park,
        Self::Mountain,
        Self::Desert,
        Self::Historical,
        Self::Food,
        Self::Other,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Nature => "nature",
            Self::Beach => "beach",
            Self::Museum => "museum",
            Self::Park => "park",
            Self::Mountain => "mountain",
            Self::Desert => "desert",
            Self::Historical => "historical",
            Self::Food => "food",
            Self::Other => "other",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TravelRecord {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub notes: Option<String>,
    pub country_code: String,
    pub region: Option<String>,
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub destination_type: DestinationType,
    pub rating: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub visited_at: OffsetDateTime,
    pub place_external_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub updated_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub weather_summary: Option<String>,
    #[serde(default)]
    pub photo: Option<Photo>,
}

/// Writable fields of a travel record.
///
/// Serves both `POST /records` and `PATCH /records/{id}`: absent optionals
/// are skipped, so an update payload is a partial record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewTravelRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub destination_type: DestinationType,
    pub rating: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub visited_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_external_id: Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id           : i64,
    pub file_path    : String,
    pub content_type : String,
    pub size_bytes   : u64,
}

/// One autocomplete hit; lives only for the duration of a query.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlaceSuggestion {
    pub place_id    : String,
    pub description : String,
}

/// A resolved suggestion, used to patch an entry draft.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaceDetails {
    pub place_external_id: String,
    pub title: String,
    pub country_code: Option<String>,
    pub city: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// A windowed view onto the record collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordsPage {
    pub items: Vec<TravelRecord>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AvgRatingByCountry {
    pub key: String,
    pub avg_rating: f64,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TopDestinationPerMonth {
    /// First day of the month, ISO date.
    pub month: String,
    pub record_id: i64,
    pub title: String,
    pub rating: u8,
    pub city: Option<String>,
    pub country_code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
}

/// Body of a non-2xx API response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn destination_type_is_lowercase_on_the_wire() {
        let json = serde_json::to_string(&DestinationType::Historical).unwrap();
        assert_eq!(json, "\"historical\"");
        let parsed: DestinationType = serde_json::from_str("\"beach\"").unwrap();
        assert_eq!(parsed, DestinationType::Beach);
        assert!(serde_json::from_str::<DestinationType>("\"BEACH\"").is_err());
    }

    #[test]
    fn new_record_skips_absent_optionals() {
        let record = NewTravelRecord {
            title: "Louvre".into(),
            notes: None,
            country_code: "FR".into(),
            region: None,
            city: Some("Paris".into()),
            latitude: 48.86,
            longitude: 2.33,
            destination_type: DestinationType::Museum,
            rating: 5,
            visited_at: datetime!(2024-05-01 10:00 UTC),
            place_external_id: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("notes"));
        assert!(!object.contains_key("region"));
        assert!(!object.contains_key("place_external_id"));
        assert_eq!(object["city"], "Paris");
        assert_eq!(object["visited_at"], "2024-05-01T10:00:00Z");
    }

    #[test]
    fn record_deserializes_from_api_payload() {
        let json = r#"{
            "id": 7,
            "user_id": 1,
            "title": "Sahara trip",
            "notes": null,
            "country_code": "MA",
            "region": null,
            "city": null,
            "latitude": 31.1,
            "longitude": -4.0,
            "destination_type": "desert",
            "rating": 4,
            "visited_at": "2023-11-20T08:30:00Z",
            "place_external_id": null,
            "created_at": "2023-11-21T12:00:00Z",
            "updated_at": null,
            "weather_summary": "hot, 38 degrees",
            "photo": {
                "id": 3,
                "file_path": "/uploads/7/3.jpg",
                "content_type": "image/jpeg",
                "size_bytes": 52341
            }
        }"#;
        let record: TravelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.destination_type, DestinationType::Desert);
        assert_eq!(record.visited_at, datetime!(2023-11-20 08:30 UTC));
        assert_eq!(record.updated_at, None);
        assert_eq!(record.photo.as_ref().unwrap().id, 3);
    }
}
