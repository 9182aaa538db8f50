use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::editor::EditorDraft;

pub const MAX_TITLE_LEN: usize = 140;

pub trait Validate {
    type Error;
    fn validate(&self) -> Result<(), Self::Error>;
}

/// Field-level draft violations. These block submission locally and are
/// never sent over the network.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DraftInvalidation {
    #[error("A title is required")]
    MissingTitle,
    #[error("The title must not exceed {MAX_TITLE_LEN} characters")]
    TitleTooLong,
    #[error("The country code must consist of two letters")]
    CountryCode,
    #[error("The latitude must be within -90 and 90")]
    Latitude,
    #[error("The longitude must be within -180 and 180")]
    Longitude,
    #[error("The rating must be between 1 and 5")]
    Rating,
    #[error("A visit date is required")]
    MissingVisitDate,
    #[error("The visit date is not a valid timestamp")]
    VisitDate,
}

/// Two ASCII letters of either case. Save normalization uppercases, so
/// `us` passes here and is sent as `US`, while `u5` or `usa` never leave
/// the client.
#[must_use]
pub fn is_valid_country_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[must_use]
pub fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

#[must_use]
pub fn is_valid_longitude(lng: f64) -> bool {
    (-180.0..=180.0).contains(&lng)
}

impl Validate for EditorDraft {
    type Error = DraftInvalidation;

    fn validate(&self) -> Result<(), Self::Error> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftInvalidation::MissingTitle);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DraftInvalidation::TitleTooLong);
        }
        if !is_valid_country_code(self.country_code.trim()) {
            return Err(DraftInvalidation::CountryCode);
        }
        if !is_valid_latitude(self.latitude) {
            return Err(DraftInvalidation::Latitude);
        }
        if !is_valid_longitude(self.longitude) {
            return Err(DraftInvalidation::Longitude);
        }
        if !(1..=5).contains(&self.rating) {
            return Err(DraftInvalidation::Rating);
        }
        let visited_at = self.visited_at.trim();
        if visited_at.is_empty() {
            return Err(DraftInvalidation::MissingVisitDate);
        }
        if OffsetDateTime::parse(visited_at, &Rfc3339).is_err() {
            return Err(DraftInvalidation::VisitDate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> EditorDraft {
        let mut draft = EditorDraft::new();
        draft.title = "Louvre".into();
        draft.country_code = "FR".into();
        draft
    }

    #[test]
    fn default_draft_misses_a_title() {
        assert_eq!(
            EditorDraft::new().validate(),
            Err(DraftInvalidation::MissingTitle)
        );
        assert_eq!(valid_draft().validate(), Ok(()));
    }

    #[test]
    fn title_length_is_bounded() {
        let mut draft = valid_draft();
        draft.title = "x".repeat(MAX_TITLE_LEN);
        assert_eq!(draft.validate(), Ok(()));
        draft.title.push('x');
        assert_eq!(draft.validate(), Err(DraftInvalidation::TitleTooLong));
    }

    #[test]
    fn country_code_test() {
        assert!(is_valid_country_code("US"));
        assert!(is_valid_country_code("us"));
        assert!(!is_valid_country_code("usa"));
        assert!(!is_valid_country_code("u5"));
        assert!(!is_valid_country_code(""));
        assert!(!is_valid_country_code("üs"));
    }

    #[test]
    fn coordinates_must_be_in_range() {
        let mut draft = valid_draft();
        draft.latitude = 90.0;
        draft.longitude = -180.0;
        assert_eq!(draft.validate(), Ok(()));
        draft.latitude = 90.5;
        assert_eq!(draft.validate(), Err(DraftInvalidation::Latitude));
        draft.latitude = 0.0;
        draft.longitude = 181.0;
        assert_eq!(draft.validate(), Err(DraftInvalidation::Longitude));
    }

    #[test]
    fn rating_must_be_in_range() {
        let mut draft = valid_draft();
        draft.rating = 0;
        assert_eq!(draft.validate(), Err(DraftInvalidation::Rating));
        draft.rating = 6;
        assert_eq!(draft.validate(), Err(DraftInvalidation::Rating));
        draft.rating = 3;
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn visit_date_must_be_a_timestamp() {
        let mut draft = valid_draft();
        draft.visited_at = String::new();
        assert_eq!(draft.validate(), Err(DraftInvalidation::MissingVisitDate));
        draft.visited_at = "yesterday".into();
        assert_eq!(draft.validate(), Err(DraftInvalidation::VisitDate));
        draft.visited_at = "2024-05-01T10:00:00Z".into();
        assert_eq!(draft.validate(), Ok(()));
    }
}
