use std::fmt;

/// Closed set of record fields the list views can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Rating,
    VisitedAt,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Rating => "rating",
            Self::VisitedAt => "visited_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Ordering of a record listing, rendered as the `key:direction`
/// token of the `order_by` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    #[must_use]
    pub const fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Sort selection semantics of the list views: re-selecting the
    /// active key flips the direction, a new key starts descending.
    #[must_use]
    pub fn select(self, key: SortKey) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.toggled(),
            }
        } else {
            Self::descending(key)
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::descending(SortKey::VisitedAt)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key.as_str(), self.direction.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reselecting_the_active_key_toggles_the_direction() {
        let order = SortOrder::descending(SortKey::Rating);
        let order = order.select(SortKey::Rating);
        assert_eq!(order.direction, SortDirection::Ascending);
        let order = order.select(SortKey::Rating);
        assert_eq!(order.direction, SortDirection::Descending);
    }

    #[test]
    fn selecting_a_new_key_starts_descending() {
        let order = SortOrder {
            key: SortKey::VisitedAt,
            direction: SortDirection::Ascending,
        };
        let order = order.select(SortKey::Rating);
        assert_eq!(order.key, SortKey::Rating);
        assert_eq!(order.direction, SortDirection::Descending);
    }

    #[test]
    fn order_token_format() {
        assert_eq!(SortOrder::default().to_string(), "visited_at:desc");
        let order = SortOrder {
            key: SortKey::Title,
            direction: SortDirection::Ascending,
        };
        assert_eq!(order.to_string(), "title:asc");
    }
}
