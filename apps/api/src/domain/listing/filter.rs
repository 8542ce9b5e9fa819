use super::entity::Listing;

/// Search predicate over listings. Every field is optional; an empty filter
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Case-insensitive substring of the listing name.
    pub name: Option<String>,
    /// Case-insensitive exact location.
    pub location: Option<String>,
    /// Upper bound on price, inclusive.
    pub max_price: Option<f64>,
}

impl ListingFilter {
    /// Builds a filter, treating blank strings as absent.
    pub fn new(name: Option<String>, location: Option<String>, max_price: Option<f64>) -> Self {
        Self {
            name: non_blank(name),
            location: non_blank(location),
            max_price,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none() && self.max_price.is_none()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(name) = &self.name {
            if !listing
                .name()
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if listing.location().to_lowercase() != location.to_lowercase() {
                return false;
            }
        }

        if let Some(max_price) = self.max_price {
            if listing.price() > max_price {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
