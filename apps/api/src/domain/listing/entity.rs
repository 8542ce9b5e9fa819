use super::value_objects::{ListingId, ListingPatch, NewListing};
use chrono::{DateTime, Utc};

/// A rentable or sellable property unit.
///
/// # Invariants
/// - `id` is unique across all listings and never changes
/// - `name` and `location` are never empty
/// - `price` is finite and not negative
///
/// Listings are produced only by a repository, either from a validated
/// [`NewListing`] or by hydrating a stored row. `version`, `created_at` and
/// `updated_at` are bookkeeping for the store and never leave the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    id: ListingId,
    name: String,
    location: String,
    price: f64,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Listing {
    pub(crate) fn from_new(id: ListingId, input: &NewListing, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name().to_string(),
            location: input.location().to_string(),
            price: input.price(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a listing from storage. The store's constraints are trusted.
    pub(crate) fn hydrate(
        id: ListingId,
        name: String,
        location: String,
        price: f64,
        version: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            location,
            price,
            version,
            created_at,
            updated_at,
        }
    }

    /// Applies the present fields of `patch` and bumps the revision.
    pub(crate) fn apply(&mut self, patch: &ListingPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name() {
            self.name = name.to_string();
        }
        if let Some(location) = patch.location() {
            self.location = location.to_string();
        }
        if let Some(price) = patch.price() {
            self.price = price;
        }
        self.version += 1;
        self.updated_at = now;
    }

    pub fn id(&self) -> ListingId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
