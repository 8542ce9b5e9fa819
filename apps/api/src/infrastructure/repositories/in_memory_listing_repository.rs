use crate::domain::listing::{
    entity::Listing,
    errors::DomainError,
    filter::ListingFilter,
    repository::ListingRepository,
    value_objects::{ListingId, ListingPatch, NewListing},
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory implementation of [`ListingRepository`] for tests and local runs.
///
/// Every write takes the lock for its whole duration, so concurrent creates
/// never lose each other.
#[derive(Debug, Default, Clone)]
pub struct InMemoryListingRepository {
    listings: Arc<RwLock<HashMap<ListingId, Listing>>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.listings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.listings.read().await.is_empty()
    }
}

/// Newest first, id as a tie-break; matches the SQL adapter.
fn sorted(mut listings: Vec<Listing>) -> Vec<Listing> {
    listings.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
    listings
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn find_all(&self) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(sorted(listings.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(listings.get(&id).cloned())
    }

    async fn create(&self, input: &NewListing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;

        let mut id = ListingId::generate();
        while listings.contains_key(&id) {
            id = ListingId::generate();
        }

        let listing = Listing::from_new(id, input, Utc::now());
        listings.insert(id, listing.clone());

        debug!(listing_id = %id, "Created listing in memory");
        Ok(listing)
    }

    async fn update(
        &self,
        id: ListingId,
        patch: &ListingPatch,
    ) -> Result<Option<Listing>, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.get_mut(&id).map(|listing| {
            listing.apply(patch, Utc::now());
            listing.clone()
        }))
    }

    async fn delete(&self, id: ListingId) -> Result<Option<Listing>, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.remove(&id))
    }

    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(sorted(
            listings
                .values()
                .filter(|l| filter.matches(l))
                .cloned()
                .collect(),
        ))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
