use super::entity::Listing;
use super::errors::DomainError;
use super::filter::ListingFilter;
use super::value_objects::{ListingId, ListingPatch, NewListing};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Listing>, DomainError>;
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, DomainError>;
    async fn create(&self, input: &NewListing) -> Result<Listing, DomainError>;
    async fn update(
        &self,
        id: ListingId,
        patch: &ListingPatch,
    ) -> Result<Option<Listing>, DomainError>;
    async fn delete(&self, id: ListingId) -> Result<Option<Listing>, DomainError>;
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}
