use super::dto::{CreateListingRequest, SearchListingsQuery, UpdateListingRequest};
use crate::domain::listing::{
    entity::Listing,
    errors::DomainError,
    filter::ListingFilter,
    repository::ListingRepository,
    value_objects::{ListingId, ListingPatch, NewListing},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Business rules over an injected [`ListingRepository`].
///
/// Inputs are checked here for readable error messages, then again by
/// [`NewListing`] / [`ListingPatch`], and the store applies its own
/// constraints on top.
pub struct ListingService {
    repository: Arc<dyn ListingRepository>,
}

impl ListingService {
    pub fn new(repository: Arc<dyn ListingRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn get_all_listings(&self) -> Result<Vec<Listing>, DomainError> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_listing(&self, id: &str) -> Result<Listing, DomainError> {
        let id = ListingId::parse(id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(DomainError::listing_not_found)
    }

    #[instrument(skip(self, request))]
    pub async fn create_new_listing(
        &self,
        request: CreateListingRequest,
    ) -> Result<Listing, DomainError> {
        let name = required_text(request.name, "name")?;
        let location = required_text(request.location, "location")?;
        let price = request
            .price
            .ok_or_else(|| DomainError::ValidationError("Required field price".into()))?;

        let input = NewListing::new(name, location, price)?;
        let listing = self.repository.create(&input).await?;

        info!(listing_id = %listing.id(), "Listing created");
        Ok(listing)
    }

    #[instrument(skip(self, request))]
    pub async fn update_listing(
        &self,
        id: &str,
        request: UpdateListingRequest,
    ) -> Result<Listing, DomainError> {
        let id = ListingId::parse(id)?;
        let patch = ListingPatch::new(request.name, request.location, request.price)?;

        let listing = self
            .repository
            .update(id, &patch)
            .await?
            .ok_or_else(DomainError::listing_not_found)?;

        info!(listing_id = %id, "Listing updated");
        Ok(listing)
    }

    #[instrument(skip(self))]
    pub async fn delete_listing(&self, id: &str) -> Result<Listing, DomainError> {
        let id = ListingId::parse(id)?;
        let listing = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(DomainError::listing_not_found)?;

        info!(listing_id = %id, "Listing deleted");
        Ok(listing)
    }

    /// Searches by any combination of name, location and maximum price.
    /// With no filters at all every listing is returned.
    #[instrument(skip(self))]
    pub async fn search_listings(
        &self,
        query: SearchListingsQuery,
    ) -> Result<Vec<Listing>, DomainError> {
        let max_price = parse_price(query.price.as_deref())?;
        let filter = ListingFilter::new(query.name, query.location, max_price);

        if filter.is_empty() {
            debug!("No search filters given, returning all listings");
            return self.repository.find_all().await;
        }

        self.repository.search(&filter).await
    }

    pub async fn health(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, DomainError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DomainError::ValidationError(format!("Required field {}", field)))
}

fn parse_price(raw: Option<&str>) -> Result<Option<f64>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(Some(price)),
        _ => Err(DomainError::ValidationError(
            "price must be a non-negative number".into(),
        )),
    }
}
