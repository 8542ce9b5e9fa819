use crate::domain::listing::entity::Listing;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// External projection of a listing. Storage bookkeeping is left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListingDto {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub location: String,
}

impl From<&Listing> for ListingDto {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id().as_uuid(),
            name: listing.name().to_string(),
            price: listing.price(),
            location: listing.location().to_string(),
        }
    }
}

pub fn to_dto(listing: &Listing) -> ListingDto {
    ListingDto::from(listing)
}

pub fn to_dtos(listings: &[Listing]) -> Vec<ListingDto> {
    listings.iter().map(ListingDto::from).collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateListingRequest {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub location: Option<String>,
    #[ts(optional)]
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateListingRequest {
    #[ts(optional)]
    pub name: Option<String>,
    #[ts(optional)]
    pub location: Option<String>,
    #[ts(optional)]
    pub price: Option<f64>,
}

/// Raw search parameters. `price` stays text until the service parses it so
/// a malformed value gets the same error body as every other validation
/// failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchListingsQuery {
    pub name: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
}
