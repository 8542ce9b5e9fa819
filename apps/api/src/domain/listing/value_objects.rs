use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Identifier of a persisted listing.
///
/// Parsing never reports a syntax problem to the caller: a string that cannot
/// name any listing is simply a listing that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| DomainError::listing_not_found())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ListingId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated input for creating a listing.
///
/// The only way to obtain one is [`NewListing::new`], so every value handed to
/// a repository already satisfies the listing invariants.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewListing {
    #[validate(length(min = 1, message = "Listing Name is Required"))]
    name: String,
    #[validate(length(min = 1, message = "Location missing for Listing"))]
    location: String,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    price: f64,
}

impl NewListing {
    pub fn new(name: String, location: String, price: f64) -> Result<Self, DomainError> {
        let listing = Self {
            name: name.trim().to_string(),
            location: location.trim().to_string(),
            price,
        };
        ensure_finite(Some(price))?;
        listing.validate().map_err(to_domain_error)?;
        Ok(listing)
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
}

/// Validated partial update. Absent fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ListingPatch {
    #[validate(length(min = 1, message = "Listing Name cannot be empty"))]
    name: Option<String>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    location: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    price: Option<f64>,
}

impl ListingPatch {
    pub fn new(
        name: Option<String>,
        location: Option<String>,
        price: Option<f64>,
    ) -> Result<Self, DomainError> {
        if name.is_none() && location.is_none() && price.is_none() {
            return Err(DomainError::ValidationError(
                "At least one of name, location or price is required".into(),
            ));
        }

        let patch = Self {
            name: name.map(|s| s.trim().to_string()),
            location: location.map(|s| s.trim().to_string()),
            price,
        };
        ensure_finite(price)?;
        patch.validate().map_err(to_domain_error)?;
        Ok(patch)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }
}

fn ensure_finite(price: Option<f64>) -> Result<(), DomainError> {
    match price {
        Some(p) if !p.is_finite() => Err(DomainError::ValidationError(
            "Price must be a non-negative number".into(),
        )),
        _ => Ok(()),
    }
}

/// Picks one message out of a validator report, lowest field name first so
/// the result does not depend on map iteration order.
fn to_domain_error(errors: ValidationErrors) -> DomainError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (field, errs) in fields {
        if let Some(err) = errs.first() {
            let message = match &err.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid value for {}", field),
            };
            return DomainError::ValidationError(message);
        }
    }

    DomainError::ValidationError("Invalid listing".into())
}
