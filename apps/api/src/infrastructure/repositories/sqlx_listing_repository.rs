use crate::domain::listing::{
    entity::Listing,
    errors::DomainError,
    filter::ListingFilter,
    repository::ListingRepository,
    value_objects::{ListingId, ListingPatch, NewListing},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

const LISTING_COLUMNS: &str = "id, name, location, price, version, created_at, updated_at";

#[derive(FromRow)]
struct ListingRow {
    id: Uuid,
    name: String,
    location: String,
    price: f64,
    version: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(r: ListingRow) -> Self {
        Listing::hydrate(
            ListingId::from(r.id),
            r.name,
            r.location,
            r.price,
            r.version,
            r.created_at,
            r.updated_at,
        )
    }
}

/// Maps a driver error onto the domain taxonomy.
///
/// Constraint violations mean the row itself was invalid and come back as
/// validation errors; everything else is an infrastructure failure whose
/// detail stays in the logs.
fn map_sqlx_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        match code.as_deref() {
            // check_violation, not_null_violation
            Some("23514") | Some("23502") => {
                let message = match db_err.constraint() {
                    Some("listings_name_check") => "Listing Name is Required",
                    Some("listings_location_check") => "Location missing for Listing",
                    Some("listings_price_check") => "Price must be a non-negative number",
                    _ => "Listing violates a storage constraint",
                };
                return DomainError::ValidationError(message.into());
            }
            _ => {}
        }
    }

    error!("{} failed: {}", context, err);
    DomainError::InfrastructureError(format!("{}: {}", context, err))
}

/// Escapes `%`, `_` and `\` so user text is matched literally by ILIKE.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn apply_search_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &ListingFilter) {
    qb.push(" WHERE TRUE");

    if let Some(name) = &filter.name {
        debug!("Filtering by name: {}", name);
        qb.push(" AND name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }

    if let Some(location) = &filter.location {
        debug!("Filtering by location: {}", location);
        qb.push(" AND lower(location) = lower(")
            .push_bind(location.clone())
            .push(")");
    }

    if let Some(max_price) = filter.max_price {
        debug!("Filtering by max price: {}", max_price);
        qb.push(" AND price <= ").push_bind(max_price);
    }
}

pub struct SqlxListingRepository {
    pub pool: PgPool,
}

impl SqlxListingRepository {
    /// Creates a new instance of the repository with the provided database pool.
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxListingRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for SqlxListingRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Listing>, DomainError> {
        let rows = sqlx::query_as::<_, ListingRow>(&format!(
            "SELECT {} FROM listings ORDER BY created_at DESC, id DESC",
            LISTING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Fetching listings", e))?;

        debug!("Retrieved {} listings", rows.len());
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    #[instrument(skip(self), fields(listing_id = %id))]
    async fn find_by_id(&self, id: ListingId) -> Result<Option<Listing>, DomainError> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            "SELECT {} FROM listings WHERE id = $1",
            LISTING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Fetching listing", e))?;

        Ok(row.map(Listing::from))
    }

    /// Inserts a listing under a freshly generated id.
    ///
    /// The table's `NOT NULL` and `CHECK` constraints re-enforce the listing
    /// invariants for any writer, not just this service.
    #[instrument(skip(self, input), fields(name = %input.name()))]
    async fn create(&self, input: &NewListing) -> Result<Listing, DomainError> {
        let id = ListingId::generate();

        let row = sqlx::query_as::<_, ListingRow>(&format!(
            "INSERT INTO listings (id, name, location, price) VALUES ($1, $2, $3, $4) RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(input.name())
        .bind(input.location())
        .bind(input.price())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Creating listing", e))?;

        info!("Successfully created listing {}", id);
        Ok(Listing::from(row))
    }

    /// Applies a partial update in a single statement and bumps `version`.
    #[instrument(skip(self, patch), fields(listing_id = %id))]
    async fn update(
        &self,
        id: ListingId,
        patch: &ListingPatch,
    ) -> Result<Option<Listing>, DomainError> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            r#"UPDATE listings
               SET name = COALESCE($2, name),
                   location = COALESCE($3, location),
                   price = COALESCE($4, price),
                   version = version + 1,
                   updated_at = now()
               WHERE id = $1
               RETURNING {}"#,
            LISTING_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(patch.name())
        .bind(patch.location())
        .bind(patch.price())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Updating listing", e))?;

        if row.is_some() {
            info!("Updated listing {}", id);
        }
        Ok(row.map(Listing::from))
    }

    #[instrument(skip(self), fields(listing_id = %id))]
    async fn delete(&self, id: ListingId) -> Result<Option<Listing>, DomainError> {
        let row = sqlx::query_as::<_, ListingRow>(&format!(
            "DELETE FROM listings WHERE id = $1 RETURNING {}",
            LISTING_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Deleting listing", e))?;

        if row.is_some() {
            info!("Deleted listing {}", id);
        }
        Ok(row.map(Listing::from))
    }

    #[instrument(skip(self))]
    async fn search(&self, filter: &ListingFilter) -> Result<Vec<Listing>, DomainError> {
        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM listings", LISTING_COLUMNS));
        apply_search_filters(&mut qb, filter);
        qb.push(" ORDER BY created_at DESC, id DESC");

        let rows = qb
            .build_query_as::<ListingRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Searching listings", e))?;

        debug!("Search completed successfully, found {} results", rows.len());
        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| map_sqlx_error("Health check", e))
    }
}
