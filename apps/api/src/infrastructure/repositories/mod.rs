pub mod in_memory_listing_repository;
pub mod sqlx_listing_repository;
