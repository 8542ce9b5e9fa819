use crate::{
    application::listings::service::ListingService,
    domain::listing::repository::ListingRepository,
};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<ListingService>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(repository: Arc<dyn ListingRepository>, request_timeout: Duration) -> Self {
        Self {
            listings: Arc::new(ListingService::new(repository)),
            request_timeout,
        }
    }
}
