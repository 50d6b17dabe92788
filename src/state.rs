use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::booking::BookingService;
use crate::services::store::CourtCatalog;

pub struct AppState {
    pub config: AppConfig,
    pub bookings: BookingService,
    pub courts: Arc<dyn CourtCatalog>,
}
