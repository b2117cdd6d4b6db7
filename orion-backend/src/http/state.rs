//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::BackendConfig;
use crate::model::nasa::{ApodSource, NeoSource};
use crate::module::neo::{Clock, NeoService};
use crate::module::DashboardFacade;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub neo: NeoService,
    pub dashboard: DashboardFacade,
    pub default_page_size: usize,
}

impl AppState {
    pub fn new(
        neo_source: Arc<dyn NeoSource>,
        apod_source: Arc<dyn ApodSource>,
        clock: Arc<dyn Clock>,
        config: &BackendConfig,
    ) -> Self {
        let neo = NeoService::new(neo_source, clock, config.risk);
        let dashboard = DashboardFacade::new(neo.clone(), apod_source);

        Self {
            neo,
            dashboard,
            default_page_size: config.table.default_page_size,
        }
    }
}
