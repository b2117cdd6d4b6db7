///! Dashboard page: APOD card, today's summary and the weekly chart
///!
///! Each part degrades on its own. A failed upstream call is logged and
///! replaced by an empty value, never surfaced to the caller.

use orion_common::{ApodEntry, ChartViewModel, DashboardSnapshot, TodaySummary};
use std::sync::Arc;
use tracing::error;

use super::neo::daily::{chart_view_model, empty_stats, last_n_days};
use super::neo::NeoService;
use crate::model::nasa::{ApodSource, FeedError};

/// Days covered by the dashboard chart
pub const CHART_DAYS: u32 = 7;

#[derive(Clone)]
pub struct DashboardFacade {
    neo: NeoService,
    apod: Arc<dyn ApodSource>,
}

impl DashboardFacade {
    pub fn new(neo: NeoService, apod: Arc<dyn ApodSource>) -> Self {
        Self { neo, apod }
    }

    pub async fn try_apod(&self) -> Result<ApodEntry, FeedError> {
        self.apod.fetch_apod().await
    }

    pub async fn apod(&self) -> Option<ApodEntry> {
        match self.try_apod().await {
            Ok(apod) => Some(apod),
            Err(e) => {
                error!("Failed to fetch APOD: {}", e);
                None
            }
        }
    }

    pub async fn summary(&self) -> TodaySummary {
        self.neo.today_summary().await.unwrap_or_else(|e| {
            error!("Failed to fetch NEO summary: {}", e);
            TodaySummary::default()
        })
    }

    pub async fn daily_chart(&self, days: u32) -> ChartViewModel {
        let stats = match self.neo.daily_stats_last_n_days(days).await {
            Ok(stats) => stats,
            Err(e) => {
                error!("Failed to fetch NEO daily stats: {}", e);
                empty_stats(last_n_days(days, self.neo.today()))
            }
        };
        chart_view_model(&stats)
    }

    /// Fetch all three parts concurrently.
    pub async fn snapshot(&self) -> DashboardSnapshot {
        let (apod, summary, chart) =
            futures::join!(self.apod(), self.summary(), self.daily_chart(CHART_DAYS));

        DashboardSnapshot { apod, summary, chart }
    }
}
