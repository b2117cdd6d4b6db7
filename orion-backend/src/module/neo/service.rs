use chrono::NaiveDate;
use orion_common::{DailyStat, NearEarthObject, TodaySummary};
use std::sync::Arc;

use super::clock::Clock;
use super::daily::{daily_stats_from_feed, last_n_days, DateRange};
use super::facade::NeoTableFacade;
use super::summary::{summarize, RiskPolicy};
use crate::model::nasa::{validate_range, FeedError, NeoSource};

/// Feed-backed queries. Errors are returned as-is; callers decide on fallbacks.
#[derive(Clone)]
pub struct NeoService {
    source: Arc<dyn NeoSource>,
    clock: Arc<dyn Clock>,
    policy: RiskPolicy,
}

impl NeoService {
    pub fn new(source: Arc<dyn NeoSource>, clock: Arc<dyn Clock>, policy: RiskPolicy) -> Self {
        Self {
            source,
            clock,
            policy,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Stateful objects table backed by the same source and clock
    pub fn table_facade(&self, page_size: usize) -> NeoTableFacade {
        NeoTableFacade::new(self.source.clone(), self.clock.clone(), page_size)
    }

    pub async fn today_objects(&self) -> Result<Vec<NearEarthObject>, FeedError> {
        let today = self.today();
        let feed = self.source.fetch_feed(today, today).await?;
        Ok(feed.objects_on(today).to_vec())
    }

    /// All objects in `[start, end]`, flattened in ascending day order
    pub async fn objects_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NearEarthObject>, FeedError> {
        let feed = self.source.fetch_feed(start, end).await?;
        Ok(feed.into_objects())
    }

    pub async fn today_summary(&self) -> Result<TodaySummary, FeedError> {
        let objects = self.today_objects().await?;
        Ok(summarize(&objects, &self.policy))
    }

    pub async fn daily_stats(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyStat>, FeedError> {
        validate_range(start, end)?;
        let feed = self.source.fetch_feed(start, end).await?;
        Ok(daily_stats_from_feed(&feed, DateRange::new(start, end)))
    }

    /// Stats for the last `n` days including today, `n` clamped to `1..=7`
    pub async fn daily_stats_last_n_days(&self, n: u32) -> Result<Vec<DailyStat>, FeedError> {
        let range = last_n_days(n, self.today());
        self.daily_stats(range.start, range.end).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::neo::clock::FixedClock;
    use crate::module::neo::testing::{date, feed_of, neo, neo_with_distances, FakeSource};
    use orion_common::RiskLevel;

    fn service(source: FakeSource) -> (NeoService, Arc<FakeSource>) {
        let source = Arc::new(source);
        let service = NeoService::new(
            source.clone(),
            Arc::new(FixedClock(date("2025-12-10"))),
            RiskPolicy::default(),
        );
        (service, source)
    }

    #[tokio::test]
    async fn test_today_summary_uses_only_today() {
        let (service, _) = service(FakeSource::new(feed_of(vec![
            (
                "2025-12-10",
                vec![
                    neo_with_distances("Asteroid 1", true, &["5000.5", "3000.2"]),
                    neo("Asteroid 2", false),
                ],
            ),
            ("2025-12-09", vec![neo("Yesterday", true)]),
        ])));

        let summary = service.today_summary().await.unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.hazardous, 1);
        assert_eq!(summary.closest_km, Some(3000.2));
        assert_eq!(summary.hazardous_percent, 50);
        assert_eq!(summary.risk_level, RiskLevel::High);
    }

    #[tokio::test]
    async fn test_daily_stats_last_n_days_clamps_and_zero_fills() {
        let (service, source) = service(FakeSource::new(feed_of(vec![(
            "2025-12-08",
            vec![neo("a", true), neo("b", false)],
        )])));

        let stats = service.daily_stats_last_n_days(100).await.unwrap();
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].date, date("2025-12-04"));
        assert_eq!(stats[6].date, date("2025-12-10"));
        assert_eq!(stats[4].total, 2);
        assert_eq!(stats[4].hazardous, 1);
        assert_eq!(source.call_count(), 1);

        assert_eq!(service.daily_stats_last_n_days(0).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_range_is_rejected_without_fetching() {
        let (service, source) = service(FakeSource::new(feed_of(vec![])));
        let err = service
            .daily_stats(date("2025-12-01"), date("2025-12-10"))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::InvalidRange { .. }));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_table_facade_shares_source() {
        let (service, source) = service(FakeSource::new(feed_of(vec![(
            "2025-12-10",
            vec![neo("a", true), neo("b", false)],
        )])));

        let table = service.table_facade(1);
        let vm = table.refresh().await;
        assert_eq!((vm.total, vm.total_pages), (2, 2));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let (service, _) = service(FakeSource::failing());
        assert!(service.today_summary().await.unwrap_err().is_transport());
        assert!(service.objects_range(date("2025-12-09"), date("2025-12-10")).await.is_err());
    }
}
