///! Per-day bucketing of a feed and the dashboard chart built from it
use chrono::{Days, NaiveDate};
use orion_common::{ChartSeries, ChartViewModel, DailyStat, Feed};

use crate::model::nasa::MAX_FEED_WINDOW_DAYS;

/// Inclusive calendar-day range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day from `start` to `end`; empty when inverted
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    pub fn len(&self) -> usize {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clamp a requested day count to what one feed request can cover.
pub fn clamp_days(n: u32) -> u32 {
    n.clamp(1, MAX_FEED_WINDOW_DAYS as u32)
}

/// `[today - (n-1), today]` with `n` clamped to `1..=7`
pub fn last_n_days(n: u32, today: NaiveDate) -> DateRange {
    let n = clamp_days(n);
    let start = today
        .checked_sub_days(Days::new(u64::from(n - 1)))
        .unwrap_or(NaiveDate::MIN);
    DateRange::new(start, today)
}

/// One entry per day of `range`, ascending, zero-filled for absent days
pub fn daily_stats_from_feed(feed: &Feed, range: DateRange) -> Vec<DailyStat> {
    range
        .days()
        .map(|day| {
            let objects = feed.objects_on(day);
            DailyStat {
                date: day,
                total: objects.len(),
                hazardous: objects.iter().filter(|o| o.is_hazardous).count(),
            }
        })
        .collect()
}

/// Zero-filled stats, used when the feed could not be fetched
pub fn empty_stats(range: DateRange) -> Vec<DailyStat> {
    range.days().map(DailyStat::empty).collect()
}

pub fn chart_view_model(stats: &[DailyStat]) -> ChartViewModel {
    let totals: Vec<usize> = stats.iter().map(|s| s.total).collect();
    let hazardous: Vec<usize> = stats.iter().map(|s| s.hazardous).collect();

    let total: usize = totals.iter().sum();
    let total_hazardous: usize = hazardous.iter().sum();
    let total_safe = total.saturating_sub(total_hazardous);

    ChartViewModel {
        categories: stats.iter().map(|s| s.date).collect(),
        line_series: vec![
            ChartSeries {
                label: "Total objects".to_string(),
                data: totals,
            },
            ChartSeries {
                label: "Hazardous".to_string(),
                data: hazardous,
            },
        ],
        donut_series: vec![
            ChartSeries {
                label: "Hazardous".to_string(),
                data: vec![total_hazardous],
            },
            ChartSeries {
                label: "Normal".to_string(),
                data: vec![total_safe],
            },
        ],
        total,
        total_hazardous,
        total_safe,
    }
}
