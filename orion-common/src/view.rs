///! Derived view-models served to the dashboard and the objects table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{ApodEntry, RiskLevel, RiskTag};

/// Counts for one calendar day of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: NaiveDate,
    pub total: usize,
    pub hazardous: usize,
}

impl DailyStat {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0,
            hazardous: 0,
        }
    }
}

/// Summary card for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySummary {
    pub total: usize,
    pub hazardous: usize,
    pub closest_km: Option<f64>,
    /// 0..=100, rounded half up
    pub hazardous_percent: u8,
    pub risk_level: RiskLevel,
}

impl Default for TodaySummary {
    fn default() -> Self {
        Self {
            total: 0,
            hazardous: 0,
            closest_km: None,
            hazardous_percent: 0,
            risk_level: RiskLevel::Low,
        }
    }
}

/// Table projection of a near-earth object (first approach only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub name: String,
    /// Empty when the object has no approach
    pub approach_date: String,
    pub miss_distance_km: Option<f64>,
    pub velocity_km_s: Option<f64>,
    pub risk: RiskTag,
}

/// One page of filtered rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableViewModel {
    pub items: Vec<TableRow>,
    /// Row count after filtering, across all pages
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

impl TableViewModel {
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 1,
            page_size,
            can_prev: false,
            can_next: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub data: Vec<usize>,
}

/// Line and donut chart data over a run of days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartViewModel {
    pub categories: Vec<NaiveDate>,
    pub line_series: Vec<ChartSeries>,
    pub donut_series: Vec<ChartSeries>,
    pub total: usize,
    pub total_hazardous: usize,
    pub total_safe: usize,
}

/// Everything the dashboard page renders at once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// `None` when the APOD request failed
    pub apod: Option<ApodEntry>,
    pub summary: TodaySummary,
    pub chart: ChartViewModel,
}
