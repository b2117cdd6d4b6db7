pub mod types;
pub mod view;

pub use types::{
    ApodEntry, CloseApproach, DaysWindow, DiameterRange, Feed, MediaType, NearEarthObject,
    RiskFilter, RiskLevel, RiskTag,
};
pub use view::{
    ChartSeries, ChartViewModel, DailyStat, DashboardSnapshot, TableRow, TableViewModel,
    TodaySummary,
};
