///! Near-earth object views
///!
///! Summary card, per-day stats and the filterable objects table, all
///! derived from the NeoWs feed.

pub mod clock;
pub mod daily;
pub mod facade;
pub mod service;
pub mod summary;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, FixedClock, SystemClock};
pub use daily::{chart_view_model, daily_stats_from_feed, last_n_days, DateRange};
pub use facade::NeoTableFacade;
pub use service::NeoService;
pub use summary::{summarize, RiskPolicy};
pub use table::{build_view_model, TableQuery, DEFAULT_PAGE_SIZE};
