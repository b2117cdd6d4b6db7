pub mod dashboard;
pub mod neo;

pub use dashboard::DashboardFacade;
