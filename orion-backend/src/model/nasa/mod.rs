pub mod api_client;
pub mod error;
pub mod schema;

pub use api_client::{validate_range, ApodSource, NasaClient, NeoSource, MAX_FEED_WINDOW_DAYS};
pub use error::FeedError;
