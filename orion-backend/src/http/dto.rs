//! Query parameters and response bodies that only exist at the HTTP edge.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyQuery {
    pub days: Option<u32>,
}

/// `GET /api/neo/objects` parameters; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectsQuery {
    pub days: Option<u32>,
    pub risk: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
