//! HTTP handlers for the read-only JSON API.
//!
//! Handlers delegate to the NEO service and dashboard facade. Everything
//! except `/api/apod` degrades to empty values instead of failing.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use orion_common::{
    ApodEntry, ChartViewModel, DashboardSnapshot, DaysWindow, RiskFilter, TableViewModel, TodaySummary,
};
use tracing::error;

use super::dto::{DailyQuery, ObjectsQuery, StatsResponse};
use super::error::AppError;
use super::state::AppState;
use crate::module::dashboard::CHART_DAYS;
use crate::module::neo::{build_view_model, last_n_days, TableQuery};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /stats
pub async fn stats() -> Json<StatsResponse> {
    Json(StatsResponse {
        status: "running".to_string(),
        service: "orion-backend".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/apod
///
/// The only endpoint that reports upstream failures (502).
pub async fn get_apod(State(state): State<AppState>) -> HandlerResult<ApodEntry> {
    let apod = state.dashboard.try_apod().await.inspect_err(|e| {
        error!("Failed to fetch APOD: {}", e);
    })?;
    Ok(Json(apod))
}

/// GET /api/neo/summary
pub async fn get_summary(State(state): State<AppState>) -> Json<TodaySummary> {
    Json(state.dashboard.summary().await)
}

/// GET /api/neo/daily?days=N
///
/// `days` defaults to 7 and is clamped to `1..=7`.
pub async fn get_daily(State(state): State<AppState>, Query(query): Query<DailyQuery>) -> Json<ChartViewModel> {
    let days = query.days.unwrap_or(CHART_DAYS);
    Json(state.dashboard.daily_chart(days).await)
}

/// GET /api/dashboard
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(state.dashboard.snapshot().await)
}

/// Validate raw query parameters into a [`TableQuery`].
pub fn table_query(params: ObjectsQuery, default_page_size: usize) -> Result<TableQuery, AppError> {
    let days = match params.days {
        Some(days) => DaysWindow::try_from(days).map_err(AppError::BadRequest)?,
        None => DaysWindow::default(),
    };
    let risk = match params.risk.as_deref() {
        Some(risk) => risk.parse::<RiskFilter>().map_err(AppError::BadRequest)?,
        None => RiskFilter::All,
    };
    let page_size = params.page_size.unwrap_or(default_page_size);
    if page_size == 0 {
        return Err(AppError::BadRequest("pageSize must be positive".to_string()));
    }

    Ok(TableQuery {
        days,
        risk,
        search: params.search.unwrap_or_default(),
        page: params.page.unwrap_or(1),
        page_size,
    })
}

/// GET /api/neo/objects?days=&risk=&search=&page=&pageSize=
pub async fn list_objects(
    State(state): State<AppState>,
    Query(params): Query<ObjectsQuery>,
) -> HandlerResult<TableViewModel> {
    let query = table_query(params, state.default_page_size)?;

    let range = last_n_days(query.days.days(), state.neo.today());
    let objects = state
        .neo
        .objects_range(range.start, range.end)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to load near-earth objects: {}", e);
            Vec::new()
        });

    Ok(Json(build_view_model(&objects, &query)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_query_defaults() {
        let query = table_query(ObjectsQuery::default(), 15).unwrap();
        assert_eq!(query, TableQuery::default());
    }

    #[test]
    fn test_table_query_rejects_bad_values() {
        let bad_days = ObjectsQuery {
            days: Some(5),
            ..Default::default()
        };
        assert!(matches!(table_query(bad_days, 15), Err(AppError::BadRequest(_))));

        let bad_risk = ObjectsQuery {
            risk: Some("scary".into()),
            ..Default::default()
        };
        assert!(table_query(bad_risk, 15).is_err());

        let zero_size = ObjectsQuery {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(table_query(zero_size, 15).is_err());
    }
}
