///! Objects table: projection, filtering and pagination
///!
///! Pure functions over in-memory rows. The stateful side lives in
///! [`super::facade::NeoTableFacade`].

use orion_common::{DaysWindow, NearEarthObject, RiskFilter, RiskTag, TableRow, TableViewModel};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 15;

/// Full filter state of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableQuery {
    pub days: DaysWindow,
    pub risk: RiskFilter,
    pub search: String,
    /// 1-based, clamped when the view-model is built
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            days: DaysWindow::One,
            risk: RiskFilter::All,
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TableQuery {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            ..Self::default()
        }
    }
}

/// Project an object onto its first approach.
pub fn project_row(object: &NearEarthObject) -> TableRow {
    let first = object.first_approach();

    TableRow {
        name: object.name.clone(),
        approach_date: first.map(|a| a.date.clone()).unwrap_or_default(),
        miss_distance_km: first.and_then(|a| a.miss_distance_km),
        velocity_km_s: first.and_then(|a| a.relative_velocity_km_s),
        risk: RiskTag::from(object.is_hazardous),
    }
}

pub fn project_rows(objects: &[NearEarthObject]) -> Vec<TableRow> {
    objects.iter().map(project_row).collect()
}

/// Risk filter first, then a case-insensitive substring match on name or
/// approach date. A blank search term matches every row.
pub fn filter_rows(rows: &[TableRow], risk: RiskFilter, search: &str) -> Vec<TableRow> {
    let term = search.trim().to_lowercase();

    rows.iter()
        .filter(|row| risk.matches(row.risk))
        .filter(|row| {
            term.is_empty()
                || row.name.to_lowercase().contains(&term)
                || row.approach_date.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Slice one page out of `rows`, clamping `page` into `1..=total_pages`.
pub fn paginate(rows: Vec<TableRow>, page: usize, page_size: usize) -> TableViewModel {
    let page_size = page_size.max(1);
    let total = rows.len();
    let total_pages = total_pages(total, page_size);
    let page = page.clamp(1, total_pages);

    let items = rows
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    TableViewModel {
        items,
        total,
        page,
        total_pages,
        page_size,
        can_prev: page > 1,
        can_next: page < total_pages,
    }
}

/// Filter and paginate already projected rows.
pub fn view_of_rows(rows: &[TableRow], query: &TableQuery) -> TableViewModel {
    let filtered = filter_rows(rows, query.risk, &query.search);
    paginate(filtered, query.page, query.page_size)
}

/// Whole pipeline from raw objects.
pub fn build_view_model(objects: &[NearEarthObject], query: &TableQuery) -> TableViewModel {
    view_of_rows(&project_rows(objects), query)
}
