///! Stateful objects table
///!
///! Holds the user-editable filter cells, recomputes the view-model on every
///! write and publishes it on a watch channel. Fetches are tagged with a
///! sequence number and only the latest one may replace the rows.

use orion_common::{DaysWindow, RiskFilter, TableRow, TableViewModel};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info};

use super::clock::Clock;
use super::daily::last_n_days;
use super::table::{project_rows, view_of_rows, TableQuery};
use crate::model::nasa::NeoSource;

struct TableState {
    query: TableQuery,
    rows: Vec<TableRow>,
    /// Sequence number of the fetch that produced `rows` (0 = none yet)
    applied_seq: u64,
}

pub struct NeoTableFacade {
    source: Arc<dyn NeoSource>,
    clock: Arc<dyn Clock>,
    state: RwLock<TableState>,
    fetch_seq: AtomicU64,
    view_tx: watch::Sender<TableViewModel>,
}

impl NeoTableFacade {
    /// Create an empty table. Call [`Self::refresh`] to load the first window.
    pub fn new(source: Arc<dyn NeoSource>, clock: Arc<dyn Clock>, page_size: usize) -> Self {
        let query = TableQuery::with_page_size(page_size);
        let (view_tx, _) = watch::channel(TableViewModel::empty(query.page_size));

        Self {
            source,
            clock,
            state: RwLock::new(TableState {
                query,
                rows: Vec::new(),
                applied_seq: 0,
            }),
            fetch_seq: AtomicU64::new(0),
            view_tx,
        }
    }

    /// Latest published view-model
    pub fn view_model(&self) -> TableViewModel {
        self.view_tx.borrow().clone()
    }

    /// Receiver notified after every recomputation
    pub fn subscribe(&self) -> watch::Receiver<TableViewModel> {
        self.view_tx.subscribe()
    }

    pub async fn query(&self) -> TableQuery {
        self.state.read().await.query.clone()
    }

    /// Sequence number of the fetch currently shown
    pub async fn applied_seq(&self) -> u64 {
        self.state.read().await.applied_seq
    }

    pub async fn set_days_window(&self, days: DaysWindow) -> TableViewModel {
        {
            let mut state = self.state.write().await;
            state.query.days = days;
            state.query.page = 1;
            self.publish(&mut state);
        }
        self.refresh().await
    }

    pub async fn set_risk_filter(&self, risk: RiskFilter) -> TableViewModel {
        self.update(|q| {
            q.risk = risk;
            q.page = 1;
        })
        .await
    }

    pub async fn set_search(&self, search: &str) -> TableViewModel {
        self.update(|q| {
            q.search = search.to_string();
            q.page = 1;
        })
        .await
    }

    /// Zero is ignored and leaves the table unchanged.
    pub async fn set_page_size(&self, page_size: usize) -> TableViewModel {
        if page_size == 0 {
            debug!("Ignoring non-positive page size");
            return self.view_model();
        }
        self.update(|q| {
            q.page_size = page_size;
            q.page = 1;
        })
        .await
    }

    pub async fn go_to_page(&self, page: usize) -> TableViewModel {
        self.update(|q| q.page = page).await
    }

    pub async fn go_to_next_page(&self) -> TableViewModel {
        self.update(|q| q.page = q.page.saturating_add(1)).await
    }

    pub async fn go_to_prev_page(&self) -> TableViewModel {
        self.update(|q| q.page = q.page.saturating_sub(1)).await
    }

    /// Re-fetch the current window. A failed fetch empties the table.
    pub async fn refresh(&self) -> TableViewModel {
        let (seq, days) = {
            let state = self.state.read().await;
            (self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1, state.query.days)
        };

        let range = last_n_days(days.days(), self.clock.today());
        let rows = match self.source.fetch_feed(range.start, range.end).await {
            Ok(feed) => {
                let objects = feed.into_objects();
                info!(
                    "Loaded {} near-earth objects for {}..={}",
                    objects.len(),
                    range.start,
                    range.end
                );
                project_rows(&objects)
            }
            Err(e) => {
                error!("Failed to load near-earth objects: {}", e);
                Vec::new()
            }
        };

        let mut state = self.state.write().await;
        if seq != self.fetch_seq.load(Ordering::SeqCst) {
            debug!("Discarding stale fetch #{} ({} days)", seq, days.days());
            return self.view_model();
        }

        state.rows = rows;
        state.applied_seq = seq;
        self.publish(&mut state)
    }

    async fn update(&self, mutate: impl FnOnce(&mut TableQuery)) -> TableViewModel {
        let mut state = self.state.write().await;
        mutate(&mut state.query);
        self.publish(&mut state)
    }

    /// Recompute under the write guard so readers never see a state/view mismatch.
    fn publish(&self, state: &mut TableState) -> TableViewModel {
        let vm = view_of_rows(&state.rows, &state.query);
        state.query.page = vm.page;
        self.view_tx.send_replace(vm.clone());
        vm
    }
}
