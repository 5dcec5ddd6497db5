use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::workflows::pipeline::{BorrowerDetail, PipelineTab};

/// Selection state owned by one dashboard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    pub active_borrower: Option<BorrowerDetail>,
    pub active_tab: PipelineTab,
}

/// Sequence number identifying one borrower-selection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SelectionTicket(u64);

/// What happened to a write submitted to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreUpdate {
    Applied,
    /// A newer selection began after this ticket was issued.
    Stale,
    /// The session ended before the write arrived.
    Closed,
}

/// Session-scoped holder of the active borrower and tab.
///
/// Views subscribe through [`SelectionStore::subscribe`] and re-render on
/// change. Writes are last-wins; the store never checks that the active
/// borrower is present in any pipeline bucket.
#[derive(Debug)]
pub struct SelectionStore {
    state: watch::Sender<SelectionState>,
    latest_ticket: AtomicU64,
    closed: AtomicBool,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SelectionState::default());
        Self {
            state,
            latest_ticket: AtomicU64::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> SelectionState {
        self.state.borrow().clone()
    }

    pub fn active_borrower(&self) -> Option<BorrowerDetail> {
        self.state.borrow().active_borrower.clone()
    }

    pub fn active_tab(&self) -> PipelineTab {
        self.state.borrow().active_tab
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state.subscribe()
    }

    /// Replace the active borrower, invalidating any selection still in flight.
    pub fn set_active_borrower(&self, borrower: Option<BorrowerDetail>) -> StoreUpdate {
        self.write("active_borrower", |state| {
            self.latest_ticket.fetch_add(1, Ordering::AcqRel);
            state.active_borrower = borrower;
            true
        })
    }

    pub fn set_active_tab(&self, tab: PipelineTab) -> StoreUpdate {
        self.write("active_tab", |state| {
            let changed = state.active_tab != tab;
            state.active_tab = tab;
            changed
        })
    }

    pub fn clear_selection(&self) -> StoreUpdate {
        self.set_active_borrower(None)
    }

    /// Start a selection whose result will arrive asynchronously.
    pub fn begin_selection(&self) -> SelectionTicket {
        SelectionTicket(self.latest_ticket.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Apply a fetched borrower only if no newer selection has started since `ticket`.
    pub fn complete_selection(
        &self,
        ticket: SelectionTicket,
        borrower: BorrowerDetail,
    ) -> StoreUpdate {
        let mut stale = false;
        let update = self.write("active_borrower", |state| {
            if self.latest_ticket.load(Ordering::Acquire) != ticket.0 {
                stale = true;
                return false;
            }
            state.active_borrower = Some(borrower);
            true
        });

        if stale {
            debug!(ticket = ticket.0, "discarding superseded selection");
            return StoreUpdate::Stale;
        }
        update
    }

    /// End the session; later writes are dropped.
    pub fn close(&self) {
        self.state.send_if_modified(|_| {
            self.closed.store(true, Ordering::Release);
            false
        });
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Run `apply` under the channel lock so the closed flag and selection
    /// tickets cannot change between the check and the write.
    fn write(
        &self,
        field: &'static str,
        apply: impl FnOnce(&mut SelectionState) -> bool,
    ) -> StoreUpdate {
        let mut closed = false;
        self.state.send_if_modified(|state| {
            if self.closed.load(Ordering::Acquire) {
                closed = true;
                return false;
            }
            apply(state)
        });

        if closed {
            debug!(field, "ignoring write to closed selection store");
            StoreUpdate::Closed
        } else {
            StoreUpdate::Applied
        }
    }
}
