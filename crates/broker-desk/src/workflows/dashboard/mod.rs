//! Dashboard session: selection state, the three panels and their view models.
//!
//! A session owns one [`SelectionStore`] and hands it by reference to the
//! panels. Panel failures come back as [`PanelError`] values; none of them
//! end the session.

pub mod detail_panel;
pub mod notifications;
pub mod pipeline_panel;
pub mod store;
pub mod summary_panel;
pub mod views;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};

use crate::workflows::pipeline::{
    ActionKind, ActionResult, BorrowerId, GatewayError, PipelineTab, SharedGateway,
};

pub use detail_panel::DetailPanel;
pub use notifications::{Notification, NotificationCenter, NotificationVariant};
pub use pipeline_panel::PipelinePanel;
pub use store::{SelectionState, SelectionStore, SelectionTicket, StoreUpdate};
pub use summary_panel::SummaryPanel;
pub use views::{
    ActionButton, BorrowerCard, BorrowerDetailView, BrokerSummaryView, DashboardView, DetailView,
    LabeledValue, OnboardingStep, PipelineBoard, PipelineView, SummaryView, TabView,
};

/// Error surfaced to the view layer by a panel interaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("no borrower selected")]
    NoSelection,
    #[error("dashboard session closed")]
    SessionClosed,
}

/// Result of the initial panel loads when a session mounts.
#[derive(Debug)]
pub struct MountReport {
    pub pipeline: Result<(), PanelError>,
    pub summary: Result<(), PanelError>,
}

impl MountReport {
    pub fn is_complete(&self) -> bool {
        self.pipeline.is_ok() && self.summary.is_ok()
    }
}

/// One broker's dashboard, from mount until [`DashboardSession::close`].
pub struct DashboardSession {
    store: Arc<SelectionStore>,
    notifications: Arc<Mutex<NotificationCenter>>,
    pipeline: PipelinePanel,
    detail: DetailPanel,
    summary: SummaryPanel,
}

impl DashboardSession {
    pub fn new(gateway: SharedGateway, notification_ttl: Duration) -> Self {
        let store = Arc::new(SelectionStore::new());
        let notifications = Arc::new(Mutex::new(NotificationCenter::new(notification_ttl)));

        Self {
            pipeline: PipelinePanel::new(gateway.clone(), store.clone()),
            detail: DetailPanel::new(gateway.clone(), store.clone(), notifications.clone()),
            summary: SummaryPanel::new(gateway),
            store,
            notifications,
        }
    }

    /// Load the pipeline and broker overview concurrently.
    pub async fn mount(&self) -> MountReport {
        let (pipeline, summary) = tokio::join!(self.pipeline.load(), self.summary.load());
        MountReport { pipeline, summary }
    }

    pub fn store(&self) -> &Arc<SelectionStore> {
        &self.store
    }

    pub fn pipeline(&self) -> &PipelinePanel {
        &self.pipeline
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn summary(&self) -> &SummaryPanel {
        &self.summary
    }

    pub fn switch_tab(&self, tab: PipelineTab) -> StoreUpdate {
        self.pipeline.switch_tab(tab)
    }

    pub async fn select_borrower(&self, id: &BorrowerId) -> Result<StoreUpdate, PanelError> {
        self.pipeline.select_borrower(id).await
    }

    pub async fn dispatch(&self, kind: ActionKind) -> Result<ActionResult, PanelError> {
        if self.store.is_closed() {
            return Err(PanelError::SessionClosed);
        }
        self.detail.dispatch(kind).await
    }

    pub fn notifications(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active(now)
    }

    pub fn dismiss_notification(&self, id: u64) -> bool {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .dismiss(id)
    }

    pub fn render(&self, now: DateTime<Utc>) -> DashboardView {
        DashboardView {
            pipeline: self.pipeline.view(),
            detail: self.detail.view(),
            summary: self.summary.view(),
            notifications: self.notifications(now),
        }
    }

    /// Tear the session down; fetches still in flight will not touch the store.
    pub fn close(&self) {
        self.store.close();
    }
}
