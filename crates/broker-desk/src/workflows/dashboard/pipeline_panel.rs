use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use super::store::{SelectionStore, StoreUpdate};
use super::views::{BorrowerCard, PipelineBoard, PipelineView, TabView};
use super::PanelError;
use crate::workflows::pipeline::{
    format_amount, status_tone, BorrowerId, PipelineData, PipelineTab, SharedGateway,
};

pub const EMPTY_APPROVED_MESSAGE: &str = "No approved loans yet";
pub const EMPTY_BUCKET_MESSAGE: &str = "No borrowers in this stage";

/// Left panel: bucketed borrower list, tab switching and borrower selection.
pub struct PipelinePanel {
    gateway: SharedGateway,
    store: Arc<SelectionStore>,
    cache: Mutex<Option<PipelineData>>,
}

impl PipelinePanel {
    pub fn new(gateway: SharedGateway, store: Arc<SelectionStore>) -> Self {
        Self {
            gateway,
            store,
            cache: Mutex::new(None),
        }
    }

    /// Fetch the pipeline once; later calls reuse the cached snapshot.
    pub async fn load(&self) -> Result<(), PanelError> {
        if self.data().is_some() {
            return Ok(());
        }
        self.refresh().await
    }

    /// Fetch the pipeline unconditionally, replacing the cache on success.
    pub async fn refresh(&self) -> Result<(), PanelError> {
        match self.gateway.fetch_pipeline().await {
            Ok(data) => {
                let duplicates = data.duplicate_ids();
                if !duplicates.is_empty() {
                    warn!(?duplicates, "pipeline lists borrowers more than once");
                }
                info!(
                    new = data.new.len(),
                    in_review = data.in_review.len(),
                    approved = data.approved.len(),
                    "pipeline loaded"
                );
                *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(data);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load pipeline");
                Err(err.into())
            }
        }
    }

    pub fn data(&self) -> Option<PipelineData> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn switch_tab(&self, tab: PipelineTab) -> StoreUpdate {
        self.store.set_active_tab(tab)
    }

    /// Fetch a borrower's full record and make it the active selection.
    ///
    /// When selections overlap only the most recently started one lands.
    pub async fn select_borrower(&self, id: &BorrowerId) -> Result<StoreUpdate, PanelError> {
        if self.store.is_closed() {
            return Err(PanelError::SessionClosed);
        }

        let ticket = self.store.begin_selection();
        match self.gateway.fetch_borrower_detail(id).await {
            Ok(detail) => Ok(self.store.complete_selection(ticket, detail)),
            Err(err) => {
                warn!(borrower = %id, error = %err, "failed to load borrower detail");
                Err(err.into())
            }
        }
    }

    pub fn view(&self) -> PipelineView {
        let Some(data) = self.data() else {
            return PipelineView::Loading;
        };

        let state = self.store.snapshot();
        let selected = state.active_borrower.as_ref().map(|borrower| &borrower.id);

        let tabs = PipelineTab::ALL
            .into_iter()
            .map(|tab| TabView {
                tab,
                label: format!("{} ({})", tab.label(), data.count(tab)),
                count: data.count(tab),
                active: tab == state.active_tab,
            })
            .collect();

        let cards: Vec<BorrowerCard> = data
            .bucket(state.active_tab)
            .iter()
            .map(|borrower| BorrowerCard {
                id: borrower.id.clone(),
                name: borrower.name.clone(),
                amount: format_amount(borrower.amount),
                loan_type: borrower.loan_type.clone(),
                status: borrower.status,
                status_label: borrower.status.label(),
                tone: status_tone(borrower.status),
                selected: selected == Some(&borrower.id),
            })
            .collect();

        let empty_state = match (cards.is_empty(), state.active_tab) {
            (false, _) => None,
            (true, PipelineTab::Approved) => Some(EMPTY_APPROVED_MESSAGE),
            (true, _) => Some(EMPTY_BUCKET_MESSAGE),
        };

        PipelineView::Ready(PipelineBoard {
            active_tab: state.active_tab,
            tabs,
            cards,
            empty_state,
        })
    }
}
