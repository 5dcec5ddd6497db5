use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::notifications::NotificationCenter;
use super::store::SelectionStore;
use super::views::{ActionButton, BorrowerDetailView, DetailView, LabeledValue};
use super::PanelError;
use crate::workflows::pipeline::{
    format_amount, status_tone, ActionKind, ActionResult, BorrowerDetail, SharedGateway,
};

pub const PLACEHOLDER_TITLE: &str = "Select a Borrower";
pub const PLACEHOLDER_HINT: &str = "Choose a borrower from the pipeline to view details";
pub const ACTION_FAILED_MESSAGE: &str = "Action failed. Please try again.";

/// Middle panel: renders the active borrower and dispatches workflow actions.
pub struct DetailPanel {
    gateway: SharedGateway,
    store: Arc<SelectionStore>,
    notifications: Arc<Mutex<NotificationCenter>>,
}

impl DetailPanel {
    pub fn new(
        gateway: SharedGateway,
        store: Arc<SelectionStore>,
        notifications: Arc<Mutex<NotificationCenter>>,
    ) -> Self {
        Self {
            gateway,
            store,
            notifications,
        }
    }

    pub fn view(&self) -> DetailView {
        match self.store.active_borrower() {
            Some(borrower) => DetailView::Borrower(Box::new(detail_view(&borrower))),
            None => DetailView::Placeholder {
                title: PLACEHOLDER_TITLE,
                hint: PLACEHOLDER_HINT,
            },
        }
    }

    /// Run `kind` against the active borrower and post the outcome as a notification.
    ///
    /// The displayed record is not refetched afterwards, so status and bucket
    /// stay as they were until the borrower is selected again. If the session
    /// closes before the gateway answers, no notification is posted.
    pub async fn dispatch(&self, kind: ActionKind) -> Result<ActionResult, PanelError> {
        let borrower = self.store.active_borrower().ok_or(PanelError::NoSelection)?;

        let outcome = self.gateway.dispatch_action(kind, &borrower.id).await;
        if self.store.is_closed() {
            debug!(
                borrower = %borrower.id,
                action = kind.key(),
                "session closed while action was in flight"
            );
            return Err(PanelError::SessionClosed);
        }

        let mut notifications = self
            .notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();

        match outcome {
            Ok(result) if result.success => {
                info!(borrower = %borrower.id, action = kind.key(), "action dispatched");
                notifications.success(result.message.clone(), now);
                Ok(result)
            }
            Ok(result) => {
                warn!(
                    borrower = %borrower.id,
                    action = kind.key(),
                    message = %result.message,
                    "backend declined action"
                );
                notifications.failure(ACTION_FAILED_MESSAGE, now);
                Ok(result)
            }
            Err(err) => {
                warn!(borrower = %borrower.id, action = kind.key(), error = %err, "action failed");
                notifications.failure(ACTION_FAILED_MESSAGE, now);
                Err(err.into())
            }
        }
    }
}

fn detail_view(borrower: &BorrowerDetail) -> BorrowerDetailView {
    let loan_summary = vec![
        LabeledValue {
            label: "Employment",
            value: borrower.employment.clone(),
        },
        LabeledValue {
            label: "Income",
            value: format_amount(borrower.income),
        },
        LabeledValue {
            label: "Existing Loan",
            value: format_amount(borrower.existing_loan),
        },
        LabeledValue {
            label: "Credit Score",
            value: borrower.credit_score.to_string(),
        },
        LabeledValue {
            label: "Source of Funds",
            value: borrower.source_of_funds.clone(),
        },
    ];

    BorrowerDetailView {
        id: borrower.id.clone(),
        name: borrower.name.clone(),
        email: borrower.email.clone(),
        phone: borrower.phone.clone(),
        loan_amount: format_amount(borrower.loan_amount()),
        status: borrower.status,
        status_label: borrower.status.label(),
        tone: status_tone(borrower.status),
        risk_heading: format!("Risk Factors Detected ({})", borrower.ai_flags.len()),
        ai_flags: borrower.ai_flags.clone(),
        loan_summary,
        risk_signal: borrower.risk_signal().map(str::to_string),
        actions: ActionKind::ALL
            .into_iter()
            .map(|kind| ActionButton {
                kind,
                label: kind.label(),
            })
            .collect(),
    }
}
