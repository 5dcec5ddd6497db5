use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::warn;

use super::views::{BrokerSummaryView, OnboardingStep, SummaryView};
use super::PanelError;
use crate::workflows::pipeline::{format_amount, format_percentage, BrokerInfo, SharedGateway};

/// Onboarding steps shown as done; the rest render as pending.
pub const COMPLETED_ONBOARDING_STEPS: usize = 3;
pub const CONTACT_ACTIONS: [&str; 3] = ["Call", "Email", "Chat"];
pub const AI_ASSISTANT_HINT: &str = "Enable AI-powered assistance for loan processing";

#[derive(Debug, Clone)]
struct BrokerSnapshot {
    broker: BrokerInfo,
    workflow_steps: Vec<String>,
}

/// Right panel: broker stats, onboarding checklist and the assistant toggle.
pub struct SummaryPanel {
    gateway: SharedGateway,
    cache: Mutex<Option<BrokerSnapshot>>,
    ai_assistant: AtomicBool,
}

impl SummaryPanel {
    pub fn new(gateway: SharedGateway) -> Self {
        Self {
            gateway,
            cache: Mutex::new(None),
            ai_assistant: AtomicBool::new(true),
        }
    }

    pub async fn load(&self) -> Result<(), PanelError> {
        let fetched = tokio::try_join!(
            self.gateway.fetch_broker_info(),
            self.gateway.fetch_workflow_steps()
        );

        match fetched {
            Ok((broker, workflow_steps)) => {
                *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(BrokerSnapshot {
                    broker,
                    workflow_steps,
                });
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load broker overview");
                Err(err.into())
            }
        }
    }

    pub fn set_ai_assistant(&self, enabled: bool) {
        self.ai_assistant.store(enabled, Ordering::Relaxed);
    }

    pub fn ai_assistant_enabled(&self) -> bool {
        self.ai_assistant.load(Ordering::Relaxed)
    }

    pub fn view(&self) -> SummaryView {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(snapshot) = cache.as_ref() else {
            return SummaryView::Loading;
        };

        let onboarding = snapshot
            .workflow_steps
            .iter()
            .enumerate()
            .map(|(index, name)| OnboardingStep {
                position: index + 1,
                name: name.clone(),
                complete: index < COMPLETED_ONBOARDING_STEPS,
            })
            .collect();

        SummaryView::Ready(BrokerSummaryView {
            name: snapshot.broker.name.clone(),
            deals: snapshot.broker.deals,
            approval_rate: format_percentage(snapshot.broker.approval_rate),
            pending: format_amount(snapshot.broker.pending),
            contact_actions: CONTACT_ACTIONS.to_vec(),
            onboarding,
            ai_assistant_enabled: self.ai_assistant_enabled(),
            ai_assistant_hint: AI_ASSISTANT_HINT,
        })
    }
}
