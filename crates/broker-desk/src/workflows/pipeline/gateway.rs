use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::{
    ActionKind, ActionResult, BorrowerDetail, BorrowerId, BrokerInfo, DomainError, LoanStatus,
    PipelineData,
};
use super::legacy::LegacyMockGateway;
use super::strict::StrictGateway;

/// Boundary between dashboard intent and backend effects.
///
/// Implementations must be safe to share across panels; every call is
/// independent and nothing coordinates two dispatches for the same borrower.
#[async_trait]
pub trait ActionGateway: Send + Sync {
    async fn fetch_pipeline(&self) -> Result<PipelineData, GatewayError>;

    async fn fetch_borrower_detail(&self, id: &BorrowerId) -> Result<BorrowerDetail, GatewayError>;

    async fn dispatch_action(
        &self,
        kind: ActionKind,
        id: &BorrowerId,
    ) -> Result<ActionResult, GatewayError>;

    async fn fetch_broker_info(&self) -> Result<BrokerInfo, GatewayError>;

    async fn fetch_workflow_steps(&self) -> Result<Vec<String>, GatewayError>;
}

pub type SharedGateway = Arc<dyn ActionGateway>;

/// Error enumeration for gateway failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("borrower {id} not found")]
    NotFound { id: BorrowerId },
    #[error("backend unavailable: {0}")]
    NotAvailable(String),
    #[error("cannot {action} a borrower in status '{status}'")]
    InvalidState {
        action: ActionKind,
        status: LoanStatus,
    },
}

/// Which gateway implementation backs a dashboard session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayMode {
    /// Every action succeeds and nothing moves between buckets.
    #[default]
    Legacy,
    /// Actions are validated against the borrower's status and move buckets.
    Strict,
}

impl GatewayMode {
    pub const fn label(self) -> &'static str {
        match self {
            GatewayMode::Legacy => "legacy",
            GatewayMode::Strict => "strict",
        }
    }
}

/// Build a gateway seeded with the bundled dashboard records.
pub fn seeded_gateway(mode: GatewayMode) -> Result<SharedGateway, DomainError> {
    Ok(match mode {
        GatewayMode::Legacy => Arc::new(LegacyMockGateway::seeded()),
        GatewayMode::Strict => Arc::new(StrictGateway::seeded()?),
    })
}

/// Reachability switch used by the in-memory gateways to simulate outages.
#[derive(Debug)]
pub struct Availability {
    online: AtomicBool,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            online: AtomicBool::new(true),
        }
    }
}

impl Availability {
    pub fn set(&self, online: bool) {
        self.online.store(online, Ordering::Release);
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    pub fn ensure(&self, backend: &str) -> Result<(), GatewayError> {
        if self.is_online() {
            Ok(())
        } else {
            Err(GatewayError::NotAvailable(format!("{backend} is offline")))
        }
    }
}
