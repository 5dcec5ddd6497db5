use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use super::domain::{
    ActionKind, ActionResult, BorrowerDetail, BorrowerId, BrokerInfo, PipelineData,
};
use super::fixtures;
use super::gateway::{ActionGateway, Availability, GatewayError};

/// Static in-memory gateway serving the dashboard's seeded records.
///
/// Every action reports success, for any id, and nothing ever changes: an
/// approved borrower stays in whichever bucket it was listed under.
pub struct LegacyMockGateway {
    pipeline: PipelineData,
    details: HashMap<BorrowerId, BorrowerDetail>,
    broker: BrokerInfo,
    workflow_steps: Vec<String>,
    availability: Availability,
}

impl LegacyMockGateway {
    pub fn new(
        pipeline: PipelineData,
        details: impl IntoIterator<Item = BorrowerDetail>,
        broker: BrokerInfo,
        workflow_steps: Vec<String>,
    ) -> Self {
        let details = details
            .into_iter()
            .map(|detail| (detail.id.clone(), detail))
            .collect();

        Self {
            pipeline,
            details,
            broker,
            workflow_steps,
            availability: Availability::default(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(
            fixtures::pipeline(),
            fixtures::borrower_details(),
            fixtures::broker_info(),
            fixtures::workflow_steps(),
        )
    }

    /// Toggle simulated reachability; while offline every call fails with `NotAvailable`.
    pub fn set_available(&self, online: bool) {
        self.availability.set(online);
    }

    fn ensure_available(&self) -> Result<(), GatewayError> {
        self.availability.ensure("legacy mock backend")
    }
}

#[async_trait]
impl ActionGateway for LegacyMockGateway {
    async fn fetch_pipeline(&self) -> Result<PipelineData, GatewayError> {
        self.ensure_available()?;
        Ok(self.pipeline.clone())
    }

    async fn fetch_borrower_detail(&self, id: &BorrowerId) -> Result<BorrowerDetail, GatewayError> {
        self.ensure_available()?;
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound { id: id.clone() })
    }

    async fn dispatch_action(
        &self,
        kind: ActionKind,
        id: &BorrowerId,
    ) -> Result<ActionResult, GatewayError> {
        self.ensure_available()?;
        debug!(action = kind.key(), borrower = %id, "legacy gateway acknowledged action");
        Ok(ActionResult::succeeded(kind))
    }

    async fn fetch_broker_info(&self) -> Result<BrokerInfo, GatewayError> {
        self.ensure_available()?;
        Ok(self.broker.clone())
    }

    async fn fetch_workflow_steps(&self) -> Result<Vec<String>, GatewayError> {
        self.ensure_available()?;
        Ok(self.workflow_steps.clone())
    }
}
