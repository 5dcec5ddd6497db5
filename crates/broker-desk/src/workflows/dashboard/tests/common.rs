use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::Duration;

use crate::workflows::dashboard::DashboardSession;
use crate::workflows::pipeline::{
    fixtures, ActionGateway, ActionKind, ActionResult, BorrowerDetail, BorrowerId, BrokerInfo,
    GatewayError, LegacyMockGateway, PipelineData, StrictGateway,
};

pub(super) fn id(raw: &str) -> BorrowerId {
    BorrowerId::from(raw)
}

pub(super) fn ttl() -> Duration {
    Duration::seconds(5)
}

pub(super) fn legacy_session() -> (DashboardSession, Arc<LegacyMockGateway>) {
    let gateway = Arc::new(LegacyMockGateway::seeded());
    (DashboardSession::new(gateway.clone(), ttl()), gateway)
}

pub(super) fn strict_session() -> (DashboardSession, Arc<StrictGateway>) {
    let gateway = Arc::new(StrictGateway::seeded().expect("bundled records are consistent"));
    (DashboardSession::new(gateway.clone(), ttl()), gateway)
}

/// Legacy gateway whose detail lookups for one borrower, and optionally
/// every action, resolve late.
pub(super) struct SlowGateway {
    inner: LegacyMockGateway,
    slow_id: BorrowerId,
    delay: StdDuration,
    dispatch_delay: StdDuration,
    pub(super) pipeline_calls: AtomicUsize,
}

impl SlowGateway {
    pub(super) fn new(slow_id: &str, delay: StdDuration) -> Self {
        Self {
            inner: LegacyMockGateway::seeded(),
            slow_id: id(slow_id),
            delay,
            dispatch_delay: StdDuration::ZERO,
            pipeline_calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn with_dispatch_delay(mut self, delay: StdDuration) -> Self {
        self.dispatch_delay = delay;
        self
    }
}

#[async_trait]
impl ActionGateway for SlowGateway {
    async fn fetch_pipeline(&self) -> Result<PipelineData, GatewayError> {
        self.pipeline_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_pipeline().await
    }

    async fn fetch_borrower_detail(&self, id: &BorrowerId) -> Result<BorrowerDetail, GatewayError> {
        if id == &self.slow_id {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.fetch_borrower_detail(id).await
    }

    async fn dispatch_action(
        &self,
        kind: ActionKind,
        id: &BorrowerId,
    ) -> Result<ActionResult, GatewayError> {
        tokio::time::sleep(self.dispatch_delay).await;
        self.inner.dispatch_action(kind, id).await
    }

    async fn fetch_broker_info(&self) -> Result<BrokerInfo, GatewayError> {
        self.inner.fetch_broker_info().await
    }

    async fn fetch_workflow_steps(&self) -> Result<Vec<String>, GatewayError> {
        self.inner.fetch_workflow_steps().await
    }
}

/// Gateway that answers every action with `success: false`.
pub(super) struct DecliningGateway;

#[async_trait]
impl ActionGateway for DecliningGateway {
    async fn fetch_pipeline(&self) -> Result<PipelineData, GatewayError> {
        Ok(fixtures::pipeline())
    }

    async fn fetch_borrower_detail(&self, id: &BorrowerId) -> Result<BorrowerDetail, GatewayError> {
        fixtures::borrower_details()
            .into_iter()
            .find(|detail| &detail.id == id)
            .ok_or_else(|| GatewayError::NotFound { id: id.clone() })
    }

    async fn dispatch_action(
        &self,
        _kind: ActionKind,
        _id: &BorrowerId,
    ) -> Result<ActionResult, GatewayError> {
        Ok(ActionResult {
            success: false,
            message: "credit desk closed".to_string(),
        })
    }

    async fn fetch_broker_info(&self) -> Result<BrokerInfo, GatewayError> {
        Ok(fixtures::broker_info())
    }

    async fn fetch_workflow_steps(&self) -> Result<Vec<String>, GatewayError> {
        Ok(fixtures::workflow_steps())
    }
}
