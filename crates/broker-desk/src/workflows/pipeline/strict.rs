use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::domain::{
    ActionKind, ActionResult, BorrowerDetail, BorrowerId, BrokerInfo, DomainError, LoanStatus,
    PipelineData,
};
use super::fixtures;
use super::gateway::{ActionGateway, Availability, GatewayError};

/// Gateway that validates actions against each borrower's status.
///
/// Detail records are the single source of truth; the pipeline is derived
/// from them on every fetch so bucket membership always matches status.
pub struct StrictGateway {
    records: RwLock<Vec<BorrowerDetail>>,
    broker: BrokerInfo,
    workflow_steps: Vec<String>,
    availability: Availability,
}

impl StrictGateway {
    /// Build from a pipeline snapshot plus detail records.
    ///
    /// The pipeline status wins when a detail record disagrees with it. Detail
    /// records not listed in the pipeline are dropped.
    pub fn from_snapshot(
        pipeline: &PipelineData,
        details: impl IntoIterator<Item = BorrowerDetail>,
        broker: BrokerInfo,
        workflow_steps: Vec<String>,
    ) -> Result<Self, DomainError> {
        if let Some(id) = pipeline.duplicate_ids().into_iter().next() {
            return Err(DomainError::DuplicateBorrower(id));
        }

        let mut details: HashMap<BorrowerId, BorrowerDetail> = details
            .into_iter()
            .map(|detail| (detail.id.clone(), detail))
            .collect();

        let mut records = Vec::with_capacity(pipeline.len());
        for (_, borrower) in pipeline.iter() {
            let mut detail = details
                .remove(&borrower.id)
                .ok_or_else(|| DomainError::MissingDetail(borrower.id.clone()))?;

            if detail.amount != borrower.amount {
                return Err(DomainError::AmountDrift {
                    id: borrower.id.clone(),
                    summary: borrower.amount,
                    detail: detail.amount,
                });
            }

            if detail.status != borrower.status {
                debug!(
                    borrower = %borrower.id,
                    pipeline_status = borrower.status.label(),
                    detail_status = detail.status.label(),
                    "reconciling detail status with pipeline"
                );
                detail.status = borrower.status;
            }
            records.push(detail);
        }

        if !details.is_empty() {
            warn!(
                orphaned = details.len(),
                "dropping detail records absent from the pipeline"
            );
        }

        Ok(Self {
            records: RwLock::new(records),
            broker,
            workflow_steps,
            availability: Availability::default(),
        })
    }

    /// Build from the bundled records, reconciled to the bundled pipeline.
    pub fn seeded() -> Result<Self, DomainError> {
        Self::from_snapshot(
            &fixtures::pipeline(),
            fixtures::borrower_details(),
            fixtures::broker_info(),
            fixtures::workflow_steps(),
        )
    }

    pub fn set_available(&self, online: bool) {
        self.availability.set(online);
    }

    fn ensure_available(&self) -> Result<(), GatewayError> {
        self.availability.ensure("strict backend")
    }
}

/// Status a borrower moves to when `kind` is applied, or why it cannot be.
pub fn transition(kind: ActionKind, status: LoanStatus) -> Result<LoanStatus, GatewayError> {
    let next = match (kind, status) {
        (_, LoanStatus::Approved) => None,
        (ActionKind::RequestDocuments | ActionKind::Escalate, LoanStatus::New | LoanStatus::Renew) => {
            Some(LoanStatus::InReview)
        }
        (ActionKind::Approve, LoanStatus::InReview) => Some(LoanStatus::Approved),
        (_, LoanStatus::InReview) => Some(LoanStatus::InReview),
        (ActionKind::SendToValuer | ActionKind::Approve, LoanStatus::New | LoanStatus::Renew) => {
            None
        }
    };

    next.ok_or(GatewayError::InvalidState {
        action: kind,
        status,
    })
}

#[async_trait]
impl ActionGateway for StrictGateway {
    async fn fetch_pipeline(&self) -> Result<PipelineData, GatewayError> {
        self.ensure_available()?;
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(PipelineData::from_borrowers(
            records.iter().map(BorrowerDetail::summary),
        ))
    }

    async fn fetch_borrower_detail(&self, id: &BorrowerId) -> Result<BorrowerDetail, GatewayError> {
        self.ensure_available()?;
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records
            .iter()
            .find(|record| &record.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound { id: id.clone() })
    }

    async fn dispatch_action(
        &self,
        kind: ActionKind,
        id: &BorrowerId,
    ) -> Result<ActionResult, GatewayError> {
        self.ensure_available()?;
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let record = records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| GatewayError::NotFound { id: id.clone() })?;

        let next = transition(kind, record.status)?;
        if next != record.status {
            info!(
                borrower = %id,
                action = kind.key(),
                from = record.status.label(),
                to = next.label(),
                "borrower status changed"
            );
            record.status = next;
        }

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
