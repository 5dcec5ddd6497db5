//! Borrower pipeline domain and the action gateway that serves it.

pub mod domain;
pub mod fixtures;
pub mod format;
pub mod gateway;
pub mod legacy;
pub mod router;
pub mod strict;

#[cfg(test)]
mod tests;

pub use domain::{
    ActionKind, ActionResult, Borrower, BorrowerDetail, BorrowerDetailRecord, BorrowerId,
    BrokerInfo, DomainError, LoanStatus, PipelineData, PipelineTab, CREDIT_SCORE_RANGE,
};
pub use format::{format_amount, format_percentage, status_tone, StatusTone};
pub use gateway::{seeded_gateway, ActionGateway, GatewayError, GatewayMode, SharedGateway};
pub use legacy::LegacyMockGateway;
pub use router::{pipeline_router, ActionRequest};
pub use strict::StrictGateway;
