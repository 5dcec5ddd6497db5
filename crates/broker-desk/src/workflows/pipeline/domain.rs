use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for borrowers issued by the backend of record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowerId(pub String);

impl BorrowerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BorrowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BorrowerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle status reported for a loan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    New,
    #[serde(rename = "In Review")]
    InReview,
    Approved,
    Renew,
}

impl LoanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LoanStatus::New => "New",
            LoanStatus::InReview => "In Review",
            LoanStatus::Approved => "Approved",
            LoanStatus::Renew => "Renew",
        }
    }

    /// Pipeline bucket a borrower with this status belongs to.
    pub const fn bucket(self) -> PipelineTab {
        match self {
            LoanStatus::New | LoanStatus::Renew => PipelineTab::New,
            LoanStatus::InReview => PipelineTab::InReview,
            LoanStatus::Approved => PipelineTab::Approved,
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary record shown on pipeline cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    pub id: BorrowerId,
    pub name: String,
    pub loan_type: String,
    pub amount: u64,
    pub status: LoanStatus,
}

/// Extended borrower record carrying contact, financial and risk data.
///
/// The wire format repeats the loan amount as both `amount` and
/// `loan_amount`; the struct stores it once and rejects payloads where the
/// two disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BorrowerDetailRecord", into = "BorrowerDetailRecord")]
pub struct BorrowerDetail {
    pub id: BorrowerId,
    pub name: String,
    pub loan_type: String,
    pub amount: u64,
    pub status: LoanStatus,
    pub email: String,
    pub phone: String,
    pub employment: String,
    pub income: u64,
    pub existing_loan: u64,
    pub credit_score: u16,
    pub source_of_funds: String,
    pub risk_signal: String,
    pub ai_flags: Vec<String>,
}

pub const CREDIT_SCORE_RANGE: std::ops::RangeInclusive<u16> = 300..=850;

impl BorrowerDetail {
    /// Validates a raw record, enforcing the amount and credit score invariants.
    pub fn new(record: BorrowerDetailRecord) -> Result<Self, DomainError> {
        Self::try_from(record)
    }

    pub fn loan_amount(&self) -> u64 {
        self.amount
    }

    pub fn summary(&self) -> Borrower {
        Borrower {
            id: self.id.clone(),
            name: self.name.clone(),
            loan_type: self.loan_type.clone(),
            amount: self.amount,
            status: self.status,
        }
    }

    pub fn risk_signal(&self) -> Option<&str> {
        let trimmed = self.risk_signal.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

/// Unvalidated wire shape of a borrower detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowerDetailRecord {
    pub id: BorrowerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub loan_amount: u64,
    pub status: LoanStatus,
    pub loan_type: String,
    pub amount: u64,
    pub employment: String,
    pub income: u64,
    pub existing_loan: u64,
    pub credit_score: u16,
    pub source_of_funds: String,
    #[serde(default)]
    pub risk_signal: String,
    #[serde(default)]
    pub ai_flags: Vec<String>,
}

impl TryFrom<BorrowerDetailRecord> for BorrowerDetail {
    type Error = DomainError;

    fn try_from(record: BorrowerDetailRecord) -> Result<Self, Self::Error> {
        if record.loan_amount != record.amount {
            return Err(DomainError::LoanAmountMismatch {
                id: record.id,
                amount: record.amount,
                loan_amount: record.loan_amount,
            });
        }
        if !CREDIT_SCORE_RANGE.contains(&record.credit_score) {
            return Err(DomainError::CreditScoreOutOfRange {
                id: record.id,
                score: record.credit_score,
            });
        }

        Ok(Self {
            id: record.id,
            name: record.name,
            loan_type: record.loan_type,
            amount: record.amount,
            status: record.status,
            email: record.email,
            phone: record.phone,
            employment: record.employment,
            income: record.income,
            existing_loan: record.existing_loan,
            credit_score: record.credit_score,
            source_of_funds: record.source_of_funds,
            risk_signal: record.risk_signal,
            ai_flags: record.ai_flags,
        })
    }
}

impl From<BorrowerDetail> for BorrowerDetailRecord {
    fn from(detail: BorrowerDetail) -> Self {
        Self {
            id: detail.id,
            name: detail.name,
            email: detail.email,
            phone: detail.phone,
            loan_amount: detail.amount,
            status: detail.status,
            loan_type: detail.loan_type,
            amount: detail.amount,
            employment: detail.employment,
            income: detail.income,
            existing_loan: detail.existing_loan,
            credit_score: detail.credit_score,
            source_of_funds: detail.source_of_funds,
            risk_signal: detail.risk_signal,
            ai_flags: detail.ai_flags,
        }
    }
}

/// Aggregate stats for the broker running the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerInfo {
    pub name: String,
    pub deals: u32,
    /// Share of deals approved, between 0.0 and 1.0.
    pub approval_rate: f32,
    pub pending: u64,
}

/// Key of a pipeline bucket; also the visually active tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineTab {
    #[default]
    New,
    InReview,
    Approved,
}

impl PipelineTab {
    pub const ALL: [PipelineTab; 3] = [
        PipelineTab::New,
        PipelineTab::InReview,
        PipelineTab::Approved,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            PipelineTab::New => "new",
            PipelineTab::InReview => "in_review",
            PipelineTab::Approved => "approved",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PipelineTab::New => "New",
            PipelineTab::InReview => "In Review",
            PipelineTab::Approved => "Approved",
        }
    }
}

impl FromStr for PipelineTab {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "new" => Ok(PipelineTab::New),
            "in_review" => Ok(PipelineTab::InReview),
            "approved" => Ok(PipelineTab::Approved),
            _ => Err(DomainError::UnknownTab(raw.to_string())),
        }
    }
}

/// Borrowers partitioned into the three pipeline buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineData {
    pub new: Vec<Borrower>,
    pub in_review: Vec<Borrower>,
    pub approved: Vec<Borrower>,
}

impl PipelineData {
    /// Partition borrowers by status, preserving input order within each bucket.
    pub fn from_borrowers(borrowers: impl IntoIterator<Item = Borrower>) -> Self {
        let mut data = Self::default();
        for borrower in borrowers {
            data.bucket_mut(borrower.status.bucket()).push(borrower);
        }
        data
    }

    pub fn bucket(&self, tab: PipelineTab) -> &[Borrower] {
        match tab {
            PipelineTab::New => &self.new,
            PipelineTab::InReview => &self.in_review,
            PipelineTab::Approved => &self.approved,
        }
    }

    fn bucket_mut(&mut self, tab: PipelineTab) -> &mut Vec<Borrower> {
        match tab {
            PipelineTab::New => &mut self.new,
            PipelineTab::InReview => &mut self.in_review,
            PipelineTab::Approved => &mut self.approved,
        }
    }

    pub fn count(&self, tab: PipelineTab) -> usize {
        self.bucket(tab).len()
    }

    pub fn len(&self) -> usize {
        self.new.len() + self.in_review.len() + self.approved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (PipelineTab, &Borrower)> {
        PipelineTab::ALL
            .into_iter()
            .flat_map(move |tab| self.bucket(tab).iter().map(move |borrower| (tab, borrower)))
    }

    /// Locate a borrower together with the bucket it currently sits in.
    pub fn find(&self, id: &BorrowerId) -> Option<(PipelineTab, &Borrower)> {
        self.iter().find(|(_, borrower)| &borrower.id == id)
    }

    pub fn contains(&self, id: &BorrowerId) -> bool {
        self.find(id).is_some()
    }

    /// Ids appearing more than once across all buckets.
    pub fn duplicate_ids(&self) -> Vec<BorrowerId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for (_, borrower) in self.iter() {
            if !seen.insert(&borrower.id) && !duplicates.contains(&borrower.id) {
                duplicates.push(borrower.id.clone());
            }
        }
        duplicates
    }

    /// Borrowers whose status does not belong to the bucket holding them.
    pub fn misplaced(&self) -> Vec<(PipelineTab, &Borrower)> {
        self.iter()
            .filter(|(tab, borrower)| borrower.status.bucket() != *tab)
            .collect()
    }
}

/// Workflow intents a broker can trigger against a borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    RequestDocuments,
    SendToValuer,
    Approve,
    Escalate,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::RequestDocuments,
        ActionKind::SendToValuer,
        ActionKind::Approve,
        ActionKind::Escalate,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            ActionKind::RequestDocuments => "request_documents",
            ActionKind::SendToValuer => "send_to_valuer",
            ActionKind::Approve => "approve",
            ActionKind::Escalate => "escalate",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActionKind::RequestDocuments => "Request Documents",
            ActionKind::SendToValuer => "Send to Valuer",
            ActionKind::Approve => "Approve",
            ActionKind::Escalate => "Escalate to Credit Committee",
        }
    }

    pub const fn success_message(self) -> &'static str {
        match self {
            ActionKind::RequestDocuments => "Documents requested.",
            ActionKind::SendToValuer => "Valuer notified.",
            ActionKind::Approve => "Loan approved.",
            ActionKind::Escalate => "Escalated to Credit Committee.",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ActionKind {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "request_documents" => Ok(ActionKind::RequestDocuments),
            "send_to_valuer" | "send_valuer" => Ok(ActionKind::SendToValuer),
            "approve" => Ok(ActionKind::Approve),
            "escalate" => Ok(ActionKind::Escalate),
            _ => Err(DomainError::UnknownAction(raw.to_string())),
        }
    }
}

/// Outcome reported by the gateway for a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn succeeded(kind: ActionKind) -> Self {
        Self {
            success: true,
            message: kind.success_message().to_string(),
        }
    }
}

/// Validation failures raised while constructing domain records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("borrower {id}: loan_amount {loan_amount} does not match amount {amount}")]
    LoanAmountMismatch {
        id: BorrowerId,
        amount: u64,
        loan_amount: u64,
    },
    #[error("borrower {id}: credit score {score} outside 300-850")]
    CreditScoreOutOfRange { id: BorrowerId, score: u16 },
    #[error("borrower {0} appears more than once in the pipeline")]
    DuplicateBorrower(BorrowerId),
    #[error("borrower {0} has no detail record")]
    MissingDetail(BorrowerId),
    #[error("borrower {id}: pipeline amount {summary} differs from detail amount {detail}")]
    AmountDrift {
        id: BorrowerId,
        summary: u64,
        detail: u64,
    },
    #[error("unknown pipeline tab '{0}'")]
    UnknownTab(String),
    #[error("unknown action '{0}'")]
    UnknownAction(String),
}
