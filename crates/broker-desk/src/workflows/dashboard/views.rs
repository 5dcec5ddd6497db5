use serde::Serialize;

use super::notifications::Notification;
use crate::workflows::pipeline::{ActionKind, BorrowerId, LoanStatus, PipelineTab, StatusTone};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineView {
    Loading,
    Ready(PipelineBoard),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineBoard {
    pub active_tab: PipelineTab,
    pub tabs: Vec<TabView>,
    pub cards: Vec<BorrowerCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabView {
    pub tab: PipelineTab,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorrowerCard {
    pub id: BorrowerId,
    pub name: String,
    pub amount: String,
    pub loan_type: String,
    pub status: LoanStatus,
    pub status_label: &'static str,
    pub tone: StatusTone,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView {
    Placeholder {
        title: &'static str,
        hint: &'static str,
    },
    Borrower(Box<BorrowerDetailView>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorrowerDetailView {
    pub id: BorrowerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub loan_amount: String,
    pub status: LoanStatus,
    pub status_label: &'static str,
    pub tone: StatusTone,
    pub risk_heading: String,
    pub ai_flags: Vec<String>,
    pub loan_summary: Vec<LabeledValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_signal: Option<String>,
    pub actions: Vec<ActionButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionButton {
    pub kind: ActionKind,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SummaryView {
    Loading,
    Ready(BrokerSummaryView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokerSummaryView {
    pub name: String,
    pub deals: u32,
    pub approval_rate: String,
    pub pending: String,
    pub contact_actions: Vec<&'static str>,
    pub onboarding: Vec<OnboardingStep>,
    pub ai_assistant_enabled: bool,
    pub ai_assistant_hint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingStep {
    pub position: usize,
    pub name: String,
    pub complete: bool,
}

/// Everything a renderer needs to draw the three panels at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub pipeline: PipelineView,
    pub detail: DetailView,
    pub summary: SummaryView,
    pub notifications: Vec<Notification>,
}
