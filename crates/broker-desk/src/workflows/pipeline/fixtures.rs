//! Records bundled with the in-memory gateways.
//!
//! Borrower "1" is filed under `new` with status `Renew` while its detail
//! record reports `In Review`; the drift is kept so the legacy gateway serves
//! the same data the dashboard has always shown.

use super::domain::{Borrower, BorrowerDetail, BorrowerId, BrokerInfo, LoanStatus, PipelineData};

pub fn pipeline() -> PipelineData {
    PipelineData {
        new: vec![
            borrower("1", "Sarah Dunn", "Home Loan", 300_000, LoanStatus::Renew),
            borrower("3", "Lisa Carter", "Home Loan", 450_000, LoanStatus::New),
        ],
        in_review: vec![borrower(
            "2",
            "Alan Matthews",
            "Personal Loan",
            20_000,
            LoanStatus::InReview,
        )],
        approved: Vec::new(),
    }
}

pub fn borrower_details() -> Vec<BorrowerDetail> {
    vec![
        BorrowerDetail {
            id: BorrowerId::from("1"),
            name: "Sarah Dunn".to_string(),
            loan_type: "Home Loan".to_string(),
            amount: 300_000,
            status: LoanStatus::InReview,
            email: "sarah.dunn@example.com".to_string(),
            phone: "(355)123-4557".to_string(),
            employment: "At Tech Company".to_string(),
            income: 120_000,
            existing_loan: 240_000,
            credit_score: 720,
            source_of_funds: "Declared".to_string(),
            risk_signal: "Missing Source of Funds declaration".to_string(),
            ai_flags: vec![
                "Income Inconsistent with Bank statements".to_string(),
                "High Debt-to-Income Ratio detected".to_string(),
            ],
        },
        BorrowerDetail {
            id: BorrowerId::from("2"),
            name: "Alan Matthews".to_string(),
            loan_type: "Personal Loan".to_string(),
            amount: 20_000,
            status: LoanStatus::InReview,
            email: "alan.matthews@example.com".to_string(),
            phone: "(555)987-6543".to_string(),
            employment: "Self-Employed".to_string(),
            income: 85_000,
            existing_loan: 15_000,
            credit_score: 680,
            source_of_funds: "Business Revenue".to_string(),
            risk_signal: "Self-employment income verification required".to_string(),
            ai_flags: vec!["Irregular income pattern detected".to_string()],
        },
        BorrowerDetail {
            id: BorrowerId::from("3"),
            name: "Lisa Carter".to_string(),
            loan_type: "Home Loan".to_string(),
            amount: 450_000,
            status: LoanStatus::New,
            email: "lisa.carter@example.com".to_string(),
            phone: "(555)456-7890".to_string(),
            employment: "Corporate Executive".to_string(),
            income: 180_000,
            existing_loan: 0,
            credit_score: 780,
            source_of_funds: "Salary & Savings".to_string(),
            risk_signal: String::new(),
            ai_flags: Vec::new(),
        },
    ]
}

pub fn broker_info() -> BrokerInfo {
    BrokerInfo {
        name: "Robert Turner".to_string(),
        deals: 16,
        approval_rate: 0.75,
        pending: 7_660,
    }
}

pub fn workflow_steps() -> Vec<String> {
    [
        "Deal Intake",
        "IDV & Credit Check",
        "Document Upload",
        "AI Validation",
        "Credit Committee",
        "Approval & Docs",
        "Funder Syndication",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn borrower(id: &str, name: &str, loan_type: &str, amount: u64, status: LoanStatus) -> Borrower {
    Borrower {
        id: BorrowerId::from(id),
        name: name.to_string(),
        loan_type: loan_type.to_string(),
        amount,
        status,
    }
}
