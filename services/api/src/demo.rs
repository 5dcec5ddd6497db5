use broker_desk::config::AppConfig;
use broker_desk::error::AppError;
use broker_desk::workflows::dashboard::{
    DashboardSession, DashboardView, DetailView, Notification, NotificationVariant, PipelineView,
    StoreUpdate, SummaryView,
};
use broker_desk::workflows::pipeline::{
    seeded_gateway, ActionKind, BorrowerId, GatewayMode, PipelineTab,
};
use chrono::Utc;
use clap::Args;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Gateway backing the session (defaults to APP_GATEWAY_MODE, then legacy)
    #[arg(long, value_parser = crate::infra::parse_gateway)]
    pub(crate) gateway: Option<GatewayMode>,
    /// Borrower id to select; repeat to simulate a broker clicking through the list
    #[arg(long)]
    pub(crate) select: Vec<String>,
    /// Pipeline tab to show: new, in_review or approved
    #[arg(long, value_parser = crate::infra::parse_tab)]
    pub(crate) tab: Option<PipelineTab>,
    /// Action to run against the last selected borrower; repeatable
    #[arg(long, value_parser = crate::infra::parse_action)]
    pub(crate) action: Vec<ActionKind>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        gateway,
        select,
        tab,
        action,
    } = args;

    let config = AppConfig::load()?;
    let mode = gateway.unwrap_or(config.dashboard.gateway_mode);
    let gateway = seeded_gateway(mode)?;
    let session = DashboardSession::new(gateway, config.dashboard.notification_ttl());

    println!("Broker desk demo ({} gateway)", mode.label());
    let report = session.mount().await;
    if let Err(err) = &report.pipeline {
        println!("  Pipeline unavailable: {err}");
    }
    if let Err(err) = &report.summary {
        println!("  Broker overview unavailable: {err}");
    }

    if let Some(tab) = tab {
        session.switch_tab(tab);
    }

    for raw in select {
        let id = BorrowerId::new(raw);
        match session.select_borrower(&id).await {
            Ok(StoreUpdate::Applied) => println!("- Selected borrower {id}"),
            Ok(update) => println!("- Selection of borrower {id} ignored ({update:?})"),
            Err(err) => println!("- Could not select borrower {id}: {err}"),
        }
    }

    for kind in action {
        match session.dispatch(kind).await {
            Ok(result) => println!("- {} -> {}", kind.label(), result.message),
            Err(err) => println!("- {} failed: {err}", kind.label()),
        }
    }

    render_dashboard(&session.render(Utc::now()));
    session.close();
    Ok(())
}

fn render_dashboard(view: &DashboardView) {
    render_pipeline(&view.pipeline);
    render_detail(&view.detail);
    render_summary(&view.summary);
    render_notifications(&view.notifications);
}

fn render_pipeline(view: &PipelineView) {
    println!("\nPipeline");
    let PipelineView::Ready(board) = view else {
        println!("  Loading...");
        return;
    };

    let tabs: Vec<String> = board
        .tabs
        .iter()
        .map(|tab| {
            if tab.active {
                format!("[{}]", tab.label)
            } else {
                tab.label.clone()
            }
        })
        .collect();
    println!("  {}", tabs.join(" | "));

    if let Some(message) = board.empty_state {
        println!("  {message}");
    }
    for card in &board.cards {
        let marker = if card.selected { ">" } else { " " };
        println!(
            "  {marker} {} | {} | {} | {}",
            card.name, card.amount, card.loan_type, card.status_label
        );
    }
}

fn render_detail(view: &DetailView) {
    println!("\nBorrower detail");
    let borrower = match view {
        DetailView::Placeholder { title, hint } => {
            println!("  {title}");
            println!("  {hint}");
            return;
        }
        DetailView::Borrower(borrower) => borrower,
    };

    println!("  {} ({})", borrower.name, borrower.status_label);
    println!("  {} | {}", borrower.email, borrower.phone);
    println!("  Loan amount: {}", borrower.loan_amount);
    println!("  {}", borrower.risk_heading);
    for flag in &borrower.ai_flags {
        println!("    - {flag}");
    }
    println!("  Loan summary:");
    for field in &borrower.loan_summary {
        println!("    {}: {}", field.label, field.value);
    }
    if let Some(signal) = &borrower.risk_signal {
        println!("  Risk signal: {signal}");
    }
    let actions: Vec<&str> = borrower.actions.iter().map(|action| action.label).collect();
    println!("  Actions: {}", actions.join(" | "));
}

fn render_summary(view: &SummaryView) {
    println!("\nBroker overview");
    let SummaryView::Ready(summary) = view else {
        println!("  Loading...");
        return;
    };

    println!("  {}", summary.name);
    println!(
        "  Deals {} | Approval rate {} | Pending {}",
        summary.deals, summary.approval_rate, summary.pending
    );
    println!("  Contact: {}", summary.contact_actions.join(" | "));
    println!("  Onboarding workflow:");
    for step in &summary.onboarding {
        let mark = if step.complete { "x" } else { " " };
        println!("    [{mark}] {}. {}", step.position, step.name);
    }
    let toggle = if summary.ai_assistant_enabled { "on" } else { "off" };
    println!("  AI assistant: {toggle} ({})", summary.ai_assistant_hint);
}

fn render_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        return;
    }
    println!("\nNotifications");
    for notification in notifications {
        let prefix = match notification.variant {
            NotificationVariant::Default => "",
            NotificationVariant::Destructive => "! ",
        };
        println!(
            "  {prefix}{}: {}",
            notification.title, notification.message
        );
    }
}
