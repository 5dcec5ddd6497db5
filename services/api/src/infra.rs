use broker_desk::config::parse_gateway_mode;
use broker_desk::workflows::pipeline::{ActionKind, GatewayMode, PipelineTab};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) gateway_mode: GatewayMode,
}

pub(crate) fn parse_gateway(raw: &str) -> Result<GatewayMode, String> {
    parse_gateway_mode(raw)
        .map_err(|_| format!("unknown gateway '{raw}' (expected 'legacy' or 'strict')"))
}

pub(crate) fn parse_tab(raw: &str) -> Result<PipelineTab, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

pub(crate) fn parse_action(raw: &str) -> Result<ActionKind, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_values() {
        assert_eq!(parse_gateway("Legacy"), Ok(GatewayMode::Legacy));
        assert_eq!(parse_tab("approved"), Ok(PipelineTab::Approved));
        assert_eq!(parse_action("send-to-valuer"), Ok(ActionKind::SendToValuer));
        assert!(parse_action("archive").is_err());
    }
}
