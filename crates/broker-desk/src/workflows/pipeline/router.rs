use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::domain::{ActionKind, BorrowerId};
use super::gateway::{ActionGateway, GatewayError};

/// Body accepted by the action endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub kind: ActionKind,
    #[serde(alias = "borrowerId")]
    pub borrower_id: BorrowerId,
}

/// Router builder exposing the gateway over HTTP.
pub fn pipeline_router<G>(gateway: Arc<G>) -> Router
where
    G: ActionGateway + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/pipeline", get(pipeline_handler::<G>))
        .route(
            "/api/v1/borrowers/:borrower_id",
            get(borrower_handler::<G>),
        )
        .route("/api/v1/actions", post(action_handler::<G>))
        .route("/api/v1/broker", get(broker_handler::<G>))
        .route("/api/v1/workflow", get(workflow_handler::<G>))
        .with_state(gateway)
}

pub(crate) async fn pipeline_handler<G>(State(gateway): State<Arc<G>>) -> Response
where
    G: ActionGateway + ?Sized + 'static,
{
    match gateway.fetch_pipeline().await {
        Ok(pipeline) => (StatusCode::OK, axum::Json(pipeline)).into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub(crate) async fn borrower_handler<G>(
    State(gateway): State<Arc<G>>,
    Path(borrower_id): Path<String>,
) -> Response
where
    G: ActionGateway + ?Sized + 'static,
{
    let id = BorrowerId(borrower_id);
    match gateway.fetch_borrower_detail(&id).await {
        Ok(detail) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub(crate) async fn action_handler<G>(
    State(gateway): State<Arc<G>>,
    axum::Json(request): axum::Json<ActionRequest>,
) -> Response
where
    G: ActionGateway + ?Sized + 'static,
{
    match gateway
        .dispatch_action(request.kind, &request.borrower_id)
        .await
    {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => {
            warn!(
                borrower = %request.borrower_id,
                action = request.kind.key(),
                error = %err,
                "action rejected"
            );
            gateway_error_response(err)
        }
    }
}

pub(crate) async fn broker_handler<G>(State(gateway): State<Arc<G>>) -> Response
where
    G: ActionGateway + ?Sized + 'static,
{
    match gateway.fetch_broker_info().await {
        Ok(broker) => (StatusCode::OK, axum::Json(broker)).into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub(crate) async fn workflow_handler<G>(State(gateway): State<Arc<G>>) -> Response
where
    G: ActionGateway + ?Sized + 'static,
{
    match gateway.fetch_workflow_steps().await {
        Ok(steps) => (StatusCode::OK, axum::Json(json!({ "steps": steps }))).into_response(),
        Err(err) => gateway_error_response(err),
    }
}

fn gateway_error_response(err: GatewayError) -> Response {
    let status = match &err {
        GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
        GatewayError::InvalidState { .. } => StatusCode::CONFLICT,
        GatewayError::NotAvailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let payload = match &err {
        GatewayError::InvalidState { .. } => json!({
            "success": false,
            "error": err.to_string(),
        }),
        _ => json!({ "error": err.to_string() }),
    };

    (status, axum::Json(payload)).into_response()
}
