use super::common::*;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

use crate::workflows::pipeline::gateway::SharedGateway;
use crate::workflows::pipeline::router::{action_handler, borrower_handler, ActionRequest};
use crate::workflows::pipeline::{pipeline_router, seeded_gateway, ActionKind, GatewayMode};

#[tokio::test]
async fn pipeline_route_returns_three_buckets() {
    let (router, _) = legacy_router();
    let payload = assert_status(get(router, "/api/v1/pipeline").await, StatusCode::OK).await;

    assert_eq!(payload["new"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["in_review"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["approved"], json!([]));
}

#[tokio::test]
async fn borrower_route_returns_detail_with_both_amounts() {
    let (router, _) = legacy_router();
    let payload = assert_status(get(router, "/api/v1/borrowers/1").await, StatusCode::OK).await;

    assert_eq!(payload["id"], json!("1"));
    assert_eq!(payload["amount"], payload["loan_amount"]);
    assert_eq!(payload["credit_score"], json!(720));
}

#[tokio::test]
async fn borrower_handler_returns_not_found_for_unknown_id() {
    let gateway = legacy();
    let response = borrower_handler::<crate::workflows::pipeline::LegacyMockGateway>(
        State(gateway),
        Path("99".to_string()),
    )
    .await;

    let payload = assert_status(response, StatusCode::NOT_FOUND).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("not found"));
}

#[tokio::test]
async fn action_route_returns_canned_result() {
    let (router, _) = legacy_router();
    let response = post_json(
        router,
        "/api/v1/actions",
        json!({ "kind": "approve", "borrower_id": "2" }),
    )
    .await;

    let payload = assert_status(response, StatusCode::OK).await;
    assert_eq!(payload, json!({ "success": true, "message": "Loan approved." }));
}

#[tokio::test]
async fn action_route_accepts_camel_case_borrower_id() {
    let (router, _) = legacy_router();
    let response = post_json(
        router,
        "/api/v1/actions",
        json!({ "kind": "escalate", "borrowerId": "3" }),
    )
    .await;

    let payload = assert_status(response, StatusCode::OK).await;
    assert_eq!(payload["message"], json!("Escalated to Credit Committee."));
}

#[tokio::test]
async fn action_handler_signals_status_conflicts() {
    let gateway = strict();
    let response = action_handler::<crate::workflows::pipeline::StrictGateway>(
        State(gateway),
        axum::Json(ActionRequest {
            kind: ActionKind::Approve,
            borrower_id: id("3"),
        }),
    )
    .await;

    let payload = assert_status(response, StatusCode::CONFLICT).await;
    assert_eq!(payload["success"], json!(false));
}

#[tokio::test]
async fn strict_router_reflects_approval_on_next_fetch() {
    let (router, _) = strict_router();
    let response = post_json(
        router.clone(),
        "/api/v1/actions",
        json!({ "kind": "approve", "borrower_id": "2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = assert_status(get(router, "/api/v1/pipeline").await, StatusCode::OK).await;
    assert_eq!(payload["approved"][0]["id"], json!("2"));
    assert_eq!(payload["approved"][0]["status"], json!("Approved"));
}

#[tokio::test]
async fn offline_backend_maps_to_service_unavailable() {
    let (router, gateway) = legacy_router();
    gateway.set_available(false);

    let response = get(router, "/api/v1/pipeline").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn router_accepts_trait_object_gateways() {
    let gateway: SharedGateway = seeded_gateway(GatewayMode::Legacy).expect("legacy seeds");
    let router = pipeline_router(Arc::clone(&gateway));

    let payload = assert_status(get(router.clone(), "/api/v1/workflow").await, StatusCode::OK).await;
    assert_eq!(payload["steps"].as_array().map(Vec::len), Some(7));
    assert_eq!(payload["steps"][0], json!("Deal Intake"));

    let broker = assert_status(get(router, "/api/v1/broker").await, StatusCode::OK).await;
    assert_eq!(broker["name"], json!("Robert Turner"));
    assert_eq!(broker["deals"], json!(16));
}

#[tokio::test]
async fn malformed_action_kind_is_rejected() {
    let (router, _) = legacy_router();
    let response = post_json(
        router,
        "/api/v1/actions",
        json!({ "kind": "reject", "borrower_id": "2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
