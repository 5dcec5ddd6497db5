use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use crate::workflows::pipeline::domain::{BorrowerDetail, BorrowerDetailRecord, BorrowerId};
use crate::workflows::pipeline::fixtures;
use crate::workflows::pipeline::{pipeline_router, LegacyMockGateway, StrictGateway};

pub(super) fn id(raw: &str) -> BorrowerId {
    BorrowerId::from(raw)
}

pub(super) fn detail(raw_id: &str) -> BorrowerDetail {
    fixtures::borrower_details()
        .into_iter()
        .find(|detail| detail.id.as_str() == raw_id)
        .expect("fixture borrower present")
}

pub(super) fn record(raw_id: &str) -> BorrowerDetailRecord {
    BorrowerDetailRecord::from(detail(raw_id))
}

pub(super) fn legacy() -> Arc<LegacyMockGateway> {
    Arc::new(LegacyMockGateway::seeded())
}

pub(super) fn strict() -> Arc<StrictGateway> {
    Arc::new(StrictGateway::seeded().expect("bundled records are consistent"))
}

pub(super) async fn get(router: axum::Router, uri: &str) -> Response {
    router
        .oneshot(
            Request::get(uri)
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes")
}

pub(super) async fn post_json(router: axum::Router, uri: &str, payload: Value) -> Response {
    router
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&payload).expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes")
}

pub(super) fn legacy_router() -> (axum::Router, Arc<LegacyMockGateway>) {
    let gateway = legacy();
    (pipeline_router(gateway.clone()), gateway)
}

pub(super) fn strict_router() -> (axum::Router, Arc<StrictGateway>) {
    let gateway = strict();
    (pipeline_router(gateway.clone()), gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn assert_status(response: Response, expected: StatusCode) -> Value {
    assert_eq!(response.status(), expected);
    read_json_body(response).await
}
