use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::debug;

use super::domain::{PointsView, ProcessedReceiptView, Receipt, ReceiptId};
use super::service::{ReceiptService, ReceiptServiceError};
use super::store::IdGenerator;

/// Router builder exposing receipt processing and points lookup.
pub fn receipt_router<G>(service: Arc<ReceiptService<G>>) -> Router
where
    G: IdGenerator + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<G>))
        .route("/receipts/:id/points", get(points_handler::<G>))
        .fallback(unmatched_path_handler)
        .with_state(service)
}

pub(crate) async fn process_handler<G>(
    State(service): State<Arc<ReceiptService<G>>>,
    body: Bytes,
) -> Response
where
    G: IdGenerator + 'static,
{
    // Decoded regardless of Content-Type; only the body itself can be malformed.
    let receipt: Receipt = match serde_json::from_slice(&body) {
        Ok(receipt) => receipt,
        Err(error) => {
            debug!(%error, "rejected receipt payload");
            let payload = json!({
                "error": format!("invalid receipt: {error}"),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let id = service.process(&receipt);
    (StatusCode::OK, Json(ProcessedReceiptView { id })).into_response()
}

pub(crate) async fn points_handler<G>(
    State(service): State<Arc<ReceiptService<G>>>,
    Path(id): Path<String>,
) -> Response
where
    G: IdGenerator + 'static,
{
    if id.is_empty() {
        return invalid_path_response();
    }

    let id = ReceiptId(id);
    match service.points(&id) {
        Ok(points) => (StatusCode::OK, Json(PointsView { points })).into_response(),
        Err(error @ ReceiptServiceError::NotFound(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

/// Paths under `/receipts/` that match no route are malformed requests;
/// anything else is simply not here.
pub(crate) async fn unmatched_path_handler(uri: Uri) -> Response {
    if uri.path().starts_with("/receipts/") {
        invalid_path_response()
    } else {
        let payload = json!({
            "error": "not found",
        });
        (StatusCode::NOT_FOUND, Json(payload)).into_response()
    }
}

fn invalid_path_response() -> Response {
    let payload = json!({
        "error": "invalid request path",
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
