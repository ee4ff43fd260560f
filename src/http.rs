//! HTTP transport for the item service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api/items`: list items.
//! - `POST /api/items`: create an item (201, or 400 when invalid).
//! - `GET /api/items/:id`: fetch one item (200 / 404).
//! - `PUT /api/items/:id`: replace an item (200 / 404 / 400).
//! - `DELETE /api/items/:id`: delete an item (204).
//! - `GET /api/items/process`: run a batch and return the processed items
//!   (202). A batch that could not run at all answers 500 or 503.
//! - `GET /api/items/process/report`: same batch, answering 202 with the full
//!   report (processed items, missing ids, per-item failures).
//! - `GET /health`: `{ "ok": true }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use item_service::{http, InMemoryItemStore, ItemService};
//!
//! let service = Arc::new(ItemService::new(InMemoryItemStore::new()));
//!
//! // Get the router to compose with other axum routes
//! let app = http::router(service.clone());
//!
//! // Or serve directly
//! http::serve(service, "0.0.0.0:8080").await?;
//! ```

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::{info, warn};

use crate::item::{Item, ItemId};
use crate::service::{ItemService, ServiceError};
use crate::store::ItemStore;

type SharedService<S> = Arc<ItemService<S>>;

/// Build an axum `Router` serving the item API.
pub fn router<S: ItemStore + 'static>(service: SharedService<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/items", get(list_items::<S>).post(create_item::<S>))
        .route("/api/items/process", get(process_items::<S>))
        .route("/api/items/process/report", get(process_report::<S>))
        .route(
            "/api/items/:id",
            get(get_item::<S>)
                .put(update_item::<S>)
                .delete(delete_item::<S>),
        )
        .with_state(service)
}

/// Serve the item API over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
pub async fn serve<S: ItemStore + 'static>(
    service: SharedService<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await
}

/// `GET /health`
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /api/items`
async fn list_items<S: ItemStore + 'static>(
    State(service): State<SharedService<S>>,
) -> Response {
    match service.find_all() {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST /api/items`
async fn create_item<S: ItemStore + 'static>(
    State(service): State<SharedService<S>>,
    body: Result<Json<Item>, JsonRejection>,
) -> Response {
    let Json(item) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection),
    };
    match service.create(item) {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/items/:id`
async fn get_item<S: ItemStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(id): Path<ItemId>,
) -> Response {
    match service.get(id) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `PUT /api/items/:id`
async fn update_item<S: ItemStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(id): Path<ItemId>,
    body: Result<Json<Item>, JsonRejection>,
) -> Response {
    let Json(item) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection),
    };
    match service.update(id, item) {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `DELETE /api/items/:id`
async fn delete_item<S: ItemStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(id): Path<ItemId>,
) -> Response {
    match service.delete_by_id(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/items/process`
///
/// Starts the batch, waits for it and answers 202 with the processed items,
/// whatever their count. Only a batch that could not run is an error.
async fn process_items<S: ItemStore + 'static>(
    State(service): State<SharedService<S>>,
) -> Response {
    match service.spawn_processing().items().await {
        Ok(items) => (StatusCode::ACCEPTED, Json(items)).into_response(),
        Err(e) => error_response(ServiceError::from(e)),
    }
}

/// `GET /api/items/process/report`
async fn process_report<S: ItemStore + 'static>(
    State(service): State<SharedService<S>>,
) -> Response {
    match service.spawn_processing().wait().await {
        Ok(report) => (StatusCode::ACCEPTED, Json(report)).into_response(),
        Err(e) => error_response(ServiceError::from(e)),
    }
}

fn bad_request(rejection: JsonRejection) -> Response {
    let body = json!({ "error": rejection.body_text() });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn error_response(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!(error = %err, "request failed");
    }
    let body = json!({ "error": err.to_string() });
    (status, Json(body)).into_response()
}
