//! HTTP boundary
//!
//! Routes read/write requests to the key deriver and content store, and
//! rejects requests from hosts outside the configured allowlist before any
//! other processing. Every response, success or error, is JSON.

use crate::key::Key;
use crate::store::{ContentStore, StoreError};
use axum::{
    body::Bytes,
    extract::{Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Shared state for request handlers
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ContentStore>,
    allowed_hosts: Arc<HashSet<String>>,
}

/// Request-level failures, surfaced as JSON error envelopes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Host not allowed")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Value not found")]
    NotFound,

    #[error("Storage unavailable")]
    Unavailable,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct DataBody {
    data: String,
}

#[derive(Serialize)]
struct KeyBody {
    key: Key,
}

#[derive(Deserialize)]
struct ReadParams {
    key: Option<String>,
}

/// Build the request router.
///
/// The allowlist arrives as an explicit value rather than process-wide
/// state; the store is the injected persistence capability.
pub fn router(store: Arc<dyn ContentStore>, allowed_hosts: HashSet<String>) -> Router {
    let state = AppState {
        store,
        allowed_hosts: Arc::new(allowed_hosts),
    };

    Router::new()
        .route("/", get(read_entry).post(write_entry))
        .fallback(unsupported)
        .layer(middleware::from_fn_with_state(state.clone(), check_host))
        .with_state(state)
}

/// Reject requests whose Host header is not in the allowlist
async fn check_host(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let allowed = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .map(|host| state.allowed_hosts.contains(host))
        .unwrap_or(false);

    if allowed {
        next.run(request).await
    } else {
        ApiError::Unauthorized.into_response()
    }
}

/// GET: resolve a key back to its stored content
async fn read_entry(
    State(state): State<AppState>,
    Query(params): Query<ReadParams>,
) -> Result<Json<DataBody>, ApiError> {
    let key = match params.key.as_deref() {
        Some(k) if !k.is_empty() => Key::from_raw(k),
        _ => return Err(ApiError::BadRequest("Keyless request")),
    };

    let store = Arc::clone(&state.store);
    let value = run_store(move || store.get(&key)).await?;

    Ok(Json(DataBody {
        data: String::from_utf8_lossy(&value).into_owned(),
    }))
}

/// POST: store the request body and answer with its derived key
async fn write_entry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<KeyBody>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Invalid request"));
    }

    let key = Key::derive(&body);
    let store = Arc::clone(&state.store);
    let stored = key.clone();
    run_store(move || store.put(&stored, &body)).await?;

    Ok(Json(KeyBody { key }))
}

/// Anything other than a read or write is rejected
async fn unsupported() -> ApiError {
    ApiError::BadRequest("Method not supported")
}

/// Run a blocking store operation off the async worker threads.
///
/// Backend faults map to Unavailable and are logged; absence stays NotFound
/// so the two are never conflated in responses.
async fn run_store<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(op).await.map_err(|e| {
        log::error!("store task failed: {}", e);
        ApiError::Unavailable
    })?;

    result.map_err(|e| match e {
        StoreError::NotFound => ApiError::NotFound,
        StoreError::Unavailable(source) => {
            log::error!("storage unavailable: {}", source);
            ApiError::Unavailable
        }
    })
}
