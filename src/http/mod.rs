//! HTTP transport for the lock endpoints.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /{prefix}/updatelock/:id` — renew or take the caller's lock.
//!   `204` when the caller holds it, `409` with the holder when someone else
//!   does, `401`/`403`/`404`/`500` otherwise.
//! - `GET /{prefix}/lock/:id` — the current lock, if any. Same identity and
//!   permission checks as `updatelock`.
//! - `GET /health` — health check returning `{ "ok": true }`.
//!
//! The caller is identified by the `x-user-id` and `x-user-email` headers.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use frontend_editing::{http, FrontendEditing, SystemClock};
//!
//! let editing = Arc::new(FrontendEditing::new(locks, documents, grants));
//! http::serve(editing, Arc::new(SystemClock), "0.0.0.0:3000").await?;
//! ```

mod session;

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::warn;

use crate::clock::Clock;
use crate::document::{DocumentStore, Stage};
use crate::editing::{FrontendEditing, RequestContext};
use crate::error::EditError;
use crate::gate::PermissionChecker;
use crate::lock::{Acquisition, LockState, LockStore};

pub use session::{Session, USER_EMAIL_HEADER, USER_ID_HEADER};

struct AppState<L, D, P> {
    editing: Arc<FrontendEditing<L, D, P>>,
    clock: Arc<dyn Clock>,
}

impl<L, D, P> Clone for AppState<L, D, P> {
    fn clone(&self) -> Self {
        Self {
            editing: Arc::clone(&self.editing),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Build an axum `Router` serving the lock endpoints.
///
/// Routes are mounted under the configured route prefix.
pub fn router<L, D, P>(editing: Arc<FrontendEditing<L, D, P>>, clock: Arc<dyn Clock>) -> Router
where
    L: LockStore + 'static,
    D: DocumentStore + 'static,
    P: PermissionChecker + 'static,
{
    let config = editing.locks().config().clone();
    Router::new()
        .route("/health", get(health_handler))
        .route(
            &config.update_lock_route(),
            post(update_lock_handler::<L, D, P>),
        )
        .route(
            &config.inspect_lock_route(),
            get(inspect_lock_handler::<L, D, P>),
        )
        .with_state(AppState { editing, clock })
}

/// Serve the lock endpoints over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve<L, D, P>(
    editing: Arc<FrontendEditing<L, D, P>>,
    clock: Arc<dyn Clock>,
    addr: &str,
) -> Result<(), std::io::Error>
where
    L: LockStore + 'static,
    D: DocumentStore + 'static,
    P: PermissionChecker + 'static,
{
    let app = router(editing, clock);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `POST /{prefix}/updatelock/:id`
async fn update_lock_handler<L, D, P>(
    State(state): State<AppState<L, D, P>>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    L: LockStore + 'static,
    D: DocumentStore + 'static,
    P: PermissionChecker + 'static,
{
    let actor = Session::from_headers(&headers).actor();
    let ctx = RequestContext::new(actor, Stage::Draft, state.clock.now());

    match state.editing.update_lock(&document_id, &ctx) {
        Ok(Acquisition::Acquired(_)) => StatusCode::NO_CONTENT.into_response(),
        Ok(Acquisition::Contended(lock)) => {
            (StatusCode::CONFLICT, Json(lock_body(Some(&lock)))).into_response()
        }
        Err(e) => error_response(&document_id, e),
    }
}

/// `GET /{prefix}/lock/:id`
async fn inspect_lock_handler<L, D, P>(
    State(state): State<AppState<L, D, P>>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
) -> Response
where
    L: LockStore + 'static,
    D: DocumentStore + 'static,
    P: PermissionChecker + 'static,
{
    let actor = Session::from_headers(&headers).actor();
    let ctx = RequestContext::new(actor, Stage::Draft, state.clock.now());

    match state.editing.visible_lock(&document_id, &ctx) {
        Ok(lock) => (StatusCode::OK, Json(lock_body(lock.as_ref()))).into_response(),
        Err(e) => error_response(&document_id, e),
    }
}

fn lock_body(lock: Option<&LockState>) -> Value {
    match lock {
        Some(lock) => json!({
            "locked": true,
            "editor": lock.editor,
            "editor_email": lock.editor_email,
            "expires_at": lock.expires_at,
        }),
        None => json!({ "locked": false }),
    }
}

fn error_response(document_id: &str, err: EditError) -> Response {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!(document_id, error = %err, "lock endpoint failed");
    }
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
