//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::events::EventRecord;
use crate::ledger;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct FunderEventsResponse {
    pub funder: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
///
/// Returns all indexed contract events in ledger order.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::get_all_events(&state.pool).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(AllEventsResponse { count, events })),
            )
                .into_response()
        }
        Err(e) => internal_error(e).into_response(),
    }
}

/// `GET /funders`
///
/// Replays the full event stream into the current funder ledger: each
/// distinct funder's cumulative balance since the last withdrawal.
pub async fn get_funders(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    let view = db::get_all_events(&state.pool)
        .await
        .and_then(|events| ledger::replay(&events));
    match view {
        Ok(view) => (StatusCode::OK, Json(serde_json::json!(view))).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// `GET /funders/:address/events`
///
/// Returns all indexed events involving the given address.
pub async fn get_funder_events(
    State(state): State<Arc<ApiState>>,
    Path(funder): Path<String>,
) -> impl IntoResponse {
    match db::get_events_for_actor(&state.pool, &funder).await {
        Ok(events) => {
            let count = events.len();
            (
                StatusCode::OK,
                Json(serde_json::json!(FunderEventsResponse {
                    funder,
                    count,
                    events,
                })),
            )
                .into_response()
        }
        Err(e) => internal_error(e).into_response(),
    }
}

fn internal_error(e: crate::errors::IndexerError) -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!(ErrorResponse {
            error: e.to_string()
        })),
    )
}
