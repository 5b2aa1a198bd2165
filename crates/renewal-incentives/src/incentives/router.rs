use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::{CatalogHandle, LoadStatus};
use super::domain::{LookupOutcome, SelectorField};

/// Router builder exposing the catalog to the presentation layer.
pub fn incentive_router(handle: Arc<CatalogHandle>) -> Router {
    Router::new()
        .route("/api/v1/incentives/selectors", get(selectors_handler))
        .route("/api/v1/incentives/quote", post(quote_handler))
        .route("/api/v1/incentives/status", get(status_handler))
        .route("/api/v1/incentives/reload", post(reload_handler))
        .with_state(handle)
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequest {
    pub(crate) category: String,
    pub(crate) current_fuel: String,
    pub(crate) replacement_fuel: String,
    pub(crate) year_band: String,
}

pub(crate) async fn selectors_handler(State(handle): State<Arc<CatalogHandle>>) -> Response {
    if let LoadStatus::Failed { reason } = handle.status() {
        return load_failure_response(reason);
    }

    let payload = json!({
        "categories": handle.distinct_values(SelectorField::Category),
        "current_fuels": handle.distinct_values(SelectorField::CurrentFuel),
        "replacement_fuels": handle.distinct_values(SelectorField::ReplacementFuel),
        "year_bands": handle.distinct_values(SelectorField::YearBand),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn quote_handler(
    State(handle): State<Arc<CatalogHandle>>,
    Json(request): Json<QuoteRequest>,
) -> Response {
    if let LoadStatus::Failed { reason } = handle.status() {
        return load_failure_response(reason);
    }

    let outcome = handle.query(
        &request.category,
        &request.current_fuel,
        &request.replacement_fuel,
        &request.year_band,
    );

    let payload = match outcome {
        LookupOutcome::Found(matched) => json!({
            "outcome": "found",
            "amount": matched.amount,
            "matched": matched,
        }),
        LookupOutcome::NotFound => json!({
            "outcome": "not_found",
        }),
    };
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn status_handler(State(handle): State<Arc<CatalogHandle>>) -> Response {
    status_response(handle.status())
}

pub(crate) async fn reload_handler(State(handle): State<Arc<CatalogHandle>>) -> Response {
    status_response(handle.reload())
}

fn status_response(status: LoadStatus) -> Response {
    let payload = match status {
        LoadStatus::Ready { records } => json!({ "status": "ready", "records": records }),
        LoadStatus::Failed { reason } => json!({ "status": "failed", "reason": reason }),
    };
    (StatusCode::OK, Json(payload)).into_response()
}

fn load_failure_response(reason: String) -> Response {
    let payload = json!({ "error": reason });
    (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
}
