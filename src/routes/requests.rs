use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Value, json};

use crate::booking::client_ip;
use crate::booking::intake::{self, IntakeOutcome};
use crate::booking::BookingForm;
use crate::error::AppError;
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, AppError> {
    state.loader.refresh().await?;
    let requests = state.loader.snapshot().await;
    Ok(Json(json!({ "requests": requests })))
}

pub async fn create(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let form: BookingForm = serde_json::from_value(body.clone())
        .map_err(|e| AppError::BadRequest(format!("Invalid booking: {e}")))?;
    let raw_fields = string_fields(&body);
    let ip = client_ip::resolve(&headers, addr.ip(), &state.config.trusted_proxies);

    match intake::accept(&state, ip, &form, &raw_fields, None).await? {
        IntakeOutcome::Stored(appointment) => Ok((
            StatusCode::CREATED,
            Json(json!({ "status": "created", "request": appointment })),
        )
            .into_response()),
        IntakeOutcome::Discarded => Ok(Json(json!({ "status": "ok" })).into_response()),
    }
}

/// Top-level string members, so the honeypot sees JSON posts the way it sees form posts.
fn string_fields(body: &Value) -> HashMap<String, String> {
    body.as_object()
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default()
}
