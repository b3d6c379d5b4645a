//! REST API helpers for the prediction backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `ApiError::Unavailable` since these
//! endpoints are only called from browser event handlers.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; the error's `Display` is the text
//! shown to the user, so server-supplied `message` fields pass through intact.
//! No call is retried or cancelled.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ErrorBody, HistoryRow, Payload, PredictResponse, SchemaMap};
use crate::state::stage::Stage;

/// Schema endpoint.
pub const MODELS_INFO_ENDPOINT: &str = "/api/models/info";
/// State logging endpoint.
pub const LOG_ENDPOINT: &str = "/api/log";
/// History endpoint.
pub const HISTORY_ENDPOINT: &str = "/api/history";

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("{0}")]
    Decode(String),
    /// Called outside the browser build.
    #[error("not available on server")]
    Unavailable,
}

/// Path of the predict endpoint for `stage`.
pub fn predict_endpoint(stage: Stage) -> String {
    format!("/api/predict/{}", stage.as_str())
}

/// Build the error for a non-success response, preferring the body's message.
pub fn server_error(status: u16, body: Option<ErrorBody>) -> ApiError {
    let message = body
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| request_failed_message(status));
    ApiError::Server { status, message }
}

fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    if !resp.ok() {
        let status = resp.status();
        let body = resp.json::<ErrorBody>().await.ok();
        return Err(server_error(status, body));
    }
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch every stage schema from `GET /api/models/info`.
///
/// # Errors
///
/// Returns an error if the request fails, the server responds with a non-OK
/// status, or the body is not a schema map.
pub async fn fetch_model_schemas() -> Result<SchemaMap, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(MODELS_INFO_ENDPOINT)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}

/// Request predictions for `stage` via `POST /api/predict/{stage}`.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects the payload;
/// the server's `message` is carried in [`ApiError::Server`].
pub async fn predict(stage: Stage, payload: &Payload) -> Result<PredictResponse, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let url = predict_endpoint(stage);
        let resp = gloo_net::http::Request::post(&url)
            .json(payload)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (stage, payload);
        Err(ApiError::Unavailable)
    }
}

/// Post a flattened pipeline snapshot to `POST /api/log`.
///
/// The response body is not inspected beyond its status.
///
/// # Errors
///
/// Returns an error if the request fails or the server responds with a
/// non-OK status.
pub async fn post_log(payload: &Payload) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOG_ENDPOINT)
            .json(payload)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !resp.ok() {
            let status = resp.status();
            let body = resp.json::<ErrorBody>().await.ok();
            return Err(server_error(status, body));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = payload;
        Err(ApiError::Unavailable)
    }
}

/// Fetch past pipeline runs from `GET /api/history`.
///
/// # Errors
///
/// Returns an error if the request fails, the server responds with a non-OK
/// status, or the body is not a list of objects.
pub async fn fetch_history() -> Result<Vec<HistoryRow>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(HISTORY_ENDPOINT)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        read_json(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(ApiError::Unavailable)
    }
}
