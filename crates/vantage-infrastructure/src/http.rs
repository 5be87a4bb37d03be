//! Shared plumbing for the HTTP boundary clients.

use crate::token::TokenProvider;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use vantage_core::error::{Result, VantageError};

/// Attaches the current bearer token, when one exists.
pub(crate) fn authorize(builder: RequestBuilder, token: &Arc<dyn TokenProvider>) -> RequestBuilder {
    match token.access_token() {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Sends a request and turns any non-success status into a transport error
/// carrying the status line and the response body verbatim.
pub(crate) async fn send_checked(builder: RequestBuilder) -> Result<Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| VantageError::transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(VantageError::transport(format_status(status, &body)))
}

pub(crate) fn format_status(status: StatusCode, body: &str) -> String {
    if body.is_empty() {
        status.to_string()
    } else {
        format!("{status}: {body}")
    }
}
