use std::future::Future;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use strum::AsRefStr;
use thiserror::Error;
use tracing::{error, warn};
use vm_common::db::ProfileStoreError;
use vm_common::matching::MatchServiceError;

tokio::task_local! {
    static REQUEST_ID: String;
}

const MAX_MESSAGE_LEN: usize = 240;

/// Strip secrets that store and token errors can carry before the text is
/// logged or echoed: connection URLs, libpq `password=` pairs and anything
/// shaped like a compact JWT.
fn sanitize_message(message: &str) -> String {
    let flattened: String = message
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    let mut cleaned = flattened
        .split_whitespace()
        .map(redact_token)
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.len() > MAX_MESSAGE_LEN {
        let mut end = MAX_MESSAGE_LEN;
        while !cleaned.is_char_boundary(end) {
            end -= 1;
        }
        cleaned.truncate(end);
        cleaned.push_str("...");
    }

    if cleaned.is_empty() {
        "unexpected error".to_string()
    } else {
        cleaned
    }
}

fn redact_token(token: &str) -> String {
    if token.contains("://") {
        return "[redacted-dsn]".to_string();
    }

    if let Some((key, _)) = token.split_once('=') {
        if key.eq_ignore_ascii_case("password") {
            return format!("{key}=[redacted]");
        }
    }

    if looks_like_jwt(token) {
        return "[redacted-token]".to_string();
    }

    token.to_string()
}

fn looks_like_jwt(token: &str) -> bool {
    let token = token.trim_matches(|c: char| matches!(c, '"' | '\'' | ',' | ')' | '('));
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments[0].starts_with("eyJ")
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

pub async fn with_request_id<Fut, T>(request_id: Option<String>, fut: Fut) -> T
where
    Fut: Future<Output = T>,
{
    match request_id {
        Some(request_id) => REQUEST_ID.scope(request_id, fut).await,
        None => fut.await,
    }
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|value| value.clone()).ok()
}

/// Everything the match API can fail with. The snake_case variant name is the
/// `code` clients see.
#[derive(Debug, Error, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ApiError {
    /// Missing or contradictory settings; aborts startup, or fails a request
    /// when auth material is unusable at runtime.
    #[error("configuration error: {0}")]
    Config(String),
    #[error("startup failed: {0}")]
    Startup(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("not ready: {0}")]
    NotReady(&'static str),
    #[error("profile store unavailable: {0}")]
    StoreUnavailable(#[source] ProfileStoreError),
    #[error("match run failed: {0}")]
    Store(#[from] MatchServiceError),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
    request_id: Option<String>,
}

impl ApiError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) | ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::NotReady(_) | ApiError::StoreUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Config(_) | ApiError::Startup(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to hand to a client. Server-side failures stay opaque.
    fn public_message(&self) -> String {
        match self {
            ApiError::Unauthorized(reason) => sanitize_message(reason),
            ApiError::InvalidToken(_) => sanitize_message(&self.to_string()),
            ApiError::RateLimited => "too many requests".to_string(),
            ApiError::NotReady(reason) => (*reason).to_string(),
            ApiError::StoreUnavailable(_) => "service unavailable".to_string(),
            ApiError::Config(_) | ApiError::Startup(_) | ApiError::Store(_) => {
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let code = self.as_ref().to_string();
        let request_id = current_request_id();
        let detail = sanitize_message(&self.to_string());

        let logged_id = request_id.as_deref().unwrap_or("");
        if status.is_server_error() {
            error!(
                code = %code,
                status = %status,
                request_id = logged_id,
                error = %detail,
                "api_error"
            );
        } else {
            warn!(
                code = %code,
                status = %status,
                request_id = logged_id,
                error = %detail,
                "api_rejected"
            );
        }

        let body = Json(ErrorResponse {
            message: self.public_message(),
            code,
            request_id,
        });

        (status, body).into_response()
    }
}
