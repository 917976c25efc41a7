//! Error handling
//!
//! Every failure the relay layer can hit, and its conversion into a JSON
//! response shaped `{error, preview?, url?, status?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Characters of an offending upstream body echoed back for diagnosis.
pub const PREVIEW_CHARS: usize = 200;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing {0}")]
    MissingParameter(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("Missing GAS_URL in env")]
    MissingConfiguration,

    #[error("Could not reach Apps Script: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Empty response from Apps Script")]
    UpstreamEmpty { status: u16, url: String },

    #[error("Apps Script returned HTML instead of JSON")]
    UpstreamHtml {
        status: u16,
        preview: String,
        url: String,
    },

    #[error("Apps Script returned malformed JSON: {reason}")]
    UpstreamMalformed {
        status: u16,
        preview: String,
        url: String,
        reason: String,
    },

    /// The gateway answered with JSON that reports a failure.
    #[error("{message}")]
    UpstreamRejected { status: u16, message: String },

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::BadRequest(_)
            | AppError::UpstreamRejected { .. } => StatusCode::BAD_REQUEST,
            AppError::MissingConfiguration
            | AppError::Transport(_)
            | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamEmpty { .. }
            | AppError::UpstreamHtml { .. }
            | AppError::UpstreamMalformed { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn to_body(&self) -> ErrorResponse {
        let error = self.to_string();
        match self {
            AppError::UpstreamEmpty { status, url } => ErrorResponse {
                error,
                preview: None,
                url: Some(url.clone()),
                status: Some(*status),
            },
            AppError::UpstreamHtml {
                status,
                preview,
                url,
            }
            | AppError::UpstreamMalformed {
                status,
                preview,
                url,
                ..
            } => ErrorResponse {
                error,
                preview: Some(preview.clone()),
                url: Some(url.clone()),
                status: Some(*status),
            },
            AppError::UpstreamRejected { status, .. } => ErrorResponse {
                error,
                preview: None,
                url: None,
                status: Some(*status),
            },
            _ => ErrorResponse {
                error,
                preview: None,
                url: None,
                status: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }
        (status, Json(self.to_body())).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// First `PREVIEW_CHARS` characters of a body, cut on a char boundary.
pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_family() {
        assert_eq!(
            AppError::MissingParameter("forkliftCode").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MissingConfiguration.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::UpstreamEmpty {
                status: 200,
                url: "u".into()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn missing_parameter_message_names_the_parameter() {
        assert_eq!(
            AppError::MissingParameter("forkliftCode").to_string(),
            "Missing forkliftCode"
        );
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "ư".repeat(300);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS);
        assert!(text.starts_with(&p));
    }

    #[test]
    fn html_error_body_carries_diagnostics() {
        let body = AppError::UpstreamHtml {
            status: 200,
            preview: "<html>".into(),
            url: "https://gw/exec?action=status".into(),
        }
        .to_body();
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["error"], "Apps Script returned HTML instead of JSON");
        assert_eq!(json["preview"], "<html>");
        assert_eq!(json["url"], "https://gw/exec?action=status");
        assert_eq!(json["status"], 200);
    }

    #[test]
    fn plain_errors_omit_optional_fields() {
        let json = serde_json::to_value(AppError::MissingConfiguration.to_body()).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "Missing GAS_URL in env" }));
    }
}
