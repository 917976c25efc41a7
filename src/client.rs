//! HTTP client for the Apps Script gateway
//!
//! Every call is `<GAS_URL>?action=<action>&...`, sent with caching
//! disabled, never retried. Bodies are read as text and classified before
//! any JSON parsing because Apps Script answers login redirects with HTML
//! and occasionally with an empty body.

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::{
    header::{CACHE_CONTROL, PRAGMA},
    Client, Response, Url,
};
use serde::Serialize;
use serde_json::Value;

use crate::utils::errors::{preview, AppError, AppResult};

/// Actions understood by the gateway script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayAction {
    Employees,
    Status,
    SubmitChecklist,
    Missing,
    Summary,
    Drivers,
    DriverReports,
}

impl GatewayAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayAction::Employees => "employees",
            GatewayAction::Status => "status",
            GatewayAction::SubmitChecklist => "submitChecklist",
            GatewayAction::Missing => "missing",
            GatewayAction::Summary => "summary",
            GatewayAction::Drivers => "drivers",
            GatewayAction::DriverReports => "driver-reports",
        }
    }
}

/// A gateway answer whose body parsed as JSON.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub status: StatusCode,
    pub body: Value,
    /// Action URL that produced this reply.
    pub url: String,
}

impl GatewayReply {
    /// The body's `error` field, when it carries a non-empty one.
    pub fn error_message(&self) -> Option<String> {
        match self.body.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success() && self.error_message().is_none()
    }

    /// Gateway outcome collapsed to 200 / 400 for the relay routes.
    pub fn relay_status(&self) -> StatusCode {
        if self.is_success() {
            StatusCode::OK
        } else {
            StatusCode::BAD_REQUEST
        }
    }
}

#[derive(Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: Option<Url>,
}

impl GatewayClient {
    pub fn new(base_url: Option<Url>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Builds the action URL. Empty parameter values are left out.
    pub fn action_url(&self, action: GatewayAction, params: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = self
            .base_url
            .clone()
            .ok_or(AppError::MissingConfiguration)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("action", action.as_str());
            for (key, value) in params {
                let value = value.trim();
                if !value.is_empty() {
                    query.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }

    pub async fn get(&self, action: GatewayAction, params: &[(&str, &str)]) -> AppResult<GatewayReply> {
        let url = self.action_url(action, params)?;
        tracing::debug!("📤 GET {} -> {}", action.as_str(), url);

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| transport_error(action, e))?;

        read_reply(response, &url).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        action: GatewayAction,
        body: &B,
    ) -> AppResult<GatewayReply> {
        let url = self.action_url(action, &[])?;
        tracing::debug!("📤 POST {} -> {}", action.as_str(), url);

        let response = self
            .client
            .post(url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(action, e))?;

        read_reply(response, &url).await
    }
}

fn transport_error(action: GatewayAction, error: reqwest::Error) -> AppError {
    tracing::error!("❌ Gateway action '{}' failed: {}", action.as_str(), error);
    AppError::Transport(error)
}

async fn read_reply(response: Response, url: &Url) -> AppResult<GatewayReply> {
    let status = response.status();
    let text = response.text().await?;
    tracing::debug!("📥 {} ({} bytes) from {}", status, text.len(), url);

    let body = classify_body(&text, status, url.as_str())?;
    Ok(GatewayReply {
        status,
        body,
        url: url.to_string(),
    })
}

/// Text-first inspection of a gateway body.
pub fn classify_body(text: &str, status: StatusCode, url: &str) -> AppResult<Value> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        tracing::warn!("⚠️ Empty gateway body (HTTP {}) from {}", status, url);
        return Err(AppError::UpstreamEmpty {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    if trimmed.starts_with('<') {
        tracing::warn!("⚠️ Gateway returned HTML (HTTP {}) from {}", status, url);
        return Err(AppError::UpstreamHtml {
            status: status.as_u16(),
            preview: preview(text),
            url: url.to_string(),
        });
    }

    serde_json::from_str(trimmed).map_err(|e| {
        tracing::warn!("⚠️ Malformed gateway JSON from {}: {}", url, e);
        AppError::UpstreamMalformed {
            status: status.as_u16(),
            preview: preview(text),
            url: url.to_string(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> GatewayClient {
        GatewayClient::new(Some(Url::parse(base).unwrap()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn action_url_appends_action_and_skips_blank_params() {
        let url = client("https://script.google.com/macros/s/abc/exec")
            .action_url(
                GatewayAction::Status,
                &[("forkliftCode", "FL 0001"), ("employeeCode", "  ")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://script.google.com/macros/s/abc/exec?action=status&forkliftCode=FL+0001"
        );
    }

    #[test]
    fn action_url_keeps_existing_query() {
        let url = client("https://gw.example/exec?key=k1")
            .action_url(GatewayAction::Summary, &[("days", "30")])
            .unwrap();
        assert_eq!(url.as_str(), "https://gw.example/exec?key=k1&action=summary&days=30");
    }

    #[test]
    fn unconfigured_client_refuses_to_build_urls() {
        let client = GatewayClient::new(None, Duration::from_secs(5)).unwrap();
        assert!(!client.is_configured());
        assert!(matches!(
            client.action_url(GatewayAction::Employees, &[]),
            Err(AppError::MissingConfiguration)
        ));
    }

    #[test]
    fn empty_and_blank_bodies_are_upstream_empty() {
        for body in ["", "   \n\t"] {
            let err = classify_body(body, StatusCode::OK, "u").unwrap_err();
            assert!(matches!(err, AppError::UpstreamEmpty { status: 200, .. }));
        }
    }

    #[test]
    fn html_body_is_reported_with_200_char_preview() {
        let html = format!("  <!DOCTYPE html><html>{}</html>", "x".repeat(500));
        match classify_body(&html, StatusCode::OK, "u").unwrap_err() {
            AppError::UpstreamHtml { preview, url, .. } => {
                assert_eq!(preview.chars().count(), 200);
                assert!(html.starts_with(&preview));
                assert_eq!(url, "u");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_not_a_parse_panic() {
        let err = classify_body("{\"checked\": tru", StatusCode::OK, "u").unwrap_err();
        assert!(matches!(err, AppError::UpstreamMalformed { .. }));
    }

    #[test]
    fn reply_with_error_field_is_not_success() {
        let reply = GatewayReply {
            status: StatusCode::OK,
            body: json!({ "error": "Forklift not found" }),
            url: String::new(),
        };
        assert_eq!(reply.error_message().as_deref(), Some("Forklift not found"));
        assert_eq!(reply.relay_status(), StatusCode::BAD_REQUEST);

        let ok = GatewayReply {
            status: StatusCode::OK,
            body: json!({ "checked": false, "error": null }),
            url: String::new(),
        };
        assert!(ok.is_success());
        assert_eq!(ok.relay_status(), StatusCode::OK);
    }

    #[test]
    fn non_2xx_reply_relays_as_400() {
        let reply = GatewayReply {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "ok": false }),
            url: String::new(),
        };
        assert_eq!(reply.relay_status(), StatusCode::BAD_REQUEST);
    }
}
