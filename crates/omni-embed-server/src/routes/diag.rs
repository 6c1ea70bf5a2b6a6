//! Diagnostics route: `GET /api/test-env`
//!
//! Reports whether the embed configuration looks usable without ever
//! exposing the secret value — only whether it is set and its length.
//! Returns 200 when no issues are found, 400 otherwise.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Expected embed secret length, per the vendor's Admin > Embed page.
const SECRET_LEN: usize = 32;

/// Build the diagnostics router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/test-env", get(test_env))
}

/// Response body for `GET /api/test-env`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsResponse {
    pub status: &'static str,
    /// Human-readable configuration problems, empty when valid.
    pub issues: Vec<String>,
    pub config: ConfigSummary,
    /// The domain signed URLs will point at, derived from the
    /// organization name or custom host.
    pub expected_domain: String,
    pub help: HelpHints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub has_secret: bool,
    pub secret_length: usize,
    pub is_secret_valid: bool,
    pub has_org_name: bool,
    pub org_name: String,
    pub has_host: bool,
    pub host: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpHints {
    pub secret_info: &'static str,
    pub org_name_info: &'static str,
    pub host_info: &'static str,
}

/// Check the embed configuration and list everything wrong with it.
async fn test_env(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<DiagnosticsResponse>) {
    let config = &state.config;
    let secret_length = config.secret.as_deref().map_or(0, str::len);
    let org_name = config.organization_name.as_deref().unwrap_or_default();
    let host = config.host.as_deref().unwrap_or_default();

    let mut issues = Vec::new();

    if config.secret.is_none() {
        issues.push("OMNI_SECRET is not set".to_owned());
    } else if secret_length != SECRET_LEN {
        issues.push(format!(
            "OMNI_SECRET must be exactly {SECRET_LEN} characters (current: {secret_length})"
        ));
    }

    if org_name.is_empty() && host.is_empty() {
        issues.push("Either OMNI_ORGANIZATION_NAME or OMNI_HOST must be set".to_owned());
    }

    if !org_name.is_empty() && !host.is_empty() {
        issues.push("Only use either OMNI_ORGANIZATION_NAME or OMNI_HOST, not both".to_owned());
    }

    let expected_domain = if org_name.is_empty() {
        if host.is_empty() {
            "not configured".to_owned()
        } else {
            host.to_owned()
        }
    } else {
        format!("{org_name}.embed-omniapp.co")
    };

    let valid = issues.is_empty();
    let body = DiagnosticsResponse {
        status: if valid { "OK" } else { "ERROR" },
        issues,
        config: ConfigSummary {
            has_secret: config.secret.is_some(),
            secret_length,
            is_secret_valid: secret_length == SECRET_LEN,
            has_org_name: !org_name.is_empty(),
            org_name: if org_name.is_empty() {
                "not set".to_owned()
            } else {
                org_name.to_owned()
            },
            has_host: !host.is_empty(),
            host: if host.is_empty() {
                "not set".to_owned()
            } else {
                host.to_owned()
            },
        },
        expected_domain,
        help: HelpHints {
            secret_info: "Get your 32-character secret from Admin > Embed in your Omni instance",
            org_name_info: "Use OMNI_ORGANIZATION_NAME if your embed URL is like: yourorg.embed-omniapp.co",
            host_info: "Use OMNI_HOST if you have a custom domain like: omni.yourdomain.com",
        },
    };

    let status = if valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(body))
}
