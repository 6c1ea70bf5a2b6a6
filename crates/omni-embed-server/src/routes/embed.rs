//! Embed URL route: `POST /api/embed-url`
//!
//! Receives `{config, user}` from the browser, validates and normalizes
//! it, and asks the injected signer for a signed embed URL. Stateless —
//! each request is handled independently and shares only the read-only
//! process configuration.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use omni_embed_core::{EmbedUser, RawSelection, generate_embed_url, normalize};

use crate::error::ApiError;
use crate::state::AppState;

/// Build the embed-url router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/embed-url",
        post(generate).fallback(method_not_allowed),
    )
}

// ── Request / Response types ─────────────────────────────────────────

/// Request body for `POST /api/embed-url`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EmbedUrlRequest {
    pub config: RawSelection,
    pub user: EmbedUser,
}

/// Success response: `{success:true, data:{url}}`.
#[derive(Debug, Serialize)]
pub struct EmbedUrlResponse {
    pub success: bool,
    pub data: EmbedUrlData,
}

#[derive(Debug, Serialize)]
pub struct EmbedUrlData {
    pub url: String,
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Generate a signed embed URL for one user/content pair.
async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EmbedUrlRequest>, JsonRejection>,
) -> Result<Json<EmbedUrlResponse>, ApiError> {
    let Json(body) =
        body.map_err(|_| ApiError::InvalidRequest("malformed body".to_owned()))?;

    let normalized = normalize(&body.config, &body.user)?;
    let url = generate_embed_url(state.signer.as_ref(), &normalized).await?;

    info!(
        external_id = %normalized.external_id,
        target = ?normalized.target,
        "embed URL generated"
    );

    Ok(Json(EmbedUrlResponse {
        success: true,
        data: EmbedUrlData { url },
    }))
}

/// Any verb other than POST is rejected before body parsing.
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use omni_embed_core::{EmbedSigner, OmniSigner, SignedEmbedRequest, SignerError};

    use super::*;
    use crate::config::ServerConfig;

    /// Signer stub that always succeeds with a fixed URL.
    struct StaticSigner;

    #[async_trait]
    impl EmbedSigner for StaticSigner {
        async fn sign_dashboard(&self, _req: &SignedEmbedRequest) -> Result<String, SignerError> {
            Ok("https://example.test/signed".to_owned())
        }

        async fn sign_workbook(&self, _req: &SignedEmbedRequest) -> Result<String, SignerError> {
            Ok("https://example.test/signed".to_owned())
        }

        async fn sign_content_discovery(
            &self,
            _req: &SignedEmbedRequest,
        ) -> Result<String, SignerError> {
            Ok("https://example.test/signed".to_owned())
        }
    }

    fn test_config() -> ServerConfig {
        ServerConfig {
            bind_addr: ([127, 0, 0, 1], 0).into(),
            log_level: "info".to_owned(),
            secret: None,
            organization_name: None,
            host: None,
        }
    }

    fn app_with(signer: Arc<dyn EmbedSigner>) -> Router {
        let state = Arc::new(AppState {
            signer,
            config: test_config(),
        });
        Router::new().nest("/api", router()).with_state(state)
    }

    async fn post_json(app: Router, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/embed-url")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed = serde_json::from_slice(&bytes).unwrap();
        (status, parsed)
    }

    // ── method handling ──────────────────────────────────────────────

    #[tokio::test]
    async fn get_is_rejected_with_405_envelope() {
        let response = app_with(Arc::new(StaticSigner))
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/embed-url")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("METHOD_NOT_ALLOWED"));
    }

    // ── validation ───────────────────────────────────────────────────

    #[tokio::test]
    async fn malformed_body_is_invalid_request() {
        let response = app_with(Arc::new(StaticSigner))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/embed-url")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], json!("INVALID_REQUEST"));
    }

    #[tokio::test]
    async fn dashboard_without_content_id_is_invalid_request() {
        let (status, body) = post_json(
            app_with(Arc::new(StaticSigner)),
            json!({"config": {"contentType": "dashboard"}, "user": {"externalId": "u1"}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("INVALID_REQUEST"));
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("contentId")
        );
    }

    #[tokio::test]
    async fn missing_external_id_is_invalid_request() {
        let (status, body) = post_json(
            app_with(Arc::new(StaticSigner)),
            json!({"config": {"contentType": "dashboard", "contentId": "d1"}, "user": {}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("INVALID_REQUEST"));
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("externalId")
        );
    }

    // ── success paths ────────────────────────────────────────────────

    #[tokio::test]
    async fn valid_dashboard_request_returns_url() {
        let (status, body) = post_json(
            app_with(Arc::new(StaticSigner)),
            json!({"config": {"contentType": "dashboard", "contentId": "d1"}, "user": {"externalId": "u1"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["data"]["url"], json!("https://example.test/signed"));
    }

    #[tokio::test]
    async fn content_discovery_without_path_succeeds() {
        // Path defaults to "root"; no content ID required.
        let signer = OmniSigner::new(
            Some("0123456789abcdef0123456789abcdef".to_owned()),
            Some("acme".to_owned()),
            None,
        );
        let (status, body) = post_json(
            app_with(Arc::new(signer)),
            json!({"config": {"contentType": "content-discovery"}, "user": {"externalId": "u1"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        let url = body["data"]["url"].as_str().unwrap();
        assert!(url.contains("contentPath=root"));
    }

    // ── failure taxonomy ─────────────────────────────────────────────

    #[tokio::test]
    async fn unconfigured_signer_is_a_configuration_error() {
        let signer = OmniSigner::new(
            Some("0123456789abcdef0123456789abcdef".to_owned()),
            None,
            None,
        );
        let (status, body) = post_json(
            app_with(Arc::new(signer)),
            json!({"config": {"contentType": "dashboard", "contentId": "d1"}, "user": {"externalId": "u1"}}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], json!("CONFIGURATION_ERROR"));
        // The reason stays server-side.
        assert!(
            !body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("OMNI_")
        );
    }

    /// Signer stub that fails with a non-configuration error.
    struct FailingSigner;

    #[async_trait]
    impl EmbedSigner for FailingSigner {
        async fn sign_dashboard(&self, _req: &SignedEmbedRequest) -> Result<String, SignerError> {
            Err(SignerError::Signing {
                reason: "boom".to_owned(),
            })
        }

        async fn sign_workbook(&self, _req: &SignedEmbedRequest) -> Result<String, SignerError> {
            Err(SignerError::Signing {
                reason: "boom".to_owned(),
            })
        }

        async fn sign_content_discovery(
            &self,
            _req: &SignedEmbedRequest,
        ) -> Result<String, SignerError> {
            Err(SignerError::Signing {
                reason: "boom".to_owned(),
            })
        }
    }

    #[tokio::test]
    async fn signer_failure_is_a_generic_internal_error() {
        let (status, body) = post_json(
            app_with(Arc::new(FailingSigner)),
            json!({"config": {"contentType": "dashboard", "contentId": "d1"}, "user": {"externalId": "u1"}}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], json!("INTERNAL_ERROR"));
        assert!(!body["error"]["message"].as_str().unwrap().contains("boom"));
    }
}
