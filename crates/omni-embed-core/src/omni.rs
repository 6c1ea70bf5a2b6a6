//! Concrete Omni signer.
//!
//! Stands in for the vendor embed SDK: builds the embed login URL for the
//! configured destination and signs it with HMAC-SHA256 over the embed
//! secret. The exact URL layout is a collaborator detail — callers only
//! rely on "signed URL string or failure".
//!
//! Configuration is held as raw `Option`s and validated lazily on first
//! use, so a misconfigured server starts fine and fails per-request with
//! a configuration error.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::error::SignerError;
use crate::request::SignedEmbedRequest;
use crate::selection::ContentTarget;
use crate::signer::EmbedSigner;
use async_trait::async_trait;

type HmacSha256 = Hmac<Sha256>;

/// Where signed URLs point: a vanity organization subdomain or a custom
/// host. Exactly one must be configured.
#[derive(Debug, Clone)]
enum Destination {
    Organization(String),
    Host(String),
}

impl Destination {
    fn domain(&self) -> String {
        match self {
            Self::Organization(org) => format!("{org}.embed-omniapp.co"),
            Self::Host(host) => host.clone(),
        }
    }
}

/// HMAC-signing URL generator for Omni embeds.
pub struct OmniSigner {
    secret: Option<String>,
    organization_name: Option<String>,
    host: Option<String>,
}

impl OmniSigner {
    #[must_use]
    pub fn new(
        secret: Option<String>,
        organization_name: Option<String>,
        host: Option<String>,
    ) -> Self {
        Self {
            secret,
            organization_name,
            host,
        }
    }

    /// Read signer configuration from `OMNI_SECRET`,
    /// `OMNI_ORGANIZATION_NAME`, and `OMNI_HOST`. Absent values are
    /// detected on first use, not here.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("OMNI_SECRET").ok(),
            std::env::var("OMNI_ORGANIZATION_NAME").ok(),
            std::env::var("OMNI_HOST").ok(),
        )
    }

    /// Lazy configuration check: a secret plus exactly one destination.
    fn credentials(&self) -> Result<(&str, Destination), SignerError> {
        let secret = self
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| SignerError::Configuration {
                reason: "OMNI_SECRET is not set".to_owned(),
            })?;

        // Empty strings count as unset, like falsy env vars upstream.
        let org = self
            .organization_name
            .as_deref()
            .filter(|s| !s.is_empty());
        let host = self.host.as_deref().filter(|s| !s.is_empty());

        let destination = match (org, host) {
            (Some(org), None) => Destination::Organization(org.to_owned()),
            (None, Some(host)) => Destination::Host(host.to_owned()),
            (Some(_), Some(_)) => {
                return Err(SignerError::Configuration {
                    reason: "set either OMNI_ORGANIZATION_NAME or OMNI_HOST, not both".to_owned(),
                });
            }
            (None, None) => {
                return Err(SignerError::Configuration {
                    reason: "either OMNI_ORGANIZATION_NAME or OMNI_HOST must be set".to_owned(),
                });
            }
        };

        Ok((secret, destination))
    }

    /// Build and sign the login URL for one content path.
    fn sign(&self, req: &SignedEmbedRequest, content_path: &str) -> Result<String, SignerError> {
        let (secret, destination) = self.credentials()?;

        let mut params: Vec<(&'static str, String)> = vec![
            ("contentPath", content_path.to_owned()),
            ("externalId", req.external_id.clone()),
            ("name", req.name.clone()),
            ("mode", req.mode.as_param().to_owned()),
            ("nonce", uuid::Uuid::new_v4().simple().to_string()),
        ];

        push_opt(&mut params, "email", req.email.clone());
        push_opt(&mut params, "entity", req.entity.clone());
        push_opt(&mut params, "theme", req.theme.map(|t| t.as_param().to_owned()));
        push_opt(
            &mut params,
            "prefersDark",
            req.prefers_dark.map(|p| p.as_param().to_owned()),
        );
        push_opt(
            &mut params,
            "filterSearchParam",
            req.filter_search_param.clone(),
        );
        push_opt(&mut params, "linkAccess", req.link_access.clone());
        push_opt(
            &mut params,
            "accessBoost",
            req.access_boost.map(|b| b.to_string()),
        );
        push_opt(&mut params, "customThemeId", req.custom_theme_id.clone());
        push_json(&mut params, "userAttributes", req.user_attributes.as_ref())?;
        push_json(&mut params, "connectionRoles", req.connection_roles.as_ref())?;
        push_json(&mut params, "customTheme", req.custom_theme.as_ref())?;
        push_json(&mut params, "uiSettings", req.ui_settings.as_ref())?;

        // Canonical parameter order so the signature is order-independent.
        params.sort_by(|a, b| a.0.cmp(b.0));

        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let unsigned = format!("https://{}/embed/login?{query}", destination.domain());

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            SignerError::Signing {
                reason: format!("invalid HMAC key: {e}"),
            }
        })?;
        mac.update(unsigned.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        debug!(external_id = %req.external_id, content_path, "signed embed URL");

        Ok(format!(
            "{unsigned}&signature={}",
            urlencoding::encode(&signature)
        ))
    }
}

fn push_opt(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(v) = value {
        params.push((key, v));
    }
}

fn push_json<T: serde::Serialize>(
    params: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<&T>,
) -> Result<(), SignerError> {
    if let Some(v) = value {
        let encoded = serde_json::to_string(v).map_err(|e| SignerError::Signing {
            reason: format!("failed to encode {key}: {e}"),
        })?;
        params.push((key, encoded));
    }
    Ok(())
}

#[async_trait]
impl EmbedSigner for OmniSigner {
    async fn sign_dashboard(&self, req: &SignedEmbedRequest) -> Result<String, SignerError> {
        let content_id = match &req.target {
            ContentTarget::Dashboard { content_id } | ContentTarget::Navigation { content_id } => {
                content_id
            }
            other => {
                return Err(SignerError::Signing {
                    reason: format!("dashboard entry point called with {other:?}"),
                });
            }
        };
        self.sign(req, &format!("/dashboards/{content_id}"))
    }

    async fn sign_workbook(&self, req: &SignedEmbedRequest) -> Result<String, SignerError> {
        let ContentTarget::Workbook { content_id } = &req.target else {
            return Err(SignerError::Signing {
                reason: format!("workbook entry point called with {:?}", req.target),
            });
        };
        self.sign(req, &format!("/w/{content_id}"))
    }

    async fn sign_content_discovery(
        &self,
        req: &SignedEmbedRequest,
    ) -> Result<String, SignerError> {
        let ContentTarget::ContentDiscovery { path } = &req.target else {
            return Err(SignerError::Signing {
                reason: format!("content-discovery entry point called with {:?}", req.target),
            });
        };
        self.sign(req, path)
    }
}
