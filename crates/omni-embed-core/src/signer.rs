//! The signer boundary.
//!
//! Signed-URL generation is an external capability: the vendor exposes
//! three entry points (dashboard, workbook, content-discovery) and this
//! service only selects between them. Handlers depend on the
//! [`EmbedSigner`] trait, never on a concrete signer, so tests can inject
//! a stub.

use async_trait::async_trait;

use crate::error::SignerError;
use crate::request::SignedEmbedRequest;
use crate::selection::ContentTarget;

/// An opaque signed-URL generator.
///
/// Implementations receive the full normalized parameter set and either
/// return a signed URL string or fail. No retries, no caching — one call
/// per request.
#[async_trait]
pub trait EmbedSigner: Send + Sync {
    async fn sign_dashboard(&self, req: &SignedEmbedRequest) -> Result<String, SignerError>;

    async fn sign_workbook(&self, req: &SignedEmbedRequest) -> Result<String, SignerError>;

    async fn sign_content_discovery(
        &self,
        req: &SignedEmbedRequest,
    ) -> Result<String, SignerError>;
}

/// Dispatch a normalized request to the matching signer entry point.
///
/// Navigation reuses the dashboard entry point: the vendor has no neutral
/// landing page, so a navigation embed starts on the selected dashboard
/// with the session mode already forced to application.
///
/// # Errors
///
/// Propagates whatever the signer returns.
pub async fn generate_embed_url(
    signer: &dyn EmbedSigner,
    req: &SignedEmbedRequest,
) -> Result<String, SignerError> {
    match req.target {
        ContentTarget::Dashboard { .. } | ContentTarget::Navigation { .. } => {
            signer.sign_dashboard(req).await
        }
        ContentTarget::Workbook { .. } => signer.sign_workbook(req).await,
        ContentTarget::ContentDiscovery { .. } => signer.sign_content_discovery(req).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::request::{EmbedUser, normalize};
    use crate::selection::{ContentType, RawSelection};

    /// Records which entry point was hit and answers with its name.
    struct RecordingSigner;

    #[async_trait]
    impl EmbedSigner for RecordingSigner {
        async fn sign_dashboard(&self, _req: &SignedEmbedRequest) -> Result<String, SignerError> {
            Ok("dashboard".to_owned())
        }

        async fn sign_workbook(&self, _req: &SignedEmbedRequest) -> Result<String, SignerError> {
            Ok("workbook".to_owned())
        }

        async fn sign_content_discovery(
            &self,
            _req: &SignedEmbedRequest,
        ) -> Result<String, SignerError> {
            Ok("content-discovery".to_owned())
        }
    }

    fn request_for(content_type: ContentType) -> SignedEmbedRequest {
        let raw = RawSelection {
            content_type: Some(content_type),
            content_id: Some("c1".to_owned()),
            ..RawSelection::default()
        };
        let user = EmbedUser {
            external_id: Some("u1".to_owned()),
            ..EmbedUser::default()
        };
        normalize(&raw, &user).unwrap()
    }

    #[tokio::test]
    async fn dashboard_uses_dashboard_entry_point() {
        let url = generate_embed_url(&RecordingSigner, &request_for(ContentType::Dashboard))
            .await
            .unwrap();
        assert_eq!(url, "dashboard");
    }

    #[tokio::test]
    async fn workbook_uses_workbook_entry_point() {
        let url = generate_embed_url(&RecordingSigner, &request_for(ContentType::Workbook))
            .await
            .unwrap();
        assert_eq!(url, "workbook");
    }

    #[tokio::test]
    async fn navigation_reuses_dashboard_entry_point() {
        let url = generate_embed_url(&RecordingSigner, &request_for(ContentType::Navigation))
            .await
            .unwrap();
        assert_eq!(url, "dashboard");
    }

    #[tokio::test]
    async fn content_discovery_uses_its_own_entry_point() {
        let url = generate_embed_url(&RecordingSigner, &request_for(ContentType::ContentDiscovery))
            .await
            .unwrap();
        assert_eq!(url, "content-discovery");
    }
}
