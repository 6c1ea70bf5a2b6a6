//! Error types for `omni-embed-core`.
//!
//! Validation errors carry the exact field the client got wrong so the
//! HTTP layer can echo it back verbatim. Signer errors never include the
//! embed secret — only which piece of configuration was missing.

/// Errors from validating an inbound embed request.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A dashboard, workbook, or navigation selection arrived without a
    /// content identifier.
    #[error("missing required field: config.contentId")]
    MissingContentId,

    /// The user identity arrived without an external ID (or with an
    /// empty one).
    #[error("missing required field: user.externalId")]
    MissingExternalId,
}

/// Errors from the signed-URL generator.
#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    /// Server-side signer configuration is missing or inconsistent.
    /// Detected lazily, on first use.
    #[error("signer configuration error: {reason}")]
    Configuration { reason: String },

    /// URL construction or MAC computation failed.
    #[error("signing failed: {reason}")]
    Signing { reason: String },
}
