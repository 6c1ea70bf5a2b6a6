//! Core library for the Omni embed demo.
//!
//! Validates untrusted `(content selection, user identity)` pairs from the
//! browser, normalizes them into a single parameter set, and dispatches to
//! a signed-URL generator behind the [`EmbedSigner`] trait. All signing,
//! session semantics, and permission encoding live on the other side of
//! that boundary — this crate only decides *which* entry point to call and
//! *what* to pass it.
//!
//! # Example
//!
//! ```rust
//! use omni_embed_core::{ContentType, EmbedUser, RawSelection, normalize};
//!
//! let config = RawSelection {
//!     content_type: Some(ContentType::ContentDiscovery),
//!     ..RawSelection::default()
//! };
//! let user = EmbedUser {
//!     external_id: Some("user-42".to_owned()),
//!     ..EmbedUser::default()
//! };
//! let req = normalize(&config, &user)?;
//! assert_eq!(req.name, "user-42");
//! # Ok::<(), omni_embed_core::ValidationError>(())
//! ```

pub mod error;
pub mod omni;
pub mod request;
pub mod selection;
pub mod signer;

pub use error::{SignerError, ValidationError};
pub use omni::OmniSigner;
pub use request::{EmbedUser, SignedEmbedRequest, normalize};
pub use selection::{
    ContentTarget, ContentType, DarkModePreference, RawSelection, SessionMode, Theme,
};
pub use signer::{EmbedSigner, generate_embed_url};
