//! Content selection types.
//!
//! The browser sends a loose [`RawSelection`] where everything is optional.
//! Validation turns it into a [`ContentTarget`], a sum type where each
//! content kind carries exactly the fields it requires. Fields specific to
//! other kinds are ignored, never merged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// The four embeddable content kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// A single dashboard. The default kind when unspecified.
    Dashboard,
    /// A single workbook.
    Workbook,
    /// Full application navigation, anchored on a dashboard or workbook.
    Navigation,
    /// The content-discovery hub, addressed by path instead of content ID.
    ContentDiscovery,
}

/// Omni's built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dawn,
    Vibes,
    Breeze,
    Blank,
}

impl Theme {
    /// Wire value passed to the signer.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Dawn => "dawn",
            Self::Vibes => "vibes",
            Self::Breeze => "breeze",
            Self::Blank => "blank",
        }
    }
}

/// Dark-mode preference. The vendor API takes the strings `"true"`,
/// `"false"`, and `"system"`, so this is a string enum rather than a bool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DarkModePreference {
    #[serde(rename = "true")]
    Always,
    #[serde(rename = "false")]
    Never,
    #[serde(rename = "system")]
    System,
}

impl DarkModePreference {
    /// Wire value passed to the signer.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::Always => "true",
            Self::Never => "false",
            Self::System => "system",
        }
    }
}

/// Embed session mode. `SingleContent` pins the session to one dashboard
/// or workbook; `Application` unlocks full navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    SingleContent,
    Application,
}

impl SessionMode {
    /// Wire value passed to the signer.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            Self::SingleContent => "SINGLE_CONTENT",
            Self::Application => "APPLICATION",
        }
    }
}

/// Untrusted content selection as sent by the browser.
///
/// Every field is optional at the wire level; required-field enforcement
/// happens in [`ContentTarget::from_raw`], not in serde. `Serialize` is
/// for the client side of the demo, which sends this same shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSelection {
    pub content_type: Option<ContentType>,
    pub content_id: Option<String>,
    /// Content-discovery path. Defaults to `"root"` (the Hub page).
    pub path: Option<String>,
    /// Session mode override; `"APPLICATION"` enables full navigation.
    pub mode: Option<String>,
    pub theme: Option<Theme>,
    pub prefers_dark: Option<DarkModePreference>,
    pub filter_search_param: Option<String>,
    pub link_access: Option<String>,
    pub access_boost: Option<bool>,
    pub custom_theme: Option<Value>,
    pub custom_theme_id: Option<String>,
    pub connection_roles: Option<Map<String, Value>>,
    pub ui_settings: Option<BTreeMap<String, bool>>,
}

/// Validated content target — exactly one kind active per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTarget {
    Dashboard { content_id: String },
    Workbook { content_id: String },
    Navigation { content_id: String },
    ContentDiscovery { path: String },
}

impl ContentTarget {
    /// Validate a raw selection into a target.
    ///
    /// Content-discovery never requires a content ID and defaults its path
    /// to `"root"`. Every other kind requires a non-empty content ID.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingContentId`] when a kind that
    /// requires a content ID arrives without one.
    pub fn from_raw(raw: &RawSelection) -> Result<Self, ValidationError> {
        match raw.content_type.unwrap_or(ContentType::Dashboard) {
            ContentType::ContentDiscovery => Ok(Self::ContentDiscovery {
                path: raw
                    .path
                    .clone()
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(|| "root".to_owned()),
            }),
            ContentType::Dashboard => Ok(Self::Dashboard {
                content_id: require_content_id(raw)?,
            }),
            ContentType::Workbook => Ok(Self::Workbook {
                content_id: require_content_id(raw)?,
            }),
            ContentType::Navigation => Ok(Self::Navigation {
                content_id: require_content_id(raw)?,
            }),
        }
    }
}

fn require_content_id(raw: &RawSelection) -> Result<String, ValidationError> {
    raw.content_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingContentId)
}
