//! User identity and request normalization.
//!
//! [`normalize`] is the single entry point: it merges an untrusted
//! `(RawSelection, EmbedUser)` pair into a [`SignedEmbedRequest`], the
//! value handed to the signer. Nothing here outlives one
//! validate→sign→respond cycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::selection::{
    ContentTarget, DarkModePreference, RawSelection, SessionMode, Theme,
};

/// Untrusted user identity as sent by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbedUser {
    /// External identifier — required, enforced in [`normalize`].
    pub external_id: Option<String>,
    /// Display name. Defaults to the external ID.
    pub name: Option<String>,
    pub email: Option<String>,
    /// Attribute mapping forwarded for downstream filtering. Opaque to
    /// this service, except `entity` (see [`normalize`]).
    pub attributes: Option<Map<String, Value>>,
}

/// Normalized parameter set handed to the signer.
///
/// The server secret and organization/host destination are deliberately
/// absent — they live with the signer, never with request data.
#[derive(Debug, Clone)]
pub struct SignedEmbedRequest {
    pub external_id: String,
    pub name: String,
    pub email: Option<String>,
    /// `attributes.entity` when it is a string; silently dropped otherwise.
    pub entity: Option<String>,
    pub user_attributes: Option<Map<String, Value>>,
    pub target: ContentTarget,
    pub mode: SessionMode,
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

/// Validate and normalize an inbound request.
///
/// Checks run in order, first failure wins:
/// 1. content ID required for every kind except content-discovery;
/// 2. `user.externalId` must be a non-empty string.
///
/// Normalization rules:
/// - `name` defaults to the external ID;
/// - `attributes.entity` is forwarded only when it is a string — any
///   other JSON type is dropped without error (upstream behavior,
///   preserved deliberately);
/// - navigation forces [`SessionMode::Application`]; otherwise the mode
///   string `"APPLICATION"` opts in and anything else means single
///   content;
/// - content-discovery defaults `connectionRoles` to an empty mapping.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the first missing field.
pub fn normalize(
    config: &RawSelection,
    user: &EmbedUser,
) -> Result<SignedEmbedRequest, ValidationError> {
    let target = ContentTarget::from_raw(config)?;

    let external_id = user
        .external_id
        .clone()
        .filter(|id| !id.is_empty())
        .ok_or(ValidationError::MissingExternalId)?;

    let name = user
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| external_id.clone());

    let entity = user
        .attributes
        .as_ref()
        .and_then(|attrs| attrs.get("entity"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    let mode = if matches!(target, ContentTarget::Navigation { .. }) {
        // Vendor limitation: a navigation embed must open in application
        // mode, anchored on a concrete dashboard or workbook.
        SessionMode::Application
    } else if config.mode.as_deref() == Some("APPLICATION") {
        SessionMode::Application
    } else {
        SessionMode::SingleContent
    };

    let connection_roles = if matches!(target, ContentTarget::ContentDiscovery { .. }) {
        Some(config.connection_roles.clone().unwrap_or_default())
    } else {
        config.connection_roles.clone()
    };

    Ok(SignedEmbedRequest {
        external_id,
        name,
        email: user.email.clone(),
        entity,
        user_attributes: user.attributes.clone(),
        target,
        mode,
        theme: config.theme,
        prefers_dark: config.prefers_dark,
        filter_search_param: config.filter_search_param.clone(),
        link_access: config.link_access.clone(),
        access_boost: config.access_boost,
        custom_theme: config.custom_theme.clone(),
        custom_theme_id: config.custom_theme_id.clone(),
        connection_roles,
        ui_settings: config.ui_settings.clone(),
    })
}
