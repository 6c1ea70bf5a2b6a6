//! The embed frame state machine.
//!
//! An [`EmbedFrame`] instance lives through exactly one
//! `Loading → {Ready | Error}` cycle. There is no transition back to
//! `Loading`: when the user identity or content selection changes, the
//! instance's identity token changes with it and the caller discards the
//! old frame for a fresh one via [`EmbedFrame::remount`]. An abandoned
//! in-flight request is simply dropped with its instance — no
//! cancellation is implemented.

use std::hash::{DefaultHasher, Hash, Hasher};

use tracing::debug;

use omni_embed_core::{EmbedUser, RawSelection};

use crate::api::EmbedApi;
use crate::error::EmbedClientError;

/// Sandbox grants for the rendered frame: scripts, same-origin access,
/// popups, and form submission only — nothing broader.
pub const FRAME_SANDBOX: &str = "allow-scripts allow-same-origin allow-popups allow-forms";

/// Callback invoked once when the frame reports load completion.
pub type LoadCallback = Box<dyn Fn() + Send>;

/// Callback invoked exactly once on failure, with the display message.
pub type ErrorCallback = Box<dyn Fn(&str) + Send>;

/// Frame lifecycle states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameState {
    /// The embed-url request has not completed yet.
    Loading,
    /// A signed URL arrived; the iframe can be rendered.
    Ready { url: String },
    /// The request failed; a human-readable message is available.
    Error { message: String },
}

/// One embed frame instance.
pub struct EmbedFrame {
    config: RawSelection,
    user: EmbedUser,
    identity: u64,
    state: FrameState,
    on_load: Option<LoadCallback>,
    on_error: Option<ErrorCallback>,
    load_notified: bool,
}

impl EmbedFrame {
    /// Create a fresh frame in `Loading` for one user/selection pair.
    #[must_use]
    pub fn new(config: RawSelection, user: EmbedUser) -> Self {
        let identity = identity_token(&config, &user);
        Self {
            config,
            user,
            identity,
            state: FrameState::Loading,
            on_load: None,
            on_error: None,
            load_notified: false,
        }
    }

    /// Register a callback fired once when the frame reports it loaded.
    #[must_use]
    pub fn with_on_load(mut self, cb: LoadCallback) -> Self {
        self.on_load = Some(cb);
        self
    }

    /// Register a callback fired exactly once on failure.
    #[must_use]
    pub fn with_on_error(mut self, cb: ErrorCallback) -> Self {
        self.on_error = Some(cb);
        self
    }

    #[must_use]
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Token derived from the user and selection. A different token means
    /// this instance is stale and must be replaced.
    #[must_use]
    pub fn identity(&self) -> u64 {
        self.identity
    }

    /// Whether a new user/selection pair requires discarding this frame.
    #[must_use]
    pub fn needs_remount(&self, config: &RawSelection, user: &EmbedUser) -> bool {
        identity_token(config, user) != self.identity
    }

    /// Discard this frame and produce a fresh instance back in `Loading`,
    /// carrying the callbacks over.
    #[must_use]
    pub fn remount(self, config: RawSelection, user: EmbedUser) -> Self {
        let mut next = Self::new(config, user);
        next.on_load = self.on_load;
        next.on_error = self.on_error;
        next
    }

    /// Issue the embed-url request and settle into `Ready` or `Error`.
    ///
    /// Only meaningful in `Loading`; calling it again after the frame has
    /// settled is a no-op, so one instance can never have two in-flight
    /// requests.
    pub async fn mount(&mut self, api: &EmbedApi) {
        if self.state != FrameState::Loading {
            return;
        }

        match api.fetch_embed_url(&self.config, &self.user).await {
            Ok(url) => {
                debug!(identity = self.identity, "embed frame ready");
                self.state = FrameState::Ready { url };
            }
            Err(err) => {
                let message = display_message(&err);
                debug!(identity = self.identity, %err, "embed frame failed");
                if let Some(cb) = &self.on_error {
                    cb(&message);
                }
                self.state = FrameState::Error { message };
            }
        }
    }

    /// To be called when the rendered frame reports its own load
    /// completion. Fires the on-load callback at most once.
    pub fn notify_frame_loaded(&mut self) {
        if matches!(self.state, FrameState::Ready { .. }) && !self.load_notified {
            self.load_notified = true;
            if let Some(cb) = &self.on_load {
                cb();
            }
        }
    }

    /// Render the frame's current state as HTML.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.state {
            FrameState::Loading => {
                "<div class=\"embed-container\"><p>Loading analytics...</p></div>".to_owned()
            }
            FrameState::Error { message } => format!(
                "<div class=\"embed-container\"><p>Failed to load analytics</p><p>{}</p></div>",
                escape_html(message)
            ),
            FrameState::Ready { url } => format!(
                "<iframe src=\"{}\" title=\"Omni Analytics\" allow=\"fullscreen\" sandbox=\"{FRAME_SANDBOX}\"></iframe>",
                escape_html(url)
            ),
        }
    }
}

/// Hash the serialized user and selection into a remount token.
fn identity_token(config: &RawSelection, user: &EmbedUser) -> u64 {
    let mut hasher = DefaultHasher::new();
    // Serialization cannot fail for these plain data types; fall back to
    // an empty string rather than panicking if it ever does.
    serde_json::to_string(config).unwrap_or_default().hash(&mut hasher);
    serde_json::to_string(user).unwrap_or_default().hash(&mut hasher);
    hasher.finish()
}

/// Generic failure line plus the server-provided detail, mirroring how
/// the demo page presents errors.
fn display_message(err: &EmbedClientError) -> String {
    match err {
        EmbedClientError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use omni_embed_core::ContentType;

    use super::*;

    fn selection(content_id: &str) -> RawSelection {
        RawSelection {
            content_type: Some(ContentType::Dashboard),
            content_id: Some(content_id.to_owned()),
            ..RawSelection::default()
        }
    }

    fn user(external_id: &str) -> EmbedUser {
        EmbedUser {
            external_id: Some(external_id.to_owned()),
            ..EmbedUser::default()
        }
    }

    // ── identity token ───────────────────────────────────────────────

    #[test]
    fn same_inputs_need_no_remount() {
        let frame = EmbedFrame::new(selection("d1"), user("u1"));
        assert!(!frame.needs_remount(&selection("d1"), &user("u1")));
    }

    #[test]
    fn changed_user_needs_remount() {
        let frame = EmbedFrame::new(selection("d1"), user("u1"));
        assert!(frame.needs_remount(&selection("d1"), &user("u2")));
    }

    #[test]
    fn changed_selection_needs_remount() {
        let frame = EmbedFrame::new(selection("d1"), user("u1"));
        assert!(frame.needs_remount(&selection("d2"), &user("u1")));
    }

    #[test]
    fn remount_returns_to_loading_with_new_identity() {
        let mut frame = EmbedFrame::new(selection("d1"), user("u1"));
        frame.state = FrameState::Ready {
            url: "https://example.test".to_owned(),
        };
        let old_identity = frame.identity();

        let next = frame.remount(selection("d2"), user("u1"));
        assert_eq!(*next.state(), FrameState::Loading);
        assert_ne!(next.identity(), old_identity);
    }

    // ── state machine ────────────────────────────────────────────────

    #[test]
    fn new_frame_starts_loading() {
        let frame = EmbedFrame::new(selection("d1"), user("u1"));
        assert_eq!(*frame.state(), FrameState::Loading);
    }

    #[test]
    fn load_callback_fires_once_in_ready() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut frame = EmbedFrame::new(selection("d1"), user("u1"))
            .with_on_load(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        frame.state = FrameState::Ready {
            url: "https://example.test".to_owned(),
        };

        frame.notify_frame_loaded();
        frame.notify_frame_loaded();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn load_callback_does_not_fire_while_loading() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let mut frame = EmbedFrame::new(selection("d1"), user("u1"))
            .with_on_load(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        frame.notify_frame_loaded();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    // ── rendering ────────────────────────────────────────────────────

    #[test]
    fn loading_renders_placeholder() {
        let frame = EmbedFrame::new(selection("d1"), user("u1"));
        assert!(frame.render().contains("Loading analytics"));
    }

    #[test]
    fn ready_renders_sandboxed_iframe() {
        let mut frame = EmbedFrame::new(selection("d1"), user("u1"));
        frame.state = FrameState::Ready {
            url: "https://acme.embed-omniapp.co/embed/login?a=1&b=2".to_owned(),
        };
        let html = frame.render();
        assert!(html.contains(
            "sandbox=\"allow-scripts allow-same-origin allow-popups allow-forms\""
        ));
        assert!(html.contains("allow=\"fullscreen\""));
        // Attribute value is escaped.
        assert!(html.contains("a=1&amp;b=2"));
    }

    #[test]
    fn error_renders_failure_message() {
        let mut frame = EmbedFrame::new(selection("d1"), user("u1"));
        frame.state = FrameState::Error {
            message: "Server configuration error. Please contact support.".to_owned(),
        };
        let html = frame.render();
        assert!(html.contains("Failed to load analytics"));
        assert!(html.contains("contact support"));
    }

    #[test]
    fn error_markup_escapes_server_detail() {
        let mut frame = EmbedFrame::new(selection("d1"), user("u1"));
        frame.state = FrameState::Error {
            message: "<script>alert(1)</script>".to_owned(),
        };
        assert!(!frame.render().contains("<script>"));
    }
}
