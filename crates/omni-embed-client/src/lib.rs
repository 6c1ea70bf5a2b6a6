//! Presentation surface for the Omni embed demo.
//!
//! Fetches a signed embed URL from the demo server and drives an explicit
//! `Loading → {Ready | Error}` state machine around it, producing
//! sandboxed iframe markup when ready. A changed user or content
//! selection changes the frame's identity token and forces a fresh
//! instance — there is no in-place reload.
//!
//! # Example
//!
//! ```rust,no_run
//! use omni_embed_client::{EmbedApi, EmbedFrame};
//! use omni_embed_core::{EmbedUser, RawSelection};
//!
//! # async fn example() -> Result<(), omni_embed_client::EmbedClientError> {
//! let api = EmbedApi::new("http://127.0.0.1:3000")?;
//! let user = EmbedUser {
//!     external_id: Some("user-42".to_owned()),
//!     ..EmbedUser::default()
//! };
//! let mut frame = EmbedFrame::new(RawSelection::default(), user);
//! frame.mount(&api).await;
//! let html = frame.render();
//! # Ok(())
//! # }
//! ```

mod api;
mod error;
mod frame;

pub use api::EmbedApi;
pub use error::EmbedClientError;
pub use frame::{EmbedFrame, ErrorCallback, FrameState, LoadCallback, FRAME_SANDBOX};
