//! HTTP route handlers for the Omni embed demo.
//!
//! - `embed`: `POST /api/embed-url` — validate, normalize, sign
//! - `diag`: `GET /api/test-env` — configuration diagnostics

pub mod diag;
pub mod embed;
