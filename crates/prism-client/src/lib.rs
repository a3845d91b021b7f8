//! Typed HTTP client for the Prism content-analysis service.
//!
//! This crate is the thin boundary between the orchestration layer and the
//! remote service:
//! - [`ApiClient`] - reqwest-backed client carrying the session context
//! - [`AnalysisApi`] - one long-running analysis operation per kind
//! - [`AnalysisCache`] - per-kind save/fetch against the service's cache
//!   endpoints, where a miss is a normal `Ok(None)`
//! - auth, content extraction, playlist, and library calls on [`ApiClient`]
//!
//! Errors separate transport failures (no response reached the client) from
//! server-reported failures (an HTTP error carrying a structured `detail`
//! field); callers map the two differently.

pub mod analysis;
pub mod auth;
pub mod cache;
pub mod client;
pub mod content;
pub mod error;
pub mod playlist;

pub use analysis::AnalysisApi;
pub use auth::UserProfile;
pub use cache::AnalysisCache;
pub use client::ApiClient;
pub use content::ExtractedContent;
pub use error::{ClientError, Result};
pub use playlist::{PlaylistVideo, VideoTranscript};
