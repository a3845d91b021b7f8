//! Session context and token persistence for Prism.
//!
//! Authentication state is an explicitly passed [`SessionContext`] rather
//! than ambient global storage: the CLI (or any other front end) constructs
//! one at startup, hands it to the API client, and tears it down on logout.
//! Persistence sits behind the [`SessionStore`] trait with a file-backed
//! implementation and an in-memory one for tests.

pub mod atomic;
pub mod context;
pub mod error;
pub mod store;

pub use context::{SessionContext, TokenPair};
pub use error::{Result, SessionError};
pub use store::{FileSessionStore, MemorySessionStore, PersistedSession, SessionStore};
