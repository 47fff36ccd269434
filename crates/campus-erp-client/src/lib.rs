//! # campus-erp-client
//!
//! The REST side of the front-end core: the authenticated [`ApiClient`]
//! with the backend's list/detail/create/update conventions, response
//! envelope decoding ([`envelope`]), the client error taxonomy
//! ([`ClientError`]), token storage ([`tokens`]), and single-flight token
//! refresh ([`refresh`]).

pub mod client;
pub mod envelope;
pub mod error;
pub mod refresh;
pub mod tokens;

pub use client::ApiClient;
pub use envelope::{DetailEnvelope, ListEnvelope};
pub use error::{ClientError, ClientResult};
pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use tokens::{FileTokenStore, MemoryTokenStore, SessionState, TokenPair, TokenStore};
