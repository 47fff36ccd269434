//! Token storage.
//!
//! The access/refresh pair lives behind a [`TokenStore`] so the client can
//! run against in-memory tokens in tests and a persisted file in a desktop
//! shell. Store operations never fail; a broken store reads as logged out.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

/// A bearer access token and its refresh companion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token sent on every request.
    pub access: String,
    /// Long-lived token exchanged for a new access token.
    pub refresh: String,
}

/// Whether a usable session exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Tokens present; requests go out with a bearer header.
    LoggedIn,
    /// No tokens. The shell should route to the login screen.
    LoggedOut,
}

/// Persistence for the session token pair.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored pair, if any.
    async fn load(&self) -> Option<TokenPair>;
    /// Replaces the stored pair.
    async fn save(&self, tokens: TokenPair);
    /// Drops the stored pair. Used on logout and on refresh failure.
    async fn clear(&self);
}

/// In-memory token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a pair.
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: RwLock::new(Some(tokens)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<TokenPair> {
        self.tokens.read().await.clone()
    }

    async fn save(&self, tokens: TokenPair) {
        *self.tokens.write().await = Some(tokens);
    }

    async fn clear(&self) {
        *self.tokens.write().await = None;
    }
}

/// Token store persisted as a JSON file.
///
/// Read/write failures log a warning and read as logged out.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<TokenPair> {
        let bytes = tokio::fs::read(&self.path).await.ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(tokens) => Some(tokens),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unreadable token file");
                None
            }
        }
    }

    async fn save(&self, tokens: TokenPair) {
        match serde_json::to_vec(&tokens) {
            Ok(bytes) => {
                if let Err(err) = tokio::fs::write(&self.path, bytes).await {
                    warn!(path = %self.path.display(), %err, "failed to persist tokens");
                }
            }
            Err(err) => warn!(%err, "failed to serialize tokens"),
        }
    }

    async fn clear(&self) {
        if let Err(err) = tokio::fs::remove_file(&self.path).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), %err, "failed to remove token file");
            }
        }
    }
}
