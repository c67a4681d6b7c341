//! Token storage backends.
//!
//! Tokens are kept under fixed key names so the session client, which is the
//! only writer, and any read-only consumers agree on where they live.
//! Storage failures are logged and swallowed: a missing token is a valid
//! state (requests simply go out unauthenticated and fail with 401 if the
//! endpoint requires auth).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use keyring::Entry;
use tracing::warn;

/// Storage key for the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the longer-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Keychain service name for `KeyringTokenStore` entries.
const SERVICE_NAME: &str = "crm-client";

/// Token file name in the config directory.
const TOKEN_FILE: &str = "tokens.json";

/// Directory name under the user config directory.
const APP_NAME: &str = "crm-client";

/// Credential storage used by the API client.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory token store. Used in tests and by embedders that manage
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.tokens.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.tokens
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.tokens.lock().unwrap().remove(key);
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Token store persisted as a JSON file, by default under the user config
/// directory. Reads go to disk every time so multiple processes observe the
/// same tokens.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Open the store at `~/.config/crm-client/tokens.json` (or the platform
    /// equivalent).
    pub fn open_default() -> Result<Self> {
        let config_dir = dirs::config_dir().context("Could not find config directory")?;
        Ok(Self::new(config_dir.join(APP_NAME).join(TOKEN_FILE)))
    }

    fn read_map(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Malformed token file, treating as empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn write_map(&self, map: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "Failed to create token directory");
                return;
            }
        }
        match serde_json::to_string_pretty(map) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(&self.path, contents) {
                    warn!(path = %self.path.display(), error = %e, "Failed to write token file");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize token file"),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        let mut map = self.read_map();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map);
    }

    fn remove(&self, key: &str) {
        let mut map = self.read_map();
        if map.remove(key).is_some() {
            self.write_map(&map);
        }
    }
}

// ============================================================================
// OS keychain store
// ============================================================================

/// Token store backed by the OS keychain. Each token key becomes a keyring
/// entry under the `crm-client` service.
#[derive(Debug, Default)]
pub struct KeyringTokenStore;

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(key: &str) -> Option<Entry> {
        match Entry::new(SERVICE_NAME, key) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(key, error = %e, "Failed to create keyring entry");
                None
            }
        }
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::entry(key)?.get_password().ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(entry) = Self::entry(key) {
            if let Err(e) = entry.set_password(value) {
                warn!(key, error = %e, "Failed to store token in keychain");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(entry) = Self::entry(key) {
            // NoEntry is fine - remove is idempotent
            if let Err(e) = entry.delete_credential() {
                if !matches!(e, keyring::Error::NoEntry) {
                    warn!(key, error = %e, "Failed to delete token from keychain");
                }
            }
        }
    }
}
