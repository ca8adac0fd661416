//! Secret service implementation.
//!
//! Loads secret configuration (API keys) from secret.json under the arena
//! config directory and caches it for the process lifetime.

use crate::paths::ArenaPaths;
use arena_core::config::SecretConfig;
use arena_core::secret::SecretService;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// File-backed [`SecretService`] with in-process caching.
#[derive(Clone)]
pub struct SecretStore {
    secret_path: PathBuf,
    /// Cached secret config; loaded lazily on first access.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
}

impl SecretStore {
    /// Creates a store reading from the default secret.json location.
    pub fn default_location() -> Result<Self, String> {
        let secret_path = ArenaPaths::secret_file()
            .map_err(|e| format!("Failed to resolve secret file path: {e}"))?;
        Ok(Self::new(secret_path))
    }

    /// Creates a store reading from an explicit path.
    pub fn new(secret_path: impl AsRef<Path>) -> Self {
        Self {
            secret_path: secret_path.as_ref().to_path_buf(),
            secrets: Arc::new(RwLock::new(None)),
        }
    }

    /// Writes a template secret.json if none exists yet, 0600 on Unix.
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        if self.secret_path.exists() {
            return Ok(self.secret_path.clone());
        }

        if let Some(parent) = self.secret_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = SecretConfig {
            gemini: Some(arena_core::config::GeminiConfig {
                api_key: String::new(),
                model_name: Some("gemini-2.0-flash".to_string()),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template)
            .map_err(std::io::Error::other)?;
        std::fs::write(&self.secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.secret_path, permissions)?;
        }

        Ok(self.secret_path.clone())
    }

    fn load_internal(&self) -> Result<SecretConfig, String> {
        {
            let read_lock = self.secrets.read().map_err(|_| "secret cache poisoned")?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let content = std::fs::read_to_string(&self.secret_path)
            .map_err(|e| format!("Failed to read secret file: {e}"))?;
        let loaded: SecretConfig = serde_json::from_str(&content)
            .map_err(|_| "secret file is not valid JSON".to_string())?;

        {
            let mut write_lock = self.secrets.write().map_err(|_| "secret cache poisoned")?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }
}

#[async_trait::async_trait]
impl SecretService for SecretStore {
    async fn load_secrets(&self) -> Result<SecretConfig, String> {
        self.load_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.secret_path.exists()
    }
}
