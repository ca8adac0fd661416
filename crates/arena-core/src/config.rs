//! Secret and client configuration types.

use serde::{Deserialize, Serialize};

/// Root of the secret configuration file (secret.json).
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    /// Gemini API credentials and model selection.
    pub gemini: Option<GeminiConfig>,
}

/// Credentials and model override for the Gemini generative service.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}
