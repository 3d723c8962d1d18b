// Generation provider data models
// User-configurable connection settings for the code-generation service

use serde::{Deserialize, Serialize};

/// Supported generation providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Gemini,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

impl ProviderKind {
    /// Returns whether this provider requires an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, ProviderKind::Gemini)
    }

    /// Returns the default endpoint for this provider
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }

    /// Returns the default model for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-flash",
        }
    }
}

/// Generation service connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Display name for this configuration
    pub name: String,
    pub provider: ProviderKind,
    pub endpoint: String,
    pub model: String,
}

impl ProviderConfig {
    pub fn new(name: String, provider: ProviderKind, endpoint: String, model: String) -> Self {
        Self {
            name,
            provider,
            endpoint,
            model,
        }
    }

    /// Configuration for the provider's default endpoint and model
    pub fn defaults(provider: ProviderKind) -> Self {
        Self::new(
            provider.to_string(),
            provider,
            provider.default_endpoint().to_string(),
            provider.default_model().to_string(),
        )
    }
}
