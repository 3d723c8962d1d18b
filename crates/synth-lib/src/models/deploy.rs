// Deploy data models
// Configuration and status for one-click deployment of a generated site

use serde::{Deserialize, Serialize};

/// Supported deployment platforms
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Vercel,
}

impl std::fmt::Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformType::Vercel => write!(f, "vercel"),
        }
    }
}

/// Deployment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    Queued,
    Building,
    Deploying,
    Ready,
    Failed,
}

/// Deployment request configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    /// Project name on the hosting platform
    pub project_name: String,
    /// Deployment target ("production" or "preview")
    pub target: String,
}

impl DeploymentConfig {
    pub fn new(project_name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            target: target.into(),
        }
    }
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self::new("synth-project", "production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeploymentConfig::default();
        assert_eq!(config.project_name, "synth-project");
        assert_eq!(config.target, "production");
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&DeploymentStatus::Building).unwrap();
        assert_eq!(json, "\"building\"");
    }
}
