// Vercel API Types
// Request and response payloads for the Vercel REST API

use serde::{Deserialize, Serialize};

/// Reference to an uploaded file blob in a deployment request
#[derive(Debug, Clone, Serialize)]
pub struct VercelFileRef {
    /// Path within the deployment
    pub file: String,
    /// SHA-1 digest of the uploaded blob
    pub sha: String,
    /// Blob size in bytes
    pub size: usize,
}

/// Static-site project settings; every field null so Vercel applies no
/// framework build step
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub framework: Option<String>,
    pub build_command: Option<String>,
    pub output_directory: Option<String>,
    pub install_command: Option<String>,
    pub root_directory: Option<String>,
}

impl ProjectSettings {
    pub fn static_site() -> Self {
        Self {
            framework: None,
            build_command: None,
            output_directory: None,
            install_command: None,
            root_directory: None,
        }
    }
}

/// Deployment creation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPayload {
    pub name: String,
    pub target: String,
    pub files: Vec<VercelFileRef>,
    pub project_settings: ProjectSettings,
}

/// Deployment as returned by create/status endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VercelDeployment {
    pub id: String,
    pub url: Option<String>,
    /// QUEUED | BUILDING | INITIALIZING | READY | ERROR | CANCELED
    pub ready_state: Option<String>,
    #[serde(default)]
    pub alias: Vec<String>,
}

/// Error envelope returned by the Vercel API
#[derive(Debug, Clone, Deserialize)]
pub struct VercelErrorResponse {
    pub error: Option<VercelErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VercelErrorDetail {
    pub code: Option<String>,
    pub message: String,
}
