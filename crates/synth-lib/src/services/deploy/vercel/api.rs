// Vercel API Operations
// Low-level REST calls against the Vercel platform

use reqwest::Client;

use super::types::*;
use crate::services::deploy::error::{DeployError, DeployResult};
use crate::services::deploy::types::FileToUpload;

/// Vercel API base URL
pub const API_BASE: &str = "https://api.vercel.com";

/// Maximum polling attempts (5 minutes with 5 second intervals)
pub const MAX_POLL_ATTEMPTS: u32 = 60;

/// Polling interval in seconds
pub const POLL_INTERVAL_SECS: u64 = 5;

fn platform() -> String {
    "Vercel".to_string()
}

/// Decode an error body into a typed error, falling back to the raw text
fn api_error(status: reqwest::StatusCode, body: &str) -> DeployError {
    if let Ok(envelope) = serde_json::from_str::<VercelErrorResponse>(body) {
        if let Some(detail) = envelope.error {
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return DeployError::AuthFailed {
                    platform: platform(),
                    message: detail.message,
                };
            }
            return DeployError::ApiError {
                platform: platform(),
                message: match detail.code {
                    Some(code) => format!("{} ({})", detail.message, code),
                    None => detail.message,
                },
            };
        }
    }

    DeployError::ApiError {
        platform: platform(),
        message: format!("{}: {}", status, body),
    }
}

/// Upload one file blob, addressed by its SHA-1 digest.
///
/// Uploading the same digest twice is harmless; Vercel dedupes blobs.
pub async fn upload_file(client: &Client, api_token: &str, file: &FileToUpload) -> DeployResult<()> {
    let url = format!("{}/v2/files", API_BASE);

    let response = client
        .post(&url)
        .bearer_auth(api_token)
        .header("x-vercel-digest", &file.sha)
        .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
        .body(file.content.clone())
        .send()
        .await
        .map_err(|e| DeployError::ConnectionFailed {
            platform: platform(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DeployError::UploadFailed {
            file_path: file.path.clone(),
            message: format!("{}: {}", status, body),
        });
    }

    Ok(())
}

/// Create a deployment from uploaded blob references
pub async fn create_deployment(
    client: &Client,
    api_token: &str,
    payload: &DeploymentPayload,
) -> DeployResult<VercelDeployment> {
    let url = format!(
        "{}/v13/deployments?skipAutoDetectionConfirmation=1",
        API_BASE
    );

    let response = client
        .post(&url)
        .bearer_auth(api_token)
        .json(payload)
        .send()
        .await
        .map_err(|e| DeployError::ConnectionFailed {
            platform: platform(),
            message: e.to_string(),
        })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        let err = api_error(status, &body);
        return Err(match err {
            DeployError::ApiError { message, .. } => {
                DeployError::DeploymentCreationFailed { message }
            }
            other => other,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Fetch the current state of a deployment
pub async fn get_deployment(
    client: &Client,
    api_token: &str,
    deployment_id: &str,
) -> DeployResult<VercelDeployment> {
    let url = format!("{}/v13/deployments/{}", API_BASE, deployment_id);

    let response = client
        .get(&url)
        .bearer_auth(api_token)
        .send()
        .await
        .map_err(|e| DeployError::ConnectionFailed {
            platform: platform(),
            message: e.to_string(),
        })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(api_error(status, &body));
    }

    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_maps_auth_failures() {
        let body = r#"{"error":{"code":"forbidden","message":"token expired"}}"#;
        let err = api_error(reqwest::StatusCode::FORBIDDEN, body);
        assert!(matches!(err, DeployError::AuthFailed { .. }));
        assert!(err.to_string().contains("token expired"));
    }

    #[test]
    fn test_api_error_carries_code() {
        let body = r#"{"error":{"code":"bad_request","message":"missing files"}}"#;
        let err = api_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert!(err.to_string().contains("missing files"));
        assert!(err.to_string().contains("bad_request"));
    }

    #[test]
    fn test_api_error_unstructured_body() {
        let err = api_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, DeployError::ApiError { .. }));
        assert!(err.to_string().contains("upstream down"));
    }
}
