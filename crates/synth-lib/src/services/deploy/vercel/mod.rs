// Vercel Provider
// Implements DeploymentProvider for Vercel static deployments

pub mod api;
pub mod types;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::models::{CodeFile, DeploymentConfig, PlatformType};

use super::error::{DeployError, DeployResult};
use super::types::{rewrite_asset_references, DeploymentResult, FileToUpload};
use super::DeploymentProvider;

use api::{MAX_POLL_ATTEMPTS, POLL_INTERVAL_SECS};
use types::{DeploymentPayload, ProjectSettings, VercelFileRef};

/// Vercel deployment provider
pub struct VercelProvider {
    /// HTTP client
    client: reqwest::Client,
    /// Vercel API token
    api_token: String,
}

impl VercelProvider {
    /// Create a new Vercel provider
    pub fn new(api_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token,
        }
    }

    /// Step 1: Stage files for upload.
    ///
    /// Asset references in index.html are rewritten to be relative, and
    /// the static-site routing config is appended alongside the generated
    /// files.
    fn stage_files(&self, files: &[CodeFile]) -> Vec<FileToUpload> {
        let mut staged: Vec<FileToUpload> = files
            .iter()
            .map(|file| {
                if file.name == "index.html" {
                    FileToUpload::from_code_file(&CodeFile::new(
                        file.name.clone(),
                        rewrite_asset_references(&file.content),
                    ))
                } else {
                    FileToUpload::from_code_file(file)
                }
            })
            .collect();

        staged.push(FileToUpload::from_code_file(&routing_config()));
        staged
    }

    /// Step 2: Upload every distinct blob
    async fn upload_files(&self, files: &[FileToUpload]) -> DeployResult<()> {
        let mut uploaded: HashSet<&str> = HashSet::new();

        for file in files {
            if !uploaded.insert(file.sha.as_str()) {
                continue;
            }
            api::upload_file(&self.client, &self.api_token, file).await?;
            log::info!("Vercel: uploaded {} ({} bytes)", file.path, file.size);
        }

        Ok(())
    }

    /// Step 3: Create the deployment from blob references
    async fn create_deployment(
        &self,
        config: &DeploymentConfig,
        files: &[FileToUpload],
    ) -> DeployResult<types::VercelDeployment> {
        let payload = DeploymentPayload {
            name: config.project_name.clone(),
            target: config.target.clone(),
            files: files
                .iter()
                .map(|f| VercelFileRef {
                    file: f.path.clone(),
                    sha: f.sha.clone(),
                    size: f.size,
                })
                .collect(),
            project_settings: ProjectSettings::static_site(),
        };

        let deployment = api::create_deployment(&self.client, &self.api_token, &payload).await?;
        log::info!("Vercel: deployment created with ID {}", deployment.id);
        Ok(deployment)
    }

    /// Step 4: Poll deployment state until it is ready
    async fn poll_deployment(&self, deployment_id: &str) -> DeployResult<DeploymentResult> {
        for _ in 0..MAX_POLL_ATTEMPTS {
            tokio::time::sleep(std::time::Duration::from_secs(POLL_INTERVAL_SECS)).await;

            let deployment =
                match api::get_deployment(&self.client, &self.api_token, deployment_id).await {
                    Ok(d) => d,
                    Err(_) => continue, // Retry on transient poll errors
                };

            match deployment.ready_state.as_deref() {
                Some("READY") => {
                    let url = deployment.url.unwrap_or_default();
                    let mut result =
                        DeploymentResult::new(url).with_deploy_id(deployment.id.clone());
                    if let Some(alias) = deployment.alias.into_iter().next() {
                        result = result.with_alias(alias);
                    }
                    return Ok(result);
                }
                Some("ERROR") | Some("CANCELED") => {
                    return Err(DeployError::DeploymentFailed {
                        message: format!(
                            "deployment {} ended in state {}",
                            deployment.id,
                            deployment.ready_state.as_deref().unwrap_or("unknown")
                        ),
                    });
                }
                Some(state) => {
                    log::debug!("Vercel: deployment {} is {}", deployment.id, state);
                }
                None => {}
            }
        }

        Err(DeployError::DeploymentTimeout {
            seconds: MAX_POLL_ATTEMPTS as u64 * POLL_INTERVAL_SECS,
        })
    }
}

/// The vercel.json appended to every deployment: plain static serving with
/// a catch-all route
pub fn routing_config() -> CodeFile {
    let config = serde_json::json!({
        "version": 2,
        "builds": [
            { "src": "index.html", "use": "@vercel/static" },
            { "src": "*.css", "use": "@vercel/static" },
            { "src": "*.js", "use": "@vercel/static" },
        ],
        "routes": [ { "src": "/(.*)", "dest": "/$1" } ],
    });

    CodeFile::new(
        "vercel.json",
        serde_json::to_string_pretty(&config).expect("static routing config serializes"),
    )
}

#[async_trait]
impl DeploymentProvider for VercelProvider {
    fn name(&self) -> &str {
        "Vercel"
    }

    fn platform(&self) -> PlatformType {
        PlatformType::Vercel
    }

    async fn validate_config(&self, config: &DeploymentConfig) -> DeployResult<()> {
        if config.project_name.trim().is_empty() {
            return Err(DeployError::InvalidConfig {
                message: "Project name is required".to_string(),
            });
        }
        Ok(())
    }

    async fn deploy(
        &self,
        config: &DeploymentConfig,
        files: &[CodeFile],
    ) -> DeployResult<DeploymentResult> {
        if files.is_empty() {
            return Err(DeployError::NoFiles);
        }
        self.validate_config(config).await?;

        let staged = self.stage_files(files);
        log::info!(
            "Vercel: deploying {} files as '{}'",
            staged.len(),
            config.project_name
        );

        self.upload_files(&staged).await?;
        let deployment = self.create_deployment(config, &staged).await?;
        self.poll_deployment(&deployment.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> VercelProvider {
        VercelProvider::new("token".to_string())
    }

    #[test]
    fn test_provider_name_and_platform() {
        assert_eq!(provider().name(), "Vercel");
        assert_eq!(provider().platform(), PlatformType::Vercel);
    }

    #[tokio::test]
    async fn test_validate_config_requires_project_name() {
        let config = DeploymentConfig::new("", "production");
        assert!(provider().validate_config(&config).await.is_err());

        let config = DeploymentConfig::default();
        assert!(provider().validate_config(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_deploy_rejects_empty_file_set() {
        let err = provider()
            .deploy(&DeploymentConfig::default(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, DeployError::NoFiles));
    }

    #[test]
    fn test_stage_files_rewrites_index_and_appends_config() {
        let files = vec![
            CodeFile::new("index.html", r#"<link href="/style.css">"#),
            CodeFile::new("style.css", "body {}"),
        ];
        let staged = provider().stage_files(&files);

        assert_eq!(staged.len(), 3);
        let index = &staged[0];
        assert_eq!(
            String::from_utf8(index.content.clone()).unwrap(),
            r#"<link href="style.css">"#
        );
        assert_eq!(staged[2].path, "vercel.json");
    }

    #[test]
    fn test_routing_config_shape() {
        let config = routing_config();
        assert_eq!(config.name, "vercel.json");

        let json: serde_json::Value = serde_json::from_str(&config.content).unwrap();
        assert_eq!(json["version"], 2);
        assert_eq!(json["builds"][0]["use"], "@vercel/static");
        assert_eq!(json["routes"][0]["dest"], "/$1");
    }

    #[test]
    fn test_stage_files_dedupe_key_is_digest() {
        let files = vec![
            CodeFile::new("a.css", "body {}"),
            CodeFile::new("b.css", "body {}"),
        ];
        let staged = provider().stage_files(&files);
        assert_eq!(staged[0].sha, staged[1].sha);
    }
}
