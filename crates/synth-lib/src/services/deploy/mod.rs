// Deploy Service Module
//
// This module provides:
// - DeploymentProvider trait for platform-specific implementations
// - Common utilities (hash, types, error)
// - Platform providers (vercel)

pub mod error;
pub mod hash;
pub mod types;
pub mod vercel;

use async_trait::async_trait;

pub use error::{DeployError, DeployErrorCode, DeployResult};
pub use hash::calculate_sha1;
pub use types::{
    collect_deploy_files, get_mime_type, normalize_deploy_url, rewrite_asset_references,
    DeploymentResult, FileToUpload,
};
pub use vercel::VercelProvider;

use crate::models::{CodeFile, DeploymentConfig, PlatformType};

/// Trait for deployment providers
#[async_trait]
pub trait DeploymentProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Get the platform type
    fn platform(&self) -> PlatformType;

    /// Validate the deployment configuration
    async fn validate_config(&self, config: &DeploymentConfig) -> DeployResult<()>;

    /// Deploy the flattened file set, returning the live URL.
    ///
    /// Failures leave the in-memory file and edit state untouched; the
    /// file set passed in is never mutated.
    async fn deploy(
        &self,
        config: &DeploymentConfig,
        files: &[CodeFile],
    ) -> DeployResult<DeploymentResult>;
}

/// Boxed deployment provider type
pub type BoxedDeploymentProvider = Box<dyn DeploymentProvider>;

/// Factory function to create a deployment provider
pub fn create_provider(
    platform: PlatformType,
    api_token: String,
) -> DeployResult<BoxedDeploymentProvider> {
    match platform {
        PlatformType::Vercel => {
            if api_token.is_empty() {
                return Err(DeployError::InvalidConfig {
                    message: "Vercel API token is required".to_string(),
                });
            }
            Ok(Box::new(VercelProvider::new(api_token)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_vercel_provider() {
        let provider = create_provider(PlatformType::Vercel, "test-token".to_string()).unwrap();
        assert_eq!(provider.name(), "Vercel");
        assert_eq!(provider.platform(), PlatformType::Vercel);
    }

    #[test]
    fn test_create_vercel_provider_without_token() {
        let result = create_provider(PlatformType::Vercel, String::new());
        assert!(result.is_err());

        if let Err(DeployError::InvalidConfig { message }) = result {
            assert!(message.contains("token"));
        } else {
            panic!("Expected InvalidConfig error");
        }
    }
}
