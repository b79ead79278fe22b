//! Registry module for AWS ECR interactions
//!
//! [`RegistryApi`] is the seam between the report logic and the remote service. It covers the
//! three ECR control-plane calls the tool makes; [`EcrClient`] implements it on top of the AWS SDK.

pub mod auth;
pub mod client;

use crate::error::ApiError;
use async_trait::async_trait;

pub use auth::Authenticator;
pub use client::{EcrClient, EcrClientBuilder};

/// Image metadata returned by `DescribeImages`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDetail {
    pub image_tags: Vec<String>,
    pub image_size_in_bytes: Option<i64>,
}

impl ImageDetail {
    pub fn new(image_tags: Vec<String>, image_size_in_bytes: Option<i64>) -> Self {
        Self {
            image_tags,
            image_size_in_bytes,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.image_tags.iter().any(|t| t == tag)
    }
}

/// A digest the registry could not check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerFailure {
    pub layer_digest: Option<String>,
    pub failure_code: Option<String>,
    pub failure_reason: Option<String>,
}

/// Result of `BatchCheckLayerAvailability`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerCheck {
    /// Digests reported as available
    pub available: Vec<String>,
    pub failures: Vec<LayerFailure>,
}

/// Remote registry operations used by the report
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Region the client is bound to
    fn region(&self) -> &str;

    async fn batch_check_layer_availability(
        &self,
        repository: &str,
        layer_digests: &[String],
    ) -> Result<LayerCheck, ApiError>;

    /// Names of the repositories on the first result page
    async fn describe_repositories(&self) -> Result<Vec<String>, ApiError>;

    /// Images on the first result page of `repository`
    async fn describe_images(&self, repository: &str) -> Result<Vec<ImageDetail>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_tag_matches_whole_tag() {
        let image = ImageDetail::new(vec!["v1.2".to_string(), "latest".to_string()], Some(10));
        assert!(image.has_tag("latest"));
        assert!(!image.has_tag("v1"));

        let pinned = ImageDetail::new(vec!["latest-rc".to_string()], Some(10));
        assert!(!pinned.has_tag("latest"));
    }
}
