// ECR client built on the AWS SDK. Holds one SDK client bound to a single region with
// static credentials, and implements `RegistryApi` by translating SDK responses into
// the crate's own types.

use crate::config::{CREDENTIALS_PROVIDER_NAME, Credentials, REGION};
use crate::error::ApiError;
use crate::error::handlers::SdkErrorHandler;
use crate::registry::{ImageDetail, LayerCheck, LayerFailure, RegistryApi};
use async_trait::async_trait;
use aws_sdk_ecr::Client;
use aws_sdk_ecr::config::{BehaviorVersion, Region};
use tracing::debug;

pub struct EcrClientBuilder {
    region: String,
    credentials: Option<Credentials>,
}

impl EcrClientBuilder {
    pub fn new() -> Self {
        Self {
            region: REGION.to_string(),
            credentials: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> Result<EcrClient, String> {
        let credentials = self
            .credentials
            .ok_or_else(|| "no AWS credentials provided".to_string())?;
        credentials.validate()?;

        if self.region.trim().is_empty() {
            return Err("region cannot be empty".to_string());
        }

        let static_credentials = aws_sdk_ecr::config::Credentials::new(
            credentials.access_key(),
            credentials.secret_key(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let config = aws_sdk_ecr::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .credentials_provider(static_credentials)
            .build();

        debug!(
            "ECR client configured for region {} with access key {}",
            self.region,
            credentials.masked_access_key()
        );

        Ok(EcrClient {
            client: Client::from_conf(config),
            region: self.region,
        })
    }
}

impl Default for EcrClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated session with the ECR control plane
#[derive(Debug, Clone)]
pub struct EcrClient {
    client: Client,
    region: String,
}

impl EcrClient {
    pub fn builder() -> EcrClientBuilder {
        EcrClientBuilder::new()
    }
}

#[async_trait]
impl RegistryApi for EcrClient {
    fn region(&self) -> &str {
        &self.region
    }

    async fn batch_check_layer_availability(
        &self,
        repository: &str,
        layer_digests: &[String],
    ) -> Result<LayerCheck, ApiError> {
        let mut request = self
            .client
            .batch_check_layer_availability()
            .repository_name(repository);
        for digest in layer_digests {
            request = request.layer_digests(digest);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SdkErrorHandler::handle(&e, "BatchCheckLayerAvailability"))?;

        let available = response
            .layers()
            .iter()
            .filter_map(|layer| layer.layer_digest().map(str::to_string))
            .collect();

        let failures = response
            .failures()
            .iter()
            .map(|failure| LayerFailure {
                layer_digest: failure.layer_digest().map(str::to_string),
                failure_code: failure.failure_code().map(|code| code.as_str().to_string()),
                failure_reason: failure.failure_reason().map(str::to_string),
            })
            .collect();

        Ok(LayerCheck {
            available,
            failures,
        })
    }

    async fn describe_repositories(&self) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .describe_repositories()
            .send()
            .await
            .map_err(|e| SdkErrorHandler::handle(&e, "DescribeRepositories"))?;

        if response.next_token().is_some() {
            debug!("DescribeRepositories returned more pages; only the first page is used");
        }

        Ok(response
            .repositories()
            .iter()
            .filter_map(|repository| repository.repository_name().map(str::to_string))
            .collect())
    }

    async fn describe_images(&self, repository: &str) -> Result<Vec<ImageDetail>, ApiError> {
        let response = self
            .client
            .describe_images()
            .repository_name(repository)
            .send()
            .await
            .map_err(|e| SdkErrorHandler::handle(&e, "DescribeImages"))?;

        if response.next_token().is_some() {
            debug!(
                "DescribeImages for {} returned more pages; only the first page is used",
                repository
            );
        }

        Ok(response
            .image_details()
            .iter()
            .map(|detail| ImageDetail {
                image_tags: detail.image_tags().to_vec(),
                image_size_in_bytes: detail.image_size_in_bytes(),
            })
            .collect())
    }
}
