//! Authentication module for AWS ECR access

use crate::config::{Credentials, REGION, probe_digest};
use crate::error::{ReportError, Result};
use crate::registry::{EcrClient, LayerCheck, RegistryApi};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Authenticator {
    credentials: Credentials,
    region: String,
}

impl Authenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            region: REGION.to_string(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Build a client bound to the fixed region using the static credentials.
    pub fn authenticate(&self) -> Result<EcrClient> {
        info!("Authenticating to AWS ECR...");

        let client = EcrClient::builder()
            .with_region(self.region.clone())
            .with_credentials(self.credentials.clone())
            .build()
            .map_err(ReportError::Authentication)?;

        info!("Successfully authenticated to AWS ECR");
        Ok(client)
    }

    /// Probe read access by checking layer availability for `repository`.
    ///
    /// The digest sent is `sha256:<tag>`. A tag is not a content digest, so the registry
    /// normally reports it as a per-layer failure; only a failed call aborts the run.
    pub async fn check_read_permission<R>(
        client: &R,
        repository: &str,
        tag: &str,
    ) -> Result<LayerCheck>
    where
        R: RegistryApi + ?Sized,
    {
        info!(
            "Checking Read permissions to AWS ECR by pulling \"{}:{}\" image...",
            repository, tag
        );

        let digests = vec![probe_digest(tag)];
        let check = client
            .batch_check_layer_availability(repository, &digests)
            .await
            .map_err(ReportError::PermissionCheck)?;

        debug!(
            "Layer availability in {}: {} available, {} failures",
            repository,
            check.available.len(),
            check.failures.len()
        );
        for failure in &check.failures {
            debug!(
                "Layer {} unavailable: {} ({})",
                failure.layer_digest.as_deref().unwrap_or("<unknown>"),
                failure.failure_code.as_deref().unwrap_or("<no code>"),
                failure.failure_reason.as_deref().unwrap_or("no reason given")
            );
        }

        info!("Read permissions to AWS ECR verified");
        Ok(check)
    }
}
