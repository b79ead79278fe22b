//! Runs the report stages in order

use crate::config::{Credentials, LATEST_TAG, PROBE_REPOSITORY};
use crate::error::Result;
use crate::registry::{Authenticator, RegistryApi};
use crate::report::{SizeReport, SizeReporter};
use tracing::debug;

/// Authenticate, probe, scan every repository, and log the size table.
///
/// Stages run one after another on the calling task. The first failing stage ends the
/// run; nothing after it executes and no partial report is produced.
pub struct Runner {
    authenticator: Authenticator,
}

impl Runner {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            authenticator: Authenticator::new(credentials),
        }
    }

    pub async fn run(&self) -> Result<SizeReport> {
        let client = self.authenticator.authenticate()?;
        Self::report(&client).await
    }

    /// Every stage after authentication, against an already built client
    pub async fn report<R>(client: &R) -> Result<SizeReport>
    where
        R: RegistryApi + ?Sized,
    {
        debug!("Using registry client bound to region {}", client.region());

        Authenticator::check_read_permission(client, PROBE_REPOSITORY, LATEST_TAG).await?;

        let reporter = SizeReporter::new(client);
        let repositories = reporter.list_repositories().await?;
        let sizes = reporter.scan(&repositories).await?;

        reporter.build_report(sizes)
    }
}
