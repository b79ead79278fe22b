//! Error types for the size report
//!
//! Every stage of a run fails with a [`ReportError`]. All variants are fatal and map to
//! the same process exit code; the variant only decides which context message is logged.

pub mod handlers;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

/// Exit code used for every failed run.
pub const FAILURE_EXIT_CODE: u8 = 1;

/// A failed call against the registry service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct ApiError {
    /// Remote operation name, e.g. `DescribeImages`
    pub operation: &'static str,
    /// Service error code when the service returned one
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("Error reading AWS credentials: {0}")]
    Credentials(String),

    #[error("Error authenticating to AWS ECR: {0}")]
    Authentication(String),

    #[error("Error checking Read permissions to AWS ECR: {0}")]
    PermissionCheck(#[source] ApiError),

    #[error("Error getting list of Aws ECR repositories: {0}")]
    ListRepositories(#[source] ApiError),

    #[error("Error getting size of Docker images: {repository}: {source}")]
    ImageSizes {
        repository: String,
        #[source]
        source: ApiError,
    },

    #[error("Error building table of Docker image sizes: {0}")]
    BuildReport(String),
}

impl ReportError {
    /// Process exit code for this failure. The policy is uniform: every stage fails with 1.
    pub fn exit_code(&self) -> u8 {
        FAILURE_EXIT_CODE
    }

    /// Short name of the stage that failed
    pub fn stage(&self) -> &'static str {
        match self {
            ReportError::Credentials(_) => "arguments",
            ReportError::Authentication(_) => "authentication",
            ReportError::PermissionCheck(_) => "permission-check",
            ReportError::ListRepositories(_) => "list-repositories",
            ReportError::ImageSizes { .. } => "image-sizes",
            ReportError::BuildReport(_) => "build-report",
        }
    }
}

impl From<clap::Error> for ReportError {
    fn from(err: clap::Error) -> Self {
        ReportError::Credentials(err.to_string().trim_end().to_string())
    }
}

impl From<std::fmt::Error> for ReportError {
    fn from(err: std::fmt::Error) -> Self {
        ReportError::BuildReport(format!("formatting failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_stage() {
        let api = ApiError::new("DescribeRepositories", "access denied");
        assert_eq!(
            ReportError::ListRepositories(api.clone()).to_string(),
            "Error getting list of Aws ECR repositories: DescribeRepositories failed: access denied"
        );
        assert_eq!(
            ReportError::ImageSizes {
                repository: "web".to_string(),
                source: api,
            }
            .to_string(),
            "Error getting size of Docker images: web: DescribeRepositories failed: access denied"
        );
        assert_eq!(
            ReportError::Authentication("empty secret key".to_string()).to_string(),
            "Error authenticating to AWS ECR: empty secret key"
        );
    }

    #[test]
    fn test_every_stage_exits_with_one() {
        let api = ApiError::new("BatchCheckLayerAvailability", "boom");
        let errors = vec![
            ReportError::Credentials("missing".to_string()),
            ReportError::Authentication("bad".to_string()),
            ReportError::PermissionCheck(api.clone()),
            ReportError::ListRepositories(api.clone()),
            ReportError::ImageSizes {
                repository: "app".to_string(),
                source: api,
            },
            ReportError::BuildReport("bad".to_string()),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "stage {}", err.stage());
        }
    }

    #[test]
    fn test_api_error_code() {
        let err = ApiError::new("DescribeImages", "no such repository")
            .with_code("RepositoryNotFoundException");
        assert_eq!(err.code.as_deref(), Some("RepositoryNotFoundException"));
        assert_eq!(err.to_string(), "DescribeImages failed: no such repository");
    }
}
