//! Standardized mapping from AWS SDK errors to [`ApiError`]

use crate::error::ApiError;
use aws_sdk_ecr::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

/// Standard error handler for ECR SDK responses
pub struct SdkErrorHandler;

impl SdkErrorHandler {
    /// Convert a failed SDK call into an [`ApiError`] for `operation`
    pub fn handle<E, R>(err: &SdkError<E, R>, operation: &'static str) -> ApiError
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
        R: std::fmt::Debug,
    {
        match err {
            SdkError::ServiceError(context) => {
                let service_err = context.err();
                let message = Self::describe_service_error(service_err.code(), service_err.message());
                match service_err.code() {
                    Some(code) => ApiError::new(operation, message).with_code(code),
                    None => ApiError::new(operation, message),
                }
            }
            SdkError::ConstructionFailure(_) => ApiError::new(
                operation,
                format!("request could not be built: {}", DisplayErrorContext(err)),
            ),
            SdkError::TimeoutError(_) => ApiError::new(
                operation,
                format!("request timed out: {}", DisplayErrorContext(err)),
            ),
            SdkError::DispatchFailure(_) => ApiError::new(
                operation,
                format!("request could not be sent: {}", DisplayErrorContext(err)),
            ),
            SdkError::ResponseError(_) => ApiError::new(
                operation,
                format!("invalid response: {}", DisplayErrorContext(err)),
            ),
            _ => ApiError::new(operation, DisplayErrorContext(err).to_string()),
        }
    }

    /// Build a readable message from a service error code and message
    pub fn describe_service_error(code: Option<&str>, message: Option<&str>) -> String {
        let message = message.unwrap_or("no error message returned");
        let hint = match code {
            Some("AccessDeniedException") => Some("access denied, check the IAM permissions of these credentials"),
            Some("UnrecognizedClientException") => Some("the access key is not recognized"),
            Some("InvalidSignatureException") | Some("SignatureDoesNotMatch") => {
                Some("the request signature does not match, check the secret key")
            }
            Some("RepositoryNotFoundException") => Some("repository not found"),
            Some("InvalidParameterException") => Some("invalid request parameter"),
            Some("ServerException") => Some("registry server error"),
            _ => None,
        };

        match (code, hint) {
            (Some(code), Some(hint)) => format!("{} ({}): {}", code, hint, message),
            (Some(code), None) => format!("{}: {}", code, message),
            (None, _) => message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ecr::operation::describe_repositories::DescribeRepositoriesError;

    #[test]
    fn test_describe_known_codes() {
        assert_eq!(
            SdkErrorHandler::describe_service_error(
                Some("RepositoryNotFoundException"),
                Some("The repository with name 'project/application' does not exist"),
            ),
            "RepositoryNotFoundException (repository not found): The repository with name 'project/application' does not exist"
        );
        assert!(
            SdkErrorHandler::describe_service_error(Some("AccessDeniedException"), None)
                .starts_with("AccessDeniedException (access denied")
        );
    }

    #[test]
    fn test_describe_unknown_code() {
        assert_eq!(
            SdkErrorHandler::describe_service_error(Some("ThrottlingException"), Some("slow down")),
            "ThrottlingException: slow down"
        );
        assert_eq!(
            SdkErrorHandler::describe_service_error(None, Some("something broke")),
            "something broke"
        );
    }

    #[test]
    fn test_construction_failure() {
        let err: SdkError<DescribeRepositoriesError> =
            SdkError::construction_failure("missing region");
        let api = SdkErrorHandler::handle(&err, "DescribeRepositories");

        assert_eq!(api.operation, "DescribeRepositories");
        assert_eq!(api.code, None);
        assert!(api.message.starts_with("request could not be built"));
    }

    #[test]
    fn test_timeout() {
        let err: SdkError<DescribeRepositoriesError> = SdkError::timeout_error("deadline elapsed");
        let api = SdkErrorHandler::handle(&err, "DescribeRepositories");
        assert!(api.message.starts_with("request timed out"));
    }
}
