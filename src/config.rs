//! Fixed settings and credential handling

use std::fmt;

/// Region every client is bound to. Not read from the environment.
pub const REGION: &str = "us-west-2";

/// Repository used by the read-permission probe
pub const PROBE_REPOSITORY: &str = "project/application";

/// Tag used by the read-permission probe and by the report filter
pub const LATEST_TAG: &str = "latest";

/// Prefix the probe prepends to the tag to form its layer digest
pub const DIGEST_PREFIX: &str = "sha256:";

/// Binary gigabyte (1024^3 bytes)
pub const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Provider name attached to the static credentials
pub const CREDENTIALS_PROVIDER_NAME: &str = "ecr-image-sizes";

/// Static AWS access key pair, held in memory only
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.access_key.trim().is_empty() {
            return Err("AWS access key cannot be empty".to_string());
        }
        if self.secret_key.trim().is_empty() {
            return Err("AWS secret key cannot be empty".to_string());
        }
        Ok(())
    }

    /// Access key with everything after the first four characters masked
    pub fn masked_access_key(&self) -> String {
        let visible: String = self.access_key.chars().take(4).collect();
        format!("{}****", visible)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.masked_access_key())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Digest string the read-permission probe sends for `tag`
pub fn probe_digest(tag: &str) -> String {
    format!("{}{}", DIGEST_PREFIX, tag)
}

/// Convert a byte count to binary gigabytes
pub fn bytes_to_gb(bytes: i64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let credentials = Credentials::new("AKIAEXAMPLEKEY", "wJalrXUtnFEMI/K7MDENG");
        let rendered = format!("{:?}", credentials);

        assert!(rendered.contains("AKIA****"));
        assert!(!rendered.contains("EXAMPLEKEY"));
        assert!(!rendered.contains("wJalrXUtnFEMI"));
    }

    #[test]
    fn test_validate() {
        assert!(Credentials::new("AKIA", "secret").validate().is_ok());
        assert!(Credentials::new("", "secret").validate().is_err());
        assert!(Credentials::new("AKIA", "   ").validate().is_err());
    }

    #[test]
    fn test_probe_digest() {
        assert_eq!(probe_digest(LATEST_TAG), "sha256:latest");
    }

    #[test]
    fn test_bytes_to_gb_is_binary() {
        assert_eq!(bytes_to_gb(1_073_741_824), 1.0);
        assert_eq!(bytes_to_gb(2_147_483_648), 2.0);
        assert_eq!(bytes_to_gb(536_870_912), 0.5);
        assert_eq!(bytes_to_gb(0), 0.0);
    }
}
