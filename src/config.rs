use std::time::Duration;

use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};

use crate::constants::DEFAULT_REQUEST_TIMEOUT;

/// Options for constructing a receipt validator.
///
/// Can be built in code with the `with_*` methods, or deserialized from any
/// serde-supported config source (missing keys fall back to the defaults):
///
/// ```json
/// { "shared_secret": "abc123", "exclude_old_transactions": true, "timeout": 20 }
/// ```
#[serde_as]
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// App-specific shared secret. Only needed for receipts that contain
    /// auto-renewable subscriptions; an empty or missing secret is left out
    /// of the request entirely.
    pub shared_secret: Option<String>,
    /// If set, the App Store includes only the latest renewal transaction for
    /// each subscription in the response.
    pub exclude_old_transactions: bool,
    /// Timeout applied to each HTTP request by the default transport.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            shared_secret: None,
            exclude_old_transactions: false,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ValidatorConfig {
    pub fn with_shared_secret(mut self, shared_secret: impl Into<String>) -> Self {
        self.shared_secret = Some(shared_secret.into());
        self
    }

    pub fn with_exclude_old_transactions(mut self, exclude: bool) -> Self {
        self.exclude_old_transactions = exclude;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The shared secret, if one is configured and non-empty.
    pub(crate) fn password(&self) -> Option<&str> {
        self.shared_secret.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_ten_second_timeout() {
        let config = ValidatorConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.shared_secret, None);
        assert!(!config.exclude_old_transactions);
    }

    #[test]
    fn empty_secret_is_treated_as_absent() {
        let config = ValidatorConfig::default().with_shared_secret("");
        assert_eq!(config.password(), None);
        let config = ValidatorConfig::default().with_shared_secret("pass");
        assert_eq!(config.password(), Some("pass"));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ValidatorConfig =
            serde_json::from_str(r#"{"shared_secret":"s3cret","timeout":20}"#).unwrap();
        assert_eq!(
            config,
            ValidatorConfig::default()
                .with_shared_secret("s3cret")
                .with_timeout(Duration::from_secs(20))
        );
    }
}
