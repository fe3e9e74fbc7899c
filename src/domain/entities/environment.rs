use std::fmt;

use serde::Deserialize;

use crate::constants::{PRODUCTION_VERIFY_RECEIPT_URL, SANDBOX_VERIFY_RECEIPT_URL};

/// Endpoint a verifyReceipt request is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Apple's live verification server.
    Production,
    /// Apple's test verification server.
    Sandbox,
    /// Any other endpoint, e.g. a proxy in front of the App Store. It is
    /// expected to speak the same protocol.
    Custom(String),
}

impl Environment {
    pub fn custom(url: impl Into<String>) -> Self {
        Self::Custom(url.into())
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Production => PRODUCTION_VERIFY_RECEIPT_URL,
            Self::Sandbox => SANDBOX_VERIFY_RECEIPT_URL,
            Self::Custom(url) => url,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "Production",
            Self::Sandbox => "Sandbox",
            Self::Custom(_) => "Custom",
        })
    }
}

/// Environment the App Store reports having validated the receipt against.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ReceiptEnvironment {
    Sandbox,
    Production,

    #[serde(untagged)]
    Unknown(String),
}
