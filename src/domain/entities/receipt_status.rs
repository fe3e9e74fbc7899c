use thiserror::Error;

/// Reason the App Store rejected a receipt, derived from the `status` field of
/// a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ReceiptStatusError {
    /// 21000: The request to the App Store was not made using the HTTP POST
    /// request method, or the JSON object could not be read.
    #[error("the App Store could not read the JSON object you provided")]
    MalformedJson,
    /// 21002: The data in the receipt-data property was malformed or missing.
    #[error("the data in the receipt-data property was malformed or missing")]
    MalformedReceiptData,
    /// 21003: The receipt could not be authenticated.
    #[error("the receipt could not be authenticated")]
    NotAuthenticated,
    /// 21004: The shared secret you provided does not match the shared secret
    /// on file for your account.
    #[error("the shared secret you provided does not match the shared secret on file for your account")]
    IncorrectSecret,
    /// 21005: The receipt server is not currently available.
    #[error("the receipt server is not currently available")]
    ServerNotAvailable,
    /// 21006: This receipt is valid but the subscription has expired.
    #[error("this receipt is valid but the subscription has expired")]
    SubscriptionExpired,
    /// 21007: This receipt is from the test environment, but it was sent to
    /// the production environment for verification.
    #[error("this receipt is from the test environment, but it was sent to the production environment for verification")]
    SandboxOnProduction,
    /// 21008: This receipt is from the production environment, but it was
    /// sent to the test environment for verification.
    #[error("this receipt is from the production environment, but it was sent to the test environment for verification")]
    ProductionOnSandbox,
    /// 21010: This receipt could not be authorized. Treat this the same as if
    /// a purchase was never made.
    #[error("this receipt could not be authorized; treat this the same as if a purchase was never made")]
    UnauthorizedReceipt,
    /// 21100-21199: Internal data access error.
    #[error("internal data access error (status {0})")]
    InternalDataAccess(i32),
    /// Any other non-zero status.
    #[error("an unknown error occurred (status {0})")]
    Unknown(i32),
}

impl ReceiptStatusError {
    /// Maps a response status to an error, or `Ok(())` for status 0.
    pub fn from_status(status: i32) -> Result<(), Self> {
        Err(match status {
            0 => return Ok(()),
            21000 => Self::MalformedJson,
            21002 => Self::MalformedReceiptData,
            21003 => Self::NotAuthenticated,
            21004 => Self::IncorrectSecret,
            21005 => Self::ServerNotAvailable,
            21006 => Self::SubscriptionExpired,
            21007 => Self::SandboxOnProduction,
            21008 => Self::ProductionOnSandbox,
            21010 => Self::UnauthorizedReceipt,
            21100..=21199 => Self::InternalDataAccess(status),
            _ => Self::Unknown(status),
        })
    }

    /// The receipt was sent to the wrong environment's endpoint.
    pub fn is_environment_mismatch(&self) -> bool {
        matches!(self, Self::SandboxOnProduction | Self::ProductionOnSandbox)
    }
}
