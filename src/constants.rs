use std::time::Duration;

pub(crate) const PRODUCTION_VERIFY_RECEIPT_URL: &str = "https://buy.itunes.apple.com/verifyReceipt";
pub(crate) const SANDBOX_VERIFY_RECEIPT_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";

pub(crate) const VERIFY_RECEIPT_CONTENT_TYPE: &str = "application/json; charset=utf-8";

pub(crate) const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
