use serde::Serialize;

/// Request body for the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/requestbody
#[derive(Debug, Serialize)]
pub(crate) struct VerifyReceiptRequestModel<'a> {
    /// The Base64-encoded receipt data.
    #[serde(rename = "receipt-data")]
    pub(crate) receipt_data: &'a str,
    /// The app's shared secret. Omitted entirely when not configured, as apps
    /// without auto-renewable subscriptions don't have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) password: Option<&'a str>,
    /// Include only the latest renewal transaction for any subscriptions.
    /// Omitted when false.
    #[serde(
        rename = "exclude-old-transactions",
        skip_serializing_if = "is_false"
    )]
    pub(crate) exclude_old_transactions: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}
