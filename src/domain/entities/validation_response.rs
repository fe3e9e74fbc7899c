use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::data::models::wire_format::string_flag;

use super::{
    environment::ReceiptEnvironment,
    purchase_record::{AutoRenewStatus, BillingRetryStatus, PurchaseRecord},
    receipt_status::ReceiptStatusError,
};

/// Decoded response body of a verifyReceipt call.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
///
/// A decoded response does not imply a valid receipt: check
/// [`ValidationResponse::status_error`] before trusting any purchase data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationResponse {
    /// Either 0 if the receipt is valid, or a status code if there is an
    /// error.
    pub status: i32,
    /// The environment for which the receipt was generated.
    pub environment: Option<ReceiptEnvironment>,
    /// A JSON representation of the receipt that was sent for verification.
    pub receipt: Option<Receipt>,
    /// The latest Base64-encoded app receipt. Only returned for receipts that
    /// contain auto-renewable subscriptions.
    #[serde(default)]
    pub latest_receipt: String,
    /// All in-app purchase transactions, including renewals.
    #[serde(default)]
    pub latest_receipt_info: Vec<PurchaseRecord>,
    /// Only returned for iOS 6 style transaction receipts of an expired
    /// auto-renewable subscription.
    #[serde(default)]
    pub latest_expired_receipt_info: Vec<PurchaseRecord>,
    /// Renewal information for each auto-renewable subscription in the
    /// receipt.
    #[serde(default)]
    pub pending_renewal_info: Vec<PendingRenewalInfo>,
    /// Whether the request should be retried. Only applicable to statuses
    /// 21100-21199.
    #[serde(default, rename = "is-retryable", deserialize_with = "string_flag")]
    pub is_retryable: bool,
}

impl ValidationResponse {
    pub fn status_error(&self) -> Result<(), ReceiptStatusError> {
        ReceiptStatusError::from_status(self.status)
    }

    pub fn is_valid(&self) -> bool {
        self.status == 0
    }

    /// The receipt contains auto-renewable subscriptions.
    pub fn is_renewable(&self) -> bool {
        !self.latest_receipt.is_empty() && !self.latest_receipt_info.is_empty()
    }
}

/// The decoded app receipt.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Receipt {
    /// The app's bundle identifier (CFBundleIdentifier).
    #[serde(default)]
    pub bundle_id: String,
    /// The app's version number.
    pub application_version: Option<String>,
    /// In-app purchase transactions present in the receipt. Finished
    /// consumables are removed on the next receipt refresh.
    #[serde(default)]
    pub in_app: Vec<PurchaseRecord>,
    /// The version of the app that the user originally purchased.
    pub original_application_version: Option<String>,

    pub receipt_creation_date: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub receipt_creation_date_ms: Option<i64>,
    pub receipt_creation_date_pst: Option<String>,

    /// Only present for apps purchased through the Volume Purchase Program.
    pub receipt_expiration_date: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub receipt_expiration_date_ms: Option<i64>,
    pub receipt_expiration_date_pst: Option<String>,

    pub original_purchase_date: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub original_purchase_date_ms: Option<i64>,
    pub original_purchase_date_pst: Option<String>,

    /// The time the request to verifyReceipt was processed.
    pub request_date: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub request_date_ms: Option<i64>,
    pub request_date_pst: Option<String>,

    pub adam_id: Option<i64>,
    pub app_item_id: Option<i64>,
    pub download_id: Option<i64>,
    pub version_external_identifier: Option<i64>,
    /// The type of receipt generated, e.g. "Production" or
    /// "ProductionSandbox".
    pub receipt_type: Option<String>,
}

/// Renewal information for an auto-renewable subscription. May refer to a
/// renewal scheduled in the future or one that failed in the past.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/pending_renewal_info
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PendingRenewalInfo {
    #[serde(default)]
    pub product_id: String,
    pub original_transaction_id: Option<String>,
    pub expiration_intent: Option<String>,
    pub auto_renew_product_id: Option<String>,
    pub is_in_billing_retry_period: Option<BillingRetryStatus>,
    pub auto_renew_status: Option<AutoRenewStatus>,
    pub price_consent_status: Option<String>,
}
