use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};

use crate::data::models::wire_format::string_flag;

use super::timestamp::datetime_from_millis;

/// A single in-app purchase or subscription transaction, as reported in the
/// `in_app`, `latest_receipt_info` and `latest_expired_receipt_info` arrays.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/latest_receipt_info
///
/// Epoch-millisecond fields are accepted as numbers or decimal strings, and
/// string-encoded flags are decoded to typed values, so nothing downstream
/// has to inspect raw tokens.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PurchaseRecord {
    /// The number of consumable products purchased.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub quantity: Option<u32>,
    /// The unique identifier of the product purchased.
    #[serde(default)]
    pub product_id: String,
    /// A unique identifier for a transaction such as a purchase, restore, or
    /// renewal.
    #[serde(default)]
    pub transaction_id: String,
    /// The transaction identifier of the original purchase. Equal to
    /// `transaction_id` unless this transaction is a restore or a renewal.
    #[serde(default)]
    pub original_transaction_id: String,
    /// A unique identifier for purchase events across devices, including
    /// subscription-renewal events.
    pub web_order_line_item_id: Option<String>,

    /// The time the App Store charged the user's account, in a date-time
    /// format similar to ISO 8601.
    pub purchase_date: Option<String>,
    /// The purchase time as UNIX epoch milliseconds.
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub purchase_date_ms: i64,
    /// The purchase time in the Pacific Time zone.
    pub purchase_date_pst: Option<String>,

    /// The time of the original purchase. For subscriptions, the start of the
    /// subscription period, even if it has since been renewed.
    pub original_purchase_date: Option<String>,
    #[serde(default)]
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub original_purchase_date_ms: i64,
    pub original_purchase_date_pst: Option<String>,

    /// The time a subscription expires or when it will renew. Only present for
    /// auto-renewable subscriptions.
    pub expires_date: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub expires_date_ms: Option<i64>,
    pub expires_date_pst: Option<String>,
    /// Legacy iOS 6 style expiration date strings.
    pub expires_date_formatted: Option<String>,
    pub expires_date_formatted_pst: Option<String>,
    /// The reason a subscription expired ("1" through "5").
    pub expiration_intent: Option<String>,

    /// The time Apple customer support canceled (refunded) the transaction,
    /// or the time of an upgrade.
    pub cancellation_date: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub cancellation_date_ms: Option<i64>,
    pub cancellation_date_pst: Option<String>,
    /// Why the transaction was refunded. Only present alongside a
    /// cancellation date.
    pub cancellation_reason: Option<CancellationReason>,

    /// Whether the subscription is in its free trial period.
    #[serde(default, deserialize_with = "string_flag")]
    pub is_trial_period: bool,
    /// Whether the subscription is in an introductory price period.
    #[serde(default, deserialize_with = "string_flag")]
    pub is_in_intro_offer_period: bool,

    /// Whether the subscription will renew at the end of the current period.
    /// Absent for non-subscription purchases.
    pub auto_renew_status: Option<AutoRenewStatus>,
    /// The product the subscription renews to.
    pub auto_renew_product_id: Option<String>,
    /// Whether the App Store is still attempting to renew an expired
    /// subscription after a billing failure.
    pub is_in_billing_retry_period: Option<BillingRetryStatus>,
    /// Whether the customer agreed to a subscription price increase.
    pub price_consent_status: Option<String>,

    /// Identifies the app that created the transaction. Not present in the
    /// sandbox.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub app_item_id: Option<i64>,
    /// Identifies the revision of the app the customer bought. Not present in
    /// the sandbox.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub version_external_identifier: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub enum AutoRenewStatus {
    /// The subscription renews at the end of the current period.
    #[serde(rename = "1", alias = "true")]
    On,
    /// The customer turned off automatic renewal.
    #[serde(rename = "0", alias = "false")]
    Off,

    #[serde(untagged)]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub enum BillingRetryStatus {
    /// The App Store is attempting to renew the subscription.
    #[serde(rename = "1", alias = "true")]
    Retrying,
    /// The App Store has stopped attempting to renew the subscription.
    #[serde(rename = "0", alias = "false")]
    Stopped,

    #[serde(untagged)]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub enum CancellationReason {
    /// The customer canceled due to an actual or perceived issue within the
    /// app.
    #[serde(rename = "1")]
    IssueInApp,
    /// The transaction was canceled for another reason, e.g. an accidental
    /// purchase.
    #[serde(rename = "0")]
    Other,

    #[serde(untagged)]
    Unknown(String),
}

/// Lifecycle state derived from a [`PurchaseRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PurchaseStatus {
    Trial,
    Paid,
    Expired,
    Pending,
    Canceled,
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trial => "trial",
            Self::Paid => "paid",
            Self::Expired => "expired",
            Self::Pending => "pending",
            Self::Canceled => "canceled",
        })
    }
}

impl PurchaseRecord {
    pub fn purchase_time(&self) -> DateTime<Utc> {
        datetime_from_millis(self.purchase_date_ms)
    }

    pub fn original_purchase_time(&self) -> DateTime<Utc> {
        datetime_from_millis(self.original_purchase_date_ms)
    }

    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        self.expires_date_ms.map(datetime_from_millis)
    }

    pub fn cancellation_time(&self) -> Option<DateTime<Utc>> {
        self.cancellation_date_ms.map(datetime_from_millis)
    }

    /// True if this transaction restored an earlier one.
    pub fn is_restore(&self) -> bool {
        self.original_transaction_id != self.transaction_id
    }

    /// Auto-renewal explicitly turned off, or the transaction was refunded by
    /// Apple customer support.
    pub fn is_canceled(&self) -> bool {
        self.auto_renew_status == Some(AutoRenewStatus::Off)
            || self.cancellation_reason.is_some()
            || self.cancellation_date_ms.is_some_and(|ms| ms > 0)
    }

    /// The subscription's expiration time is strictly before `now`. Purchases
    /// without an expiration time never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time().is_some_and(|expires| expires < now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_pending(&self) -> bool {
        self.is_in_billing_retry_period == Some(BillingRetryStatus::Retrying)
    }

    pub fn is_trial(&self) -> bool {
        self.is_trial_period
    }

    /// Derives the lifecycle state as of `now`. The first matching state
    /// wins: canceled, expired, pending, trial, paid.
    pub fn status_at(&self, now: DateTime<Utc>) -> PurchaseStatus {
        if self.is_canceled() {
            PurchaseStatus::Canceled
        } else if self.is_expired_at(now) {
            PurchaseStatus::Expired
        } else if self.is_pending() {
            PurchaseStatus::Pending
        } else if self.is_trial() {
            PurchaseStatus::Trial
        } else {
            PurchaseStatus::Paid
        }
    }

    pub fn status(&self) -> PurchaseStatus {
        self.status_at(Utc::now())
    }
}
