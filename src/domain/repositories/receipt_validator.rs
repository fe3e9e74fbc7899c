use async_trait::async_trait;

use crate::{
    domain::entities::{
        call_context::CallContext, environment::Environment,
        validation_response::ValidationResponse,
    },
    errors::ReceiptValidationError,
};

#[async_trait]
pub trait ReceiptValidator: Send + Sync {
    /// Sends `receipt` (Base64-encoded, as provided by StoreKit) to the
    /// verifyReceipt endpoint of `environment` and decodes the response.
    ///
    /// A non-zero response status is not an error here; check
    /// [`ValidationResponse::status_error`].
    async fn validate(
        &self,
        ctx: &CallContext,
        receipt: &str,
        environment: &Environment,
    ) -> Result<ValidationResponse, ReceiptValidationError>;

    /// Validates against production first, and if the App Store reports an
    /// environment mismatch, once more against the sandbox.
    async fn validate_auto(
        &self,
        ctx: &CallContext,
        receipt: &str,
    ) -> Result<ValidationResponse, ReceiptValidationError>;
}
