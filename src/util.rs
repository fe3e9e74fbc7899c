use crate::{
    config::ValidatorConfig,
    data::{
        datasources::verify_receipt_datasource::{ReceiptRequester, ReqwestReceiptRequester},
        repositories::receipt_validator_impl::ReceiptValidatorImpl,
    },
    domain::{
        entities::{
            call_context::CallContext, environment::Environment,
            validation_response::ValidationResponse,
        },
        repositories::receipt_validator::ReceiptValidator,
    },
    errors::ReceiptValidationError,
};

pub struct ReceiptUtil<V: ReceiptValidator> {
    receipt_validator: V,
}

impl<V: ReceiptValidator> ReceiptUtil<V> {
    pub async fn validate(
        &self,
        ctx: &CallContext,
        receipt: &str,
        environment: &Environment,
    ) -> Result<ValidationResponse, ReceiptValidationError> {
        self.receipt_validator
            .validate(ctx, receipt, environment)
            .await
    }

    pub async fn validate_auto(
        &self,
        ctx: &CallContext,
        receipt: &str,
    ) -> Result<ValidationResponse, ReceiptValidationError> {
        self.receipt_validator.validate_auto(ctx, receipt).await
    }
}

impl ReceiptUtil<ReceiptValidatorImpl<ReqwestReceiptRequester>> {
    /// Validator backed by a reqwest client with `config.timeout` applied to
    /// each request.
    pub fn new(config: &ValidatorConfig) -> Result<Self, ReceiptValidationError> {
        Ok(Self {
            receipt_validator: ReceiptValidatorImpl::new(config)?,
        })
    }
}

impl<R: ReceiptRequester> ReceiptUtil<ReceiptValidatorImpl<R>> {
    /// Validator that sends requests through a caller-supplied transport.
    pub fn with_requester(config: &ValidatorConfig, requester: R) -> Self {
        Self {
            receipt_validator: ReceiptValidatorImpl::with_requester(config, requester),
        }
    }
}
