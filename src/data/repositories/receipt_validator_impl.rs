use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::{
    config::ValidatorConfig,
    constants::VERIFY_RECEIPT_CONTENT_TYPE,
    data::{
        datasources::verify_receipt_datasource::{ReceiptRequester, ReqwestReceiptRequester},
        models::verify_receipt::request_model::VerifyReceiptRequestModel,
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

pub struct ReceiptValidatorImpl<R: ReceiptRequester> {
    requester: R,
    shared_secret: Option<String>,
    exclude_old_transactions: bool,
}

#[async_trait]
impl<R: ReceiptRequester> ReceiptValidator for ReceiptValidatorImpl<R> {
    #[instrument(
        skip(self, ctx, receipt),
        fields(environment = %environment, url = environment.url())
    )]
    async fn validate(
        &self,
        ctx: &CallContext,
        receipt: &str,
        environment: &Environment,
    ) -> Result<ValidationResponse, ReceiptValidationError> {
        let body = serde_json::to_vec(&VerifyReceiptRequestModel {
            receipt_data: receipt,
            password: self.shared_secret.as_deref(),
            exclude_old_transactions: self.exclude_old_transactions,
        })
        .map_err(ReceiptValidationError::Encode)?;

        let url = environment.url();
        debug!(url, "sending verifyReceipt request");
        let raw = match ctx
            .run(self.requester.post(url, VERIFY_RECEIPT_CONTENT_TYPE, body))
            .await
        {
            Ok(raw) => raw,
            // Proxies may answer with an error code but still carry a status.
            Err(ReceiptValidationError::HttpStatus { status, body }) => {
                match serde_json::from_str::<ValidationResponse>(&body) {
                    Ok(response) => {
                        debug!(
                            http_status = status,
                            status = response.status,
                            "verifyReceipt error response decoded"
                        );
                        return Ok(response);
                    }
                    Err(_) => {
                        let e = ReceiptValidationError::HttpStatus { status, body };
                        warn!(url, error = %e, "verifyReceipt callout failed");
                        return Err(e);
                    }
                }
            }
            Err(e) => {
                warn!(url, error = %e, "verifyReceipt callout failed");
                return Err(e);
            }
        };

        let response: ValidationResponse =
            serde_json::from_slice(&raw).map_err(ReceiptValidationError::Decode)?;
        debug!(status = response.status, "verifyReceipt response decoded");
        Ok(response)
    }

    #[instrument(skip(self, ctx, receipt))]
    async fn validate_auto(
        &self,
        ctx: &CallContext,
        receipt: &str,
    ) -> Result<ValidationResponse, ReceiptValidationError> {
        let response = self
            .validate(ctx, receipt, &Environment::Production)
            .await?;
        match response.status_error() {
            Err(e) if e.is_environment_mismatch() => {
                debug!(
                    status = response.status,
                    "environment mismatch on production, retrying against sandbox"
                );
                self.validate(ctx, receipt, &Environment::Sandbox).await
            }
            _ => Ok(response),
        }
    }
}

impl<R: ReceiptRequester> ReceiptValidatorImpl<R> {
    pub(crate) fn with_requester(config: &ValidatorConfig, requester: R) -> Self {
        Self {
            requester,
            shared_secret: config.password().map(str::to_owned),
            exclude_old_transactions: config.exclude_old_transactions,
        }
    }
}

impl ReceiptValidatorImpl<ReqwestReceiptRequester> {
    pub(crate) fn new(config: &ValidatorConfig) -> Result<Self, ReceiptValidationError> {
        Ok(Self::with_requester(
            config,
            ReqwestReceiptRequester::new(config.timeout)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records request bodies and replies with a fixed body.
    struct EchoRequester {
        reply: &'static str,
        bodies: Mutex<Vec<serde_json::Value>>,
    }

    #[async_trait]
    impl ReceiptRequester for EchoRequester {
        async fn post(
            &self,
            _url: &str,
            _content_type: &'static str,
            body: Vec<u8>,
        ) -> Result<Vec<u8>, ReceiptValidationError> {
            self.bodies
                .lock()
                .unwrap()
                .push(serde_json::from_slice(&body).unwrap());
            Ok(self.reply.as_bytes().to_vec())
        }
    }

    fn validator(config: &ValidatorConfig) -> ReceiptValidatorImpl<EchoRequester> {
        ReceiptValidatorImpl::with_requester(
            config,
            EchoRequester {
                reply: r#"{"status":0}"#,
                bodies: Mutex::new(Vec::new()),
            },
        )
    }

    #[tokio::test]
    async fn empty_secret_is_not_sent() {
        let v = validator(&ValidatorConfig::default().with_shared_secret(""));
        v.validate(&CallContext::background(), "MIIT", &Environment::Sandbox)
            .await
            .unwrap();
        let bodies = v.requester.bodies.lock().unwrap();
        assert_eq!(bodies[0], serde_json::json!({ "receipt-data": "MIIT" }));
    }

    #[tokio::test]
    async fn configured_options_are_sent() {
        let v = validator(
            &ValidatorConfig::default()
                .with_shared_secret("s3cret")
                .with_exclude_old_transactions(true),
        );
        v.validate(&CallContext::background(), "MIIT", &Environment::Production)
            .await
            .unwrap();
        let bodies = v.requester.bodies.lock().unwrap();
        assert_eq!(bodies[0]["password"], "s3cret");
        assert_eq!(bodies[0]["exclude-old-transactions"], true);
    }
}
