use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::errors::ReceiptValidationError;

/// Transport used to reach the verifyReceipt endpoint. Implementations must
/// be safe to share across concurrent calls.
#[async_trait]
pub trait ReceiptRequester: Send + Sync {
    /// POSTs `body` to `url` with the given `Content-Type` header, and returns
    /// the raw response body.
    ///
    /// Failures should be reported as [`ReceiptValidationError::RequestBuild`]
    /// if the request could not be constructed, or
    /// [`ReceiptValidationError::Transport`] once it was attempted. A non-2xx
    /// reply is reported as [`ReceiptValidationError::HttpStatus`] carrying the
    /// full body, which is still decoded if it holds a verifyReceipt response.
    async fn post(
        &self,
        url: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, ReceiptValidationError>;
}

#[async_trait]
impl<T: ReceiptRequester + ?Sized> ReceiptRequester for Arc<T> {
    async fn post(
        &self,
        url: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, ReceiptValidationError> {
        (**self).post(url, content_type, body).await
    }
}

/// Default transport, backed by a pooled [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestReceiptRequester {
    client: reqwest::Client,
}

impl ReqwestReceiptRequester {
    /// Builds a client that applies `timeout` to every request.
    pub fn new(timeout: Duration) -> Result<Self, ReceiptValidationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReceiptValidationError::request_build)?;
        Ok(Self { client })
    }

    /// Uses an existing client as-is, e.g. to share a connection pool.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReceiptRequester for ReqwestReceiptRequester {
    async fn post(
        &self,
        url: &str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, ReceiptValidationError> {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .build()
            .map_err(ReceiptValidationError::request_build)?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(ReceiptValidationError::transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(ReceiptValidationError::transport)?;
            return Err(ReceiptValidationError::HttpStatus { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(ReceiptValidationError::transport)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_url_fails_before_sending() {
        let requester = ReqwestReceiptRequester::new(Duration::from_secs(1)).unwrap();
        let err = requester
            .post("not a url", "application/json", Vec::new())
            .await
            .unwrap_err();
        assert!(err.never_sent(), "{err:?}");
    }
}
