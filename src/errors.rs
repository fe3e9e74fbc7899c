use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a validation call itself, i.e. no usable response was
/// produced. A receipt rejected by the App Store is not a failure of the call;
/// see [`crate::domain::entities::receipt_status::ReceiptStatusError`].
#[derive(Debug, Error)]
pub enum ReceiptValidationError {
    /// The request payload could not be serialized. Nothing was sent.
    #[error("failed to encode verifyReceipt payload: {0}")]
    Encode(#[source] serde_json::Error),

    /// The HTTP request could not be constructed. Nothing was sent.
    #[error("failed to build verifyReceipt request: {0}")]
    RequestBuild(#[source] BoxError),

    /// The request was sent (or attempted) but network I/O failed.
    #[error("verifyReceipt callout failed: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-success HTTP status code.
    #[error("verifyReceipt callout returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The caller canceled the call before it completed.
    #[error("verifyReceipt callout was canceled")]
    Canceled,

    /// The caller's deadline passed before the call completed.
    #[error("verifyReceipt callout exceeded its deadline")]
    DeadlineExceeded,

    /// The response body did not have the expected shape.
    #[error("failed to decode verifyReceipt response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ReceiptValidationError {
    pub fn request_build(e: impl Into<BoxError>) -> Self {
        Self::RequestBuild(e.into())
    }

    pub fn transport(e: impl Into<BoxError>) -> Self {
        Self::Transport(e.into())
    }

    /// True if the request never left the process.
    pub fn never_sent(&self) -> bool {
        matches!(self, Self::Encode(_) | Self::RequestBuild(_))
    }
}
