// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Typed failures that callers may need to tell apart.
//
// Everything else in the crate travels as anyhow::Error with
// context attached. These variants are still reachable from an
// anyhow::Error through `err.downcast_ref::<PipelineError>()`,
// which is how the tests and the CLI inspect them.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    /// The request declared a content type the parser does not accept.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The body could not be decoded as the declared content type.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The body decoded fine but its shape is not a row matrix or feature map.
    #[error("unsupported input format: {0}")]
    UnsupportedInputFormat(String),

    /// The input columns do not line up with the features the model was trained on.
    #[error("feature schema mismatch: {0}")]
    SchemaMismatch(String),

    /// The caller asked for a response content type we cannot produce.
    #[error("unsupported response content type: {0}")]
    UnsupportedAcceptType(String),

    /// Test accuracy fell below the promotion threshold.
    #[error("model accuracy {accuracy:.4} below threshold {threshold}")]
    QualityGate { accuracy: f64, threshold: f64 },

    /// An endpoint answered with a body that does not match the request.
    #[error("invalid endpoint response: {0}")]
    InvalidResponse(String),
}
