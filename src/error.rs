use thiserror::Error;

/// Failures raised by the model layer (classifier or generator).
/// These never reach the caller of `Responder::respond`; they are folded into degraded replies.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model is not loaded")]
    Unavailable,

    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inference server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("could not decode model output: {0}")]
    Decode(String),
}

/// Rejections at the caller-facing boundary, before an utterance reaches the pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Message is required")]
    Empty,

    #[error("Message exceeds {max} characters ({actual})")]
    TooLong { max: usize, actual: usize },
}

/// A label outside the fixed emotion set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown emotion label: {0}")]
pub struct UnknownEmotion(pub String);
