/// Convenience result type used across shaderseq.
pub type SeqResult<T> = Result<T, SeqError>;

/// Top-level error taxonomy used by editor APIs.
#[derive(thiserror::Error, Debug)]
pub enum SeqError {
    /// Invalid caller-provided data (for example animating a non-numeric parameter).
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced keyframe does not exist where the caller expected it.
    #[error("not found: {0}")]
    NotFound(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeqError {
    /// Build a [`SeqError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SeqError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Return `true` for [`SeqError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
