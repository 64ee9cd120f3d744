/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by holdover APIs.
///
/// The surface is deliberately small: requesting a background extension is a
/// best-effort, single-attempt operation, so a denied request and a redundant
/// release are *outcomes* (see `RegisterOutcome` and the `bool` returned by
/// `Guard::release`), not errors. What remains is input validation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Input validation failure (e.g. zero timeout, control characters in a
    /// version string).
    #[error("invalid input: {context}")]
    InvalidInput { context: String },
}

impl Error {
    pub(crate) fn invalid_input(context: impl Into<String>) -> Self {
        Self::InvalidInput {
            context: context.into(),
        }
    }
}
