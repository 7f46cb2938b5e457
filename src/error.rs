//! Error taxonomy for the handler itself.
//!
//! These are failures of the error-handling machinery, never the application
//! fault being handled. Whether one of them replaces the original fault or is
//! discarded in its favour is decided by the pipeline, see
//! [`Escalation`](crate::handler::Escalation).

/// Type-erased error used at the collaborator seams (reporters, sinks, responders).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Failures raised by registration, identifier generation, reporting,
/// serialization or response emission.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An option was given a value the handler does not understand.
    #[error("`{value}` is an invalid argument for the `{option}` option")]
    InvalidOption { option: &'static str, value: String },

    /// A named reporting sink was selected but no client for it is installed.
    #[error(
        "you selected the `{sink}` error reporter option but no {client} client is installed; \
         install one in the sink registry to use this error reporting option"
    )]
    MissingDependency { sink: &'static str, client: &'static str },

    /// A serializer produced a status code that has no standard reason phrase.
    #[error("status code {0} has no standard reason phrase")]
    UnknownStatus(u16),

    /// Building the response body failed.
    #[error("failed to serialize error body: {0}")]
    Serialize(String),

    /// The correlation identifier generator failed.
    #[error("error id generation failed: {0}")]
    ErrorId(#[source] BoxError),

    /// The configured reporter or sink failed.
    #[error("error reporter failed: {0}")]
    Reporter(#[source] BoxError),

    /// The response-emission primitive failed.
    #[error("failed to emit error response: {0}")]
    Emit(#[source] BoxError),
}

impl Error {
    pub(crate) fn invalid_option(option: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidOption { option, value: value.into() }
    }

    /// Returns `true` for failures of the serialize/emit stage.
    #[inline]
    pub fn is_rendering(&self) -> bool {
        matches!(self, Self::UnknownStatus(_) | Self::Serialize(_) | Self::Emit(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}
