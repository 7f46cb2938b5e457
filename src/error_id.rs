//! Correlation identifier strategies.
//!
//! # Examples
//!
//! ```
//! use api_error_rail::ErrorId;
//!
//! assert_eq!(ErrorId::None.generate().unwrap(), None);
//!
//! let from_request = ErrorId::callable(|| Ok(Some("req-7".to_owned())));
//! assert_eq!(from_request.generate().unwrap().as_deref(), Some("req-7"));
//!
//! let id = ErrorId::Uuid.generate().unwrap().unwrap();
//! assert_eq!(id.len(), 36);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{BoxError, Error, Result};

type GenerateFn = dyn Fn() -> Result<Option<String>, BoxError> + Send + Sync;

/// How a correlation identifier is produced for each fault occurrence.
#[derive(Clone, Default)]
pub enum ErrorId {
    /// No identifier.
    #[default]
    None,
    /// A caller supplied generator whose result is used unchanged. It may
    /// decline to produce an identifier or fail.
    Callable(Arc<GenerateFn>),
    /// A random version 4 UUID in hyphenated form.
    Uuid,
}

impl ErrorId {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn() -> Result<Option<String>, BoxError> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(f))
    }

    /// Produces the identifier for one occurrence.
    ///
    /// # Errors
    ///
    /// [`Error::ErrorId`] when a callable generator fails.
    pub fn generate(&self) -> Result<Option<String>> {
        match self {
            Self::None => Ok(None),
            Self::Callable(f) => f().map_err(Error::ErrorId),
            Self::Uuid => Ok(Some(uuid::Uuid::new_v4().to_string())),
        }
    }
}

impl fmt::Debug for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Uuid => f.write_str("Uuid"),
        }
    }
}

impl FromStr for ErrorId {
    type Err = Error;

    /// Parses a named strategy. Only `uuid` has a name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uuid" => Ok(Self::Uuid),
            other => Err(Error::invalid_option("error_id", other)),
        }
    }
}
