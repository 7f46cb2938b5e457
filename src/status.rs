//! Status classification.
//!
//! A fault is first classified into a semantic [`Status`] symbol (for example
//! `not_found`) by a host supplied [`Classify`] implementation. The symbol is
//! then mapped to a numeric code through a fixed table derived from the
//! standard reason phrases known to the `http` crate: `"Not Found"` becomes
//! `not_found`, `"I'm a teapot"` becomes `i_m_a_teapot`. Unmapped or absent
//! symbols fall back to `500`.
//!
//! # Examples
//!
//! ```
//! use api_error_rail::status::{self, Classify, RescueResponses, Status};
//! use api_error_rail::Fault;
//! use http::StatusCode;
//!
//! let table = RescueResponses::with_defaults().rescue("CustomAuthError", Status::UNAUTHORIZED);
//!
//! let fault = Fault::new("CustomAuthError", "who are you?");
//! let status = table.classify(&fault);
//! assert_eq!(status::code_for(status.as_ref()), StatusCode::UNAUTHORIZED);
//! assert_eq!(status::code_for(None), StatusCode::INTERNAL_SERVER_ERROR);
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use http::StatusCode;

use crate::error::{Error, Result};
use crate::fault::Fault;

/// Code used when a fault is unclassified or its symbol is unknown.
pub const DEFAULT_STATUS_CODE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Semantic status symbol, e.g. `not_found`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Status(Cow<'static, str>);

impl Status {
    pub const BAD_REQUEST: Status = Status(Cow::Borrowed("bad_request"));
    pub const UNAUTHORIZED: Status = Status(Cow::Borrowed("unauthorized"));
    pub const FORBIDDEN: Status = Status(Cow::Borrowed("forbidden"));
    pub const NOT_FOUND: Status = Status(Cow::Borrowed("not_found"));
    pub const METHOD_NOT_ALLOWED: Status = Status(Cow::Borrowed("method_not_allowed"));
    pub const NOT_ACCEPTABLE: Status = Status(Cow::Borrowed("not_acceptable"));
    pub const CONFLICT: Status = Status(Cow::Borrowed("conflict"));
    pub const UNPROCESSABLE_ENTITY: Status = Status(Cow::Borrowed("unprocessable_entity"));
    pub const INTERNAL_SERVER_ERROR: Status = Status(Cow::Borrowed("internal_server_error"));
    pub const NOT_IMPLEMENTED: Status = Status(Cow::Borrowed("not_implemented"));

    #[inline]
    pub const fn from_static(symbol: &'static str) -> Self {
        Self(Cow::Borrowed(symbol))
    }

    #[inline]
    pub fn new(symbol: impl Into<Cow<'static, str>>) -> Self {
        Self(symbol.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric code for this symbol, if it is a standard one.
    #[inline]
    pub fn code(&self) -> Option<StatusCode> {
        symbol_table().get(self.as_str()).copied()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Status {
    fn from(symbol: &'static str) -> Self {
        Self::from_static(symbol)
    }
}

impl From<StatusCode> for Status {
    /// Converts a code into its symbol; codes without a reason phrase map to
    /// a symbol that resolves back to the default code.
    fn from(code: StatusCode) -> Self {
        match code.canonical_reason() {
            Some(reason) => Self::new(symbolize(reason)),
            None => Self::new(code.as_str().to_owned()),
        }
    }
}

/// Maps an optional status symbol to its numeric code, defaulting to `500`.
#[inline]
pub fn code_for(status: Option<&Status>) -> StatusCode {
    status.and_then(Status::code).unwrap_or(DEFAULT_STATUS_CODE)
}

/// Standard reason phrase for a code.
///
/// # Errors
///
/// [`Error::UnknownStatus`] when the code has no standard phrase.
#[inline]
pub fn title_for(code: StatusCode) -> Result<&'static str> {
    code.canonical_reason().ok_or(Error::UnknownStatus(code.as_u16()))
}

fn symbolize(reason: &str) -> String {
    reason
        .chars()
        .map(|c| match c {
            c if c.is_whitespace() => '_',
            '-' | '\'' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

fn symbol_table() -> &'static HashMap<String, StatusCode> {
    static TABLE: OnceLock<HashMap<String, StatusCode>> = OnceLock::new();
    TABLE.get_or_init(|| {
        (100u16..600)
            .filter_map(|n| StatusCode::from_u16(n).ok())
            .filter_map(|code| code.canonical_reason().map(|reason| (symbolize(reason), code)))
            .collect()
    })
}

/// Host supplied fault classifier.
pub trait Classify: Send + Sync {
    /// Returns the status symbol for a fault, or `None` when it is unclassified.
    fn classify(&self, fault: &Fault) -> Option<Status>;
}

impl<F> Classify for F
where
    F: Fn(&Fault) -> Option<Status> + Send + Sync,
{
    #[inline]
    fn classify(&self, fault: &Fault) -> Option<Status> {
        self(fault)
    }
}

/// Classification table keyed by [`Fault::kind`].
///
/// `RescueResponses::default()` is empty; [`with_defaults`](Self::with_defaults)
/// starts from the well-known framework fault kinds.
#[derive(Debug, Clone, Default)]
pub struct RescueResponses {
    entries: HashMap<Cow<'static, str>, Status>,
}

impl RescueResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        [
            ("RoutingError", Status::NOT_FOUND),
            ("RecordNotFound", Status::NOT_FOUND),
            ("NotImplemented", Status::NOT_IMPLEMENTED),
            ("MethodNotAllowed", Status::METHOD_NOT_ALLOWED),
            ("UnknownHttpMethod", Status::METHOD_NOT_ALLOWED),
            ("UnknownFormat", Status::NOT_ACCEPTABLE),
            ("ParameterMissing", Status::BAD_REQUEST),
            ("BadRequest", Status::BAD_REQUEST),
            ("ParseError", Status::BAD_REQUEST),
            ("InvalidAuthenticityToken", Status::UNPROCESSABLE_ENTITY),
            ("RecordInvalid", Status::UNPROCESSABLE_ENTITY),
            ("RecordNotSaved", Status::UNPROCESSABLE_ENTITY),
            ("StaleObjectError", Status::CONFLICT),
            ("RecordNotUnique", Status::CONFLICT),
        ]
        .into_iter()
        .fold(Self::new(), |table, (kind, status)| table.rescue(kind, status))
    }

    /// Adds or overrides the status for a fault kind.
    pub fn rescue(mut self, kind: impl Into<Cow<'static, str>>, status: impl Into<Status>) -> Self {
        self.entries.insert(kind.into(), status.into());
        self
    }

    #[inline]
    pub fn get(&self, kind: &str) -> Option<&Status> {
        self.entries.get(kind)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Classify for RescueResponses {
    fn classify(&self, fault: &Fault) -> Option<Status> {
        self.get(fault.kind()).cloned()
    }
}
