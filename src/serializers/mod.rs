//! Error body serializers.
//!
//! Every wire format implements [`ErrorSerializer`]. The built-in formats are
//! [`Json`], [`JsonApi`] and [`Xml`]; callers plug in their own by
//! implementing the trait and registering it with
//! [`ErrorHandlerBuilder::serializer`](crate::handler::ErrorHandlerBuilder::serializer).
//!
//! # Examples
//!
//! ```
//! use api_error_rail::serializers::{ErrorSerializer, Json, SerializeOptions, Subject};
//! use api_error_rail::status::Status;
//! use api_error_rail::Fault;
//!
//! let fault = Fault::new("RuntimeError", "This is a RuntimeError!");
//! let status = Status::NOT_FOUND;
//! let subject = Subject::new(&fault, Some(&status));
//!
//! let body = Json.serialize(&subject, &SerializeOptions::default()).unwrap();
//! assert_eq!(body, r#"{"error":{"title":"Not Found","detail":"This is a RuntimeError!"}}"#);
//! ```

mod json;
mod json_api;
#[cfg(feature = "xml")]
mod xml;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use http::StatusCode;

use crate::error::{Error, Result};
use crate::fault::Fault;
use crate::status::{self, Status};

pub use json::Json;
pub use json_api::JsonApi;
#[cfg(feature = "xml")]
pub use xml::Xml;

/// Content type registered for JSON:API documents.
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// One fault occurrence as seen by a serializer.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    fault: &'a Fault,
    status: Option<&'a Status>,
}

impl<'a> Subject<'a> {
    #[inline]
    pub fn new(fault: &'a Fault, status: Option<&'a Status>) -> Self {
        Self { fault, status }
    }

    #[inline]
    pub fn fault(&self) -> &'a Fault {
        self.fault
    }

    /// The classified status symbol, if the fault was classified.
    #[inline]
    pub fn status(&self) -> Option<&'a Status> {
        self.status
    }

    /// Numeric code of the classified status, `500` when unmapped.
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        status::code_for(self.status)
    }

    /// Standard reason phrase of [`status_code`](Self::status_code).
    #[inline]
    pub fn title(&self) -> Result<&'static str> {
        status::title_for(self.status_code())
    }
}

/// Per-occurrence serialization switches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Include the fault's stack trace when it has one.
    pub backtrace: bool,
    /// Correlation identifier to embed.
    pub error_id: Option<String>,
}

impl SerializeOptions {
    /// Backtrace frames to embed, if requested and available.
    #[inline]
    pub fn backtrace_of<'a>(&self, fault: &'a Fault) -> Option<&'a [String]> {
        if self.backtrace {
            fault.backtrace()
        } else {
            None
        }
    }
}

/// Which body kind a serializer produces, used to pick the emission path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderFormat {
    Json,
    Xml,
    Plain,
}

impl RenderFormat {
    /// Content type used when no override or format default applies.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Plain => "text/plain; charset=utf-8",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Plain => "plain",
        })
    }
}

/// Renders a fault occurrence into a response body.
///
/// Only [`serialize`](Self::serialize) and [`render_format`](Self::render_format)
/// are required. `status_code` and `title` default to the standard table and
/// may be overridden to customise how a status is presented.
pub trait ErrorSerializer: Send + Sync {
    /// Numeric status the response is emitted with.
    fn status_code(&self, subject: &Subject<'_>) -> StatusCode {
        subject.status_code()
    }

    /// Human readable phrase for [`status_code`](Self::status_code).
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStatus`] when the code has no standard phrase.
    fn title(&self, subject: &Subject<'_>) -> Result<&'static str> {
        status::title_for(self.status_code(subject))
    }

    fn serialize(&self, subject: &Subject<'_>, options: &SerializeOptions) -> Result<String>;

    fn render_format(&self) -> RenderFormat;
}

/// Built-in wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Json,
    JsonApi,
    #[cfg(feature = "xml")]
    Xml,
}

impl Format {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JsonApi => "json_api",
            #[cfg(feature = "xml")]
            Self::Xml => "xml",
        }
    }

    /// Content type the format asks for, if it differs from its render format's.
    pub const fn default_content_type(self) -> Option<&'static str> {
        match self {
            Self::JsonApi => Some(JSON_API_CONTENT_TYPE),
            _ => None,
        }
    }

    /// Built-in serializer for this format.
    pub fn serializer(self) -> Arc<dyn ErrorSerializer> {
        match self {
            Self::Json => Arc::new(Json),
            Self::JsonApi => Arc::new(JsonApi),
            #[cfg(feature = "xml")]
            Self::Xml => Arc::new(Xml),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "json_api" => Ok(Self::JsonApi),
            #[cfg(feature = "xml")]
            "xml" => Ok(Self::Xml),
            other => Err(Error::invalid_option("format", other)),
        }
    }
}
