//! Declarative handler options.
//!
//! [`HandlerOptions`] is the serde-friendly form of the builder, for
//! registrations that come from configuration files. Strategies that need
//! code (custom serializers, identifier or reporter functions) are only
//! available through [`ErrorHandlerBuilder`].
//!
//! # Examples
//!
//! ```
//! use api_error_rail::config::HandlerOptions;
//! use api_error_rail::reporter::SinkRegistry;
//! use api_error_rail::ErrorHandler;
//!
//! let options: HandlerOptions = serde_json::from_str(
//!     r#"{"format": "xml", "backtrace": true, "error_id": "uuid"}"#,
//! )
//! .unwrap();
//!
//! let handler = ErrorHandler::from_options(&options, SinkRegistry::new()).unwrap();
//! assert!(handler.backtrace());
//! ```

use serde::Deserialize;

use crate::error::Result;
use crate::error_id::ErrorId;
use crate::handler::ErrorHandlerBuilder;
use crate::reporter::ErrorReporter;

/// Registration options as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerOptions {
    /// `json`, `json_api` or `xml`.
    pub format: String,
    pub content_type: Option<String>,
    pub backtrace: bool,
    /// `uuid`, or absent for no identifier.
    pub error_id: Option<String>,
    /// `honeybadger`, `sentry` (or `raven`), or absent for no reporting.
    pub error_reporter: Option<String>,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            format: "json".to_owned(),
            content_type: None,
            backtrace: false,
            error_id: None,
            error_reporter: None,
        }
    }
}

impl HandlerOptions {
    /// Parses the named strategies into a builder.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOption`](crate::Error::InvalidOption) for an unknown
    /// identifier strategy or reporter name. Unknown formats are reported by
    /// [`ErrorHandlerBuilder::register`].
    pub fn to_builder(&self) -> Result<ErrorHandlerBuilder> {
        let error_id = match self.error_id.as_deref() {
            Some(name) => name.parse::<ErrorId>()?,
            None => ErrorId::None,
        };
        let error_reporter = match self.error_reporter.as_deref() {
            Some(name) => name.parse::<ErrorReporter>()?,
            None => ErrorReporter::None,
        };

        let mut builder = ErrorHandlerBuilder::default()
            .format_name(self.format.clone())
            .backtrace(self.backtrace)
            .error_id(error_id)
            .error_reporter(error_reporter);
        if let Some(content_type) = &self.content_type {
            builder = builder.content_type(content_type.clone());
        }
        Ok(builder)
    }
}
