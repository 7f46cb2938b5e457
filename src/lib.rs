//! Turns unhandled request errors into serialized error responses.
//!
//! An [`ErrorHandler`] is registered once per request-handling component and
//! then runs for every fault that escapes a handler: the fault is classified
//! into a status, given an optional correlation id, reported, serialized as
//! JSON, JSON:API or XML, and emitted. If serialization or emission fails,
//! the original fault is surfaced instead of the rendering error.
//!
//! # Examples
//!
//! ## Rendering a fault
//!
//! ```
//! use api_error_rail::prelude::*;
//! use http::{Response, StatusCode};
//!
//! let handler = ErrorHandler::builder()
//!     .classifier(RescueResponses::new().rescue("RuntimeError", Status::NOT_FOUND))
//!     .register()
//!     .unwrap();
//!
//! let fault = Fault::new("RuntimeError", "This is a RuntimeError!");
//! let responder = HttpResponder::<String>::new();
//! let response: Response<String> = handler.rescue(fault, &responder).unwrap();
//!
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//! assert_eq!(
//!     response.body(),
//!     r#"{"error":{"title":"Not Found","detail":"This is a RuntimeError!"}}"#
//! );
//! ```
//!
//! ## Rendering failures surface the original fault
//!
//! ```
//! use api_error_rail::prelude::*;
//!
//! let handler = ErrorHandler::builder().register().unwrap();
//! let broken = |_: RenderedError| -> Result<(), BoxError> { Err("socket closed".into()) };
//!
//! let surfaced = handler.rescue(Fault::new("RuntimeError", "boom"), &broken).unwrap_err();
//! assert_eq!(surfaced.into_fault().unwrap().message(), "boom");
//! ```

/// Registration-time options in declarative form
pub mod config;
/// Failures of the handler itself
pub mod error;
/// Correlation identifier strategies
pub mod error_id;
/// The intercepted fault
pub mod fault;
/// The error pipeline and its registration
pub mod handler;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Fault reporting to callables and external sinks
pub mod reporter;
/// Response emission seam
pub mod respond;
/// Wire format serializers
pub mod serializers;
/// Status classification and the standard code table
pub mod status;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use error::{BoxError, Error, Result};
pub use error_id::ErrorId;
pub use fault::{AsFault, Fault};
pub use handler::{ErrorHandler, ErrorHandlerBuilder, Escalation, Unhandled};
pub use reporter::ErrorReporter;
pub use respond::{HttpResponder, RenderedError, Respond};
pub use serializers::{ErrorSerializer, Format, RenderFormat};
pub use status::Status;
