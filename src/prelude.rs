//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use api_error_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Pipeline**: [`ErrorHandler`], [`ErrorHandlerBuilder`], [`Unhandled`], [`Escalation`]
//! - **Strategies**: [`Format`], [`ErrorId`], [`ErrorReporter`], [`SinkKind`], [`SinkRegistry`]
//! - **Classification**: [`Status`], [`RescueResponses`], [`Classify`]
//! - **Serialization**: [`ErrorSerializer`], [`Subject`], [`SerializeOptions`], [`RenderFormat`]
//! - **Emission**: [`Respond`], [`RenderedError`], [`HttpResponder`]

pub use crate::error::{BoxError, Error};
pub use crate::error_id::ErrorId;
pub use crate::fault::{AsFault, Fault};
pub use crate::handler::{ErrorHandler, ErrorHandlerBuilder, Escalation, Unhandled};
pub use crate::reporter::{ErrorReporter, SinkEvent, SinkKind, SinkRegistry};
pub use crate::respond::{HttpResponder, RenderedError, Respond};
pub use crate::serializers::{ErrorSerializer, Format, RenderFormat, SerializeOptions, Subject};
pub use crate::status::{Classify, RescueResponses, Status};

#[cfg(feature = "tower")]
pub use crate::tower::{ErrorHandlerLayer, HandleErrorsExt};
