//! The error pipeline.
//!
//! An [`ErrorHandler`] is one frozen registration: serializer, content type,
//! backtrace switch, identifier strategy, reporter and classifier are resolved
//! once by [`ErrorHandlerBuilder::register`] and shared by every fault handled
//! afterwards. Each fault then goes through
//!
//! 1. classification,
//! 2. identifier generation,
//! 3. reporting,
//! 4. serialization,
//! 5. response emission.
//!
//! Steps 4 and 5 run inside a containment boundary: if either fails the
//! failure is logged and discarded, and the caller is told to surface the
//! original fault. Failures in steps 2 and 3 are not contained and replace the
//! original fault.
//!
//! # Examples
//!
//! ```
//! use api_error_rail::prelude::*;
//! use http::{Response, StatusCode};
//!
//! let handler = ErrorHandler::builder()
//!     .format(Format::JsonApi)
//!     .classifier(RescueResponses::with_defaults())
//!     .register()
//!     .unwrap();
//!
//! let fault = Fault::new("RecordNotFound", "no such user");
//! let responder = HttpResponder::<String>::new();
//! let response: Response<String> = handler.rescue(fault, &responder).unwrap();
//!
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//! assert_eq!(response.headers()["content-type"], "application/vnd.api+json");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::config::HandlerOptions;
use crate::error::{BoxError, Error, Result};
use crate::error_id::ErrorId;
use crate::fault::{AsFault, Fault};
use crate::reporter::{Dispatcher, ErrorReporter, SinkRegistry};
use crate::respond::{RenderedError, Respond};
use crate::serializers::{ErrorSerializer, Format, SerializeOptions, Subject};
use crate::status::{Classify, RescueResponses, Status};

/// Outcome of a fault the pipeline could not turn into a response.
#[derive(Debug, thiserror::Error)]
pub enum Escalation {
    /// Serialization or emission failed. The error is the discarded
    /// secondary failure; the host must surface the original fault.
    #[error("rendering failed, original fault must be re-raised: {0}")]
    Reraise(#[source] Error),
    /// Identifier generation or reporting failed. The error replaces the
    /// original fault.
    #[error(transparent)]
    Replaced(Error),
}

/// What reaches the host when a fault was not turned into a response.
#[derive(Debug, thiserror::Error)]
pub enum Unhandled<E> {
    /// The original fault, re-raised after a contained rendering failure.
    #[error("{0}")]
    Fault(E),
    /// A handler failure that escaped before rendering.
    #[error(transparent)]
    Handler(Error),
}

impl<E> Unhandled<E> {
    /// Returns the original fault if it is what surfaced.
    pub fn into_fault(self) -> Option<E> {
        match self {
            Self::Fault(e) => Some(e),
            Self::Handler(_) => None,
        }
    }

    pub fn handler_error(&self) -> Option<&Error> {
        match self {
            Self::Fault(_) => None,
            Self::Handler(e) => Some(e),
        }
    }
}

struct Registration {
    serializer: Arc<dyn ErrorSerializer>,
    content_type: Option<Cow<'static, str>>,
    backtrace: bool,
    error_id: ErrorId,
    reporter: Dispatcher,
    classifier: Arc<dyn Classify>,
}

/// A registered, immutable error pipeline. Cheap to clone.
#[derive(Clone)]
pub struct ErrorHandler {
    inner: Arc<Registration>,
}

impl ErrorHandler {
    #[inline]
    pub fn builder() -> ErrorHandlerBuilder {
        ErrorHandlerBuilder::default()
    }

    /// Registers a handler from declarative options.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOption`] for an unknown format, identifier strategy or
    /// reporter name.
    pub fn from_options(options: &HandlerOptions, sinks: SinkRegistry) -> Result<Self> {
        options.to_builder()?.sinks(sinks).register()
    }

    /// Runs the pipeline for one fault occurrence.
    ///
    /// # Errors
    ///
    /// - [`Escalation::Replaced`] when identifier generation or reporting fails.
    /// - [`Escalation::Reraise`] when serialization or emission fails.
    pub fn handle<R>(&self, fault: &Fault, responder: &dyn Respond<R>) -> Result<R, Escalation> {
        let reg = &*self.inner;
        let status = reg.classifier.classify(fault);
        let error_id = match reg.error_id.generate() {
            Ok(error_id) => error_id,
            Err(err) => {
                tracing::warn!(kind = fault.kind(), error = %err, "error id generation failed");
                return Err(Escalation::Replaced(err));
            },
        };

        if let Err(err) = reg.reporter.report(fault, error_id.as_deref()) {
            tracing::warn!(kind = fault.kind(), error = %err, "error reporting failed");
            return Err(Escalation::Replaced(err));
        }

        tracing::debug!(
            kind = fault.kind(),
            status = status.as_ref().map(Status::as_str),
            error_id = error_id.as_deref(),
            "handling fault"
        );

        self.render(fault, status.as_ref(), error_id, responder).map_err(|err| {
            tracing::error!(
                kind = fault.kind(),
                message = fault.message(),
                error = %err,
                "failed to render error response, re-raising original fault"
            );
            Escalation::Reraise(err)
        })
    }

    /// Runs the pipeline and maps the outcome back onto the original error.
    ///
    /// # Errors
    ///
    /// [`Unhandled::Fault`] carries `error` back unchanged when rendering
    /// failed; [`Unhandled::Handler`] carries an escaped handler failure.
    pub fn rescue<E, R>(&self, error: E, responder: &dyn Respond<R>) -> Result<R, Unhandled<E>>
    where
        E: AsFault,
    {
        let fault = error.as_fault();
        match self.handle(&fault, responder) {
            Ok(response) => Ok(response),
            Err(Escalation::Reraise(_)) => Err(Unhandled::Fault(error)),
            Err(Escalation::Replaced(err)) => Err(Unhandled::Handler(err)),
        }
    }

    fn render<R>(
        &self,
        fault: &Fault,
        status: Option<&Status>,
        error_id: Option<String>,
        responder: &dyn Respond<R>,
    ) -> Result<R> {
        let reg = &*self.inner;
        let subject = Subject::new(fault, status);
        let serializer = &reg.serializer;

        let options = SerializeOptions { backtrace: reg.backtrace, error_id };
        let body = serializer.serialize(&subject, &options)?;
        let format = serializer.render_format();

        responder.respond(RenderedError {
            status: serializer.status_code(&subject),
            content_type: reg
                .content_type
                .as_deref()
                .unwrap_or_else(|| format.content_type())
                .to_owned(),
            format,
            body,
        })
    }

    #[inline]
    pub fn backtrace(&self) -> bool {
        self.inner.backtrace
    }

    /// Content type override resolved at registration.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.inner.content_type.as_deref()
    }
}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorHandler")
            .field("render_format", &self.inner.serializer.render_format())
            .field("content_type", &self.inner.content_type)
            .field("backtrace", &self.inner.backtrace)
            .field("error_id", &self.inner.error_id)
            .field("reporter", &self.inner.reporter)
            .finish_non_exhaustive()
    }
}

/// Collects options for an [`ErrorHandler`].
pub struct ErrorHandlerBuilder {
    format: Cow<'static, str>,
    serializer: Option<Arc<dyn ErrorSerializer>>,
    content_type: Option<Cow<'static, str>>,
    backtrace: bool,
    error_id: ErrorId,
    error_reporter: ErrorReporter,
    sinks: SinkRegistry,
    classifier: Arc<dyn Classify>,
}

impl Default for ErrorHandlerBuilder {
    fn default() -> Self {
        Self {
            format: Cow::Borrowed(Format::Json.as_str()),
            serializer: None,
            content_type: None,
            backtrace: false,
            error_id: ErrorId::None,
            error_reporter: ErrorReporter::None,
            sinks: SinkRegistry::new(),
            classifier: Arc::new(RescueResponses::with_defaults()),
        }
    }
}

impl ErrorHandlerBuilder {
    pub fn format(mut self, format: Format) -> Self {
        self.format = Cow::Borrowed(format.as_str());
        self
    }

    /// Selects a format by name; unknown names fail at registration unless a
    /// custom serializer is set.
    pub fn format_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.format = name.into();
        self
    }

    /// Uses a custom serializer instead of the format's built-in one.
    pub fn serializer<S>(mut self, serializer: S) -> Self
    where
        S: ErrorSerializer + 'static,
    {
        self.serializer = Some(Arc::new(serializer));
        self
    }

    pub fn content_type(mut self, content_type: impl Into<Cow<'static, str>>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn backtrace(mut self, enabled: bool) -> Self {
        self.backtrace = enabled;
        self
    }

    pub fn error_id(mut self, strategy: ErrorId) -> Self {
        self.error_id = strategy;
        self
    }

    /// Shorthand for [`ErrorId::callable`].
    pub fn error_id_with<F>(self, f: F) -> Self
    where
        F: Fn() -> Result<Option<String>, BoxError> + Send + Sync + 'static,
    {
        self.error_id(ErrorId::callable(f))
    }

    pub fn error_reporter(mut self, strategy: ErrorReporter) -> Self {
        self.error_reporter = strategy;
        self
    }

    /// Shorthand for [`ErrorReporter::callable`].
    pub fn report_with<F>(self, f: F) -> Self
    where
        F: Fn(&Fault, Option<&str>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.error_reporter(ErrorReporter::callable(f))
    }

    /// Registry consulted when a named sink reports.
    pub fn sinks(mut self, sinks: SinkRegistry) -> Self {
        self.sinks = sinks;
        self
    }

    /// Replaces the default [`RescueResponses::with_defaults`] classifier.
    pub fn classifier<C>(mut self, classifier: C) -> Self
    where
        C: Classify + 'static,
    {
        self.classifier = Arc::new(classifier);
        self
    }

    /// Resolves and freezes the configuration.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidOption`] when the format name is unknown and no custom
    /// serializer was given.
    pub fn register(self) -> Result<ErrorHandler> {
        // A custom serializer makes the format name irrelevant except for its
        // default content type.
        let (format, serializer) = match (self.format.parse::<Format>(), self.serializer) {
            (format, Some(custom)) => (format.ok(), custom),
            (Ok(format), None) => (Some(format), format.serializer()),
            (Err(err), None) => return Err(err),
        };

        let content_type = self
            .content_type
            .or_else(|| format.and_then(Format::default_content_type).map(Cow::Borrowed));

        tracing::debug!(
            format = %self.format,
            render_format = %serializer.render_format(),
            backtrace = self.backtrace,
            "registered error handler"
        );

        Ok(ErrorHandler {
            inner: Arc::new(Registration {
                serializer,
                content_type,
                backtrace: self.backtrace,
                error_id: self.error_id,
                reporter: self.error_reporter.bind(self.sinks),
                classifier: self.classifier,
            }),
        })
    }
}
