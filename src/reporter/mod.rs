//! Fault reporting.
//!
//! [`ErrorReporter`] is the strategy picked at registration; [`Dispatcher`] is
//! that strategy bound to the host's [`SinkRegistry`], ready to forward faults.
//! Reporting failures are returned to the caller, never swallowed here.
//!
//! # Examples
//!
//! ```
//! use api_error_rail::reporter::{ErrorReporter, SinkEvent, SinkKind, SinkRegistry};
//! use api_error_rail::{BoxError, Error, Fault};
//!
//! let sinks = SinkRegistry::new();
//! let dispatcher = ErrorReporter::Named(SinkKind::Sentry).bind(sinks.clone());
//! let fault = Fault::new("RuntimeError", "boom");
//!
//! // No Sentry client installed yet.
//! assert!(matches!(
//!     dispatcher.report(&fault, None),
//!     Err(Error::MissingDependency { sink: "sentry", .. })
//! ));
//!
//! sinks.install(SinkKind::Sentry, |_: &Fault, _: &SinkEvent| -> Result<(), BoxError> { Ok(()) });
//! assert!(dispatcher.report(&fault, Some("abc")).unwrap());
//! ```

pub mod sink;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{BoxError, Error, Result};
use crate::fault::Fault;

pub use sink::{ReportingSink, SinkEvent, SinkKind, SinkRegistry};

type ReportFn = dyn Fn(&Fault, Option<&str>) -> Result<(), BoxError> + Send + Sync;

/// Where faults are reported.
#[derive(Clone, Default)]
pub enum ErrorReporter {
    /// Faults are not reported.
    #[default]
    None,
    /// A caller supplied function receiving the fault and its identifier.
    Callable(Arc<ReportFn>),
    /// A well-known external service, resolved through the sink registry.
    Named(SinkKind),
}

impl ErrorReporter {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&Fault, Option<&str>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        Self::Callable(Arc::new(f))
    }

    /// Binds the strategy to the registry consulted for named sinks.
    pub fn bind(self, sinks: SinkRegistry) -> Dispatcher {
        Dispatcher { strategy: self, sinks }
    }
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Callable(_) => f.write_str("Callable(..)"),
            Self::Named(kind) => f.debug_tuple("Named").field(kind).finish(),
        }
    }
}

impl FromStr for ErrorReporter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::Named)
    }
}

/// A reporter strategy resolved for one registration.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    strategy: ErrorReporter,
    sinks: SinkRegistry,
}

impl Dispatcher {
    /// Forwards a fault and its identifier.
    ///
    /// Returns whether reporting was attempted.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingDependency`] when a named sink has no installed client.
    /// - [`Error::Reporter`] when the function or sink fails.
    pub fn report(&self, fault: &Fault, error_id: Option<&str>) -> Result<bool> {
        match &self.strategy {
            ErrorReporter::None => Ok(false),
            ErrorReporter::Callable(f) => {
                f(fault, error_id).map_err(Error::Reporter)?;
                Ok(true)
            },
            ErrorReporter::Named(kind) => {
                let kind = *kind;
                let sink = self.sinks.get(kind).ok_or(Error::MissingDependency {
                    sink: kind.name(),
                    client: kind.client(),
                })?;

                let event = SinkEvent::new(kind, error_id);
                sink.notify(fault, &event).map_err(Error::Reporter)?;
                tracing::debug!(sink = %kind, error_id, "reported fault to sink");
                Ok(true)
            },
        }
    }

    #[inline]
    pub fn strategy(&self) -> &ErrorReporter {
        &self.strategy
    }
}
