//! Named external reporting sinks.
//!
//! A sink is only usable once the host installs a client for it in a
//! [`SinkRegistry`]. Availability is checked every time a fault is reported,
//! so a client installed after registration is picked up.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{Map, Value};

use crate::error::{BoxError, Error};
use crate::fault::Fault;

/// Well-known error tracking services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Honeybadger,
    /// Also accepted under its legacy client name, `raven`.
    Sentry,
}

impl SinkKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Honeybadger => "honeybadger",
            Self::Sentry => "sentry",
        }
    }

    /// Client that must be installed for this sink.
    pub const fn client(self) -> &'static str {
        match self {
            Self::Honeybadger => "Honeybadger",
            Self::Sentry => "Sentry",
        }
    }

    /// Section of the event the sink expects extra data under.
    pub const fn section(self) -> &'static str {
        match self {
            Self::Honeybadger => "context",
            Self::Sentry => "extra",
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SinkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "honeybadger" => Ok(Self::Honeybadger),
            "sentry" | "raven" => Ok(Self::Sentry),
            other => Err(Error::invalid_option("error_reporter", other)),
        }
    }
}

/// Data forwarded to a sink alongside the fault.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkEvent {
    pub section: &'static str,
    pub data: Map<String, Value>,
}

impl SinkEvent {
    pub(crate) fn new(kind: SinkKind, error_id: Option<&str>) -> Self {
        let mut data = Map::new();
        if let Some(id) = error_id {
            data.insert("error_id".to_owned(), Value::String(id.to_owned()));
        }
        Self { section: kind.section(), data }
    }

    #[inline]
    pub fn error_id(&self) -> Option<&str> {
        self.data.get("error_id").and_then(Value::as_str)
    }
}

/// Client for an external error tracking service.
pub trait ReportingSink: Send + Sync {
    fn notify(&self, fault: &Fault, event: &SinkEvent) -> Result<(), BoxError>;
}

impl<F> ReportingSink for F
where
    F: Fn(&Fault, &SinkEvent) -> Result<(), BoxError> + Send + Sync,
{
    #[inline]
    fn notify(&self, fault: &Fault, event: &SinkEvent) -> Result<(), BoxError> {
        self(fault, event)
    }
}

type Clients = HashMap<SinkKind, Arc<dyn ReportingSink>>;

/// Shared handle to the sink clients installed in the host environment.
#[derive(Clone, Default)]
pub struct SinkRegistry {
    clients: Arc<RwLock<Clients>>,
}

impl SinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs (or replaces) the client for a sink.
    pub fn install<S>(&self, kind: SinkKind, sink: S) -> &Self
    where
        S: ReportingSink + 'static,
    {
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, Arc::new(sink));
        self
    }

    pub fn uninstall(&self, kind: SinkKind) -> bool {
        self.clients.write().unwrap_or_else(PoisonError::into_inner).remove(&kind).is_some()
    }

    pub fn is_installed(&self, kind: SinkKind) -> bool {
        self.clients.read().unwrap_or_else(PoisonError::into_inner).contains_key(&kind)
    }

    pub fn get(&self, kind: SinkKind) -> Option<Arc<dyn ReportingSink>> {
        self.clients.read().unwrap_or_else(PoisonError::into_inner).get(&kind).cloned()
    }
}

impl fmt::Debug for SinkRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clients = self.clients.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_set().entries(clients.keys()).finish()
    }
}
