//! The intercepted fault.
//!
//! A [`Fault`] is a read-only snapshot of an unhandled error: the kind used
//! for status classification, the human readable message and, optionally,
//! the stack trace frames. Host error types expose one through [`AsFault`]
//! so the pipeline never has to take ownership of the original error.
//!
//! # Examples
//!
//! ```
//! use api_error_rail::Fault;
//!
//! let fault = Fault::new("RecordNotFound", "user 42 does not exist")
//!     .with_backtrace(["app/users.rs:10", "app/router.rs:88"]);
//!
//! assert_eq!(fault.kind(), "RecordNotFound");
//! assert_eq!(fault.message(), "user 42 does not exist");
//! assert_eq!(fault.backtrace().map(|b| b.len()), Some(2));
//! ```

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt;

use crate::error::BoxError;

/// Snapshot of an unhandled error occurrence.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    kind: Cow<'static, str>,
    message: String,
    backtrace: Option<Vec<String>>,
}

impl Fault {
    /// Creates a fault with an explicit kind tag.
    #[inline]
    pub fn new(kind: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self { kind: kind.into(), message: message.into(), backtrace: None }
    }

    /// Captures a fault from any displayable error, tagging it with the
    /// unqualified type name of `E`.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: fmt::Display + ?Sized,
    {
        Self::new(short_type_name::<E>(), error.to_string())
    }

    /// Attaches stack trace frames, outermost call last.
    pub fn with_backtrace<I, F>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.backtrace = Some(frames.into_iter().map(Into::into).collect());
        self
    }

    /// Captures the current thread's stack, one entry per frame in the form
    /// `symbol (file:line:col)`.
    pub fn with_captured_backtrace(self) -> Self {
        let frames = fold_frames(&Backtrace::force_capture().to_string());
        self.with_backtrace(frames)
    }

    /// The classification tag.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Stack trace frames, if any were captured.
    #[inline]
    pub fn backtrace(&self) -> Option<&[String]> {
        self.backtrace.as_deref()
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}: {}", self.kind, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for Fault {}

/// Exposes a [`Fault`] snapshot of an error without consuming it.
///
/// The pipeline classifies, reports and renders the snapshot while the host
/// keeps the original value, which is what gets re-raised when rendering
/// fails.
pub trait AsFault {
    fn as_fault(&self) -> Fault;
}

impl AsFault for Fault {
    #[inline]
    fn as_fault(&self) -> Fault {
        self.clone()
    }
}

impl AsFault for std::io::Error {
    fn as_fault(&self) -> Fault {
        Fault::new(format!("{:?}", self.kind()), self.to_string())
    }
}

impl AsFault for BoxError {
    fn as_fault(&self) -> Fault {
        match self.downcast_ref::<Fault>() {
            Some(fault) => fault.clone(),
            None => Fault::new("Error", self.to_string()),
        }
    }
}

/// Folds a rendered std backtrace into frame descriptors.
///
/// Each `N: symbol` line starts a frame and the `at location` line that
/// follows it is appended in parentheses.
fn fold_frames(rendered: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    for line in rendered.lines().map(str::trim) {
        if line.is_empty() || line.starts_with("note:") {
            continue;
        }
        if let (Some(location), Some(frame)) = (line.strip_prefix("at "), frames.last_mut()) {
            frame.push_str(" (");
            frame.push_str(location);
            frame.push(')');
            continue;
        }
        frames.push(strip_frame_index(line).to_owned());
    }
    frames
}

fn strip_frame_index(line: &str) -> &str {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    match line[digits..].strip_prefix(": ") {
        Some(symbol) if digits > 0 => symbol,
        _ => line,
    }
}

/// `core::any::type_name` without module path or generic arguments.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = core::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
