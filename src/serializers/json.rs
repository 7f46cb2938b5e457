use serde::Serialize;

use super::{ErrorSerializer, RenderFormat, SerializeOptions, Subject};
use crate::error::Result;

/// Plain JSON error body.
///
/// There is no standard for this shape; it keeps to a small envelope with a
/// title and detail, optionally carrying the correlation id and backtrace:
///
/// ```json
/// {"error": {"title": "Not Found", "detail": "...", "id": "...", "backtrace": ["..."]}}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

#[derive(Serialize)]
struct Envelope<'a> {
    error: Body<'a>,
}

#[derive(Serialize)]
struct Body<'a> {
    title: &'a str,
    detail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backtrace: Option<&'a [String]>,
}

impl ErrorSerializer for Json {
    fn serialize(&self, subject: &Subject<'_>, options: &SerializeOptions) -> Result<String> {
        let fault = subject.fault();
        let envelope = Envelope {
            error: Body {
                title: self.title(subject)?,
                detail: fault.message(),
                id: options.error_id.as_deref(),
                backtrace: options.backtrace_of(fault),
            },
        };

        Ok(serde_json::to_string(&envelope)?)
    }

    #[inline]
    fn render_format(&self) -> RenderFormat {
        RenderFormat::Json
    }
}
