use serde::Serialize;

use super::{ErrorSerializer, RenderFormat, SerializeOptions, Subject};
use crate::error::Result;

/// JSON:API error document (`application/vnd.api+json`).
///
/// The status is rendered as a string, as the JSON:API error object requires,
/// and the backtrace goes under `meta` since the format has no field for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonApi;

#[derive(Serialize)]
struct Document<'a> {
    errors: [ErrorObject<'a>; 1],
}

#[derive(Serialize)]
struct ErrorObject<'a> {
    status: String,
    title: &'a str,
    detail: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta<'a>>,
}

#[derive(Serialize)]
struct Meta<'a> {
    backtrace: &'a [String],
}

impl ErrorSerializer for JsonApi {
    fn serialize(&self, subject: &Subject<'_>, options: &SerializeOptions) -> Result<String> {
        let fault = subject.fault();
        let document = Document {
            errors: [ErrorObject {
                status: self.status_code(subject).as_str().to_owned(),
                title: self.title(subject)?,
                detail: fault.message(),
                id: options.error_id.as_deref(),
                meta: options.backtrace_of(fault).map(|backtrace| Meta { backtrace }),
            }],
        };

        Ok(serde_json::to_string(&document)?)
    }

    #[inline]
    fn render_format(&self) -> RenderFormat {
        RenderFormat::Json
    }
}
