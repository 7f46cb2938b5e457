use api_error_rail::serializers::{ErrorSerializer, RenderFormat, SerializeOptions, Subject};
use api_error_rail::{Error, Fault};
use http::StatusCode;

use super::runtime_error;

/// Plain-text serializer built on the provided `status_code`/`title`.
pub(crate) struct PlainText;

impl ErrorSerializer for PlainText {
    fn serialize(
        &self,
        subject: &Subject<'_>,
        _options: &SerializeOptions,
    ) -> Result<String, Error> {
        Ok(format!(
            "Error! Title: {} Status Code: {}",
            self.title(subject)?,
            self.status_code(subject).as_u16()
        ))
    }

    fn render_format(&self) -> RenderFormat {
        RenderFormat::Plain
    }
}

/// Always reports a code without a reason phrase.
pub(crate) struct Unlisted;

impl ErrorSerializer for Unlisted {
    fn status_code(&self, _subject: &Subject<'_>) -> StatusCode {
        StatusCode::from_u16(599).unwrap()
    }

    fn serialize(
        &self,
        subject: &Subject<'_>,
        _options: &SerializeOptions,
    ) -> Result<String, Error> {
        Ok(self.title(subject)?.to_owned())
    }

    fn render_format(&self) -> RenderFormat {
        RenderFormat::Plain
    }
}

#[test]
fn custom_serializer_uses_shared_status_helpers() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, None);

    let body = PlainText.serialize(&subject, &SerializeOptions::default()).unwrap();

    assert_eq!(body, "Error! Title: Internal Server Error Status Code: 500");
}

#[test]
fn unknown_status_code_fails_title_lookup() {
    let fault = Fault::new("RuntimeError", "boom");
    let subject = Subject::new(&fault, None);

    let err = Unlisted.serialize(&subject, &SerializeOptions::default()).unwrap_err();

    assert!(matches!(err, Error::UnknownStatus(599)));
}
