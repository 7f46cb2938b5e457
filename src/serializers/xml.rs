use std::fmt::Display;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{ErrorSerializer, RenderFormat, SerializeOptions, Subject};
use crate::error::{Error, Result};

/// XML error body rooted at `<Error>`, written without whitespace between
/// elements:
///
/// ```xml
/// <Error>
///   <Title>Not Found</Title><Detail>...</Detail><Id>...</Id>
///   <Backtrace><Frame>...</Frame></Backtrace>
/// </Error>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Xml;

const ROOT: &str = "Error";
const FRAME: &str = "Frame";

fn xml_error(err: impl Display) -> Error {
    Error::Serialize(err.to_string())
}

fn open(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name))).map_err(xml_error)
}

fn close(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name))).map_err(xml_error)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    open(writer, name)?;
    writer.write_event(Event::Text(BytesText::new(text))).map_err(xml_error)?;
    close(writer, name)
}

impl ErrorSerializer for Xml {
    fn serialize(&self, subject: &Subject<'_>, options: &SerializeOptions) -> Result<String> {
        let fault = subject.fault();
        let mut writer = Writer::new(Vec::new());

        open(&mut writer, ROOT)?;
        text_element(&mut writer, "Title", self.title(subject)?)?;
        text_element(&mut writer, "Detail", fault.message())?;
        if let Some(id) = options.error_id.as_deref() {
            text_element(&mut writer, "Id", id)?;
        }
        if let Some(frames) = options.backtrace_of(fault) {
            open(&mut writer, "Backtrace")?;
            for frame in frames {
                text_element(&mut writer, FRAME, frame)?;
            }
            close(&mut writer, "Backtrace")?;
        }
        close(&mut writer, ROOT)?;

        String::from_utf8(writer.into_inner()).map_err(xml_error)
    }

    #[inline]
    fn render_format(&self) -> RenderFormat {
        RenderFormat::Xml
    }
}
