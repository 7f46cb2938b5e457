use api_error_rail::serializers::{ErrorSerializer, RenderFormat, SerializeOptions, Subject, Xml};

use super::{runtime_error, traced_error, NOT_FOUND};

#[test]
fn renders_error_element() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));

    let body = Xml.serialize(&subject, &SerializeOptions::default()).unwrap();

    assert_eq!(
        body,
        "<Error><Title>Not Found</Title><Detail>This is a RuntimeError!</Detail></Error>"
    );
    assert_eq!(Xml.render_format(), RenderFormat::Xml);
}

#[test]
fn includes_error_id_when_provided() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { error_id: Some("123".to_owned()), ..Default::default() };

    let body = Xml.serialize(&subject, &options).unwrap();

    assert!(body.contains("<Id>123</Id>"));
}

#[test]
fn includes_backtrace_frames_in_order() {
    let fault = traced_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { backtrace: true, ..Default::default() };

    let body = Xml.serialize(&subject, &options).unwrap();

    assert!(body.ends_with(
        "<Backtrace><Frame>app/controllers/tests_controller.rb:4</Frame>\
         <Frame>lib/router.rs:88</Frame></Backtrace></Error>"
    ));
}

#[test]
fn omits_backtrace_when_disabled() {
    let fault = traced_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));

    let body = Xml.serialize(&subject, &SerializeOptions::default()).unwrap();

    assert!(!body.contains("Backtrace"));
}
