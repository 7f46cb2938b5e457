use api_error_rail::serializers::{ErrorSerializer, Json, RenderFormat, SerializeOptions, Subject};
use serde_json::{json, Value};

use super::{runtime_error, traced_error, NOT_FOUND};

#[test]
fn renders_title_and_detail() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));

    let body = Json.serialize(&subject, &SerializeOptions::default()).unwrap();

    assert_eq!(body, r#"{"error":{"title":"Not Found","detail":"This is a RuntimeError!"}}"#);
    assert_eq!(Json.render_format(), RenderFormat::Json);
}

#[test]
fn includes_error_id_when_provided() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { error_id: Some("123".to_owned()), ..Default::default() };

    let body: Value = serde_json::from_str(&Json.serialize(&subject, &options).unwrap()).unwrap();

    assert_eq!(body["error"]["id"], "123");
}

#[test]
fn includes_exact_backtrace_when_enabled() {
    let fault = traced_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { backtrace: true, ..Default::default() };

    let body: Value = serde_json::from_str(&Json.serialize(&subject, &options).unwrap()).unwrap();

    assert_eq!(body["error"]["backtrace"], json!(fault.backtrace().unwrap()));
}

#[test]
fn omits_backtrace_when_fault_has_none() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { backtrace: true, ..Default::default() };

    let body: Value = serde_json::from_str(&Json.serialize(&subject, &options).unwrap()).unwrap();

    assert!(body["error"].get("backtrace").is_none());
}

#[test]
fn unclassified_fault_is_internal_server_error() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, None);

    assert_eq!(subject.status_code().as_u16(), 500);
    let body: Value =
        serde_json::from_str(&Json.serialize(&subject, &SerializeOptions::default()).unwrap())
            .unwrap();
    assert_eq!(body["error"]["title"], "Internal Server Error");
}

#[test]
fn serializing_does_not_touch_the_fault() {
    let fault = traced_error();
    let before = fault.clone();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { backtrace: true, error_id: Some("x".to_owned()) };

    let _ = Json.serialize(&subject, &options).unwrap();

    assert_eq!(fault, before);
}
