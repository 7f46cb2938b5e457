use api_error_rail::serializers::{
    ErrorSerializer, JsonApi, RenderFormat, SerializeOptions, Subject,
};
use api_error_rail::Format;
use serde_json::{json, Value};

use super::{runtime_error, traced_error, NOT_FOUND};

#[test]
fn renders_errors_array() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));

    let body = JsonApi.serialize(&subject, &SerializeOptions::default()).unwrap();

    assert_eq!(
        body,
        r#"{"errors":[{"status":"404","title":"Not Found","detail":"This is a RuntimeError!"}]}"#
    );
    assert_eq!(JsonApi.render_format(), RenderFormat::Json);
}

#[test]
fn includes_error_id_when_provided() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { error_id: Some("123".to_owned()), ..Default::default() };

    let body: Value =
        serde_json::from_str(&JsonApi.serialize(&subject, &options).unwrap()).unwrap();

    assert_eq!(body["errors"][0]["id"], "123");
}

#[test]
fn puts_backtrace_under_meta() {
    let fault = traced_error();
    let subject = Subject::new(&fault, Some(&NOT_FOUND));
    let options = SerializeOptions { backtrace: true, ..Default::default() };

    let body: Value =
        serde_json::from_str(&JsonApi.serialize(&subject, &options).unwrap()).unwrap();

    assert_eq!(body["errors"][0]["meta"]["backtrace"], json!(fault.backtrace().unwrap()));
}

#[test]
fn status_is_a_string_of_the_numeric_code() {
    let fault = runtime_error();
    let subject = Subject::new(&fault, None);

    let body: Value =
        serde_json::from_str(&JsonApi.serialize(&subject, &SerializeOptions::default()).unwrap())
            .unwrap();

    assert_eq!(body["errors"][0]["status"], "500");
}

#[test]
fn format_carries_its_content_type() {
    assert_eq!(Format::JsonApi.default_content_type(), Some("application/vnd.api+json"));
    assert_eq!(Format::Json.default_content_type(), None);
}
