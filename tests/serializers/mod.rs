use api_error_rail::status::Status;
use api_error_rail::Fault;

pub mod custom;
pub mod json;
pub mod json_api;
#[cfg(feature = "xml")]
pub mod xml;

pub(crate) fn runtime_error() -> Fault {
    Fault::new("RuntimeError", "This is a RuntimeError!")
}

pub(crate) fn traced_error() -> Fault {
    Fault::new("RuntimeError", "some error")
        .with_backtrace(["app/controllers/tests_controller.rb:4", "lib/router.rs:88"])
}

pub(crate) static NOT_FOUND: Status = Status::NOT_FOUND;
