use std::sync::{Arc, Mutex};

use api_error_rail::reporter::{ErrorReporter, SinkEvent, SinkKind, SinkRegistry};
use api_error_rail::{BoxError, Error, Fault};
use serde_json::json;

type Calls = Arc<Mutex<Vec<(String, SinkEvent)>>>;

fn error() -> Fault {
    Fault::new("RuntimeError", "Error message")
}

/// Installs a recording client for `kind` and returns its call log.
fn recording_sink(registry: &SinkRegistry, kind: SinkKind) -> Calls {
    let calls = Calls::default();
    let log = Arc::clone(&calls);
    registry.install(kind, move |fault: &Fault, event: &SinkEvent| -> Result<(), BoxError> {
        log.lock().unwrap().push((fault.message().to_owned(), event.clone()));
        Ok(())
    });
    calls
}

#[test]
fn none_strategy_does_nothing() {
    let dispatcher = ErrorReporter::None.bind(SinkRegistry::new());
    assert!(!dispatcher.report(&error(), Some("123")).unwrap());
}

#[test]
fn callable_receives_fault_and_error_id() {
    let seen = Arc::new(Mutex::new(None));
    let log = Arc::clone(&seen);
    let dispatcher = ErrorReporter::callable(move |fault, error_id| {
        *log.lock().unwrap() = Some((fault.clone(), error_id.map(str::to_owned)));
        Ok(())
    })
    .bind(SinkRegistry::new());

    assert!(dispatcher.report(&error(), Some("123")).unwrap());
    assert_eq!(*seen.lock().unwrap(), Some((error(), Some("123".to_owned()))));
}

#[test]
fn callable_failure_propagates() {
    let dispatcher =
        ErrorReporter::callable(|_, _| Err("tracker down".into())).bind(SinkRegistry::new());

    let err = dispatcher.report(&error(), None).unwrap_err();
    assert!(matches!(err, Error::Reporter(_)));
    assert!(err.to_string().contains("tracker down"));
}

#[test]
fn unrecognised_sink_name_is_an_invalid_option() {
    let err = "asdf".parse::<ErrorReporter>().unwrap_err();
    assert!(matches!(err, Error::InvalidOption { option: "error_reporter", .. }));
}

#[test]
fn sink_names_parse() {
    assert_eq!("honeybadger".parse::<SinkKind>().unwrap(), SinkKind::Honeybadger);
    assert_eq!("sentry".parse::<SinkKind>().unwrap(), SinkKind::Sentry);
    assert_eq!("raven".parse::<SinkKind>().unwrap(), SinkKind::Sentry);
}

mod honeybadger {
    use super::*;

    #[test]
    fn missing_client_is_a_missing_dependency() {
        let dispatcher = ErrorReporter::Named(SinkKind::Honeybadger).bind(SinkRegistry::new());

        let err = dispatcher.report(&error(), None).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingDependency { sink: "honeybadger", client: "Honeybadger" }
        ));
        assert!(err.to_string().contains("install"));
    }

    #[test]
    fn reports_with_an_error_id_in_context() {
        let registry = SinkRegistry::new();
        let calls = recording_sink(&registry, SinkKind::Honeybadger);
        let dispatcher = ErrorReporter::Named(SinkKind::Honeybadger).bind(registry);

        assert!(dispatcher.report(&error(), Some("456")).unwrap());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "Error message");
        assert_eq!(calls[0].1.section, "context");
        assert_eq!(serde_json::Value::Object(calls[0].1.data.clone()), json!({"error_id": "456"}));
    }

    #[test]
    fn reports_without_an_error_id() {
        let registry = SinkRegistry::new();
        let calls = recording_sink(&registry, SinkKind::Honeybadger);
        let dispatcher = ErrorReporter::Named(SinkKind::Honeybadger).bind(registry);

        dispatcher.report(&error(), None).unwrap();

        let calls = calls.lock().unwrap();
        assert!(calls[0].1.data.is_empty());
        assert_eq!(calls[0].1.error_id(), None);
    }
}

mod sentry {
    use super::*;

    #[test]
    fn missing_client_is_a_missing_dependency() {
        let dispatcher = ErrorReporter::Named(SinkKind::Sentry).bind(SinkRegistry::new());

        let err = dispatcher.report(&error(), Some("456")).unwrap_err();
        assert!(matches!(err, Error::MissingDependency { sink: "sentry", client: "Sentry" }));
    }

    #[test]
    fn reports_with_an_error_id_in_extra() {
        let registry = SinkRegistry::new();
        let calls = recording_sink(&registry, SinkKind::Sentry);
        let dispatcher = "raven".parse::<ErrorReporter>().unwrap().bind(registry);

        dispatcher.report(&error(), Some("456")).unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].1.section, "extra");
        assert_eq!(calls[0].1.error_id(), Some("456"));
    }

    #[test]
    fn availability_is_checked_when_reporting() {
        let registry = SinkRegistry::new();
        let dispatcher = ErrorReporter::Named(SinkKind::Sentry).bind(registry.clone());
        assert!(dispatcher.report(&error(), None).is_err());

        let calls = recording_sink(&registry, SinkKind::Sentry);
        assert!(dispatcher.report(&error(), None).unwrap());
        assert_eq!(calls.lock().unwrap().len(), 1);

        assert!(registry.is_installed(SinkKind::Sentry));
        assert!(registry.uninstall(SinkKind::Sentry));
        assert!(!registry.is_installed(SinkKind::Sentry));
        assert!(matches!(
            dispatcher.report(&error(), None),
            Err(Error::MissingDependency { .. })
        ));
    }

    #[test]
    fn sink_failure_is_a_reporter_error() {
        let registry = SinkRegistry::new();
        registry.install(SinkKind::Sentry, |_: &Fault, _: &SinkEvent| -> Result<(), BoxError> {
            Err("rate limited".into())
        });
        let dispatcher = ErrorReporter::Named(SinkKind::Sentry).bind(registry);

        assert!(matches!(dispatcher.report(&error(), None), Err(Error::Reporter(_))));
    }
}
