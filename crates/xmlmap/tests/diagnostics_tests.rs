//! Conversion anomalies are reported as warnings, never as failures.

use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use xmlmap::{ConversionEngine, OutputValue, XmlToJson};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a warn-level subscriber and return its result plus the log text.
fn with_warnings<R>(f: impl FnOnce() -> R) -> (R, String) {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    (result, logs)
}

#[test]
fn test_missing_arguments_warn() {
    let engine = ConversionEngine::new();
    let (value, logs) = with_warnings(|| engine.convert(None, Some("x"), Some("7777")));

    assert_eq!(value, OutputValue::from("7777"));
    assert!(logs.contains("WARN"));
    assert!(logs.contains("One or more conversion arguments missing"));
}

#[test]
fn test_unimplemented_target_warns() {
    let engine = ConversionEngine::new();
    let (value, logs) = with_warnings(|| engine.convert(Some("STRING"), Some("BOOLEAN"), Some("yes")));

    assert_eq!(value, OutputValue::from("yes"));
    assert!(logs.contains("Target data type not implemented"));
}

#[test]
fn test_unparseable_integer_warns() {
    let engine = ConversionEngine::new();
    let (value, logs) = with_warnings(|| engine.convert(Some("STRING"), Some("INTEGER"), Some("abc")));

    assert_eq!(value, OutputValue::Null);
    assert!(logs.contains("Failed to parse integer from string"));
}

#[test]
fn test_unknown_gender_warns() {
    let engine = ConversionEngine::new();
    let (value, logs) =
        with_warnings(|| engine.convert(Some("GENDERABBREV"), Some("GENDERFULL"), Some("x")));

    assert_eq!(value, OutputValue::from("x"));
    assert!(logs.contains("Value for gender not implemented"));
}

#[test]
fn test_unmatched_state_is_silent() {
    let engine = ConversionEngine::new();
    let (value, logs) =
        with_warnings(|| engine.convert(Some("STATEFULL"), Some("STATEABBREV"), Some("Atlantis")));

    assert_eq!(value, OutputValue::from("Atlantis"));
    assert!(logs.is_empty(), "unexpected warnings: {}", logs);
}

#[test]
fn test_dropped_nodes_are_not_reported() {
    let service = XmlToJson::from_schema_str(
        r#"<mapping>
             <element xmlName="a" xmlDataType="STRING" jsonName="a" jsonDataType="STRING"/>
           </mapping>"#,
    )
    .unwrap();

    let (value, logs) = with_warnings(|| service.transform_str("<r><a>1</a><b>2</b></r>").unwrap());

    assert_eq!(value.get("a"), Some(&OutputValue::from("1")));
    assert!(value.get("b").is_none());
    assert!(logs.is_empty(), "unexpected warnings: {}", logs);
}
