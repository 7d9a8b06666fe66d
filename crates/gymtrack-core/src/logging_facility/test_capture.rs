//! Test capture mode for deterministic logging assertions
//!
//! Captures log events in memory so tests can assert on the structured
//! fields an operation emitted. Two entry points:
//!
//! - [`init_test_capture`] installs a process-wide capturing subscriber.
//! - [`capture_events`] captures only what the closure emits on the
//!   current thread, which keeps parallel tests from seeing each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use gymtrack_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_ERR_MESSAGE, FIELD_EVENT, FIELD_OP,
};

/// A captured log event with all its fields
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub component: Option<String>,
    pub op: Option<String>,
    pub event: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    /// Stable error code, present on `end_error` events
    pub fn err_code(&self) -> Option<&str> {
        self.fields.get(FIELD_ERR_CODE).map(String::as_str)
    }

    /// Error kind as its Debug name, e.g. `NotFound`
    pub fn err_kind(&self) -> Option<&str> {
        self.fields.get(FIELD_ERR_KIND).map(String::as_str)
    }

    pub fn err_message(&self) -> Option<&str> {
        self.fields.get(FIELD_ERR_MESSAGE).map(String::as_str)
    }

    /// Elapsed time on terminal events
    pub fn duration_ms(&self) -> Option<u64> {
        self.fields.get(FIELD_DURATION_MS)?.parse().ok()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

/// Layer that appends every event to a shared buffer
pub struct TestCaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCaptureLayer {
    pub fn new() -> (Self, TestCapture) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let layer = Self {
            events: events.clone(),
        };
        (layer, TestCapture { events })
    }
}

impl<S> Layer<S> for TestCaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *event.metadata().level(),
            component: visitor.fields.get(FIELD_COMPONENT).cloned(),
            op: visitor.fields.get(FIELD_OP).cloned(),
            event: visitor.fields.get(FIELD_EVENT).cloned(),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle for accessing captured events in tests
#[derive(Clone)]
pub struct TestCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl TestCapture {
    /// Get all captured events
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Events emitted for one operation, in order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op.as_deref() == Some(op))
            .collect()
    }

    /// Assert that an event exists with the given operation and event type
    ///
    /// # Panics
    ///
    /// Panics if the event is not found
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected event op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    /// Assert exactly one start and exactly one terminal (end or end_error)
    /// event for `op`
    ///
    /// # Panics
    ///
    /// Panics if the boundary events are missing or duplicated
    pub fn assert_single_boundary(&self, op: &str) {
        let for_op = self.events_for_op(op);
        let starts = for_op
            .iter()
            .filter(|e| e.event.as_deref() == Some(EVENT_START))
            .count();
        let ends = for_op
            .iter()
            .filter(|e| matches!(e.event.as_deref(), Some(EVENT_END) | Some(EVENT_END_ERROR)))
            .count();
        assert_eq!(starts, 1, "op={} expected one start event, got {}", op, starts);
        assert_eq!(ends, 1, "op={} expected one terminal event, got {}", op, ends);
    }

    /// Clear all captured events
    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

static GLOBAL_CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Initialize process-wide test capture mode
///
/// Returns a shared global capture instance. Events from every thread land
/// in it, so filter by a unique op name.
///
/// # Example
///
/// ```
/// use gymtrack_core::logging_facility::test_capture::init_test_capture;
/// use gymtrack_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("doc_example_op");
/// capture.assert_event_exists("doc_example_op", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let (layer, capture) = TestCaptureLayer::new();
            let _ = tracing_subscriber::registry().with(layer).try_init();
            capture
        })
        .clone()
}

/// Run `f` with a capturing subscriber scoped to the current thread
///
/// # Example
///
/// ```
/// use gymtrack_core::logging_facility::test_capture::capture_events;
/// use gymtrack_core::log_op_start;
///
/// let ((), capture) = capture_events(|| {
///     log_op_start!("scoped_op");
/// });
/// capture.assert_event_exists("scoped_op", "start");
/// ```
pub fn capture_events<R>(f: impl FnOnce() -> R) -> (R, TestCapture) {
    let (layer, capture) = TestCaptureLayer::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_event_accessors() {
        let mut fields = HashMap::new();
        fields.insert("err.code".to_string(), "ERR_NOT_FOUND".to_string());
        fields.insert("member_id".to_string(), "4".to_string());
        let event = CapturedEvent {
            level: Level::WARN,
            component: Some("test".to_string()),
            op: Some("delete_member".to_string()),
            event: Some("end_error".to_string()),
            fields,
        };

        assert_eq!(event.err_code(), Some("ERR_NOT_FOUND"));
        assert_eq!(event.field("member_id"), Some("4"));
        assert_eq!(event.clone().op, event.op);
    }

    #[test]
    fn test_scoped_capture_sees_only_own_events() {
        let (value, capture) = capture_events(|| {
            tracing::info!(op = "scoped_unit_op", event = "start");
            tracing::info!(op = "scoped_unit_op", event = "end", duration_ms = 1u64);
            7
        });
        assert_eq!(value, 7);
        assert_eq!(capture.events().len(), 2);
        capture.assert_single_boundary("scoped_unit_op");
    }

    #[test]
    fn test_macro_field_names_match_schema_keys() {
        let ((), capture) = capture_events(|| {
            crate::log_op_start!("schema_keys_op");
            let err = crate::errors::GymError::MemberNotFound { member_id: 2 };
            crate::log_op_error!("schema_keys_op", err, duration_ms = 5u64);
        });

        let events = capture.events_for_op("schema_keys_op");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
        assert!(events[0].component.is_some());

        let terminal = &events[1];
        assert_eq!(terminal.event.as_deref(), Some(EVENT_END_ERROR));
        assert_eq!(terminal.duration_ms(), Some(5));
        assert_eq!(terminal.err_kind(), Some("NotFound"));
        assert_eq!(terminal.err_code(), Some("ERR_NOT_FOUND"));
        assert!(terminal.err_message().is_some_and(|m| m.contains("Member not found")));
    }
}
