#![forbid(unsafe_code)]

//! Structured tracing emitted by the sheet.
//!
//! Transitions, settles, and rejected requests must show up as events with
//! the fields log consumers filter on.
//!
//! Run:
//!   cargo test -p anchorsheet-behavior --test tracing_events

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;

use anchorsheet_behavior::{SavedState, SheetBehavior};
use anchorsheet_core::config::SheetConfig;
use anchorsheet_core::geometry::GeometryConfig;
use anchorsheet_core::state::SheetState;
use anchorsheet_harness::{GestureScript, ScriptedHost, TouchDispatcher, settle};

// ============================================================================
// Capture layer
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

fn with_captured<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(EventCapture {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> Vec<&'a CapturedEvent> {
    events.iter().filter(|e| e.message == message).collect()
}

fn collapsed_sheet(host: &mut ScriptedHost) -> SheetBehavior {
    let config = SheetConfig::default().with_geometry(
        GeometryConfig::default()
            .with_peek_height(100)
            .with_anchor_point(700),
    );
    let mut sheet = SheetBehavior::new(config).unwrap();
    sheet.restore_state(SavedState::new(SheetState::Collapsed));
    let layout = host.layout();
    sheet.on_layout(host, layout).unwrap();
    sheet
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn programmatic_settle_logs_transitions() {
    let events = with_captured(|| {
        let mut host = ScriptedHost::phone();
        let mut sheet = collapsed_sheet(&mut host);
        sheet.set_state(&mut host, SheetState::AnchorPoint).unwrap();
        settle(&mut sheet, &mut host);
    });

    let started = find(&events, "settle started");
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].field("from_top"), Some("900"));
    assert_eq!(started[0].field("to_top"), Some("700"));
    assert_eq!(started[0].field("target"), Some("anchor_point"));

    let finished = find(&events, "settle finished");
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].field("top"), Some("700"));

    let transitions = find(&events, "state transition");
    let last = transitions.last().expect("a transition was logged");
    assert_eq!(last.field("from"), Some("settling"));
    assert_eq!(last.field("to"), Some("anchor_point"));
    assert!(transitions.iter().all(|e| e.level == tracing::Level::DEBUG));
}

#[test]
fn transient_request_warns() {
    let events = with_captured(|| {
        let mut host = ScriptedHost::phone();
        let mut sheet = collapsed_sheet(&mut host);
        assert!(sheet.set_state(&mut host, SheetState::Dragging).is_err());
    });

    let warnings: Vec<_> = events
        .iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("transient"));
    assert_eq!(warnings[0].field("target"), Some("dragging"));
}

#[test]
fn not_hideable_warns() {
    let events = with_captured(|| {
        let mut host = ScriptedHost::phone();
        let mut sheet = collapsed_sheet(&mut host);
        assert!(sheet.set_state(&mut host, SheetState::Hidden).is_err());
    });
    assert!(
        events
            .iter()
            .any(|e| e.level == tracing::Level::WARN && e.message.contains("not hideable"))
    );
}

#[test]
fn drag_logs_capture_and_release() {
    let events = with_captured(|| {
        let mut host = ScriptedHost::phone();
        let mut sheet = collapsed_sheet(&mut host);
        let script = GestureScript::at(200.0, 940.0)
            .drag_to(500.0, 10, 160)
            .wait(200)
            .up()
            .build();
        TouchDispatcher::new().run(&mut sheet, &mut host, &script);
        settle(&mut sheet, &mut host);
    });

    assert_eq!(find(&events, "drag captured").len(), 1);
    let released = find(&events, "drag released");
    assert_eq!(released.len(), 1);
    assert!(released[0].field("target").is_some());
    assert!(!find(&events, "settle finished").is_empty());
}

#[test]
fn noop_request_logs_at_trace() {
    // No-op requests stay below debug.
    let events = with_captured(|| {
        let mut host = ScriptedHost::phone();
        let mut sheet = collapsed_sheet(&mut host);
        sheet.set_state(&mut host, SheetState::Collapsed).unwrap();
    });
    let noop = find(&events, "set_state no-op");
    assert_eq!(noop.len(), 1);
    assert_eq!(noop[0].level, tracing::Level::TRACE);
}
