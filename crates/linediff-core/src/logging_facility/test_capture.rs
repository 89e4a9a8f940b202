//! In-memory event capture for logging assertions
//!
//! `init_test_capture` installs a global subscriber whose single layer
//! records every event. All tests in a process share that buffer, so
//! assertions filter by a unique op name or by request id.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// One recorded event, every field rendered as a string
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn op(&self) -> Option<&str> {
        self.field("op")
    }

    pub fn event(&self) -> Option<&str> {
        self.field("event")
    }

    pub fn component(&self) -> Option<&str> {
        self.field("component")
    }

    /// True for the `event` stage of operation `op`.
    pub fn is(&self, op: &str, event: &str) -> bool {
        self.op() == Some(op) && self.event() == Some(event)
    }
}

#[derive(Default)]
struct Fields(BTreeMap<String, String>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    // Numbers and bools land here too; their Debug form is the plain value.
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{:?}", value));
    }
}

type Sink = Arc<Mutex<Vec<CapturedEvent>>>;

struct CaptureLayer {
    sink: Sink,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        if let Ok(mut sink) = self.sink.lock() {
            sink.push(CapturedEvent {
                level: *event.metadata().level(),
                fields: fields.0,
            });
        }
    }
}

/// Shared handle on the capture buffer
#[derive(Clone)]
pub struct TestCapture {
    sink: Sink,
}

impl TestCapture {
    /// Snapshot of everything captured so far
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.sink.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Captured events of operation `op`, in emission order
    pub fn events_for_op(&self, op: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.op() == Some(op))
            .collect()
    }

    /// # Panics
    ///
    /// When no `event` stage of `op` has been captured.
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        assert!(
            events.iter().any(|e| e.is(op, event)),
            "no {}/{} among {} captured events",
            op,
            event,
            events.len()
        );
    }
}

static CAPTURE: OnceLock<TestCapture> = OnceLock::new();

/// Install the capture subscriber on first use and hand out its buffer.
///
/// # Panics
///
/// When a different global subscriber was installed first, since nothing
/// would ever reach the buffer.
///
/// ```
/// use linediff_core::logging_facility::test_capture::init_test_capture;
/// use linediff_core::log_op_start;
///
/// let capture = init_test_capture();
/// log_op_start!("my_operation");
/// capture.assert_event_exists("my_operation", "start");
/// ```
pub fn init_test_capture() -> TestCapture {
    CAPTURE
        .get_or_init(|| {
            let sink = Sink::default();
            let layer = CaptureLayer {
                sink: Arc::clone(&sink),
            };
            if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
                panic!("test capture could not claim the global subscriber: {}", e);
            }
            TestCapture { sink }
        })
        .clone()
}
