/// Structured logging tests
///
/// Installs a thread-local subscriber and checks the events the container
/// emits while registering and resolving.

use ferrous_wire::{autowire, Container};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub struct Beacon;
autowire!(Beacon {});

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn capture<F: FnOnce()>(directive: &str, f: F) -> String {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

#[test]
fn test_resolution_events() {
    let output = capture("ferrous_wire=trace", || {
        let container = Container::new();
        container.singleton("clock", |_| Ok(1u64));
        container.get("clock").unwrap();
        container.get("clock").unwrap();
        container.get(<Beacon as ferrous_wire::Component>::ID).unwrap();
    });

    assert!(output.contains("registering binding"));
    assert!(output.contains("invoking factory"));
    assert!(output.contains("singleton cache hit"));
    assert!(output.contains("autowiring"));
    assert!(output.contains("clock"));
}

#[test]
fn test_debug_level_hides_trace_events() {
    let output = capture("ferrous_wire=debug", || {
        let container = Container::new();
        container.singleton("clock", |_| Ok(1u64));
        container.get("clock").unwrap();
        container.get("clock").unwrap();
    });

    assert!(output.contains("invoking factory"));
    assert!(!output.contains("singleton cache hit"));
}

#[test]
fn test_replaced_singleton_is_not_reported_as_race() {
    let output = capture("ferrous_wire=debug", || {
        let container = Container::new();
        container.singleton("session", |c| {
            c.unset("session");
            Ok(7u32)
        });
        assert_eq!(*container.get_as::<u32>("session").unwrap(), 7);
        assert!(container.descriptors().is_empty());
    });

    assert!(output.contains("value not cached"));
    assert!(!output.contains("discarding duplicate"));
}
