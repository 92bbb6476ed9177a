/// Concurrent access integration tests
///
/// These tests verify that the container behaves correctly when shared
/// between threads: singleton consistency, registration while resolving,
/// and per-thread cycle detection.

use ferrous_wire::{autowire, Container, DiError};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

// ===== Test Services =====

#[derive(Debug)]
pub struct CounterService {
    count: AtomicU32,
}

impl CounterService {
    pub fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    pub fn increment(&self) -> u32 {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get_count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}
autowire!(CounterService::new());

pub struct Worker {
    pub counter: Arc<CounterService>,
}
autowire!(Worker { counter: Arc<CounterService> });

// ===== Tests =====

#[test]
fn test_container_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Container>();
}

#[test]
fn test_concurrent_singleton_resolution() {
    let container = Arc::new(Container::new());
    let created = Arc::new(AtomicUsize::new(0));
    let created_clone = created.clone();

    container.singleton("counter", move |_| {
        created_clone.fetch_add(1, Ordering::SeqCst);
        // Widen the race window
        thread::sleep(Duration::from_millis(5));
        Ok(CounterService::new())
    });

    let thread_count = 16;
    let barrier = Arc::new(Barrier::new(thread_count));
    let handles: Vec<_> = (0..thread_count)
        .map(|_| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let counter = container.get_as::<CounterService>("counter").unwrap();
                counter.increment();
                counter
            })
        })
        .collect();

    let results: Vec<Arc<CounterService>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    // Every thread observed the single cached value
    for counter in &results[1..] {
        assert!(Arc::ptr_eq(&results[0], counter));
    }
    assert_eq!(results[0].get_count(), thread_count as u32);
    assert!(created.load(Ordering::SeqCst) >= 1);

    let cached = container.get_as::<CounterService>("counter").unwrap();
    assert!(Arc::ptr_eq(&results[0], &cached));
}

#[test]
fn test_concurrent_autowiring_with_shared_singleton() {
    let container = Arc::new(Container::new());
    container.bind_singleton::<CounterService, _>(|_| Ok(Arc::new(CounterService::new())));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let worker = container.resolve::<Worker>().unwrap();
                    worker.counter.increment();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let counter = container.resolve::<CounterService>().unwrap();
    assert_eq!(counter.get_count(), 400);
}

#[test]
fn test_concurrent_registration_and_resolution() {
    let container = Arc::new(Container::new());
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let container = container.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..100 {
                    let id = format!("svc.{}.{}", t, i);
                    container.set_parameter(id.clone(), i);
                    container.singleton(id.clone(), move |_| Ok(i));
                    assert_eq!(*container.get_as::<i32>(&id).unwrap(), i);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(container.descriptors().len(), 400);
    assert!(container.descriptors().iter().all(|d| d.cached));
}

#[test]
fn test_cycle_detection_is_per_thread() {
    let container = Arc::new(Container::new());
    let barrier = Barrier::new(2);

    // Both threads hold "shared" on their own stack at the same time
    container.set("shared", move |_| {
        barrier.wait();
        Ok(())
    });

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let container = container.clone();
            thread::spawn(move || container.get("shared").map(|_| ()))
        })
        .collect();

    for handle in handles {
        let result: Result<(), DiError> = handle.join().unwrap();
        assert!(result.is_ok());
    }
}
