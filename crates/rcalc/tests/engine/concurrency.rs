//! Tests for reading snapshots from other threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rcalc::Value;

use super::engine;

#[test]
fn readers_only_see_committed_lines() {
    let mut e = engine();
    let reader = e.reader();
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        let watcher = s.spawn(|| {
            let mut last_len = 0;
            let mut last_version = 0;
            let mut reads = 0usize;
            while !done.load(Ordering::Acquire) || reads == 0 {
                let snapshot = reader.snapshot();
                // Every line is `1 1 add`; a torn read would expose a 1.
                assert!(snapshot.values().iter().all(|v| *v == Value::int(2)));
                assert!(snapshot.len() >= last_len);
                assert!(snapshot.version() >= last_version);
                last_len = snapshot.len();
                last_version = snapshot.version();
                reads += 1;
            }
        });

        for _ in 0..200 {
            e.submit_text("1 1 add").unwrap();
        }
        done.store(true, Ordering::Release);
        watcher.join().unwrap();
    });

    assert_eq!(reader.snapshot().len(), 200);
    assert_eq!(reader.snapshot(), e.snapshot());
}

#[test]
fn snapshots_outlive_later_changes() {
    let mut e = engine();
    e.submit_text("1 2 3").unwrap();
    let held = e.reader().snapshot();
    e.submit_text("\\clear 9").unwrap();

    let handle = thread::spawn(move || held.values());
    assert_eq!(
        handle.join().unwrap(),
        vec![Value::int(1), Value::int(2), Value::int(3)]
    );
    assert_eq!(e.snapshot().values(), vec![Value::int(9)]);
}
