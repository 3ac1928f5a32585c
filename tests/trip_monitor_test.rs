//! Integration tests for the trip monitor state machine.
//!
//! These drive a real monitor thread against a mock backend, so they wait
//! on wall-clock poll cadence and take a few seconds each.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::TestBackend;
use onride::egui_app::{SessionStore, TripMonitor, TripPhase};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn request_body(status: &str) -> serde_json::Value {
    json!({
        "status": "ok",
        "data": {
            "_id": "r1",
            "userId": "u1",
            "status": status,
            "valor": {"$numberDecimal": "18.15"}
        }
    })
}

fn temp_store() -> (tempfile::TempDir, Arc<SessionStore>) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SessionStore::open_at(dir.path().join("session.db")).unwrap());
    (dir, store)
}

/// Wait until the monitor reports a phase accepted by `pred`.
fn wait_for(monitor: &TripMonitor, timeout: Duration, pred: impl Fn(&TripPhase) -> bool) -> TripPhase {
    let deadline = Instant::now() + timeout;
    loop {
        let phase = monitor.phase();
        if pred(&phase) {
            return phase;
        }
        if Instant::now() >= deadline {
            panic!("timed out waiting for phase, last seen: {:?}", phase);
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn lifecycle_moves_forward_and_ignores_stale_statuses() {
    let backend = TestBackend::start();
    let (_dir, store) = temp_store();

    // First poll sees accepted, second PICK-UP, everything after that is a
    // stale process snapshot that must not move the phase backward.
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/GetRequest/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_body("accepted")))
            .up_to_n_times(1),
    );
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/GetRequest/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_body("PICK-UP")))
            .up_to_n_times(1),
    );
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/GetRequest/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_body("process"))),
    );

    let monitor = TripMonitor::start(
        backend.client.clone(),
        Arc::clone(&store),
        "r1".to_string(),
        Duration::from_secs(3),
        Duration::from_secs(300),
    );

    wait_for(&monitor, Duration::from_secs(2), |p| {
        matches!(p, TripPhase::DriverAssigned(_))
    });
    let phase = wait_for(&monitor, Duration::from_secs(6), |p| {
        matches!(p, TripPhase::Driving(_))
    });
    if let TripPhase::Driving(request) = &phase {
        assert_eq!(request.fare_display(), "18.15");
    }

    // Give the stale process snapshot a chance to arrive.
    std::thread::sleep(Duration::from_secs(4));
    assert!(matches!(monitor.phase(), TripPhase::Driving(_)));
}

#[test]
fn manual_cancel_is_sent_once_and_clears_stored_id() {
    let backend = TestBackend::start();
    let (_dir, store) = temp_store();
    store.set_active_request_id("r1").unwrap();

    backend.mount(
        Mock::given(method("GET"))
            .and(path("/GetRequest/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_body("process"))),
    );
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/update-request"))
            .and(body_partial_json(json!({"requestId": "r1", "status": "canceled"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1),
    );

    let monitor = TripMonitor::start(
        backend.client.clone(),
        Arc::clone(&store),
        "r1".to_string(),
        Duration::from_secs(3),
        Duration::from_secs(300),
    );

    monitor.cancel();
    monitor.cancel();

    wait_for(&monitor, Duration::from_secs(5), |p| {
        matches!(p, TripPhase::Canceled)
    });
    std::thread::sleep(Duration::from_millis(500));

    assert_eq!(store.active_request_id().unwrap(), None);
    backend.rt.block_on(backend.server.verify());
}

#[test]
fn search_timeout_cancels_automatically() {
    let backend = TestBackend::start();
    let (_dir, store) = temp_store();
    store.set_active_request_id("r1").unwrap();

    backend.mount(
        Mock::given(method("GET"))
            .and(path("/GetRequest/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_body("process"))),
    );
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/update-request"))
            .and(body_partial_json(json!({"status": "canceled"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"}))),
    );

    let monitor = TripMonitor::start(
        backend.client.clone(),
        Arc::clone(&store),
        "r1".to_string(),
        Duration::from_secs(3),
        Duration::from_secs(1),
    );

    wait_for(&monitor, Duration::from_secs(6), |p| {
        matches!(p, TripPhase::Canceled)
    });
    assert_eq!(store.active_request_id().unwrap(), None);
}

#[test]
fn remote_cancellation_ends_the_monitor() {
    let backend = TestBackend::start();
    let (_dir, store) = temp_store();
    store.set_active_request_id("r1").unwrap();

    backend.mount(
        Mock::given(method("GET"))
            .and(path("/GetRequest/r1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(request_body("canceled"))),
    );

    let monitor = TripMonitor::start(
        backend.client.clone(),
        Arc::clone(&store),
        "r1".to_string(),
        Duration::from_secs(3),
        Duration::from_secs(300),
    );

    wait_for(&monitor, Duration::from_secs(5), |p| {
        matches!(p, TripPhase::Canceled)
    });
    assert_eq!(store.active_request_id().unwrap(), None);
}
