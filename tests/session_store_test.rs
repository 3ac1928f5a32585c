//! Persistence tests for the local session store.

use onride::egui_app::session::{Destination, SessionStore};
use pretty_assertions::assert_eq;

#[test]
fn values_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    {
        let store = SessionStore::open_at(path.clone()).unwrap();
        store.set_token("tok_abc").unwrap();
        store.set_active_request_id("r42").unwrap();
        store
            .set_destination(&Destination {
                latitude: -8.83,
                longitude: 13.23,
                address: "Rua Amilcar Cabral".to_string(),
            })
            .unwrap();
    }

    let store = SessionStore::open_at(path).unwrap();
    assert_eq!(store.token().unwrap(), Some("tok_abc".to_string()));
    assert_eq!(store.active_request_id().unwrap(), Some("r42".to_string()));
    assert_eq!(
        store.destination().unwrap().unwrap().address,
        "Rua Amilcar Cabral"
    );
}

#[test]
fn concurrent_writers_are_serialized() {
    let dir = tempfile::tempdir().unwrap();
    let store =
        std::sync::Arc::new(SessionStore::open_at(dir.path().join("session.db")).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || {
                for n in 0..25i64 {
                    store.set(&format!("writer_{}", i), &n).unwrap();
                    store
                        .set_active_request_id(&format!("r{}-{}", i, n))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for i in 0..8 {
        assert_eq!(store.get::<i64>(&format!("writer_{}", i)).unwrap(), Some(24));
    }
    let id = store.active_request_id().unwrap().unwrap();
    assert!(id.ends_with("-24"), "unexpected final id {id}");
}

#[test]
fn clear_all_wipes_every_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::open_at(dir.path().join("session.db")).unwrap();

    store.set_token("tok").unwrap();
    store.set_active_request_id("r1").unwrap();
    store.set("push_token", &"p1").unwrap();

    store.clear_all().unwrap();

    assert_eq!(store.token().unwrap(), None);
    assert_eq!(store.active_request_id().unwrap(), None);
    assert_eq!(store.get::<String>("push_token").unwrap(), None);
}
