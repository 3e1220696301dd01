use std::sync::{Arc, Mutex};
use taskboard_core::{ListenerError, ObservableStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Card {
    name: &'static str,
    done: bool,
}

fn card(name: &'static str) -> Card {
    Card { name, done: false }
}

#[test]
fn every_listener_gets_one_call_per_mutation() {
    let store = ObservableStore::<Card>::new();
    let calls = Arc::new(Mutex::new(Vec::new()));
    for listener in 0..3 {
        let calls = Arc::clone(&calls);
        store.add_listener(move |snapshot: Vec<Card>| {
            calls.lock().unwrap().push((listener, snapshot.len()));
            Ok(())
        });
    }

    store
        .update(|items| {
            items.push(card("a"));
            Some(())
        })
        .unwrap();

    assert_eq!(*calls.lock().unwrap(), vec![(0, 1), (1, 1), (2, 1)]);
}

#[test]
fn in_place_change_is_visible_in_snapshot_without_reordering() {
    let store = ObservableStore::<Card>::new();
    store
        .update(|items| {
            items.extend([card("a"), card("b"), card("c")]);
            Some(())
        })
        .unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.add_listener(move |snapshot| {
        *sink.lock().unwrap() = snapshot;
        Ok(())
    });

    store
        .update(|items| {
            let target = items.iter_mut().find(|item| item.name == "b")?;
            target.done = true;
            Some(())
        })
        .unwrap();

    let seen = seen.lock().unwrap();
    let names: Vec<_> = seen.iter().map(|item| item.name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(seen[1].done);
}

#[test]
fn missing_target_is_not_a_mutation() {
    let store = ObservableStore::<Card>::new();
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);
    store.add_listener(move |_| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    let outcome = store
        .update(|items| {
            let target = items.iter_mut().find(|item| item.name == "ghost")?;
            target.done = true;
            Some(())
        })
        .unwrap();

    assert!(outcome.is_none());
    assert_eq!(*calls.lock().unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn listener_error_surfaces_with_its_index() {
    let store = ObservableStore::<Card>::new();
    store.add_listener(|_| Ok(()));
    store.add_listener(|_| Err(ListenerError::new("bad render")));

    let err = store
        .update(|items| {
            items.push(card("a"));
            Some(())
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "store listener #1 failed: bad render");
    let StoreError::Listener { index, source } = err;
    assert_eq!(index, 1);
    assert_eq!(source.message(), "bad render");
}
