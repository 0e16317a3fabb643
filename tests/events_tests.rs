//! Notification bus tests - ordering, filtering, payloads

use std::cell::RefCell;
use std::rc::Rc;

use blockdrop::core::{EventKind, GameEvent, GameState, ScoreSnapshot};
use blockdrop::types::Command;

fn record_all(state: &mut GameState) -> Rc<RefCell<Vec<GameEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    state
        .events_mut()
        .subscribe_all(move |e| sink.borrow_mut().push(e.clone()));
    log
}

#[test]
fn test_subscribers_see_events_in_registration_order() {
    let mut state = GameState::new(8);
    let order = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let order = Rc::clone(&order);
        state
            .events_mut()
            .subscribe(EventKind::GameStart, move |_| order.borrow_mut().push(tag));
    }

    state.start();

    assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn test_filtered_subscriber_only_sees_its_kind() {
    let mut state = GameState::new(8);
    let scores = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&scores);
    state.events_mut().subscribe(EventKind::ScoreChanged, move |e| {
        if let GameEvent::ScoreChanged(s) = e {
            sink.borrow_mut().push(*s);
        }
    });

    state.start();
    state.soft_drop();
    state.move_left();

    assert_eq!(
        *scores.borrow(),
        vec![
            ScoreSnapshot {
                score: 0,
                level: 1,
                lines: 0
            },
            ScoreSnapshot {
                score: 1,
                level: 1,
                lines: 0
            },
        ]
    );
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut state = GameState::new(8);
    let log = record_all(&mut state);
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let id = state.events_mut().subscribe_all(move |_| *c.borrow_mut() += 1);

    state.start();
    let seen = *count.borrow();
    assert!(state.events_mut().unsubscribe(id));
    state.hard_drop();

    assert_eq!(*count.borrow(), seen);
    assert!(log.borrow().len() > seen);
}

#[test]
fn test_hard_drop_precedes_lock() {
    let mut state = GameState::new(8);
    state.start();
    let log = record_all(&mut state);

    state.hard_drop();

    let names: Vec<_> = log.borrow().iter().map(|e| e.name()).collect();
    let drop = names.iter().position(|n| *n == "hard-drop").unwrap();
    let lock = names.iter().position(|n| *n == "piece-locked").unwrap();
    assert!(drop < lock);
    assert_eq!(names[0], "score-changed");
}

#[test]
fn test_pause_event_carries_flag() {
    let mut state = GameState::new(8);
    state.start();
    let log = record_all(&mut state);

    state.handle_command(Command::Pause);
    state.handle_command(Command::Pause);

    assert_eq!(
        *log.borrow(),
        vec![
            GameEvent::GamePause { paused: true },
            GameEvent::GamePause { paused: false }
        ]
    );
}

#[test]
fn test_no_events_for_rejected_input() {
    let mut state = GameState::new(8);
    state.start();
    while state.move_left() {}
    let log = record_all(&mut state);

    assert!(!state.move_left());
    assert!(log.borrow().is_empty());
}

#[test]
fn test_event_json_shape() {
    let json = serde_json::to_value(GameEvent::LevelUp { level: 3 }).unwrap();
    assert_eq!(json, serde_json::json!({ "event": "level-up", "level": 3 }));

    let json = serde_json::to_value(GameEvent::ScoreChanged(ScoreSnapshot {
        score: 500,
        level: 2,
        lines: 11,
    }))
    .unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "event": "score-changed", "score": 500, "level": 2, "lines": 11 })
    );
}

#[test]
fn test_command_names_round_trip() {
    for command in Command::ALL {
        assert_eq!(Command::from_str(command.as_str()), Some(command));
    }
    assert_eq!(Command::from_str("request-restart"), Some(Command::Restart));
    assert_eq!(Command::from_str("input-hold"), None);
}
