//! Events module - outbound notifications and the synchronous bus that delivers them
//!
//! The engine publishes a [`GameEvent`] for every observable outcome. Subscribers
//! run synchronously, in registration order, before the publishing call returns,
//! so the order in which the engine publishes is exactly the order every
//! subscriber sees (hard drop before lock, score change after every mutation).
//!
//! Subscribers receive `&GameEvent` only; they have no handle on the engine, so
//! re-entering it from inside a handler is impossible by construction.

use serde::Serialize;

use crate::board::RowList;

/// Score/level/lines snapshot carried by [`GameEvent::ScoreChanged`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ScoreSnapshot {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

/// Event discriminant, used to filter subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    GameStart,
    PieceMoved,
    PieceLocked,
    HardDrop,
    LinesCleared,
    ScoreChanged,
    LevelUp,
    GameOver,
    GamePause,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::GameStart,
        EventKind::PieceMoved,
        EventKind::PieceLocked,
        EventKind::HardDrop,
        EventKind::LinesCleared,
        EventKind::ScoreChanged,
        EventKind::LevelUp,
        EventKind::GameOver,
        EventKind::GamePause,
    ];

    /// Occurrence name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::GameStart => "game-start",
            EventKind::PieceMoved => "piece-moved",
            EventKind::PieceLocked => "piece-locked",
            EventKind::HardDrop => "hard-drop",
            EventKind::LinesCleared => "lines-cleared",
            EventKind::ScoreChanged => "score-changed",
            EventKind::LevelUp => "level-up",
            EventKind::GameOver => "game-over",
            EventKind::GamePause => "game-pause",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

/// Outbound notification published by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    GameStart,
    PieceMoved,
    PieceLocked,
    HardDrop,
    /// Rows removed by one lock, bottom to top, in pre-removal indices
    LinesCleared {
        rows: RowList,
        count: u32,
    },
    ScoreChanged(ScoreSnapshot),
    LevelUp {
        level: u32,
    },
    GameOver,
    GamePause {
        paused: bool,
    },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::GameStart => EventKind::GameStart,
            GameEvent::PieceMoved => EventKind::PieceMoved,
            GameEvent::PieceLocked => EventKind::PieceLocked,
            GameEvent::HardDrop => EventKind::HardDrop,
            GameEvent::LinesCleared { .. } => EventKind::LinesCleared,
            GameEvent::ScoreChanged(_) => EventKind::ScoreChanged,
            GameEvent::LevelUp { .. } => EventKind::LevelUp,
            GameEvent::GameOver => EventKind::GameOver,
            GameEvent::GamePause { .. } => EventKind::GamePause,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&GameEvent)>;

struct Subscriber {
    id: SubscriptionId,
    /// None = every event
    filter: Option<EventKind>,
    handler: Handler,
}

/// Synchronous, in-process publish/subscribe dispatcher
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, filter: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            filter,
            handler,
        });
        id
    }

    /// Register a handler for one event kind
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.add(Some(kind), Box::new(handler))
    }

    /// Register a handler for every event
    pub fn subscribe_all(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.add(None, Box::new(handler))
    }

    /// Remove a handler. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver `event` to every matching handler, in registration order
    pub fn publish(&mut self, event: &GameEvent) {
        let kind = event.kind();
        for sub in &mut self.subscribers {
            if sub.filter.map_or(true, |k| k == kind) {
                (sub.handler)(event);
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_filtered_subscription_only_sees_its_kind() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(EventKind::LevelUp, move |e| sink.borrow_mut().push(e.clone()));

        bus.publish(&GameEvent::PieceMoved);
        bus.publish(&GameEvent::LevelUp { level: 2 });

        assert_eq!(*seen.borrow(), vec![GameEvent::LevelUp { level: 2 }]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = bus.subscribe_all(move |_| *c.borrow_mut() += 1);

        bus.publish(&GameEvent::GameStart);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&GameEvent::GameStart);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::HardDrop.name(), "hard-drop");
        assert_eq!(
            GameEvent::GamePause { paused: true }.name(),
            "game-pause"
        );
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_str(kind.as_str()), Some(kind));
        }
    }
}
