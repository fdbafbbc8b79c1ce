use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ScoreChanged,
    Resolved,
    GameOver,
    InvalidMove,
}

/// Notifications emitted by [`PlayEngine`] while it processes a move.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Cumulative score after the move.
    ScoreChanged(Score),
    /// A resolve cycle finished; the host should wait this long before
    /// scheduling the next automatic move.
    Resolved(Duration),
    GameOver { score: Score, grid: Snapshot },
    /// The selected position does not belong to any group.
    InvalidMove(Coord2),
}

impl EngineEvent {
    pub const fn kind(&self) -> EventKind {
        use EngineEvent::*;
        match self {
            ScoreChanged(_) => EventKind::ScoreChanged,
            Resolved(_) => EventKind::Resolved,
            GameOver { .. } => EventKind::GameOver,
            InvalidMove(_) => EventKind::InvalidMove,
        }
    }
}

pub type Listener = Box<dyn FnMut(&EngineEvent)>;

/// Listeners owned by one engine, delivered in registration order.
#[derive(Default)]
pub struct EventFeed {
    listeners: Vec<(EventKind, Listener)>,
}

impl EventFeed {
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&EngineEvent) + 'static,
    {
        self.listeners.push((kind, Box::new(listener)));
    }

    pub fn emit(&mut self, event: &EngineEvent) {
        let kind = event.kind();
        log::trace!("emit {event:?}");
        for (_, listener) in self.listeners.iter_mut().filter(|(k, _)| *k == kind) {
            listener(event);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for EventFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventFeed")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    use super::*;

    #[test]
    fn listeners_run_in_registration_order_per_kind() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut feed = EventFeed::default();
        for id in 0..3 {
            let log = Rc::clone(&log);
            feed.on(EventKind::ScoreChanged, move |event| {
                log.borrow_mut().push((id, event.clone()));
            });
        }
        let other = Rc::clone(&log);
        feed.on(EventKind::Resolved, move |event| {
            other.borrow_mut().push((9, event.clone()));
        });

        feed.emit(&EngineEvent::ScoreChanged(5));

        let event = EngineEvent::ScoreChanged(5);
        assert_eq!(
            *log.borrow(),
            vec![(0, event.clone()), (1, event.clone()), (2, event)]
        );
        assert_eq!(feed.len(), 4);
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(EngineEvent::InvalidMove((0, 0)).kind(), EventKind::InvalidMove);
        assert_eq!(
            EngineEvent::Resolved(Duration::from_millis(1)).kind(),
            EventKind::Resolved
        );
    }
}
