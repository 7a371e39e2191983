//! Reveal lifecycle events.
//!
//! The orchestrator records what it did each frame in an [`EventQueue`]:
//! trigger crossings per watch and tween progress per entry. Tests and the
//! demo driver poll the queue after ticking.
//!
//! ```ignore
//! let viewport = page.viewport();
//! orchestrator.tick(&mut page, viewport, 16.0);
//! for event in orchestrator.drain_events() {
//!     if let RevealEventKind::Tween(TweenEvent::Completed { target, .. }) = event {
//!         log::info!("{target} revealed");
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{SessionId, TargetId, WatchId};

/// Emitted when a watch's trigger zone is crossed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerEvent {
    /// Scrolled down past the zone start (or the group mounted).
    Entered {
        session: SessionId,
        section: String,
        watch: WatchId,
        /// Element the zone is measured against; `None` for mount watches.
        trigger: Option<TargetId>,
    },
    /// Scrolled down past the zone end.
    Left {
        session: SessionId,
        section: String,
        watch: WatchId,
        trigger: Option<TargetId>,
    },
    /// Scrolled up past the zone end.
    EnteredBack {
        session: SessionId,
        section: String,
        watch: WatchId,
        trigger: Option<TargetId>,
    },
    /// Scrolled up past the zone start.
    LeftBack {
        session: SessionId,
        section: String,
        watch: WatchId,
        trigger: Option<TargetId>,
    },
}

impl TriggerEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Entered { session, .. }
            | Self::Left { session, .. }
            | Self::EnteredBack { session, .. }
            | Self::LeftBack { session, .. } => *session,
        }
    }

    pub fn section(&self) -> &str {
        match self {
            Self::Entered { section, .. }
            | Self::Left { section, .. }
            | Self::EnteredBack { section, .. }
            | Self::LeftBack { section, .. } => section,
        }
    }

    pub fn watch(&self) -> WatchId {
        match self {
            Self::Entered { watch, .. }
            | Self::Left { watch, .. }
            | Self::EnteredBack { watch, .. }
            | Self::LeftBack { watch, .. } => *watch,
        }
    }

    pub fn trigger(&self) -> Option<&TargetId> {
        match self {
            Self::Entered { trigger, .. }
            | Self::Left { trigger, .. }
            | Self::EnteredBack { trigger, .. }
            | Self::LeftBack { trigger, .. } => trigger.as_ref(),
        }
    }
}

/// Emitted when an entry's tween changes state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TweenEvent {
    /// The entry left its from-state while playing forward.
    Started {
        session: SessionId,
        section: String,
        target: TargetId,
    },
    /// The entry reached its to-state.
    Completed {
        session: SessionId,
        section: String,
        target: TargetId,
    },
    /// The entry was played back to its from-state.
    Reverted {
        session: SessionId,
        section: String,
        target: TargetId,
    },
    /// The session was disposed while the entry was mid-flight.
    Interrupted {
        session: SessionId,
        section: String,
        target: TargetId,
    },
    /// The entry was dropped at registration.
    Skipped {
        session: SessionId,
        section: String,
        target: TargetId,
        reason: String,
    },
}

impl TweenEvent {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Started { session, .. }
            | Self::Completed { session, .. }
            | Self::Reverted { session, .. }
            | Self::Interrupted { session, .. }
            | Self::Skipped { session, .. } => *session,
        }
    }

    pub fn section(&self) -> &str {
        match self {
            Self::Started { section, .. }
            | Self::Completed { section, .. }
            | Self::Reverted { section, .. }
            | Self::Interrupted { section, .. }
            | Self::Skipped { section, .. } => section,
        }
    }

    pub fn target(&self) -> &TargetId {
        match self {
            Self::Started { target, .. }
            | Self::Completed { target, .. }
            | Self::Reverted { target, .. }
            | Self::Interrupted { target, .. }
            | Self::Skipped { target, .. } => target,
        }
    }
}

/// Either kind of reveal event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealEventKind {
    Trigger(TriggerEvent),
    Tween(TweenEvent),
}

impl RevealEventKind {
    pub fn session(&self) -> SessionId {
        match self {
            Self::Trigger(e) => e.session(),
            Self::Tween(e) => e.session(),
        }
    }

    pub fn section(&self) -> &str {
        match self {
            Self::Trigger(e) => e.section(),
            Self::Tween(e) => e.section(),
        }
    }

    /// The tween target, or the trigger element for crossings.
    pub fn target(&self) -> Option<&TargetId> {
        match self {
            Self::Trigger(e) => e.trigger(),
            Self::Tween(e) => Some(e.target()),
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self, Self::Tween(TweenEvent::Started { .. }))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Tween(TweenEvent::Completed { .. }))
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Tween(TweenEvent::Interrupted { .. }))
    }

    pub fn is_entered(&self) -> bool {
        matches!(
            self,
            Self::Trigger(TriggerEvent::Entered { .. } | TriggerEvent::EnteredBack { .. })
        )
    }
}

impl From<TriggerEvent> for RevealEventKind {
    fn from(event: TriggerEvent) -> Self {
        Self::Trigger(event)
    }
}

impl From<TweenEvent> for RevealEventKind {
    fn from(event: TweenEvent) -> Self {
        Self::Tween(event)
    }
}

/// Events kept before the oldest are dropped.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Bounded FIFO of events collected during registration and ticks.
///
/// Once full, every push drops the oldest event.
#[derive(Debug)]
pub struct EventQueue {
    events: VecDeque<RevealEventKind>,
    capacity: usize,
    /// Events dropped since the queue was last drained or cleared.
    dropped: usize,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity.min(DEFAULT_EVENT_CAPACITY)),
            capacity,
            dropped: 0,
        }
    }

    pub fn push_trigger_event(&mut self, event: TriggerEvent) {
        self.push(RevealEventKind::Trigger(event));
    }

    pub fn push_tween_event(&mut self, event: TweenEvent) {
        self.push(RevealEventKind::Tween(event));
    }

    pub fn push(&mut self, event: RevealEventKind) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
            if self.dropped == 0 {
                log::warn!(
                    "event queue full ({} events); dropping the oldest until drained",
                    self.capacity
                );
            }
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn pop(&mut self) -> Option<RevealEventKind> {
        self.events.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = RevealEventKind> + '_ {
        self.dropped = 0;
        self.events.drain(..)
    }

    pub fn peek(&self) -> Option<&RevealEventKind> {
        self.events.front()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    /// Pending events about one element.
    pub fn events_for_target(&self, target: &str) -> Vec<&RevealEventKind> {
        self.events
            .iter()
            .filter(|e| e.target().is_some_and(|t| t.as_str() == target))
            .collect()
    }

    /// Pending events raised by one section's sessions.
    pub fn events_for_section(&self, section: &str) -> Vec<&RevealEventKind> {
        self.events
            .iter()
            .filter(|e| e.section() == section)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(target: &str) -> TweenEvent {
        TweenEvent::Started {
            session: SessionId(1),
            section: "skills".to_string(),
            target: TargetId::new(target),
        }
    }

    #[test]
    fn test_trigger_event_accessors() {
        let event = TriggerEvent::Left {
            session: SessionId(3),
            section: "projects".to_string(),
            watch: WatchId(9),
            trigger: Some(TargetId::new("projects-card-0")),
        };

        assert_eq!(event.session(), SessionId(3));
        assert_eq!(event.section(), "projects");
        assert_eq!(event.watch(), WatchId(9));
        assert_eq!(event.trigger().map(TargetId::as_str), Some("projects-card-0"));
    }

    #[test]
    fn test_event_kind_predicates() {
        let kind = RevealEventKind::from(started("a"));
        assert!(kind.is_started());
        assert!(!kind.is_completed());
        assert!(!kind.is_entered());
        assert_eq!(kind.target().map(TargetId::as_str), Some("a"));

        let entered = RevealEventKind::from(TriggerEvent::Entered {
            session: SessionId(1),
            section: "hero".to_string(),
            watch: WatchId(1),
            trigger: None,
        });
        assert!(entered.is_entered());
        assert!(entered.target().is_none());
    }

    #[test]
    fn test_event_queue_operations() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());

        queue.push_tween_event(started("a"));
        queue.push_trigger_event(TriggerEvent::Entered {
            session: SessionId(1),
            section: "skills".to_string(),
            watch: WatchId(2),
            trigger: Some(TargetId::new("skills-grid")),
        });
        assert_eq!(queue.len(), 2);
        assert!(queue.peek().is_some_and(RevealEventKind::is_started));

        assert!(matches!(queue.pop(), Some(RevealEventKind::Tween(_))));
        assert!(matches!(queue.pop(), Some(RevealEventKind::Trigger(_))));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_event_queue_filters() {
        let mut queue = EventQueue::new();
        queue.push_tween_event(started("a"));
        queue.push_tween_event(started("b"));
        queue.push_tween_event(TweenEvent::Completed {
            session: SessionId(2),
            section: "contact".to_string(),
            target: TargetId::new("a"),
        });

        assert_eq!(queue.events_for_target("a").len(), 2);
        assert_eq!(queue.events_for_target("c").len(), 0);
        assert_eq!(queue.events_for_section("skills").len(), 2);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained.len(), 3);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let mut queue = EventQueue::with_capacity(2);
        queue.push_tween_event(started("a"));
        queue.push_tween_event(started("b"));
        queue.push_tween_event(started("c"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
        let oldest = queue.peek().and_then(RevealEventKind::target);
        assert_eq!(oldest.map(TargetId::as_str), Some("b"));

        assert_eq!(queue.drain().count(), 2);
        assert_eq!(queue.dropped(), 0);
        assert_eq!(EventQueue::new().capacity(), DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn test_event_serialization() {
        let event = RevealEventKind::from(TweenEvent::Skipped {
            session: SessionId(4),
            section: "education".to_string(),
            target: TargetId::new("education-dot-7"),
            reason: "reveal target `education-dot-7` is not attached".to_string(),
        });

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"tween\""));
        assert!(json.contains("\"type\":\"skipped\""));
        assert!(json.contains("education-dot-7"));

        let parsed: RevealEventKind = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
