//! Scheduled events with scoped cancellation.
//!
//! Deferred work (risky-action resolution, typewriter reveals, scene warm-up) is stored as data in
//! the game state instead of live browser timers. The effect executor only needs to wake the
//! reducer at [`Timeline::next_due_at`]; whatever is due then is drained and applied. Cancelling a
//! scope drops every pending event tied to a window, a scene, or the whole session, so nothing
//! fires into state that no longer exists.

use desktop_app_case_files::DecryptionJob;
use desktop_app_terminal::TerminalJob;

use crate::model::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

/// Lifetime an event is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerScope {
    Session,
    Scene,
    Window(WindowId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scheduled<E> {
    pub handle: TimerHandle,
    pub scope: TimerScope,
    pub due_at_ms: u64,
    pub event: E,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<E> {
    entries: Vec<Scheduled<E>>,
    next_handle: u64,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_handle: 1,
        }
    }
}

impl<E> Timeline<E> {
    pub fn schedule(&mut self, scope: TimerScope, due_at_ms: u64, event: E) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Scheduled {
            handle,
            scope,
            due_at_ms,
            event,
        });
        handle
    }

    /// Returns whether a pending event was removed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_scope(&mut self, scope: TimerScope) {
        self.entries.retain(|entry| entry.scope != scope);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Removes and returns every event due at `now_ms`, earliest first.
    ///
    /// Events due at the same instant come out in scheduling order.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<Scheduled<E>> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| entry.due_at_ms <= now_ms);
        self.entries = pending;
        due.sort_by_key(|entry| (entry.due_at_ms, entry.handle));
        due
    }

    pub fn next_due_at(&self) -> Option<u64> {
        self.entries.iter().map(|entry| entry.due_at_ms).min()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scheduled<E>> {
        self.entries.iter()
    }
}

/// Everything the game defers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduledEvent {
    TerminalJob {
        window_id: WindowId,
        job: TerminalJob,
    },
    Decryption {
        window_id: WindowId,
        job: DecryptionJob,
    },
    /// Removes a window whose exit transition finished.
    WindowExit { window_id: WindowId },
    IntroChar,
    EndingLine,
    EndingMenuReady,
    SceneReady,
    CrashReset,
    DamageFlashEnd,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn events(due: Vec<Scheduled<&'static str>>) -> Vec<&'static str> {
        due.into_iter().map(|entry| entry.event).collect()
    }

    #[test]
    fn drains_in_due_order_with_fifo_ties() {
        let mut timeline = Timeline::default();
        timeline.schedule(TimerScope::Session, 300, "late");
        timeline.schedule(TimerScope::Session, 100, "first");
        timeline.schedule(TimerScope::Session, 100, "second");
        timeline.schedule(TimerScope::Session, 900, "pending");

        assert_eq!(timeline.next_due_at(), Some(100));
        assert_eq!(events(timeline.drain_due(300)), vec!["first", "second", "late"]);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.next_due_at(), Some(900));
        assert!(timeline.drain_due(899).is_empty());
    }

    #[test]
    fn cancel_removes_single_handle() {
        let mut timeline = Timeline::default();
        let keep = timeline.schedule(TimerScope::Session, 10, "keep");
        let drop = timeline.schedule(TimerScope::Session, 10, "drop");
        assert!(timeline.cancel(drop));
        assert!(!timeline.cancel(drop));
        assert_eq!(timeline.iter().map(|e| e.handle).collect::<Vec<_>>(), vec![keep]);
    }

    #[test]
    fn cancel_scope_only_touches_matching_scope() {
        let mut timeline = Timeline::default();
        timeline.schedule(TimerScope::Window(WindowId(1)), 10, "w1");
        timeline.schedule(TimerScope::Window(WindowId(2)), 10, "w2");
        timeline.schedule(TimerScope::Scene, 10, "scene");
        timeline.schedule(TimerScope::Session, 10, "session");

        timeline.cancel_scope(TimerScope::Window(WindowId(1)));
        timeline.cancel_scope(TimerScope::Scene);
        assert_eq!(events(timeline.drain_due(10)), vec!["w2", "session"]);
        assert!(timeline.is_empty());
        assert_eq!(timeline.next_due_at(), None);
    }
}
