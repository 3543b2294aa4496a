use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Deferred effects a session can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerKind {
    /// Refill the magazine and leave the reloading state.
    ReloadComplete,
    /// Clear the damage overlay.
    DamageFlashFade,
}

/// Handle to one scheduled timer. Stale handles cancel nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    pub kind: TimerKind,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    due: Duration,
    generation: u64,
}

/// Cancelable one-shot timers, at most one pending per [`TimerKind`].
///
/// Scheduling a kind that is already pending supersedes the earlier entry,
/// so a stale deferred effect can never fire after a newer one replaced it.
/// Times are session-clock offsets, not frame counts.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: BTreeMap<TimerKind, Pending>,
    next_generation: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at session time `due`, replacing any pending entry.
    pub fn schedule(&mut self, kind: TimerKind, due: Duration) -> TimerHandle {
        let generation = self.next_generation;
        self.next_generation += 1;
        if let Some(old) = self.pending.insert(kind, Pending { due, generation }) {
            tracing::trace!(?kind, old_due = ?old.due, new_due = ?due, "timer superseded");
        }
        TimerHandle { kind, generation }
    }

    /// Cancel the timer behind `handle` if it is still the pending one.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending.get(&handle.kind) {
            Some(p) if p.generation == handle.generation => {
                self.pending.remove(&handle.kind);
                true
            }
            _ => false,
        }
    }

    /// Cancel whatever is pending for `kind`.
    pub fn cancel_kind(&mut self, kind: TimerKind) -> bool {
        self.pending.remove(&kind).is_some()
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }

    pub fn due_at(&self, kind: TimerKind) -> Option<Duration> {
        self.pending.get(&kind).map(|p| p.due)
    }

    /// Pending kinds in kind order.
    pub fn pending_kinds(&self) -> Vec<TimerKind> {
        self.pending.keys().copied().collect()
    }

    /// Remove and return every timer due at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: Duration) -> Vec<TimerKind> {
        let mut due: Vec<(Duration, TimerKind)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .map(|(k, p)| (p.due, *k))
            .collect();
        due.sort();
        for (_, kind) in &due {
            self.pending.remove(kind);
        }
        due.into_iter().map(|(_, kind)| kind).collect()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
