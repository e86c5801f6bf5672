//! Maps the avatar's trigger overlaps to level events.

use physics::{ColliderHandle, TriggerVolume};

/// Something the menu layer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelEvent {
    LevelPassed,
    PlayerDied,
}

/// Events raised this frame, drained by the owner. Holds at most one event of each kind.
#[derive(Debug, Default)]
pub struct LevelEvents {
    queue: Vec<LevelEvent>,
}

impl LevelEvents {
    /// Watch the given goal and out-of-bounds volumes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event unless one of the same kind is already waiting.
    pub fn push(&mut self, event: LevelEvent) -> bool {
        if self.queue.contains(&event) {
            return false;
        }
        self.queue.push(event);
        true
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, LevelEvent> {
        self.queue.drain(..)
    }

    /// Drop queued events without handling them.
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Get the number of queued events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Compares overlap handles against the level's two trigger volumes.
#[derive(Debug, Clone, Copy)]
pub struct CollisionMonitor {
    level_complete: TriggerVolume,
    out_of_bounds: TriggerVolume,
}

impl CollisionMonitor {
    /// Watch the given goal and out-of-bounds volumes.
    pub fn new(level_complete: TriggerVolume, out_of_bounds: TriggerVolume) -> Self {
        Self {
            level_complete,
            out_of_bounds,
        }
    }

    /// Level-complete wins whenever present. Out-of-bounds only counts when it
    /// is the sole overlap.
    pub fn check(&self, overlaps: &[ColliderHandle]) -> Option<LevelEvent> {
        if overlaps.iter().any(|h| self.level_complete.matches(*h)) {
            return Some(LevelEvent::LevelPassed);
        }
        match overlaps {
            [only] if self.out_of_bounds.matches(*only) => Some(LevelEvent::PlayerDied),
            _ => None,
        }
    }
}
