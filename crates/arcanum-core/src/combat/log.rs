//! Combat log
//!
//! A bounded FIFO of combat events. Appending beyond the cap evicts the
//! oldest entry; the newest entry is always retained.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum entries retained in the log
pub const MAX_LOG_ENTRIES: usize = 20;

/// What kind of event a log entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    PlayerAttack,
    EnemyAttack,
    SpellCast,
    EnemyDefeat,
}

/// A single combat log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    /// Simulation clock at which the event happened
    pub at: f64,
}

impl LogEntry {
    pub fn player_attack(enemy_name: &str, damage: f64, at: f64) -> Self {
        Self {
            kind: LogKind::PlayerAttack,
            message: format!("You hit the {} for {:.0} damage", enemy_name, damage),
            at,
        }
    }

    pub fn enemy_attack(enemy_name: &str, damage: f64, at: f64) -> Self {
        Self {
            kind: LogKind::EnemyAttack,
            message: format!("The {} hits you for {:.0} damage", enemy_name, damage),
            at,
        }
    }

    pub fn spell_cast(spell_name: &str, enemy_name: &str, damage: f64, at: f64) -> Self {
        Self {
            kind: LogKind::SpellCast,
            message: format!(
                "{} strikes the {} for {:.0} damage",
                spell_name, enemy_name, damage
            ),
            at,
        }
    }

    pub fn enemy_defeat(enemy_name: &str, at: f64) -> Self {
        Self {
            kind: LogKind::EnemyDefeat,
            message: format!("You defeated the {}", enemy_name),
            at,
        }
    }
}

/// Bounded combat log, oldest entries evicted first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatLog {
    entries: VecDeque<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest if the log is full
    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
