//! Breathing pattern model
//!
//! A `BreathingPattern` is the fixed timing recipe for one technique:
//! - seconds per phase (inhale, hold-in, exhale, hold-out)
//! - number of cycles
//!
//! Patterns are defined once in the catalog and shared read-only by both
//! session controllers.

mod catalog;

pub use catalog::{find_pattern, technique_ids, TechniqueInfo};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// One segment of a breathing cycle, plus the pre- and post-session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BreathPhase {
    Idle,
    Prepare,
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
    Complete,
}

/// Timing recipe for a breathing technique. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingPattern {
    /// Inhale duration in whole seconds (> 0)
    pub inhale_secs: u32,

    /// Hold after inhale in whole seconds (0 = skipped)
    pub hold_in_secs: u32,

    /// Exhale duration in whole seconds (> 0)
    pub exhale_secs: u32,

    /// Hold after exhale in whole seconds (0 = skipped)
    pub hold_out_secs: u32,

    /// Number of cycles in a full session (> 0)
    pub cycles: u32,
}

impl BreathingPattern {
    /// Build a pattern, validating the cycle invariants.
    ///
    /// A cycle must include both an inhale and an exhale; holds are optional.
    pub fn new(
        inhale_secs: u32,
        hold_in_secs: u32,
        exhale_secs: u32,
        hold_out_secs: u32,
        cycles: u32,
    ) -> Result<Self> {
        if inhale_secs == 0 {
            bail!("inhale duration must be positive");
        }
        if exhale_secs == 0 {
            bail!("exhale duration must be positive");
        }
        if cycles == 0 {
            bail!("cycle count must be positive");
        }

        Ok(Self {
            inhale_secs,
            hold_in_secs,
            exhale_secs,
            hold_out_secs,
            cycles,
        })
    }

    /// Duration of one full cycle in seconds.
    pub fn cycle_secs(&self) -> u32 {
        self.inhale_secs + self.hold_in_secs + self.exhale_secs + self.hold_out_secs
    }

    /// Duration of the whole session in seconds, excluding any preparation
    /// time added by the session.
    pub fn total_secs(&self) -> u32 {
        self.cycle_secs() * self.cycles
    }

    /// Configured duration of one phase. `Idle`, `Prepare` and `Complete`
    /// have no pattern duration and return 0.
    pub fn phase_secs(&self, phase: BreathPhase) -> u32 {
        match phase {
            BreathPhase::Inhale => self.inhale_secs,
            BreathPhase::HoldIn => self.hold_in_secs,
            BreathPhase::Exhale => self.exhale_secs,
            BreathPhase::HoldOut => self.hold_out_secs,
            BreathPhase::Idle | BreathPhase::Prepare | BreathPhase::Complete => 0,
        }
    }
}
