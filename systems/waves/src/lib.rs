#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Preset assault plans describing when the hive releases its attackers.
//!
//! Plans are ordinary [`WaveSchedule`] values; adapters pick one by name and
//! hand it to the colony at construction time.

use colony_defence_core::{AttackerKind, WaveSchedule};

/// Identifiers for the built-in assault plans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Plan {
    /// Two weak bees, suitable for first games and smoke tests.
    Training,
    /// Steady bee pressure with a pair of wasps near the end.
    Standard,
    /// Every attacker variant, closing with the boss wave.
    Full,
}

impl Plan {
    /// Name used to select the plan from command-line interfaces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Standard => "standard",
            Self::Full => "full",
        }
    }

    /// Resolves a plan name back to its identifier.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Training, Self::Standard, Self::Full]
            .into_iter()
            .find(|plan| plan.name() == name)
    }

    /// Builds the schedule the plan describes.
    #[must_use]
    pub fn schedule(self) -> WaveSchedule {
        match self {
            Self::Training => training_schedule(),
            Self::Standard => standard_schedule(),
            Self::Full => full_schedule(),
        }
    }
}

/// Two bees arriving on consecutive early turns.
#[must_use]
pub fn training_schedule() -> WaveSchedule {
    let mut schedule = WaveSchedule::new();
    let _ = schedule
        .add_wave(AttackerKind::Bee, 3.0, 2, 1)
        .add_wave(AttackerKind::Bee, 3.0, 3, 1);
    schedule
}

/// A bee every other turn from turn 3, then two wasps.
#[must_use]
pub fn standard_schedule() -> WaveSchedule {
    let mut schedule = WaveSchedule::new();
    for turn in (3..16).step_by(2) {
        let _ = schedule.add_wave(AttackerKind::Bee, 3.0, turn, 1);
    }
    let _ = schedule
        .add_wave(AttackerKind::Wasp, 3.0, 16, 1)
        .add_wave(AttackerKind::Wasp, 3.0, 18, 1);
    schedule
}

/// The complete campaign: bees, wasps, hornets, ninjas, and the boss.
#[must_use]
pub fn full_schedule() -> WaveSchedule {
    let mut schedule = WaveSchedule::new();
    for turn in (3..16).step_by(2) {
        let _ = schedule.add_wave(AttackerKind::Bee, 3.0, turn, 1);
    }
    let _ = schedule
        .add_wave(AttackerKind::Wasp, 3.0, 4, 1)
        .add_wave(AttackerKind::Hornet, 3.0, 6, 1)
        .add_wave(AttackerKind::Ninja, 3.0, 8, 1)
        .add_wave(AttackerKind::Wasp, 3.0, 10, 1)
        .add_wave(AttackerKind::Hornet, 3.0, 12, 1)
        .add_wave(AttackerKind::Ninja, 3.0, 14, 1)
        .add_wave(AttackerKind::Wasp, 4.0, 16, 2)
        .add_wave(AttackerKind::Hornet, 4.0, 18, 2)
        .add_wave(AttackerKind::Ninja, 4.0, 20, 2)
        .add_wave(AttackerKind::Boss, 30.0, 22, 1);
    schedule
}
