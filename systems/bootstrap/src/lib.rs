#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Colony Defence experience.
//!
//! Provides the standard tunnel layouts and a convenience constructor that
//! assembles a ready-to-play colony from a wave schedule and layout
//! parameters.

use colony_defence_core::{PlaceKind, WaveSchedule};
use colony_defence_world::{Colony, ColonyConfig, LayoutBuilder};

/// Dimensions of the tunnel network connecting the hive to the base.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    /// Number of parallel tunnels.
    pub tunnels: u32,
    /// Number of places per tunnel, hive entrance included.
    pub length: u32,
    /// Every `moat_frequency`-th place is flooded; zero keeps tunnels dry.
    pub moat_frequency: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tunnels: 3,
            length: 9,
            moat_frequency: 3,
        }
    }
}

/// Registers `tunnels` parallel rows of `length` places, flooding every
/// `moat_frequency`-th place. The outermost place of each row is a hive
/// entrance.
pub fn wet_layout(builder: &mut LayoutBuilder, tunnels: u32, length: u32, moat_frequency: u32) {
    for tunnel in 0..tunnels {
        let mut exit = builder.base();
        for step in 0..length {
            let flooded = moat_frequency != 0 && (step + 1) % moat_frequency == 0;
            let (kind, name) = if flooded {
                (PlaceKind::Water, format!("water_{tunnel}_{step}"))
            } else {
                (PlaceKind::Tunnel, format!("tunnel_{tunnel}_{step}"))
            };
            exit = builder.register(&name, kind, exit, step == length - 1);
        }
    }
}

/// Registers dry tunnels.
pub fn dry_layout(builder: &mut LayoutBuilder, tunnels: u32, length: u32) {
    wet_layout(builder, tunnels, length, 0);
}

/// Assembles a colony with the provided schedule, configuration, and layout.
#[must_use]
pub fn standard_colony(schedule: &WaveSchedule, config: ColonyConfig, layout: Layout) -> Colony {
    Colony::new(schedule, config, |builder| {
        wet_layout(builder, layout.tunnels, layout.length, layout.moat_frequency);
    })
}
