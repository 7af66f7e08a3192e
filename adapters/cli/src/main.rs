#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Colony Defence experience.
//!
//! Runs one scripted game: tunnel layout and assault plan come from flags,
//! deployments from repeated `--step turn:place:action` arguments, and every
//! turn's events are printed as the simulation advances.

mod script;

use anyhow::{Context, Result};
use clap::Parser;
use colony_defence_core::{Event, Outcome, PlaceId};
use colony_defence_system_bootstrap::{standard_colony, Layout};
use colony_defence_system_deployment::run;
use colony_defence_system_waves::Plan;
use colony_defence_world::{query, ColonyConfig};

/// Command-line arguments accepted by the adapter.
#[derive(Debug, Parser)]
#[command(name = "colony-defence", about = "Turn-based colony defence simulation")]
struct Args {
    /// Number of parallel tunnels between the hive and the base.
    #[arg(long, default_value_t = 3)]
    tunnels: u32,

    /// Number of places per tunnel.
    #[arg(long, default_value_t = 9)]
    length: u32,

    /// Every Nth place is flooded; 0 keeps all tunnels dry.
    #[arg(long, default_value_t = 3)]
    moat_frequency: u32,

    /// Food the colony starts with.
    #[arg(long, default_value_t = 2)]
    food: u32,

    /// Seed for the deterministic RNG; omit for the built-in default.
    #[arg(long)]
    seed: Option<u64>,

    /// Assault plan to play against (training, standard, full).
    #[arg(long, default_value = "training")]
    plan: String,

    /// Maximum number of turns to simulate.
    #[arg(long, default_value_t = 60)]
    turn_limit: u32,

    /// Scripted step of the form `turn:place:action`, where action is a
    /// defender name or `remove`. May be repeated.
    #[arg(long = "step")]
    steps: Vec<String>,
}

/// Entry point for the Colony Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let plan = Plan::from_name(&args.plan)
        .with_context(|| format!("unknown plan `{}`", args.plan))?;
    let mut strategy = script::parse_steps(&args.steps)?;

    let defaults = ColonyConfig::default();
    let config = ColonyConfig {
        starting_food: args.food,
        rng_seed: args.seed.unwrap_or(defaults.rng_seed),
    };
    let mut colony = standard_colony(
        &plan.schedule(),
        config,
        Layout {
            tunnels: args.tunnels,
            length: args.length,
            moat_frequency: args.moat_frequency,
        },
    );
    println!("{}", query::welcome_banner(&colony));

    let names: Vec<String> = query::place_view(&colony)
        .into_vec()
        .into_iter()
        .map(|place| place.name)
        .collect();

    let mut outcome = Outcome::Continue;
    for _ in 0..args.turn_limit {
        let turn = query::turn(&colony);
        let mut events = Vec::new();
        outcome = run(&mut colony, &mut strategy, &mut events, 1);
        println!("turn {turn} (food: {})", query::food(&colony));
        for event in &events {
            println!("  {}", describe(event, &names));
        }
        if outcome != Outcome::Continue {
            break;
        }
    }

    match outcome {
        Outcome::Win => println!("All attackers repelled. The colony stands."),
        Outcome::Loss => println!("The colony has fallen."),
        Outcome::Continue => println!("Turn limit reached with the outcome undecided."),
    }
    Ok(())
}

fn place_name<'names>(names: &'names [String], place: PlaceId) -> &'names str {
    names
        .get(place.get() as usize)
        .map_or("<unknown place>", String::as_str)
}

fn describe(event: &Event, names: &[String]) -> String {
    match event {
        Event::AttackerReleased {
            attacker,
            kind,
            place,
        } => format!(
            "{} #{} enters at {}",
            kind.display_name(),
            attacker.get(),
            place_name(names, *place)
        ),
        Event::AttackerAdvanced { attacker, from, to } => format!(
            "attacker #{} advances from {} to {}",
            attacker.get(),
            place_name(names, *from),
            place_name(names, *to)
        ),
        Event::DefenderDeployed {
            defender,
            kind,
            place,
        } => format!(
            "{} #{} deployed at {}",
            kind.display_name(),
            defender.get(),
            place_name(names, *place)
        ),
        Event::DeployRejected {
            kind,
            place,
            reason,
        } => format!(
            "cannot deploy {} at {}: {reason}",
            kind.display_name(),
            place_name(names, *place)
        ),
        Event::DefenderRemoved { defender, place } => format!(
            "defender #{} removed from {}",
            defender.get(),
            place_name(names, *place)
        ),
        Event::AttackerDamaged { attacker, amount } => {
            format!("attacker #{} takes {amount} damage", attacker.get())
        }
        Event::DefenderDamaged { defender, amount } => {
            format!("defender #{} takes {amount} damage", defender.get())
        }
        Event::AttackerFelled { attacker, kind } => {
            format!("{} #{} is down", kind.display_name(), attacker.get())
        }
        Event::DefenderFelled { defender, kind } => {
            format!("{} #{} is down", kind.display_name(), defender.get())
        }
        Event::FoodProduced { amount, total } => {
            format!("harvested {amount} food ({total} in store)")
        }
        Event::DamageDoubled { defender } => {
            format!("the queen doubles defender #{}", defender.get())
        }
        Event::BaseBreached { attacker } => {
            format!("attacker #{} breached the base", attacker.get())
        }
        Event::GameEnded { outcome } => match outcome {
            Outcome::Win => "the hive is exhausted".to_owned(),
            Outcome::Loss => "the base has fallen".to_owned(),
            Outcome::Continue => "the game continues".to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_resolves_place_names() {
        let names = vec!["base".to_owned(), "tunnel_0_0".to_owned()];
        let line = describe(
            &Event::BaseBreached {
                attacker: colony_defence_core::AttackerId::new(3),
            },
            &names,
        );
        assert_eq!(line, "attacker #3 breached the base");

        let line = describe(
            &Event::AttackerAdvanced {
                attacker: colony_defence_core::AttackerId::new(0),
                from: PlaceId::new(1),
                to: PlaceId::new(0),
            },
            &names,
        );
        assert_eq!(line, "attacker #0 advances from tunnel_0_0 to base");
    }

    #[test]
    fn describe_tolerates_out_of_range_places() {
        let line = describe(
            &Event::BaseBreached {
                attacker: colony_defence_core::AttackerId::new(0),
            },
            &[],
        );
        assert!(line.contains("attacker #0"));
        let line = describe(
            &Event::DefenderRemoved {
                defender: colony_defence_core::DefenderId::new(1),
                place: PlaceId::new(9),
            },
            &[],
        );
        assert!(line.contains("<unknown place>"));
    }
}
