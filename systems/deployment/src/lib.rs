#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deployment strategies and the outer game loop.
//!
//! A strategy observes the colony through read-only queries and emits
//! deploy-phase [`Command`] values; it never mutates state directly. The
//! [`run`] loop drives [`advance_turn`] until the game terminates or a turn
//! limit is reached.

use colony_defence_core::{Command, DefenderKind, Event, Outcome};
use colony_defence_world::{advance_turn, query, Colony};

/// Observes the colony each deploy phase and emits commands.
pub trait DeployStrategy {
    /// Plans the commands to submit for the current turn.
    fn plan(&mut self, colony: &Colony, out: &mut Vec<Command>);
}

/// Strategy that never deploys anything.
#[derive(Debug, Default)]
pub struct Defenceless;

impl DeployStrategy for Defenceless {
    fn plan(&mut self, _colony: &Colony, _out: &mut Vec<Command>) {}
}

#[derive(Clone, Debug)]
enum Action {
    Deploy {
        place_name: String,
        kind: DefenderKind,
    },
    Remove {
        place_name: String,
    },
}

#[derive(Clone, Debug)]
struct Step {
    turn: u32,
    action: Action,
}

/// Strategy that replays a fixed, turn-indexed script of commands.
///
/// Steps are emitted in insertion order; steps naming unknown places are
/// skipped.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStrategy {
    steps: Vec<Step>,
}

impl ScriptedStrategy {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a deployment for the given turn.
    #[must_use]
    pub fn deploy(mut self, turn: u32, place_name: &str, kind: DefenderKind) -> Self {
        self.steps.push(Step {
            turn,
            action: Action::Deploy {
                place_name: place_name.to_owned(),
                kind,
            },
        });
        self
    }

    /// Schedules a removal for the given turn.
    #[must_use]
    pub fn remove(mut self, turn: u32, place_name: &str) -> Self {
        self.steps.push(Step {
            turn,
            action: Action::Remove {
                place_name: place_name.to_owned(),
            },
        });
        self
    }
}

impl DeployStrategy for ScriptedStrategy {
    fn plan(&mut self, colony: &Colony, out: &mut Vec<Command>) {
        let turn = query::turn(colony);
        for step in self.steps.iter().filter(|step| step.turn == turn) {
            match &step.action {
                Action::Deploy { place_name, kind } => {
                    if let Some(place) = query::place_by_name(colony, place_name) {
                        out.push(Command::DeployDefender { place, kind: *kind });
                    }
                }
                Action::Remove { place_name } => {
                    if let Some(place) = query::place_by_name(colony, place_name) {
                        out.push(Command::RemoveDefender { place });
                    }
                }
            }
        }
    }
}

/// Drives the turn loop until the game terminates or `turn_limit` turns
/// have elapsed. Returns [`Outcome::Continue`] when the limit is hit first.
pub fn run(
    colony: &mut Colony,
    strategy: &mut dyn DeployStrategy,
    out_events: &mut Vec<Event>,
    turn_limit: u32,
) -> Outcome {
    for _ in 0..turn_limit {
        let outcome = advance_turn(colony, |view, out| strategy.plan(view, out), out_events);
        if outcome != Outcome::Continue {
            return outcome;
        }
    }
    Outcome::Continue
}
