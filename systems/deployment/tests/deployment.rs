use colony_defence_core::{AttackerKind, DefenderKind, Event, Outcome, WaveSchedule};
use colony_defence_system_bootstrap::{standard_colony, Layout};
use colony_defence_system_deployment::{run, Defenceless, ScriptedStrategy};
use colony_defence_system_waves::training_schedule;
use colony_defence_world::{query, ColonyConfig};

fn dry(tunnels: u32, length: u32) -> Layout {
    Layout {
        tunnels,
        length,
        moat_frequency: 0,
    }
}

#[test]
fn scripted_throwers_repel_the_training_plan() {
    let mut colony = standard_colony(
        &training_schedule(),
        ColonyConfig {
            starting_food: 8,
            rng_seed: 7,
        },
        dry(1, 4),
    );
    let mut strategy = ScriptedStrategy::new()
        .deploy(0, "tunnel_0_0", DefenderKind::Thrower)
        .deploy(0, "tunnel_0_1", DefenderKind::Thrower);
    let mut events = Vec::new();

    let outcome = run(&mut colony, &mut strategy, &mut events, 10);

    assert_eq!(outcome, Outcome::Win);
    let felled = events
        .iter()
        .filter(|event| matches!(event, Event::AttackerFelled { .. }))
        .count();
    assert_eq!(felled, 2);
    assert!(events.contains(&Event::GameEnded {
        outcome: Outcome::Win,
    }));
}

#[test]
fn defenceless_colony_is_overrun() {
    let mut colony = standard_colony(
        &training_schedule(),
        ColonyConfig::default(),
        dry(1, 4),
    );
    let mut events = Vec::new();

    let outcome = run(&mut colony, &mut Defenceless, &mut events, 20);

    assert_eq!(outcome, Outcome::Loss);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BaseBreached { .. })));
}

#[test]
fn turn_limit_stops_an_undecided_game() {
    let mut schedule = WaveSchedule::new();
    let _ = schedule.add_wave(AttackerKind::Bee, 3.0, 50, 1);
    let mut colony = standard_colony(&schedule, ColonyConfig::default(), dry(1, 4));
    let mut events = Vec::new();

    let outcome = run(&mut colony, &mut Defenceless, &mut events, 5);

    assert_eq!(outcome, Outcome::Continue);
    assert_eq!(query::turn(&colony), 5);
}

#[test]
fn scripted_removal_clears_the_slot_on_its_turn() {
    let mut schedule = WaveSchedule::new();
    let _ = schedule.add_wave(AttackerKind::Bee, 3.0, 50, 1);
    let mut colony = standard_colony(&schedule, ColonyConfig::default(), dry(1, 4));
    let mut strategy = ScriptedStrategy::new()
        .deploy(0, "tunnel_0_0", DefenderKind::Harvester)
        .remove(1, "tunnel_0_0");
    let mut events = Vec::new();

    let outcome = run(&mut colony, &mut strategy, &mut events, 3);

    assert_eq!(outcome, Outcome::Continue);
    let place = query::place_by_name(&colony, "tunnel_0_0").expect("registered place");
    assert_eq!(query::defender_at(&colony, place), None);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::DefenderRemoved { .. })));
}

#[test]
fn steps_naming_unknown_places_are_skipped() {
    let mut schedule = WaveSchedule::new();
    let _ = schedule.add_wave(AttackerKind::Bee, 3.0, 50, 1);
    let mut colony = standard_colony(&schedule, ColonyConfig::default(), dry(1, 4));
    let mut strategy =
        ScriptedStrategy::new().deploy(0, "tunnel_9_9", DefenderKind::Harvester);
    let mut events = Vec::new();

    let outcome = run(&mut colony, &mut strategy, &mut events, 1);

    assert_eq!(outcome, Outcome::Continue);
    assert!(events
        .iter()
        .all(|event| !matches!(event, Event::DefenderDeployed { .. })));
    assert_eq!(query::food(&colony), 2);
}
