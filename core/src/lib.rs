#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Colony Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative colony, and pure systems. Deployment strategies submit
//! [`Command`] values describing desired mutations, the colony executes
//! those commands via its `apply` entry point, and broadcasts [`Event`]
//! values describing every observable transition. Systems and adapters
//! consume events and immutable snapshots; they never touch colony state
//! directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Colony Defence.";

/// Single-strike damage cap applied to the boss attacker.
pub const BOSS_DAMAGE_CAP: f32 = 8.0;

/// Unique identifier assigned to a place in the tunnel graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(u32);

impl PlaceId {
    /// Creates a new place identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a defending unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an attacking unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttackerId(u32);

impl AttackerId {
    /// Creates a new attacker identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Varieties of places that compose the tunnel graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceKind {
    /// Terminal place guarding the colony; an attacker arriving here ends
    /// the game in a loss. Never a deployment target.
    Base,
    /// Ordinary tunnel segment.
    Tunnel,
    /// Flooded segment; units that are not waterproof drown on entry.
    Water,
}

/// Terminal state of the simulation, threaded through the turn loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The simulation has not terminated; another turn may run.
    Continue,
    /// Every scheduled attacker has been destroyed.
    Win,
    /// An attacker reached the base, or the queen defender perished.
    Loss,
}

/// Varieties of defending units available for deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Produces one food per turn for the colony.
    Harvester,
    /// Ranged attacker with unbounded reach toward the hive.
    Thrower,
    /// Ranged attacker limited to targets at most three hops away.
    Short,
    /// Ranged attacker requiring targets at least five hops away.
    Long,
    /// Reflects incoming damage onto co-located attackers and splashes
    /// additional damage when destroyed.
    Fire,
    /// Inert blocker with high health and no action.
    Wall,
    /// Periodically devours one co-located attacker outright.
    Hungry,
    /// Container that shelters one nested non-container unit.
    Bodyguard,
    /// Container that also damages every co-located attacker each turn.
    Tank,
    /// Waterproof ranged attacker able to hold flooded places.
    Scuba,
    /// Waterproof ranged attacker that doubles defender damage down her
    /// tunnel; her death ends the game in a loss. Deployable once.
    Queen,
}

/// Deployment registry listing every defender variant in display order.
pub const DEFENDER_REGISTRY: [DefenderKind; 11] = [
    DefenderKind::Harvester,
    DefenderKind::Thrower,
    DefenderKind::Short,
    DefenderKind::Long,
    DefenderKind::Fire,
    DefenderKind::Wall,
    DefenderKind::Hungry,
    DefenderKind::Bodyguard,
    DefenderKind::Tank,
    DefenderKind::Scuba,
    DefenderKind::Queen,
];

impl DefenderKind {
    /// Display name used by deployment interfaces and scripts.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Harvester => "Harvester",
            Self::Thrower => "Thrower",
            Self::Short => "Short",
            Self::Long => "Long",
            Self::Fire => "Fire",
            Self::Wall => "Wall",
            Self::Hungry => "Hungry",
            Self::Bodyguard => "Bodyguard",
            Self::Tank => "Tank",
            Self::Scuba => "Scuba",
            Self::Queen => "Queen",
        }
    }

    /// Resolves a display name back to its variant, if registered.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        DEFENDER_REGISTRY
            .iter()
            .copied()
            .find(|kind| kind.display_name() == name)
    }

    /// Food consumed when the variant is deployed.
    #[must_use]
    pub const fn food_cost(self) -> u32 {
        match self {
            Self::Harvester | Self::Short | Self::Long => 2,
            Self::Thrower => 3,
            Self::Wall | Self::Hungry | Self::Bodyguard => 4,
            Self::Fire => 5,
            Self::Tank | Self::Scuba => 6,
            Self::Queen => 7,
        }
    }

    /// Health assigned to a freshly constructed unit of the variant.
    #[must_use]
    pub const fn base_health(self) -> f32 {
        match self {
            Self::Fire => 3.0,
            Self::Wall => 4.0,
            Self::Bodyguard | Self::Tank => 2.0,
            _ => 1.0,
        }
    }

    /// Damage dealt per strike. Doubles as the fire splash amount.
    #[must_use]
    pub const fn base_damage(self) -> f32 {
        match self {
            Self::Thrower | Self::Short | Self::Long | Self::Tank | Self::Scuba | Self::Queen => {
                1.0
            }
            Self::Fire => 3.0,
            _ => 0.0,
        }
    }

    /// Reports whether the variant can shelter another unit in its place.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Bodyguard | Self::Tank)
    }

    /// Reports whether the variant survives placement in flooded places.
    #[must_use]
    pub const fn is_waterproof(self) -> bool {
        matches!(self, Self::Scuba | Self::Queen)
    }

    /// Targeting band for ranged variants, measured in hops toward the hive.
    #[must_use]
    pub const fn throw_range(self) -> Option<ThrowRange> {
        match self {
            Self::Thrower | Self::Scuba | Self::Queen => Some(ThrowRange::unbounded(0)),
            Self::Short => Some(ThrowRange::new(0, 3)),
            Self::Long => Some(ThrowRange::unbounded(5)),
            _ => None,
        }
    }
}

/// Inclusive hop-distance band within which a ranged defender may strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThrowRange {
    min: u32,
    max: u32,
}

impl ThrowRange {
    /// Creates a band with explicit inclusive bounds.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Creates a band with no upper bound.
    #[must_use]
    pub const fn unbounded(min: u32) -> Self {
        Self { min, max: u32::MAX }
    }

    /// Minimum hop distance, inclusive.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Maximum hop distance, inclusive.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Reports whether the provided hop count falls inside the band.
    #[must_use]
    pub const fn contains(&self, hops: u32) -> bool {
        self.min <= hops && hops <= self.max
    }
}

/// Varieties of attacking units released from the hive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackerKind {
    /// Standard attacker.
    Bee,
    /// Heavier variant dealing double damage.
    Wasp,
    /// Acts twice per turn with reduced per-strike damage; status immune.
    Hornet,
    /// Slips past blocking defenders unopposed.
    Ninja,
    /// Wave leader combining the hornet's timing with the wasp's damage,
    /// plus a diminishing-returns cap on incoming damage.
    Boss,
}

impl AttackerKind {
    /// Display name used by event rendering.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bee => "Bee",
            Self::Wasp => "Wasp",
            Self::Hornet => "Hornet",
            Self::Ninja => "Ninja",
            Self::Boss => "Boss",
        }
    }

    /// Capability profile composing the variant's orthogonal behaviours.
    #[must_use]
    pub const fn profile(self) -> AttackerProfile {
        match self {
            Self::Bee => AttackerProfile {
                damage: 1.0,
                actions_per_turn: 1,
                status_immune: false,
                damage_cap: None,
                blockable: true,
                waterproof: true,
            },
            Self::Wasp => AttackerProfile {
                damage: 2.0,
                actions_per_turn: 1,
                status_immune: false,
                damage_cap: None,
                blockable: true,
                waterproof: true,
            },
            Self::Hornet => AttackerProfile {
                damage: 0.25,
                actions_per_turn: 2,
                status_immune: true,
                damage_cap: None,
                blockable: true,
                waterproof: true,
            },
            Self::Ninja => AttackerProfile {
                damage: 1.0,
                actions_per_turn: 1,
                status_immune: false,
                damage_cap: None,
                blockable: false,
                waterproof: true,
            },
            Self::Boss => AttackerProfile {
                damage: 2.0,
                actions_per_turn: 2,
                status_immune: true,
                damage_cap: Some(BOSS_DAMAGE_CAP),
                blockable: true,
                waterproof: true,
            },
        }
    }
}

/// Flat capability record describing an attacker variant's behaviour.
///
/// Capabilities are composed rather than inherited: each field is an
/// orthogonal knob the engine consults independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerProfile {
    /// Damage applied per strike against a blocking defender.
    pub damage: f32,
    /// Number of actions resolved per turn while the unit survives.
    pub actions_per_turn: u8,
    /// Indicates immunity to status effects applied by defenders.
    pub status_immune: bool,
    /// Diminishing-returns cap applied to each incoming damage instance.
    pub damage_cap: Option<f32>,
    /// Indicates whether a defender occupying the place blocks movement.
    pub blockable: bool,
    /// Indicates whether the unit survives entering flooded places.
    pub waterproof: bool,
}

/// Timed plan describing which attackers the hive releases each turn.
///
/// Append-only during setup; the colony flattens the schedule once at
/// construction to pre-register every attacker in the hive's holding pool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveSchedule {
    waves: BTreeMap<u32, Vec<WaveEntry>>,
}

/// One scheduled batch of identically configured attackers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveEntry {
    /// Variant released by the batch.
    pub kind: AttackerKind,
    /// Health assigned to each released unit.
    pub health: f32,
    /// Number of units in the batch.
    pub count: u32,
}

impl WaveSchedule {
    /// Creates an empty schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` attackers of the given variant and health to the
    /// batch scheduled for `turn`. Returns `self` to allow chaining.
    pub fn add_wave(&mut self, kind: AttackerKind, health: f32, turn: u32, count: u32) -> &mut Self {
        self.waves
            .entry(turn)
            .or_default()
            .push(WaveEntry { kind, health, count });
        self
    }

    /// Iterates scheduled batches grouped by release turn, in turn order.
    pub fn waves(&self) -> impl Iterator<Item = (u32, &[WaveEntry])> {
        self.waves
            .iter()
            .map(|(turn, entries)| (*turn, entries.as_slice()))
    }

    /// Yields every scheduled unit individually, in release order.
    pub fn flattened(&self) -> impl Iterator<Item = (u32, AttackerKind, f32)> + '_ {
        self.waves.iter().flat_map(|(turn, entries)| {
            entries.iter().flat_map(move |entry| {
                (0..entry.count).map(move |_| (*turn, entry.kind, entry.health))
            })
        })
    }

    /// Total number of attackers across every batch.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.waves
            .values()
            .flatten()
            .map(|entry| entry.count)
            .sum()
    }

    /// Latest turn with a scheduled batch, if any batch exists.
    #[must_use]
    pub fn last_turn(&self) -> Option<u32> {
        self.waves.keys().next_back().copied()
    }
}

/// Commands that express all permissible colony mutations during the
/// deploy phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests deployment of a defender variant at the provided place.
    DeployDefender {
        /// Place targeted by the deployment.
        place: PlaceId,
        /// Variant to construct and deploy.
        kind: DefenderKind,
    },
    /// Requests removal of the top-level defender at the provided place.
    RemoveDefender {
        /// Place whose defender slot should be cleared.
        place: PlaceId,
    },
}

/// Events broadcast by the colony while processing commands and turns.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the hive released an attacker into an entrance place.
    AttackerReleased {
        /// Identifier of the released attacker.
        attacker: AttackerId,
        /// Variant of the released attacker.
        kind: AttackerKind,
        /// Entrance place the attacker joined.
        place: PlaceId,
    },
    /// Confirms that an attacker moved one place toward the base.
    AttackerAdvanced {
        /// Identifier of the attacker that advanced.
        attacker: AttackerId,
        /// Place the attacker occupied before moving.
        from: PlaceId,
        /// Place the attacker occupies after moving.
        to: PlaceId,
    },
    /// Confirms that a defender was constructed and placed.
    DefenderDeployed {
        /// Identifier allocated to the new defender.
        defender: DefenderId,
        /// Variant that was deployed.
        kind: DefenderKind,
        /// Place the defender joined.
        place: PlaceId,
    },
    /// Reports that a deployment request was rejected.
    DeployRejected {
        /// Variant requested for deployment.
        kind: DefenderKind,
        /// Place provided in the request.
        place: PlaceId,
        /// Specific reason the deployment failed.
        reason: DeployError,
    },
    /// Confirms that a defender was removed by the controlling player.
    DefenderRemoved {
        /// Identifier of the removed defender.
        defender: DefenderId,
        /// Place whose slot was cleared.
        place: PlaceId,
    },
    /// Reports one applied damage instance against an attacker.
    AttackerDamaged {
        /// Identifier of the struck attacker.
        attacker: AttackerId,
        /// Effective amount subtracted from the attacker's health.
        amount: f32,
    },
    /// Reports one applied damage instance against a defender.
    DefenderDamaged {
        /// Identifier of the struck defender.
        defender: DefenderId,
        /// Amount subtracted from the defender's health.
        amount: f32,
    },
    /// Confirms that an attacker's health reached zero and it left play.
    AttackerFelled {
        /// Identifier of the felled attacker.
        attacker: AttackerId,
        /// Variant of the felled attacker.
        kind: AttackerKind,
    },
    /// Confirms that a defender's health reached zero and it left play.
    DefenderFelled {
        /// Identifier of the felled defender.
        defender: DefenderId,
        /// Variant of the felled defender.
        kind: DefenderKind,
    },
    /// Confirms that a harvester produced food.
    FoodProduced {
        /// Amount added to the balance.
        amount: u32,
        /// Balance after production.
        total: u32,
    },
    /// Confirms that the queen doubled a defender's damage.
    DamageDoubled {
        /// Identifier of the boosted defender.
        defender: DefenderId,
    },
    /// Reports that an attacker breached the home base.
    BaseBreached {
        /// Identifier of the breaching attacker.
        attacker: AttackerId,
    },
    /// Announces that the simulation terminated.
    GameEnded {
        /// Final outcome of the simulation.
        outcome: Outcome,
    },
}

/// Reasons a deployment request may be rejected by the colony.
///
/// Every rejection leaves colony state untouched; the simulation continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum DeployError {
    /// The food balance is below the variant's cost.
    #[error("not enough food: {required} required, {available} available")]
    InsufficientFood {
        /// Cost of the requested variant.
        required: u32,
        /// Food balance at the time of the request.
        available: u32,
    },
    /// A queen has already been deployed this game.
    #[error("a queen has already been deployed")]
    DuplicateQueen,
    /// The place already holds an incompatible top-level defender.
    #[error("place already holds an incompatible defender")]
    Occupied,
    /// The identifier does not name a deployable place.
    #[error("no deployable place with the requested identifier")]
    UnknownPlace,
}

/// Immutable representation of a single defender's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender.
    pub id: DefenderId,
    /// Variant of the defender.
    pub kind: DefenderKind,
    /// Remaining health.
    pub health: f32,
    /// Current per-strike damage (may have been doubled by the queen).
    pub damage: f32,
    /// Place the defender occupies.
    pub place: PlaceId,
    /// Unit nested inside this defender, for containers.
    pub nested: Option<DefenderId>,
    /// Indicates whether the queen has already doubled this defender.
    pub doubled: bool,
}

/// Read-only snapshot describing all live defenders.
#[derive(Clone, Debug, Default)]
pub struct DefenderView {
    snapshots: Vec<DefenderSnapshot>,
}

impl DefenderView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DefenderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DefenderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single attacker's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerSnapshot {
    /// Identifier allocated to the attacker.
    pub id: AttackerId,
    /// Variant of the attacker.
    pub kind: AttackerKind,
    /// Remaining health.
    pub health: f32,
    /// Place the attacker occupies; `None` while held in the hive.
    pub place: Option<PlaceId>,
}

/// Read-only snapshot describing all active attackers.
#[derive(Clone, Debug, Default)]
pub struct AttackerView {
    snapshots: Vec<AttackerSnapshot>,
}

impl AttackerView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AttackerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &AttackerSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AttackerSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single place used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceSnapshot {
    /// Identifier of the place.
    pub id: PlaceId,
    /// Unique display name of the place.
    pub name: String,
    /// Variety of the place.
    pub kind: PlaceKind,
    /// Forward link toward the base, if any.
    pub exit: Option<PlaceId>,
    /// Derived back-link away from the base, if any.
    pub entrance: Option<PlaceId>,
    /// Indicates whether the hive releases attackers directly here.
    pub is_entrance: bool,
    /// Top-level defender occupying the place, if any.
    pub defender: Option<DefenderId>,
    /// Attackers present, in arrival order.
    pub attackers: Vec<AttackerId>,
}

/// Read-only snapshot describing the full place registry.
#[derive(Clone, Debug, Default)]
pub struct PlaceView {
    snapshots: Vec<PlaceSnapshot>,
}

impl PlaceView {
    /// Creates a new view preserving registry order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<PlaceSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaceSnapshot> {
        self.snapshots.iter()
    }

    /// Finds the snapshot for the provided identifier, if present.
    #[must_use]
    pub fn get(&self, id: PlaceId) -> Option<&PlaceSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.id == id)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlaceSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn registry_order_matches_display_lookup() {
        for kind in DEFENDER_REGISTRY {
            assert_eq!(DefenderKind::from_display_name(kind.display_name()), Some(kind));
        }
        assert_eq!(DefenderKind::from_display_name("Remover"), None);
    }

    #[test]
    fn stat_table_matches_specification() {
        assert_eq!(DefenderKind::Harvester.food_cost(), 2);
        assert_eq!(DefenderKind::Queen.food_cost(), 7);
        assert!((DefenderKind::Fire.base_health() - 3.0).abs() < f32::EPSILON);
        assert!((DefenderKind::Wall.base_health() - 4.0).abs() < f32::EPSILON);
        assert!((DefenderKind::Fire.base_damage() - 3.0).abs() < f32::EPSILON);
        assert!(DefenderKind::Bodyguard.is_container());
        assert!(DefenderKind::Tank.is_container());
        assert!(!DefenderKind::Wall.is_container());
        assert!(DefenderKind::Scuba.is_waterproof());
        assert!(DefenderKind::Queen.is_waterproof());
        assert!(!DefenderKind::Thrower.is_waterproof());
    }

    #[test]
    fn throw_ranges_narrow_per_variant() {
        let short = DefenderKind::Short.throw_range().expect("short band");
        assert!(short.contains(0));
        assert!(short.contains(3));
        assert!(!short.contains(4));

        let long = DefenderKind::Long.throw_range().expect("long band");
        assert!(!long.contains(4));
        assert!(long.contains(5));
        assert!(long.contains(u32::MAX));

        assert!(DefenderKind::Wall.throw_range().is_none());
    }

    #[test]
    fn attacker_profiles_compose_capabilities() {
        let bee = AttackerKind::Bee.profile();
        assert!((bee.damage - 1.0).abs() < f32::EPSILON);
        assert_eq!(bee.actions_per_turn, 1);
        assert!(bee.blockable);
        assert!(bee.waterproof);

        let hornet = AttackerKind::Hornet.profile();
        assert_eq!(hornet.actions_per_turn, 2);
        assert!(hornet.status_immune);

        let ninja = AttackerKind::Ninja.profile();
        assert!(!ninja.blockable);

        let boss = AttackerKind::Boss.profile();
        assert_eq!(boss.actions_per_turn, 2);
        assert!((boss.damage - 2.0).abs() < f32::EPSILON);
        assert_eq!(boss.damage_cap, Some(BOSS_DAMAGE_CAP));
    }

    #[test]
    fn wave_schedule_chains_and_flattens_in_release_order() {
        let mut schedule = WaveSchedule::new();
        let _ = schedule
            .add_wave(AttackerKind::Bee, 3.0, 1, 2)
            .add_wave(AttackerKind::Wasp, 3.0, 0, 1)
            .add_wave(AttackerKind::Bee, 4.0, 1, 1);

        assert_eq!(schedule.total_count(), 4);
        assert_eq!(schedule.last_turn(), Some(1));

        let flattened: Vec<_> = schedule.flattened().collect();
        assert_eq!(flattened.len(), 4);
        assert_eq!(flattened[0], (0, AttackerKind::Wasp, 3.0));
        assert_eq!(flattened[1], (1, AttackerKind::Bee, 3.0));
        assert_eq!(flattened[3], (1, AttackerKind::Bee, 4.0));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn deploy_error_round_trips_through_bincode() {
        assert_round_trip(&DeployError::InsufficientFood {
            required: 7,
            available: 2,
        });
    }

    #[test]
    fn wave_schedule_round_trips_through_bincode() {
        let mut schedule = WaveSchedule::new();
        let _ = schedule.add_wave(AttackerKind::Boss, 30.0, 12, 1);
        assert_round_trip(&schedule);
    }

    #[test]
    fn deploy_error_messages_name_the_failure() {
        let error = DeployError::InsufficientFood {
            required: 7,
            available: 2,
        };
        assert_eq!(
            error.to_string(),
            "not enough food: 7 required, 2 available"
        );
        assert_eq!(
            DeployError::DuplicateQueen.to_string(),
            "a queen has already been deployed"
        );
    }
}
