#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative colony state and turn engine for Colony Defence.
//!
//! The colony owns every arena (places, defenders, attackers), the food
//! balance, and the hive schedule. Mutations happen only through the
//! deploy-phase [`apply`] entry point and the phase helpers driven by
//! [`advance_turn`]; systems and adapters observe state through the
//! [`query`] module and the [`Event`] stream.

mod layout;

use std::collections::BTreeMap;

use colony_defence_core::{
    AttackerId, AttackerKind, Command, DefenderId, DefenderKind, DeployError, Event, Outcome,
    PlaceId, PlaceKind, WaveSchedule, WELCOME_BANNER,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use layout::LayoutBuilder;

/// Food available to a fresh colony unless configured otherwise.
pub const DEFAULT_STARTING_FOOD: u32 = 2;

const DEFAULT_RNG_SEED: u64 = 0x41b3_7c2d_9e55_a01f;

/// Turns a hungry defender spends chewing after devouring an attacker.
const CHEW_TURNS: u32 = 3;

/// Configuration parameters required to construct a colony.
#[derive(Clone, Copy, Debug)]
pub struct ColonyConfig {
    /// Food balance the colony starts with.
    pub starting_food: u32,
    /// Seed for the deterministic RNG driving entrance and target selection.
    pub rng_seed: u64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            starting_food: DEFAULT_STARTING_FOOD,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

#[derive(Clone, Debug)]
struct Defender {
    kind: DefenderKind,
    health: f32,
    damage: f32,
    place: PlaceId,
    nested: Option<DefenderId>,
    doubled: bool,
    chew_countdown: u32,
}

#[derive(Clone, Debug)]
struct Attacker {
    kind: AttackerKind,
    health: f32,
    /// `None` while the attacker waits in the hive.
    place: Option<PlaceId>,
}

/// How a deploying defender will occupy its target place.
enum JoinSlot {
    /// The slot is empty; the unit becomes the top-level defender.
    TopLevel,
    /// An existing container shelters the unit.
    NestWithin(DefenderId),
    /// The deploying container shelters the existing defender.
    Swallow(DefenderId),
}

/// Represents the authoritative Colony Defence game state.
#[derive(Debug)]
pub struct Colony {
    banner: &'static str,
    places: Vec<layout::Place>,
    entrances: Vec<PlaceId>,
    defenders: Vec<Option<Defender>>,
    attackers: Vec<Option<Attacker>>,
    /// Active attackers in release order; drives attacker resolution.
    active: Vec<AttackerId>,
    /// Unreleased attackers grouped by scheduled release turn.
    hive: BTreeMap<u32, Vec<AttackerId>>,
    food: u32,
    turn: u32,
    /// Singleton queen handle; sticky once set, even past her removal.
    queen: Option<DefenderId>,
    rng: ChaCha8Rng,
}

impl Colony {
    /// Creates a colony from a wave schedule, configuration, and a layout
    /// callback that registers the tunnel topology.
    ///
    /// Every scheduled attacker is pre-registered in the hive's holding
    /// pool; the topology never changes after this returns.
    #[must_use]
    pub fn new<F>(schedule: &WaveSchedule, config: ColonyConfig, build: F) -> Self
    where
        F: FnOnce(&mut LayoutBuilder),
    {
        let mut builder = LayoutBuilder::new();
        build(&mut builder);
        let (places, entrances) = builder.into_parts();

        let mut attackers = Vec::new();
        let mut hive: BTreeMap<u32, Vec<AttackerId>> = BTreeMap::new();
        for (turn, kind, health) in schedule.flattened() {
            let id = AttackerId::new(attackers.len() as u32);
            attackers.push(Some(Attacker {
                kind,
                health,
                place: None,
            }));
            hive.entry(turn).or_default().push(id);
        }

        Self {
            banner: WELCOME_BANNER,
            places,
            entrances,
            defenders: Vec::new(),
            attackers,
            active: Vec::new(),
            hive,
            food: config.starting_food,
            turn: 0,
            queen: None,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Constructs and places one defender, deducting its food cost.
    ///
    /// Rejections leave the colony untouched. The queen variant may be
    /// constructed once per game; the restriction survives her removal.
    pub fn deploy_defender(
        &mut self,
        place: PlaceId,
        kind: DefenderKind,
        out_events: &mut Vec<Event>,
    ) -> Result<DefenderId, DeployError> {
        let place_index = place.get() as usize;
        let slot = match self.places.get(place_index) {
            Some(target) if target.kind != PlaceKind::Base => target.defender,
            _ => return Err(DeployError::UnknownPlace),
        };

        let cost = kind.food_cost();
        if self.food < cost {
            return Err(DeployError::InsufficientFood {
                required: cost,
                available: self.food,
            });
        }
        if kind == DefenderKind::Queen && self.queen.is_some() {
            return Err(DeployError::DuplicateQueen);
        }

        let join = match slot {
            None => JoinSlot::TopLevel,
            Some(existing) => {
                let occupant = self.defender(existing);
                if occupant.kind.is_container()
                    && occupant.nested.is_none()
                    && !kind.is_container()
                {
                    JoinSlot::NestWithin(existing)
                } else if kind.is_container() && !occupant.kind.is_container() {
                    JoinSlot::Swallow(existing)
                } else {
                    return Err(DeployError::Occupied);
                }
            }
        };

        let id = DefenderId::new(self.defenders.len() as u32);
        self.defenders.push(Some(Defender {
            kind,
            health: kind.base_health(),
            damage: kind.base_damage(),
            place,
            nested: None,
            doubled: false,
            chew_countdown: 0,
        }));

        match join {
            JoinSlot::TopLevel => self.places[place_index].defender = Some(id),
            JoinSlot::NestWithin(container) => {
                self.defender_mut(container).nested = Some(id);
            }
            JoinSlot::Swallow(ward) => {
                self.defender_mut(id).nested = Some(ward);
                self.places[place_index].defender = Some(id);
            }
        }

        if kind == DefenderKind::Queen {
            self.queen = Some(id);
        }
        self.food -= cost;
        out_events.push(Event::DefenderDeployed {
            defender: id,
            kind,
            place,
        });

        // Flooded places drown units that cannot swim; the cost stays spent.
        if self.places[place_index].kind == PlaceKind::Water && !kind.is_waterproof() {
            let drown = self.defender(id).health;
            let outcome = self.strike_defender(id, drown, out_events);
            debug_assert_eq!(outcome, Outcome::Continue, "waterproof queen cannot drown");
        }

        Ok(id)
    }

    /// Removes the top-level defender at the place, promoting any nested
    /// unit. No-op when the place is empty or unknown. Food is not refunded.
    pub fn remove_defender(&mut self, place: PlaceId, out_events: &mut Vec<Event>) {
        let Some(target) = self.places.get(place.get() as usize) else {
            return;
        };
        let Some(id) = target.defender else {
            return;
        };
        self.release_defender(id);
        let _ = self.defenders[id.get() as usize].take();
        out_events.push(Event::DefenderRemoved {
            defender: id,
            place,
        });
    }

    /// Applies one damage instance to an attacker through the single
    /// health-mutation chokepoint, honouring the variant's damage cap and
    /// removing the unit on death.
    fn strike_attacker(&mut self, id: AttackerId, raw: f32, out_events: &mut Vec<Event>) {
        let slot = id.get() as usize;
        let Some(attacker) = self.attackers[slot].as_mut() else {
            return;
        };
        let amount = match attacker.kind.profile().damage_cap {
            Some(cap) => raw * cap / (cap + raw),
            None => raw,
        };
        attacker.health -= amount;
        let felled = attacker.health <= 0.0;
        out_events.push(Event::AttackerDamaged {
            attacker: id,
            amount,
        });
        if felled {
            self.cull_attacker(id, out_events);
        }
    }

    fn cull_attacker(&mut self, id: AttackerId, out_events: &mut Vec<Event>) {
        let Some(attacker) = self.attackers[id.get() as usize].take() else {
            return;
        };
        if let Some(place) = attacker.place {
            self.places[place.get() as usize]
                .attackers
                .retain(|candidate| *candidate != id);
        }
        self.active.retain(|candidate| *candidate != id);
        out_events.push(Event::AttackerFelled {
            attacker: id,
            kind: attacker.kind,
        });
    }

    /// Applies one damage instance to a defender through the single
    /// health-mutation chokepoint.
    ///
    /// Fire defenders distribute the incoming amount (and, when the hit is
    /// lethal, their splash damage) to co-located attackers before their own
    /// health drops. The queen's death terminates the game in a loss.
    fn strike_defender(
        &mut self,
        id: DefenderId,
        amount: f32,
        out_events: &mut Vec<Event>,
    ) -> Outcome {
        let slot = id.get() as usize;
        let Some(defender) = self.defenders[slot].as_ref() else {
            return Outcome::Continue;
        };

        if defender.kind == DefenderKind::Fire {
            let place = defender.place.get() as usize;
            let lethal = amount >= defender.health;
            let splash = defender.damage;
            let struck: Vec<AttackerId> = self.places[place].attackers.clone();
            for attacker in struck {
                self.strike_attacker(attacker, amount, out_events);
            }
            if lethal {
                let struck: Vec<AttackerId> = self.places[place].attackers.clone();
                for attacker in struck {
                    self.strike_attacker(attacker, splash, out_events);
                }
            }
        }

        let Some(defender) = self.defenders[slot].as_mut() else {
            return Outcome::Continue;
        };
        defender.health -= amount;
        let felled = defender.health <= 0.0;
        out_events.push(Event::DefenderDamaged {
            defender: id,
            amount,
        });
        if felled {
            self.release_defender(id);
            if let Some(defender) = self.defenders[slot].take() {
                out_events.push(Event::DefenderFelled {
                    defender: id,
                    kind: defender.kind,
                });
            }
            if self.queen == Some(id) {
                return Outcome::Loss;
            }
        }
        Outcome::Continue
    }

    /// Detaches a defender from its place or sheltering container.
    ///
    /// A top-level container hands its slot to the nested unit. Asking a
    /// container to release a unit it does not hold violates the occupancy
    /// contract and aborts.
    fn release_defender(&mut self, id: DefenderId) {
        let Some(defender) = self.defenders[id.get() as usize].as_ref() else {
            return;
        };
        let place = defender.place.get() as usize;
        let nested = defender.nested;
        if self.places[place].defender == Some(id) {
            self.places[place].defender = nested;
            return;
        }

        let top = self.places[place]
            .defender
            .expect("defender released from a place it does not occupy");
        let container = self.defenders[top.get() as usize]
            .as_mut()
            .expect("place holds a live defender handle");
        assert_eq!(
            container.nested,
            Some(id),
            "container does not hold the released defender"
        );
        container.nested = None;
    }

    fn defender(&self, id: DefenderId) -> &Defender {
        self.defenders[id.get() as usize]
            .as_ref()
            .expect("live defender handle")
    }

    fn defender_mut(&mut self, id: DefenderId) -> &mut Defender {
        self.defenders[id.get() as usize]
            .as_mut()
            .expect("live defender handle")
    }

    /// Release phase: move every attacker scheduled for the current turn
    /// from the hive into an entrance chosen uniformly at random.
    fn release_attackers(&mut self, out_events: &mut Vec<Event>) {
        if self.entrances.is_empty() {
            return;
        }
        let Some(wave) = self.hive.remove(&self.turn) else {
            return;
        };
        for id in wave {
            let Some(entrance) = self.entrances.choose(&mut self.rng).copied() else {
                continue;
            };
            let kind = match self.attackers[id.get() as usize].as_mut() {
                Some(attacker) => {
                    attacker.place = Some(entrance);
                    attacker.kind
                }
                None => continue,
            };
            self.places[entrance.get() as usize].attackers.push(id);
            self.active.push(id);
            out_events.push(Event::AttackerReleased {
                attacker: id,
                kind,
                place: entrance,
            });
            self.apply_join_hazard(id, entrance, out_events);
        }
    }

    /// Place-variant join side effect: flooded places drown attackers that
    /// cannot swim. Every current attacker variant is waterproof, but the
    /// capability stays per-profile.
    fn apply_join_hazard(&mut self, id: AttackerId, place: PlaceId, out_events: &mut Vec<Event>) {
        if self.places[place.get() as usize].kind != PlaceKind::Water {
            return;
        }
        let drown = match self.attackers[id.get() as usize].as_ref() {
            Some(attacker) if !attacker.kind.profile().waterproof => attacker.health,
            _ => return,
        };
        self.strike_attacker(id, drown, out_events);
    }

    /// Resolve phase: defenders act in place-registry order, then attackers
    /// act in release order. Returns the termination state.
    fn resolve_actions(&mut self, out_events: &mut Vec<Event>) -> Outcome {
        for place_index in 0..self.places.len() {
            let Some(id) = self.places[place_index].defender else {
                continue;
            };
            self.defender_act(id, out_events);
        }

        let roster: Vec<AttackerId> = self.active.clone();
        for id in roster {
            let alive = self.attackers[id.get() as usize]
                .as_ref()
                .is_some_and(|attacker| attacker.health > 0.0);
            if !alive {
                continue;
            }
            if self.attacker_act(id, out_events) == Outcome::Loss {
                return Outcome::Loss;
            }
        }

        if self.active.is_empty() && self.hive.is_empty() {
            Outcome::Win
        } else {
            Outcome::Continue
        }
    }

    fn defender_act(&mut self, id: DefenderId, out_events: &mut Vec<Event>) {
        let Some(defender) = self.defenders[id.get() as usize].as_ref() else {
            return;
        };
        if defender.health <= 0.0 {
            return;
        }
        let kind = defender.kind;
        let place = defender.place;
        let damage = defender.damage;
        let nested = defender.nested;

        match kind {
            DefenderKind::Harvester => {
                self.food = self.food.saturating_add(1);
                out_events.push(Event::FoodProduced {
                    amount: 1,
                    total: self.food,
                });
            }
            DefenderKind::Thrower
            | DefenderKind::Short
            | DefenderKind::Long
            | DefenderKind::Scuba => self.throw(id, out_events),
            DefenderKind::Queen => {
                self.throw(id, out_events);
                self.double_down_tunnel(place, out_events);
            }
            DefenderKind::Hungry => self.hungry_act(id, out_events),
            DefenderKind::Bodyguard => {
                if let Some(ward) = nested {
                    self.defender_act(ward, out_events);
                }
            }
            DefenderKind::Tank => {
                if let Some(ward) = nested {
                    self.defender_act(ward, out_events);
                }
                let struck: Vec<AttackerId> = self.places[place.get() as usize].attackers.clone();
                for attacker in struck {
                    self.strike_attacker(attacker, damage, out_events);
                }
            }
            DefenderKind::Fire | DefenderKind::Wall => {}
        }
    }

    /// Ranged attack: scan hop-by-hop from the defender's place toward the
    /// hive and strike one attacker, chosen uniformly at random, in the
    /// nearest occupied place inside the variant's band.
    fn throw(&mut self, id: DefenderId, out_events: &mut Vec<Event>) {
        let defender = self.defender(id);
        let Some(band) = defender.kind.throw_range() else {
            return;
        };
        let damage = defender.damage;
        let origin = defender.place;

        let mut hops = 0u32;
        let mut cursor = Some(origin);
        while let Some(place) = cursor {
            let place_index = place.get() as usize;
            let occupied = band.contains(hops) && !self.places[place_index].attackers.is_empty();
            if occupied {
                let target = self.places[place_index]
                    .attackers
                    .choose(&mut self.rng)
                    .copied();
                if let Some(target) = target {
                    self.strike_attacker(target, damage, out_events);
                }
                return;
            }
            hops = hops.saturating_add(1);
            cursor = self.places[place_index].entrance;
        }
    }

    fn hungry_act(&mut self, id: DefenderId, out_events: &mut Vec<Event>) {
        let defender = self.defender_mut(id);
        if defender.chew_countdown > 0 {
            defender.chew_countdown -= 1;
            return;
        }
        let place = defender.place.get() as usize;
        let target = self.places[place].attackers.choose(&mut self.rng).copied();
        let Some(target) = target else {
            return;
        };
        let meal = self.attackers[target.get() as usize]
            .as_ref()
            .map_or(0.0, |attacker| attacker.health);
        self.strike_attacker(target, meal, out_events);
        self.defender_mut(id).chew_countdown = CHEW_TURNS;
    }

    /// Queen boost: walk exit links toward the base and double the damage of
    /// every top-level defender not yet doubled.
    fn double_down_tunnel(&mut self, from: PlaceId, out_events: &mut Vec<Event>) {
        let mut cursor = self.places[from.get() as usize].exit;
        while let Some(place) = cursor {
            let place_index = place.get() as usize;
            if let Some(id) = self.places[place_index].defender {
                let defender = self.defender_mut(id);
                if !defender.doubled {
                    defender.damage *= 2.0;
                    defender.doubled = true;
                    out_events.push(Event::DamageDoubled { defender: id });
                }
            }
            cursor = self.places[place_index].exit;
        }
    }

    fn attacker_act(&mut self, id: AttackerId, out_events: &mut Vec<Event>) -> Outcome {
        let slot = id.get() as usize;
        let profile = match self.attackers[slot].as_ref() {
            Some(attacker) => attacker.kind.profile(),
            None => return Outcome::Continue,
        };

        for _ in 0..profile.actions_per_turn {
            let Some(attacker) = self.attackers[slot].as_ref() else {
                break;
            };
            if attacker.health <= 0.0 {
                break;
            }
            let Some(place) = attacker.place else {
                break;
            };
            let place_index = place.get() as usize;

            if profile.blockable {
                if let Some(blocker) = self.places[place_index].defender {
                    if self.strike_defender(blocker, profile.damage, out_events) == Outcome::Loss {
                        return Outcome::Loss;
                    }
                    continue;
                }
            }

            let Some(exit) = self.places[place_index].exit else {
                continue;
            };
            self.places[place_index]
                .attackers
                .retain(|candidate| *candidate != id);
            if self.places[exit.get() as usize].kind == PlaceKind::Base {
                out_events.push(Event::BaseBreached { attacker: id });
                return Outcome::Loss;
            }
            if let Some(attacker) = self.attackers[slot].as_mut() {
                attacker.place = Some(exit);
            }
            self.places[exit.get() as usize].attackers.push(id);
            out_events.push(Event::AttackerAdvanced {
                attacker: id,
                from: place,
                to: exit,
            });
            self.apply_join_hazard(id, exit, out_events);
        }
        Outcome::Continue
    }
}

/// Applies the provided deploy-phase command, mutating state
/// deterministically and broadcasting the resulting events.
pub fn apply(colony: &mut Colony, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::DeployDefender { place, kind } => {
            if let Err(reason) = colony.deploy_defender(place, kind, out_events) {
                out_events.push(Event::DeployRejected {
                    kind,
                    place,
                    reason,
                });
            }
        }
        Command::RemoveDefender { place } => colony.remove_defender(place, out_events),
    }
}

/// Advances the simulation by one turn.
///
/// Phases run in strict order: the hive releases scheduled attackers, the
/// deployment hook runs once and its commands are applied, then defenders
/// and attackers resolve their actions. The turn counter increments only
/// when the simulation continues; terminal outcomes are also broadcast as
/// [`Event::GameEnded`].
pub fn advance_turn<F>(colony: &mut Colony, mut deploy: F, out_events: &mut Vec<Event>) -> Outcome
where
    F: FnMut(&Colony, &mut Vec<Command>),
{
    colony.release_attackers(out_events);

    let mut commands = Vec::new();
    deploy(colony, &mut commands);
    for command in commands {
        apply(colony, command, out_events);
    }

    let outcome = colony.resolve_actions(out_events);
    match outcome {
        Outcome::Continue => colony.turn = colony.turn.saturating_add(1),
        terminal => out_events.push(Event::GameEnded { outcome: terminal }),
    }
    outcome
}

/// Query functions that provide read-only access to the colony state.
pub mod query {
    use super::Colony;
    use colony_defence_core::{
        AttackerId, AttackerSnapshot, AttackerView, DefenderId, DefenderSnapshot, DefenderView,
        PlaceId, PlaceSnapshot, PlaceView,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(colony: &Colony) -> &'static str {
        colony.banner
    }

    /// Current food balance.
    #[must_use]
    pub fn food(colony: &Colony) -> u32 {
        colony.food
    }

    /// Current simulated turn number.
    #[must_use]
    pub fn turn(colony: &Colony) -> u32 {
        colony.turn
    }

    /// Places the hive releases attackers into.
    #[must_use]
    pub fn entrances(colony: &Colony) -> Vec<PlaceId> {
        colony.entrances.clone()
    }

    /// Number of scheduled attackers still waiting in the hive.
    #[must_use]
    pub fn pending_attackers(colony: &Colony) -> u32 {
        colony.hive.values().map(|wave| wave.len() as u32).sum()
    }

    /// Reports whether the queen has ever been deployed this game.
    #[must_use]
    pub fn queen_deployed(colony: &Colony) -> bool {
        colony.queen.is_some()
    }

    /// Resolves a place's unique name to its handle.
    #[must_use]
    pub fn place_by_name(colony: &Colony, name: &str) -> Option<PlaceId> {
        colony
            .places
            .iter()
            .position(|place| place.name == name)
            .map(|index| PlaceId::new(index as u32))
    }

    /// Top-level defender at the provided place, if any.
    #[must_use]
    pub fn defender_at(colony: &Colony, place: PlaceId) -> Option<DefenderId> {
        colony.places.get(place.get() as usize)?.defender
    }

    /// Attackers present at the provided place, in arrival order.
    #[must_use]
    pub fn attackers_at(colony: &Colony, place: PlaceId) -> Vec<AttackerId> {
        colony
            .places
            .get(place.get() as usize)
            .map(|target| target.attackers.clone())
            .unwrap_or_default()
    }

    /// Captures a read-only view of the full place registry.
    #[must_use]
    pub fn place_view(colony: &Colony) -> PlaceView {
        let snapshots = colony
            .places
            .iter()
            .enumerate()
            .map(|(index, place)| PlaceSnapshot {
                id: PlaceId::new(index as u32),
                name: place.name.clone(),
                kind: place.kind,
                exit: place.exit,
                entrance: place.entrance,
                is_entrance: place.is_entrance,
                defender: place.defender,
                attackers: place.attackers.clone(),
            })
            .collect();
        PlaceView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of every live defender, nested included.
    #[must_use]
    pub fn defender_view(colony: &Colony) -> DefenderView {
        let snapshots = colony
            .defenders
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| {
                slot.as_ref().map(|defender| DefenderSnapshot {
                    id: DefenderId::new(index as u32),
                    kind: defender.kind,
                    health: defender.health,
                    damage: defender.damage,
                    place: defender.place,
                    nested: defender.nested,
                    doubled: defender.doubled,
                })
            })
            .collect();
        DefenderView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of every active attacker.
    #[must_use]
    pub fn attacker_view(colony: &Colony) -> AttackerView {
        let snapshots = colony
            .active
            .iter()
            .filter_map(|id| {
                colony.attackers[id.get() as usize]
                    .as_ref()
                    .map(|attacker| AttackerSnapshot {
                        id: *id,
                        kind: attacker.kind,
                        health: attacker.health,
                        place: attacker.place,
                    })
            })
            .collect();
        AttackerView::from_snapshots(snapshots)
    }
}
