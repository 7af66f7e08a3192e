//! Tunnel graph construction for the colony.

use colony_defence_core::{AttackerId, DefenderId, PlaceId, PlaceKind};

/// Authoritative record of a single place in the tunnel graph.
#[derive(Clone, Debug)]
pub(crate) struct Place {
    /// Unique display name used by deployment scripts and queries.
    pub(crate) name: String,
    pub(crate) kind: PlaceKind,
    /// Forward link toward the base; `None` only for the base itself.
    pub(crate) exit: Option<PlaceId>,
    /// Derived back-link away from the base, set when a neighbour registers.
    pub(crate) entrance: Option<PlaceId>,
    pub(crate) is_entrance: bool,
    /// Attackers present, in arrival order.
    pub(crate) attackers: Vec<AttackerId>,
    /// Top-level defender occupying the place, if any.
    pub(crate) defender: Option<DefenderId>,
}

impl Place {
    fn new(name: String, kind: PlaceKind, exit: Option<PlaceId>, is_entrance: bool) -> Self {
        Self {
            name,
            kind,
            exit,
            entrance: None,
            is_entrance,
            attackers: Vec::new(),
            defender: None,
        }
    }
}

/// Registration surface handed to layout-construction callbacks.
///
/// The builder starts with the implicit home base and wires every registered
/// place to its exit, deriving the back-link automatically. Topology is
/// frozen once [`crate::Colony::new`] returns.
#[derive(Debug)]
pub struct LayoutBuilder {
    places: Vec<Place>,
    entrances: Vec<PlaceId>,
}

impl LayoutBuilder {
    pub(crate) fn new() -> Self {
        Self {
            places: vec![Place::new("base".to_owned(), PlaceKind::Base, None, false)],
            entrances: Vec::new(),
        }
    }

    /// Handle of the implicit home base terminating every tunnel.
    #[must_use]
    pub fn base(&self) -> PlaceId {
        PlaceId::new(0)
    }

    /// Registers a new place wired to the provided exit.
    ///
    /// Entrance places are those the hive releases attackers into directly.
    /// The exit's back-link is updated so that walking `entrance` links from
    /// any place leads away from the base.
    pub fn register(&mut self, name: &str, kind: PlaceKind, exit: PlaceId, is_entrance: bool) -> PlaceId {
        assert!(
            kind != PlaceKind::Base,
            "only the implicit base may use PlaceKind::Base"
        );
        let exit_index = exit.get() as usize;
        assert!(exit_index < self.places.len(), "exit handle out of range");
        debug_assert!(
            self.places.iter().all(|place| place.name != name),
            "place names must be unique"
        );

        let id = PlaceId::new(self.places.len() as u32);
        self.places[exit_index].entrance = Some(id);
        self.places
            .push(Place::new(name.to_owned(), kind, Some(exit), is_entrance));
        if is_entrance {
            self.entrances.push(id);
        }
        id
    }

    pub(crate) fn into_parts(self) -> (Vec<Place>, Vec<PlaceId>) {
        (self.places, self.entrances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_wires_exit_and_back_link() {
        let mut builder = LayoutBuilder::new();
        let base = builder.base();
        let inner = builder.register("tunnel_0_0", PlaceKind::Tunnel, base, false);
        let outer = builder.register("tunnel_0_1", PlaceKind::Water, inner, true);

        let (places, entrances) = builder.into_parts();
        assert_eq!(places[inner.get() as usize].exit, Some(base));
        assert_eq!(places[inner.get() as usize].entrance, Some(outer));
        assert_eq!(places[outer.get() as usize].exit, Some(inner));
        assert_eq!(places[outer.get() as usize].entrance, None);
        assert_eq!(entrances, vec![outer]);
    }

    #[test]
    fn back_link_matches_exit_for_every_registered_place() {
        let mut builder = LayoutBuilder::new();
        let base = builder.base();
        let mut exit = base;
        for step in 0..4 {
            exit = builder.register(&format!("tunnel_0_{step}"), PlaceKind::Tunnel, exit, step == 3);
        }

        let (places, _) = builder.into_parts();
        for (index, place) in places.iter().enumerate() {
            if let Some(exit) = place.exit {
                assert_eq!(
                    places[exit.get() as usize].entrance,
                    Some(PlaceId::new(index as u32))
                );
            }
        }
    }
}
