use colony_defence_core::{PlaceKind, WaveSchedule};
use colony_defence_system_bootstrap::{standard_colony, Layout};
use colony_defence_world::{query, ColonyConfig};

#[test]
fn wet_layout_floods_every_third_place() {
    let colony = standard_colony(
        &WaveSchedule::new(),
        ColonyConfig::default(),
        Layout {
            tunnels: 1,
            length: 9,
            moat_frequency: 3,
        },
    );

    let places = query::place_view(&colony).into_vec();
    // Base plus nine registered places.
    assert_eq!(places.len(), 10);
    for step in 0..9u32 {
        let flooded = (step + 1) % 3 == 0;
        let name = if flooded {
            format!("water_0_{step}")
        } else {
            format!("tunnel_0_{step}")
        };
        let id = query::place_by_name(&colony, &name).expect("registered place");
        let snapshot = places.iter().find(|place| place.id == id).unwrap();
        let expected = if flooded {
            PlaceKind::Water
        } else {
            PlaceKind::Tunnel
        };
        assert_eq!(snapshot.kind, expected);
        assert_eq!(snapshot.is_entrance, step == 8);
    }
}

#[test]
fn dry_layout_has_no_water_and_one_entrance_per_tunnel() {
    let colony = standard_colony(
        &WaveSchedule::new(),
        ColonyConfig::default(),
        Layout {
            tunnels: 3,
            length: 4,
            moat_frequency: 0,
        },
    );

    let places = query::place_view(&colony).into_vec();
    assert_eq!(places.len(), 13);
    assert!(places
        .iter()
        .all(|place| place.kind != PlaceKind::Water));
    assert_eq!(query::entrances(&colony).len(), 3);
}

#[test]
fn every_tunnel_terminates_at_the_base() {
    let colony = standard_colony(
        &WaveSchedule::new(),
        ColonyConfig::default(),
        Layout::default(),
    );

    let places = query::place_view(&colony).into_vec();
    for entrance in query::entrances(&colony) {
        let mut cursor = Some(entrance);
        let mut hops = 0;
        while let Some(id) = cursor {
            let snapshot = places.iter().find(|place| place.id == id).unwrap();
            if snapshot.kind == PlaceKind::Base {
                break;
            }
            cursor = snapshot.exit;
            hops += 1;
            assert!(hops <= 9, "tunnel must reach the base within its length");
        }
    }
}
