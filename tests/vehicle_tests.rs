//! Vehicle kinematics and car-following tests

use intersection_sim::engine::{
    Approach, BehaviorState, LightColor, NeighborView, Position, ScenarioConfig, ScenarioId,
    Vehicle, VehicleFleet, VehicleId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn normal() -> ScenarioConfig {
    ScenarioConfig::get(ScenarioId::Normal)
}

fn east_vehicle(x: f64, speed: f64) -> Vehicle {
    let mut v = Vehicle::new(VehicleId(0), Approach::East, 1, speed);
    v.position = Position::new(x, 0.0);
    v
}

#[test]
fn test_spawn_positions_per_approach() {
    let east = Vehicle::new(VehicleId(0), Approach::East, 1, 2.0);
    assert_eq!(east.position, Position::new(-400.0, 0.0));

    let west = Vehicle::new(VehicleId(1), Approach::West, 1, 2.0);
    assert_eq!(west.position, Position::new(400.0, 0.0));

    let north = Vehicle::new(VehicleId(2), Approach::North, 0, 2.0);
    assert_eq!(north.position, Position::new(-50.0, -300.0));

    let south = Vehicle::new(VehicleId(3), Approach::South, 2, 2.0);
    assert_eq!(south.position, Position::new(50.0, 300.0));
}

#[test]
fn test_red_light_stops_vehicle_in_stop_zone() {
    let config = normal();
    let mut v = east_vehicle(-40.0, 2.0);

    for _ in 0..10 {
        assert!(v.update(&config, LightColor::Red, &[]));
    }

    assert_eq!(v.state, BehaviorState::Stopped);
    assert_eq!(v.speed, 0.0);
    assert_eq!(v.waiting_ticks, 10);
    // Emergency braking keeps it short of the intersection.
    assert!(v.position.x < 0.0, "stopped past the line: {}", v.position);
}

#[test]
fn test_red_light_slows_vehicle_in_approach_zone() {
    let config = normal();
    let mut v = east_vehicle(-100.0, 2.0);

    v.update(&config, LightColor::Red, &[]);

    assert_eq!(v.state, BehaviorState::Slowing);
    assert!(v.target_speed < 2.0);
    assert!(v.target_speed > 0.0);
    assert_eq!(v.speed, 1.8);
    assert_eq!(v.waiting_ticks, 0);
}

#[test]
fn test_red_light_ignored_beyond_reaction_distance() {
    let config = normal();
    let mut v = east_vehicle(-200.0, 2.0);

    v.update(&config, LightColor::Red, &[]);

    assert_eq!(v.state, BehaviorState::Accelerating);
    assert_eq!(v.target_speed, config.max_speed());
}

#[test]
fn test_green_light_restarts_stopped_vehicle() {
    let config = normal();
    let mut v = east_vehicle(-100.0, 0.0);
    v.state = BehaviorState::Stopped;
    v.waiting_ticks = 30;

    v.update(&config, LightColor::Green, &[]);

    assert_eq!(v.state, BehaviorState::Accelerating);
    assert_eq!(v.waiting_ticks, 0);
    assert!(v.speed > 0.0);
    assert_eq!(v.target_speed, config.max_speed());
}

#[test]
fn test_green_light_moves_vehicle_near_intersection() {
    // A stopped vehicle already inside the clearance still gets a green
    // target instead of staying pinned at zero.
    let config = normal();
    let mut v = east_vehicle(-30.0, 0.0);
    v.state = BehaviorState::Stopped;

    v.update(&config, LightColor::Green, &[]);

    assert_eq!(v.state, BehaviorState::Moving);
    assert_eq!(v.target_speed, config.max_speed());
    assert!(v.speed > 0.0);
}

#[test]
fn test_close_follower_brakes_hard() {
    let config = normal();
    let mut v = east_vehicle(-200.0, 2.0);
    let leader = NeighborView {
        id: VehicleId(9),
        position: Position::new(-180.0, 0.0),
        speed: 1.0,
    };

    v.update(&config, LightColor::Green, &[leader]);

    assert_eq!(v.state, BehaviorState::Slowing);
    // Half the leader's speed, floored at 0.5.
    assert_eq!(v.target_speed, 0.5);
}

#[test]
fn test_follower_matches_leader_inside_safe_distance() {
    let config = normal();
    let mut v = east_vehicle(-200.0, 2.5);
    let leader = NeighborView {
        id: VehicleId(9),
        position: Position::new(-155.0, 0.0),
        speed: 2.0,
    };

    v.update(&config, LightColor::Green, &[leader]);

    assert_eq!(v.state, BehaviorState::Slowing);
    assert_eq!(v.target_speed, 2.0 * 0.8);
}

#[test]
fn test_distant_leader_is_ignored() {
    let config = normal();
    let mut v = east_vehicle(-400.0, 2.0);
    let leader = NeighborView {
        id: VehicleId(9),
        position: Position::new(-200.0, 0.0),
        speed: 0.5,
    };

    v.update(&config, LightColor::Green, &[leader]);

    assert_eq!(v.target_speed, config.max_speed());
}

#[test]
fn test_orange_slows_but_never_stops() {
    let config = normal();
    let mut committed = east_vehicle(-50.0, 2.0);
    committed.update(&config, LightColor::Orange, &[]);
    assert_eq!(committed.state, BehaviorState::Slowing);
    assert_eq!(committed.target_speed, 2.0 * 0.7);

    let mut approaching = east_vehicle(-100.0, 2.0);
    approaching.update(&config, LightColor::Orange, &[]);
    assert_eq!(approaching.state, BehaviorState::Slowing);
    assert_eq!(approaching.target_speed, 2.0 * 0.5);
    assert!(approaching.target_speed > 0.0);
}

#[test]
fn test_blinking_orange_is_free_cruising() {
    let config = ScenarioConfig::get(ScenarioId::Night);
    let mut v = east_vehicle(-40.0, 1.2);

    v.update(&config, LightColor::OrangeBlinking, &[]);

    assert_ne!(v.state, BehaviorState::Stopped);
    assert_eq!(v.target_speed, config.max_speed());
    assert!(v.speed > 1.2);
}

#[test]
fn test_speed_clamps_to_new_scenario_range() {
    // A vehicle spawned under normal keeps its speed legal after a switch
    // to rush hour's lower cap.
    let rush = ScenarioConfig::get(ScenarioId::RushHour);
    let mut v = east_vehicle(-300.0, 2.5);

    v.update(&rush, LightColor::Green, &[]);

    assert_eq!(v.speed, rush.max_speed());
}

#[test]
fn test_off_scene_vehicle_reports_removal() {
    let config = normal();
    let mut v = east_vehicle(451.0, 2.0);
    let before = v.position;

    assert!(!v.update(&config, LightColor::Green, &[]));
    assert_eq!(v.position, before);
}

#[test]
fn test_red_light_approach_end_to_end() {
    // A vehicle crossing the whole east approach against a permanent red
    // must brake to a stop short of the intersection and stay there.
    let config = normal();
    let mut v = Vehicle::new(VehicleId(0), Approach::East, 1, 2.5);

    for _ in 0..200 {
        assert!(v.update(&config, LightColor::Red, &[]));
    }

    assert_eq!(v.state, BehaviorState::Stopped);
    assert_eq!(v.speed, 0.0);
    assert!(v.waiting_ticks > 0);
    assert!(
        v.position.x < 0.0,
        "crossed the intersection on red: {}",
        v.position
    );
    assert!(v.distance_to_intersection() < config.reaction_distance());
}

#[test]
fn test_fleet_spawn_respects_capacity() {
    let config = normal();
    let mut fleet = VehicleFleet::new();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..config.max_vehicles {
        assert!(fleet.spawn(&config, &mut rng).is_some());
    }
    assert_eq!(fleet.len(), config.max_vehicles);
    assert!(fleet.spawn(&config, &mut rng).is_none());
    assert_eq!(fleet.spawned(), config.max_vehicles as u64);
}

#[test]
fn test_fleet_ids_are_unique_and_increasing() {
    let mut fleet = VehicleFleet::new();
    let a = fleet.spawn_on(Approach::East, 0, 2.0);
    let b = fleet.spawn_on(Approach::West, 1, 2.0);
    let c = fleet.spawn_on(Approach::North, 2, 2.0);
    assert!(a < b && b < c);

    fleet.remove(b);
    let d = fleet.spawn_on(Approach::South, 0, 2.0);
    assert!(d > c, "ids must never be reused");
}

#[test]
fn test_fleet_clear_resets_counters_and_ids() {
    let mut fleet = VehicleFleet::new();
    fleet.spawn_on(Approach::East, 0, 2.0);
    let west = fleet.spawn_on(Approach::West, 1, 2.0);
    fleet.remove(west);

    fleet.clear();

    assert!(fleet.is_empty());
    assert_eq!(fleet.spawned(), 0);
    assert_eq!(fleet.removed(), 0);
    // A cleared fleet starts a fresh run, ids included.
    assert_eq!(fleet.spawn_on(Approach::North, 0, 1.5), VehicleId(0));
}

#[test]
fn test_fleet_query_maps_mirror_live_vehicles() {
    let config = normal();
    let mut fleet = VehicleFleet::new();
    let east = fleet.spawn_on(Approach::East, 0, 2.0);
    let north = fleet.spawn_on(Approach::North, 1, 1.8);
    for _ in 0..5 {
        fleet.update(&config, LightColor::Green);
    }

    let positions = fleet.positions();
    let approaches = fleet.approaches();
    assert_eq!(positions.len(), fleet.len());
    assert_eq!(approaches.len(), fleet.len());
    for v in fleet.iter() {
        assert_eq!(positions[&v.id], v.position);
        assert_eq!(approaches[&v.id], v.approach);
    }
    assert_eq!(approaches[&east], Approach::East);
    assert_eq!(approaches[&north], Approach::North);
    assert!(
        positions[&east].x > -400.0,
        "query map must reflect post-update positions"
    );
}

#[test]
fn test_fleet_removes_vehicle_after_crossing_scene() {
    let config = normal();
    let mut fleet = VehicleFleet::new();
    fleet.spawn_on(Approach::East, 1, 2.5);

    let mut removed = Vec::new();
    for _ in 0..1000 {
        removed.extend(fleet.update(&config, LightColor::Green));
        if fleet.is_empty() {
            break;
        }
    }

    assert!(fleet.is_empty(), "vehicle never left the scene");
    assert_eq!(removed.len(), 1);
    assert_eq!(fleet.removed(), 1);
    assert!(removed[0].position.x > 450.0);
    assert!(removed[0].distance_traveled > 800.0);
}

#[test]
fn test_fleet_follower_tracks_leader_on_same_approach() {
    let config = normal();
    let mut fleet = VehicleFleet::new();

    let leader = fleet.spawn_on(Approach::East, 1, 2.5);
    for _ in 0..20 {
        fleet.update(&config, LightColor::Green);
    }
    // Leader is now 50 units downstream; a fresh spawn sits inside the
    // safe-distance band behind it.
    let follower = fleet.spawn_on(Approach::East, 1, 2.5);
    fleet.update(&config, LightColor::Green);

    let f = fleet.get(follower).expect("follower still live");
    assert_eq!(f.state, BehaviorState::Slowing);
    assert_eq!(f.target_speed, 2.5 * 0.8);

    // The leader itself keeps cruising; vehicles behind are irrelevant.
    let l = fleet.get(leader).expect("leader still live");
    assert_eq!(l.target_speed, config.max_speed());
}
