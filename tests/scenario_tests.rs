//! Scenario configuration validation tests

use intersection_sim::engine::{
    EngineError, LightTiming, ScenarioConfig, ScenarioId,
};

#[test]
fn test_normal_scenario_parameters() {
    let config = ScenarioConfig::get(ScenarioId::Normal);
    assert_eq!(
        config.timing,
        LightTiming::Cycle {
            green_secs: 10.0,
            orange_secs: 3.0,
            red_secs: 8.0,
        }
    );
    assert_eq!(config.spawn_probability, 0.02);
    assert_eq!(config.max_vehicles, 15);
    assert_eq!(config.speed_range, (1.5, 2.5));
}

#[test]
fn test_rush_hour_scenario_parameters() {
    let config = ScenarioConfig::get(ScenarioId::RushHour);
    assert_eq!(
        config.timing,
        LightTiming::Cycle {
            green_secs: 15.0,
            orange_secs: 2.0,
            red_secs: 5.0,
        }
    );
    assert_eq!(config.spawn_probability, 0.05);
    assert_eq!(config.max_vehicles, 25);
    assert_eq!(config.speed_range, (1.0, 1.8));
}

#[test]
fn test_night_scenario_blinks() {
    let config = ScenarioConfig::get(ScenarioId::Night);
    assert!(config.is_blinking());
    assert_eq!(config.timing, LightTiming::Blink { interval_secs: 1.0 });
    assert_eq!(config.spawn_probability, 0.005);
    assert_eq!(config.max_vehicles, 8);
    assert_eq!(config.speed_range, (1.0, 1.5));
}

#[test]
fn test_manual_scenario_matches_normal_parameters() {
    let manual = ScenarioConfig::get(ScenarioId::Manual);
    let normal = ScenarioConfig::get(ScenarioId::Normal);
    assert_eq!(manual.timing, normal.timing);
    assert_eq!(manual.spawn_probability, normal.spawn_probability);
    assert_eq!(manual.max_vehicles, normal.max_vehicles);
    assert_eq!(manual.speed_range, normal.speed_range);
    assert_ne!(manual.id, normal.id);
}

#[test]
fn test_scenario_id_round_trip() {
    for id in ScenarioId::ALL {
        let parsed: ScenarioId = id.as_str().parse().expect("built-in id must parse");
        assert_eq!(parsed, id);
    }
}

#[test]
fn test_unknown_scenario_is_rejected() {
    let err = ScenarioConfig::resolve("weekend").unwrap_err();
    assert!(matches!(err, EngineError::UnknownScenario(ref s) if s == "weekend"));
}

#[test]
fn test_reaction_distance_multipliers() {
    assert_eq!(
        ScenarioConfig::get(ScenarioId::Normal).reaction_distance(),
        150.0
    );
    assert_eq!(
        ScenarioConfig::get(ScenarioId::RushHour).reaction_distance(),
        120.0
    );
    assert_eq!(
        ScenarioConfig::get(ScenarioId::Night).reaction_distance(),
        180.0
    );
    assert_eq!(
        ScenarioConfig::get(ScenarioId::Manual).reaction_distance(),
        150.0
    );
}

#[test]
fn test_rush_hour_accelerates_slower() {
    let normal = ScenarioConfig::get(ScenarioId::Normal);
    let rush = ScenarioConfig::get(ScenarioId::RushHour);
    assert!(rush.acceleration_step() < normal.acceleration_step());
}
