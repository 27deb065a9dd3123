//! Traffic scenarios
//!
//! A scenario is an immutable bundle of timing and behavior parameters
//! selected by id. Changing scenario substitutes the whole bundle; nothing
//! is ever mutated in place. The closed set of four configs replaces any
//! per-scenario subclassing with plain data.

use std::fmt;
use std::str::FromStr;

use super::error::EngineError;
use super::types::{ACCELERATION_STEP, BASE_REACTION_DISTANCE};

/// Identifier for one of the built-in traffic scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioId {
    Normal,
    RushHour,
    Night,
    Manual,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 4] = [
        ScenarioId::Normal,
        ScenarioId::RushHour,
        ScenarioId::Night,
        ScenarioId::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::Normal => "normal",
            ScenarioId::RushHour => "rush_hour",
            ScenarioId::Night => "night",
            ScenarioId::Manual => "manual",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(ScenarioId::Normal),
            "rush_hour" => Ok(ScenarioId::RushHour),
            "night" => Ok(ScenarioId::Night),
            "manual" => Ok(ScenarioId::Manual),
            other => Err(EngineError::UnknownScenario(other.to_string())),
        }
    }
}

/// Light timing for a scenario: either a fixed-duration cycle or a blinking
/// orange. The enum guarantees exactly one of the two modes is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightTiming {
    Cycle {
        green_secs: f64,
        orange_secs: f64,
        red_secs: f64,
    },
    Blink {
        interval_secs: f64,
    },
}

/// Parameter bundle for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioConfig {
    pub id: ScenarioId,
    pub timing: LightTiming,
    /// Probability of one spawn attempt succeeding, per tick.
    pub spawn_probability: f64,
    /// Cap on concurrently live vehicles.
    pub max_vehicles: usize,
    /// Uniform range for a newly spawned vehicle's speed, units per tick.
    pub speed_range: (f64, f64),
}

impl ScenarioConfig {
    /// Looks up the config for a scenario id.
    pub fn get(id: ScenarioId) -> Self {
        match id {
            ScenarioId::Normal => ScenarioConfig {
                id,
                timing: LightTiming::Cycle {
                    green_secs: 10.0,
                    orange_secs: 3.0,
                    red_secs: 8.0,
                },
                spawn_probability: 0.02,
                max_vehicles: 15,
                speed_range: (1.5, 2.5),
            },
            ScenarioId::RushHour => ScenarioConfig {
                id,
                timing: LightTiming::Cycle {
                    green_secs: 15.0,
                    orange_secs: 2.0,
                    red_secs: 5.0,
                },
                spawn_probability: 0.05,
                max_vehicles: 25,
                speed_range: (1.0, 1.8),
            },
            ScenarioId::Night => ScenarioConfig {
                id,
                timing: LightTiming::Blink { interval_secs: 1.0 },
                spawn_probability: 0.005,
                max_vehicles: 8,
                speed_range: (1.0, 1.5),
            },
            ScenarioId::Manual => ScenarioConfig {
                id,
                timing: LightTiming::Cycle {
                    green_secs: 10.0,
                    orange_secs: 3.0,
                    red_secs: 8.0,
                },
                spawn_probability: 0.02,
                max_vehicles: 15,
                speed_range: (1.5, 2.5),
            },
        }
    }

    /// Resolves a scenario id string to its config.
    pub fn resolve(id: &str) -> Result<Self, EngineError> {
        Ok(Self::get(id.parse()?))
    }

    pub fn min_speed(&self) -> f64 {
        self.speed_range.0
    }

    pub fn max_speed(&self) -> f64 {
        self.speed_range.1
    }

    /// Whether this scenario runs the lights in blinking mode.
    pub fn is_blinking(&self) -> bool {
        matches!(self.timing, LightTiming::Blink { .. })
    }

    /// Distance from the intersection at which vehicles start reacting to
    /// the light. Rush-hour drivers react later, night drivers earlier.
    pub fn reaction_distance(&self) -> f64 {
        let multiplier = match self.id {
            ScenarioId::Normal | ScenarioId::Manual => 1.0,
            ScenarioId::RushHour => 0.8,
            ScenarioId::Night => 1.2,
        };
        BASE_REACTION_DISTANCE * multiplier
    }

    /// Per-tick speed gain while accelerating. Congestion slows pull-away
    /// during rush hour.
    pub fn acceleration_step(&self) -> f64 {
        match self.id {
            ScenarioId::RushHour => ACCELERATION_STEP * 0.7,
            _ => ACCELERATION_STEP,
        }
    }
}
