//! Simulation event stream
//!
//! The clock records every externally observable state change as a
//! `SimEvent`. Events accumulate in an internal queue until the embedder
//! drains them; the headless runner logs them, a UI could render them.

use std::fmt;

use super::clock::SimulationStats;
use super::scenario::ScenarioId;
use super::types::{LightColor, Position, VehicleId};

/// An observable state change produced by the simulation clock.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    SimulationStarted { scenario: ScenarioId },
    SimulationPaused,
    SimulationResumed,
    SimulationStopped { stats: SimulationStats },
    SimulationReset,
    LightChanged {
        from: LightColor,
        to: LightColor,
        manual: bool,
    },
    VehicleSpawned {
        id: VehicleId,
        position: Position,
        speed: f64,
    },
    VehicleRemoved {
        id: VehicleId,
        position: Position,
        speed: f64,
        distance_traveled: f64,
    },
    ScenarioChanged {
        from: ScenarioId,
        to: ScenarioId,
    },
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::SimulationStarted { scenario } => {
                write!(f, "simulation started (scenario: {scenario})")
            }
            SimEvent::SimulationPaused => f.write_str("simulation paused"),
            SimEvent::SimulationResumed => f.write_str("simulation resumed"),
            SimEvent::SimulationStopped { stats } => {
                write!(f, "simulation stopped after {} frames", stats.frames)
            }
            SimEvent::SimulationReset => f.write_str("simulation reset"),
            SimEvent::LightChanged { from, to, manual } => {
                if *manual {
                    write!(f, "light forced {from} -> {to}")
                } else {
                    write!(f, "light changed {from} -> {to}")
                }
            }
            SimEvent::VehicleSpawned {
                id,
                position,
                speed,
            } => {
                write!(f, "vehicle {id} spawned at {position} ({speed:.2} u/tick)")
            }
            SimEvent::VehicleRemoved {
                id,
                position,
                speed,
                distance_traveled,
            } => {
                write!(
                    f,
                    "vehicle {id} left the scene at {position} ({speed:.2} u/tick) after {distance_traveled:.0} units"
                )
            }
            SimEvent::ScenarioChanged { from, to } => {
                write!(f, "scenario changed {from} -> {to}")
            }
        }
    }
}
