//! Headless intersection simulation engine
//!
//! A single four-way intersection: one shared signal controller, a fleet of
//! vehicles on straight approaches, and a fixed-rate clock that ties them
//! together. The engine is presentation-free; embedders poll
//! [`SimulationClock::snapshot`] and drain [`SimEvent`]s.

pub mod clock;
pub mod command;
pub mod error;
pub mod events;
pub mod fleet;
pub mod light;
pub mod scenario;
pub mod types;
pub mod vehicle;

pub use clock::{RunState, SimulationClock, SimulationStats, Snapshot, VehicleView};
pub use command::Command;
pub use error::EngineError;
pub use events::SimEvent;
pub use fleet::VehicleFleet;
pub use light::SignalController;
pub use scenario::{LightTiming, ScenarioConfig, ScenarioId};
pub use types::{Approach, BehaviorState, LightColor, Position, VehicleId};
pub use vehicle::{NeighborView, Vehicle};
