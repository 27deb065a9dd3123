//! Engine error taxonomy
//!
//! Configuration and command errors are fatal to the requested operation,
//! never to the run: the engine reports them to the caller and keeps its
//! state untouched. A spawn attempt at capacity is not an error at all; it
//! is a `None` result on `VehicleFleet::spawn`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown scenario id: {0}")]
    UnknownScenario(String),

    #[error("invalid control command: {0}")]
    InvalidCommand(String),

    #[error("invalid light color: {0}")]
    InvalidLightColor(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
