//! Intersection Traffic Simulation Library
//!
//! Simulates road traffic at a single four-way intersection: vehicles spawn,
//! drive toward the crossing, react to a shared traffic-light signal and to
//! each other, and are removed once they leave the scene. The engine runs
//! headless and exposes per-tick snapshots for any renderer or logger.

pub mod engine;
