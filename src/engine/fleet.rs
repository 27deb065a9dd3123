//! Vehicle fleet ownership and per-tick fleet updates
//!
//! The fleet is the sole owner of all live vehicles. Spawning is gated on
//! the scenario's vehicle cap, neighbor sets are gathered from the pre-tick
//! state, and off-scene vehicles are removed only after the full update
//! pass so queries stay consistent within one tick.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::scenario::ScenarioConfig;
use super::types::{Approach, LightColor, Position, VehicleId, LANE_COUNT};
use super::vehicle::{NeighborView, Vehicle};

/// Owns the set of live vehicles and the id/counter bookkeeping.
#[derive(Debug, Default)]
pub struct VehicleFleet {
    vehicles: HashMap<VehicleId, Vehicle>,
    next_id: u64,
    spawned: u64,
    removed: u64,
}

impl VehicleFleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to spawn a vehicle on a random approach and lane, with a
    /// speed drawn uniformly from the scenario's range. Returns `None`
    /// when the fleet is at the scenario's cap; that is an expected
    /// outcome, not an error.
    pub fn spawn(&mut self, scenario: &ScenarioConfig, rng: &mut impl Rng) -> Option<VehicleId> {
        if self.vehicles.len() >= scenario.max_vehicles {
            debug!(
                "spawn rejected: fleet at capacity ({})",
                scenario.max_vehicles
            );
            return None;
        }

        let approach = Approach::ALL[rng.random_range(0..Approach::ALL.len())];
        let lane = rng.random_range(0..LANE_COUNT);
        let (min_speed, max_speed) = scenario.speed_range;
        let speed = rng.random_range(min_speed..=max_speed);

        Some(self.spawn_on(approach, lane, speed))
    }

    /// Spawns a vehicle with explicit placement. Used by the random spawn
    /// path and by callers that need a deterministic setup.
    pub fn spawn_on(&mut self, approach: Approach, lane: u8, speed: f64) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        self.spawned += 1;

        let vehicle = Vehicle::new(id, approach, lane, speed);
        debug!(
            "vehicle {id} spawned on {approach} lane {lane} at {} ({speed:.2} u/tick)",
            vehicle.position
        );
        self.vehicles.insert(id, vehicle);
        id
    }

    /// Updates every live vehicle against the current light color, then
    /// removes the ones that reported leaving the scene. Returns the
    /// removed vehicles.
    pub fn update(&mut self, scenario: &ScenarioConfig, light: LightColor) -> Vec<Vehicle> {
        // Neighbor views come from the state at the start of the tick.
        let pre_tick: Vec<(VehicleId, Approach, Position, f64)> = self
            .vehicles
            .values()
            .map(|v| (v.id, v.approach, v.position, v.speed))
            .collect();

        let mut exited = Vec::new();
        for vehicle in self.vehicles.values_mut() {
            let ahead: Vec<NeighborView> = pre_tick
                .iter()
                .filter(|(id, approach, position, _)| {
                    *id != vehicle.id
                        && *approach == vehicle.approach
                        && vehicle.approach.is_ahead(&vehicle.position, position)
                })
                .map(|(id, _, position, speed)| NeighborView {
                    id: *id,
                    position: *position,
                    speed: *speed,
                })
                .collect();

            if !vehicle.update(scenario, light, &ahead) {
                exited.push(vehicle.id);
            }
        }

        exited
            .into_iter()
            .filter_map(|id| self.remove(id))
            .collect()
    }

    /// Removes a vehicle from the fleet, returning it. Ids are never
    /// reused.
    pub fn remove(&mut self, id: VehicleId) -> Option<Vehicle> {
        let vehicle = self.vehicles.remove(&id);
        if let Some(vehicle) = &vehicle {
            self.removed += 1;
            debug!("vehicle {id} removed at {}", vehicle.position);
        }
        vehicle
    }

    /// Empties the fleet and zeroes its counters for a fresh run. Unlike
    /// `remove`, dropped vehicles do not count toward the removal total.
    pub fn clear(&mut self) {
        self.vehicles.clear();
        self.next_id = 0;
        self.spawned = 0;
        self.removed = 0;
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Cumulative number of vehicles spawned this run.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Cumulative number of vehicles removed this run.
    pub fn removed(&self) -> u64 {
        self.removed
    }

    /// Read-only id-to-position map for renderers and loggers.
    pub fn positions(&self) -> HashMap<VehicleId, Position> {
        self.vehicles
            .iter()
            .map(|(id, v)| (*id, v.position))
            .collect()
    }

    /// Read-only id-to-approach map for renderers and loggers.
    pub fn approaches(&self) -> HashMap<VehicleId, Approach> {
        self.vehicles
            .iter()
            .map(|(id, v)| (*id, v.approach))
            .collect()
    }
}
