//! Fixed-rate simulation clock
//!
//! The clock orchestrates one intersection: it advances the lights on a
//! coarse cadence, rolls the per-tick spawn dice, steps the fleet, and
//! records every observable change as a [`SimEvent`]. It never sleeps;
//! pacing wall time against simulated time is the runner's job.

use std::collections::VecDeque;
use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::command::Command;
use super::error::Result;
use super::events::SimEvent;
use super::fleet::VehicleFleet;
use super::light::SignalController;
use super::scenario::{ScenarioConfig, ScenarioId};
use super::types::{
    Approach, BehaviorState, LightColor, Position, VehicleId, LIGHT_UPDATE_INTERVAL_SECS,
};

/// Cap on undrained events. Subscription is optional, so a non-draining
/// embedder must not leak; once full, the oldest event is dropped.
const MAX_PENDING_EVENTS: usize = 1024;

/// Lifecycle state of the clock. A fresh clock is `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// Cumulative run statistics reported on stop and in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationStats {
    pub frames: u64,
    pub spawned: u64,
    pub removed: u64,
    pub live: usize,
    pub elapsed_secs: f64,
}

impl SimulationStats {
    pub fn summary(&self) -> String {
        format!(
            "{} frames, {:.1}s simulated, {} spawned / {} removed / {} live",
            self.frames, self.elapsed_secs, self.spawned, self.removed, self.live
        )
    }
}

/// Read-only view of one vehicle for snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleView {
    pub id: VehicleId,
    pub approach: Approach,
    pub lane: u8,
    pub position: Position,
    pub speed: f64,
    pub state: BehaviorState,
    pub waiting_ticks: u64,
}

/// A consistent point-in-time view of the whole simulation. A plain owned
/// value, so handing one to another thread is a single exchange of an
/// immutable object.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub scenario: ScenarioId,
    pub run_state: RunState,
    pub lights: [(Approach, LightColor); 4],
    pub blink_phase: bool,
    pub vehicles: Vec<VehicleView>,
    pub frames: u64,
    pub spawned: u64,
    pub removed: u64,
    pub live: usize,
    pub elapsed_secs: f64,
}

/// The top-level simulation driver.
#[derive(Debug)]
pub struct SimulationClock {
    state: RunState,
    scenario: ScenarioConfig,
    lights: SignalController,
    fleet: VehicleFleet,
    frames: u64,
    sim_time: f64,
    /// Simulated seconds accumulated toward the next light update.
    light_acc: f64,
    /// Wall-clock instant of the last start, for the stop summary.
    started_at: Option<Instant>,
    /// Pending events, bounded by `MAX_PENDING_EVENTS`.
    events: VecDeque<SimEvent>,
    /// Seeded for reproducible runs, otherwise the thread rng is used.
    rng: Option<StdRng>,
}

impl SimulationClock {
    pub fn new(scenario: ScenarioConfig) -> Self {
        Self {
            state: RunState::Stopped,
            scenario,
            lights: SignalController::new(),
            fleet: VehicleFleet::new(),
            frames: 0,
            sim_time: 0.0,
            light_acc: 0.0,
            started_at: None,
            events: VecDeque::new(),
            rng: None,
        }
    }

    /// A clock whose spawn rolls are reproducible across runs.
    pub fn with_seed(scenario: ScenarioConfig, seed: u64) -> Self {
        let mut clock = Self::new(scenario);
        clock.rng = Some(StdRng::seed_from_u64(seed));
        clock
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn scenario(&self) -> &ScenarioConfig {
        &self.scenario
    }

    pub fn light(&self) -> LightColor {
        self.lights.color()
    }

    pub fn fleet(&self) -> &VehicleFleet {
        &self.fleet
    }

    /// Starts a run, zeroing the frame counter and timers. Returns `false`
    /// when the clock is already running or paused.
    pub fn start(&mut self) -> bool {
        match self.state {
            RunState::Running | RunState::Paused => {
                warn!("start ignored: simulation already active");
                false
            }
            RunState::Stopped => {
                self.state = RunState::Running;
                self.frames = 0;
                self.sim_time = 0.0;
                self.light_acc = 0.0;
                self.started_at = Some(Instant::now());
                self.lights.set_blinking(self.scenario.is_blinking());
                info!("simulation started (scenario: {})", self.scenario.id);
                self.push_event(SimEvent::SimulationStarted {
                    scenario: self.scenario.id,
                });
                true
            }
        }
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            self.push_event(SimEvent::SimulationPaused);
        }
    }

    pub fn resume(&mut self) {
        if self.state == RunState::Paused {
            self.state = RunState::Running;
            self.push_event(SimEvent::SimulationResumed);
        }
    }

    /// Ends the run and reports the final statistics.
    pub fn stop(&mut self) -> SimulationStats {
        let stats = self.stats();
        if self.state != RunState::Stopped {
            self.state = RunState::Stopped;
            match self.started_at.take() {
                Some(started) => info!(
                    "simulation stopped after {:.1}s wall time: {}",
                    started.elapsed().as_secs_f64(),
                    stats.summary()
                ),
                None => info!("simulation stopped: {}", stats.summary()),
            }
            self.push_event(SimEvent::SimulationStopped { stats });
        }
        stats
    }

    /// Returns the clock to its initial state: stops the run (finalizing
    /// its statistics), empties the fleet, zeroes the counters, and puts
    /// the lights back at red (or blinking, under a blink scenario). The
    /// active scenario is kept.
    pub fn reset(&mut self) {
        self.stop();
        self.fleet.clear();
        self.lights = SignalController::new();
        self.lights.set_blinking(self.scenario.is_blinking());
        self.frames = 0;
        self.sim_time = 0.0;
        self.light_acc = 0.0;
        info!("simulation reset (scenario: {})", self.scenario.id);
        self.push_event(SimEvent::SimulationReset);
    }

    /// Advances the simulation by `dt` simulated seconds. A no-op unless
    /// the clock is running.
    pub fn tick(&mut self, dt: f64) {
        if self.state != RunState::Running {
            return;
        }

        self.sim_time += dt;
        self.advance_lights(dt);
        self.roll_spawn();

        let light = self.lights.color();
        for vehicle in self.fleet.update(&self.scenario, light) {
            self.push_event(SimEvent::VehicleRemoved {
                id: vehicle.id,
                position: vehicle.position,
                speed: vehicle.speed,
                distance_traveled: vehicle.distance_traveled,
            });
        }

        self.frames += 1;
    }

    /// Lights run on a coarser cadence than vehicle motion: they advance
    /// once per accumulated half second of simulated time.
    fn advance_lights(&mut self, dt: f64) {
        self.light_acc += dt;
        while self.light_acc >= LIGHT_UPDATE_INTERVAL_SECS {
            self.light_acc -= LIGHT_UPDATE_INTERVAL_SECS;
            let before = self.lights.color();
            if self.lights.advance(&self.scenario, LIGHT_UPDATE_INTERVAL_SECS) {
                let after = self.lights.color();
                if after != before {
                    self.push_event(SimEvent::LightChanged {
                        from: before,
                        to: after,
                        manual: false,
                    });
                }
            }
        }
    }

    /// One spawn roll per tick against the scenario's probability.
    fn roll_spawn(&mut self) {
        let spawned = match &mut self.rng {
            Some(rng) => try_spawn(&mut self.fleet, &self.scenario, rng),
            None => try_spawn(&mut self.fleet, &self.scenario, &mut rand::rng()),
        };
        if let Some(id) = spawned {
            if let Some((position, speed)) = self.fleet.get(id).map(|v| (v.position, v.speed)) {
                self.push_event(SimEvent::VehicleSpawned {
                    id,
                    position,
                    speed,
                });
            }
        }
    }

    /// Swaps in a different scenario mid-run. Live vehicles are kept; their
    /// speeds are clamped to the new range on their next update.
    pub fn change_scenario(&mut self, id: ScenarioId) {
        if id == self.scenario.id {
            debug!("scenario change ignored: already {id}");
            return;
        }
        let from = self.scenario.id;
        self.scenario = ScenarioConfig::get(id);
        self.lights.set_blinking(self.scenario.is_blinking());
        info!("scenario changed {from} -> {id}");
        self.push_event(SimEvent::ScenarioChanged { from, to: id });
    }

    /// Forces the lights to `color`, overriding the automatic cycle until
    /// the next transition.
    pub fn force_light(&mut self, color: LightColor) {
        let from = self.lights.force(color, true);
        if from != color {
            self.push_event(SimEvent::LightChanged {
                from,
                to: color,
                manual: true,
            });
        }
    }

    /// Applies a parsed control command.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Start => {
                self.start();
            }
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => {
                self.stop();
            }
            Command::Reset => self.reset(),
            Command::SetScenario(id) => self.change_scenario(id),
            Command::SetLight(color) => self.force_light(color),
        }
        Ok(())
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            frames: self.frames,
            spawned: self.fleet.spawned(),
            removed: self.fleet.removed(),
            live: self.fleet.len(),
            elapsed_secs: self.sim_time,
        }
    }

    /// Consistent point-in-time view of lights, fleet, and counters.
    pub fn snapshot(&self) -> Snapshot {
        let mut vehicles: Vec<VehicleView> = self
            .fleet
            .iter()
            .map(|v| VehicleView {
                id: v.id,
                approach: v.approach,
                lane: v.lane,
                position: v.position,
                speed: v.speed,
                state: v.state,
                waiting_ticks: v.waiting_ticks,
            })
            .collect();
        vehicles.sort_by_key(|v| v.id);

        Snapshot {
            scenario: self.scenario.id,
            run_state: self.state,
            lights: self.lights.approach_colors(),
            blink_phase: self.lights.blink_phase(),
            vehicles,
            frames: self.frames,
            spawned: self.fleet.spawned(),
            removed: self.fleet.removed(),
            live: self.fleet.len(),
            elapsed_secs: self.sim_time,
        }
    }

    /// Drains the accumulated event queue in order.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain(..).collect()
    }

    fn push_event(&mut self, event: SimEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

fn try_spawn(
    fleet: &mut VehicleFleet,
    scenario: &ScenarioConfig,
    rng: &mut impl Rng,
) -> Option<VehicleId> {
    if rng.random_bool(scenario.spawn_probability) {
        fleet.spawn(scenario, rng)
    } else {
        None
    }
}
