//! Vehicle kinematics and car following
//!
//! Each tick a vehicle picks a target speed from the first matching rule
//! (vehicle ahead, then traffic light, then free cruising), eases its actual
//! speed toward that target, and advances along its approach axis. Lane and
//! approach are fixed at spawn; there is no lane changing.

use ordered_float::OrderedFloat;

use super::scenario::ScenarioConfig;
use super::types::{
    Approach, BehaviorState, LightColor, Position, VehicleId, DECELERATION_STEP,
    EMERGENCY_BRAKE_FACTOR, GREEN_RESTART_CLEARANCE, NEIGHBOR_RANGE, SAFE_DISTANCE,
    STOP_ZONE_FRACTION,
};

/// Read-only view of another vehicle on the same approach, positioned ahead
/// of the vehicle being updated. Views are taken from the pre-tick fleet
/// state so neighbor queries stay consistent within one tick.
#[derive(Debug, Clone, Copy)]
pub struct NeighborView {
    pub id: VehicleId,
    pub position: Position,
    pub speed: f64,
}

/// A vehicle travelling toward (and through) the intersection.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub approach: Approach,
    /// Lane index within the approach, 0..2.
    pub lane: u8,
    pub position: Position,
    /// Current scalar speed in units per tick.
    pub speed: f64,
    /// Speed the controller is easing toward.
    pub target_speed: f64,
    pub state: BehaviorState,
    /// Ticks spent stopped at a red light.
    pub waiting_ticks: u64,
    /// Total distance covered since spawn.
    pub distance_traveled: f64,
}

impl Vehicle {
    pub fn new(id: VehicleId, approach: Approach, lane: u8, speed: f64) -> Self {
        Self {
            id,
            approach,
            lane,
            position: approach.spawn_position(lane),
            speed,
            target_speed: speed,
            state: BehaviorState::Moving,
            waiting_ticks: 0,
            distance_traveled: 0.0,
        }
    }

    /// Distance from the intersection centre along the travel axis.
    pub fn distance_to_intersection(&self) -> f64 {
        if self.approach.is_horizontal() {
            self.position.x.abs()
        } else {
            self.position.y.abs()
        }
    }

    /// Whether the vehicle has left the visible scene.
    pub fn is_off_scene(&self) -> bool {
        let along_axis = if self.approach.is_horizontal() {
            self.position.x.abs()
        } else {
            self.position.y.abs()
        };
        along_axis > self.approach.scene_bound()
    }

    /// Advances the vehicle by one tick.
    ///
    /// `ahead` must contain only vehicles on the same approach positioned
    /// ahead of this one. Returns `false` once the vehicle is off scene and
    /// should be removed by the caller.
    pub fn update(
        &mut self,
        scenario: &ScenarioConfig,
        light: LightColor,
        ahead: &[NeighborView],
    ) -> bool {
        if self.is_off_scene() {
            return false;
        }

        self.choose_target(scenario, light, ahead);
        self.adjust_speed(scenario);
        self.advance_position();

        true
    }

    /// Picks the target speed and behavior state for this tick. The first
    /// matching rule wins: car following, then light reaction, then cruise.
    fn choose_target(
        &mut self,
        scenario: &ScenarioConfig,
        light: LightColor,
        ahead: &[NeighborView],
    ) {
        // 1. Vehicle ahead has the highest priority.
        if let Some(closest) = self.closest_ahead(ahead) {
            let gap = self.position.distance(&closest.position);
            if gap < SAFE_DISTANCE * 0.5 {
                self.target_speed = f64::max(closest.speed * 0.5, 0.5);
                self.state = BehaviorState::Slowing;
                return;
            }
            if gap < SAFE_DISTANCE {
                self.target_speed = closest.speed * 0.8;
                self.state = BehaviorState::Slowing;
                return;
            }
        }

        // 2. Traffic light, only when no vehicle ahead forced a slowdown.
        let d = self.distance_to_intersection();
        let reaction = scenario.reaction_distance();
        match light {
            LightColor::Red => {
                if d < reaction * STOP_ZONE_FRACTION {
                    self.target_speed = 0.0;
                    self.state = BehaviorState::Stopped;
                    self.waiting_ticks += 1;
                    return;
                }
                if d < reaction {
                    // Floored at the scenario minimum so the vehicle keeps
                    // rolling up to the line instead of stalling short of
                    // the stop zone.
                    let slowdown = d / reaction;
                    self.target_speed =
                        f64::max(self.speed * slowdown * 0.5, scenario.min_speed());
                    self.state = BehaviorState::Slowing;
                    return;
                }
            }
            LightColor::Orange => {
                // Vehicles already deep in the reaction zone are committed
                // to crossing; orange never forces a full stop.
                if d < reaction {
                    self.target_speed = if d < reaction * 0.5 {
                        self.speed * 0.7
                    } else {
                        self.speed * 0.5
                    };
                    self.state = BehaviorState::Slowing;
                    return;
                }
            }
            LightColor::Green => {
                if self.state == BehaviorState::Stopped && d > GREEN_RESTART_CLEARANCE {
                    self.waiting_ticks = 0;
                    self.state = BehaviorState::Accelerating;
                } else {
                    self.state = BehaviorState::Moving;
                }
                self.target_speed = scenario.max_speed();
                return;
            }
            // Blinking orange means proceed with caution; fall through to
            // normal cruising.
            LightColor::OrangeBlinking => {}
        }

        // 3. Free road: ease up to the scenario's maximum.
        self.target_speed = scenario.max_speed();
        self.state = if self.speed < scenario.max_speed() {
            BehaviorState::Accelerating
        } else {
            BehaviorState::Moving
        };
    }

    /// Nearest relevant vehicle ahead, or `None` when the closest one is
    /// beyond car-following range.
    fn closest_ahead<'a>(&self, ahead: &'a [NeighborView]) -> Option<&'a NeighborView> {
        ahead
            .iter()
            .min_by_key(|other| OrderedFloat(self.position.distance(&other.position)))
            .filter(|other| self.position.distance(&other.position) < NEIGHBOR_RANGE)
    }

    /// Eases the actual speed toward the target by one acceleration or
    /// braking step, never overshooting and never leaving `[0, max]`.
    fn adjust_speed(&mut self, scenario: &ScenarioConfig) {
        if self.speed < self.target_speed {
            let step = scenario.acceleration_step();
            self.speed = f64::min(self.speed + step, self.target_speed);
        } else if self.speed > self.target_speed {
            let mut step = DECELERATION_STEP;
            if self.state == BehaviorState::Stopped {
                // Emergency braking in the stop zone.
                step *= EMERGENCY_BRAKE_FACTOR;
            }
            self.speed = f64::max(self.speed - step, self.target_speed);
        }
        self.speed = self.speed.clamp(0.0, scenario.max_speed());
    }

    /// Displaces the vehicle along its approach axis and accumulates the
    /// distance traveled.
    fn advance_position(&mut self) {
        let delta = self.speed * self.approach.direction_sign();
        if self.approach.is_horizontal() {
            self.position.x += delta;
        } else {
            self.position.y += delta;
        }
        self.distance_traveled += self.speed;
    }
}
