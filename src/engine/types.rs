//! Core types and engine constants for the intersection simulation
//!
//! These are standalone types that don't depend on any presentation layer.

use std::fmt;

/// Minimum gap between vehicles before car following kicks in.
pub const SAFE_DISTANCE: f64 = 60.0;

/// A vehicle farther ahead than this is not a car-following obstacle.
pub const NEIGHBOR_RANGE: f64 = SAFE_DISTANCE * 3.0;

/// Distance from the intersection at which vehicles begin reacting to the
/// light, before the per-scenario multiplier is applied.
pub const BASE_REACTION_DISTANCE: f64 = 150.0;

/// Fraction of the reaction distance that forms the hard stop zone at red.
pub const STOP_ZONE_FRACTION: f64 = 0.3;

/// A stopped vehicle only restarts on green when it is farther than this
/// from the intersection centre.
pub const GREEN_RESTART_CLEARANCE: f64 = 50.0;

/// Speed gained per tick while accelerating (before scenario adjustment).
pub const ACCELERATION_STEP: f64 = 0.1;

/// Speed shed per tick while braking.
pub const DECELERATION_STEP: f64 = 0.2;

/// Braking multiplier while the vehicle is in the `Stopped` state.
pub const EMERGENCY_BRAKE_FACTOR: f64 = 2.0;

/// Scene boundary on the east/west travel axis; beyond it a vehicle is removed.
pub const SCENE_BOUND_X: f64 = 450.0;

/// Scene boundary on the north/south travel axis.
pub const SCENE_BOUND_Y: f64 = 350.0;

/// Spawn distance from the intersection centre on the east/west axis.
pub const SPAWN_DISTANCE_X: f64 = 400.0;

/// Spawn distance from the intersection centre on the north/south axis.
pub const SPAWN_DISTANCE_Y: f64 = 300.0;

/// Number of lanes per approach.
pub const LANE_COUNT: u8 = 3;

/// Lateral offset of each lane from the approach centre line.
pub const LANE_OFFSETS: [f64; 3] = [-50.0, 0.0, 50.0];

/// Lights are advanced once per this much accumulated simulated time,
/// a coarser cadence than vehicle motion.
pub const LIGHT_UPDATE_INTERVAL_SECS: f64 = 0.5;

/// A unique identifier for a vehicle, monotonically increasing and never
/// reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four compass directions from which vehicles enter the
/// intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Approach {
    North,
    South,
    East,
    West,
}

impl Approach {
    pub const ALL: [Approach; 4] = [
        Approach::North,
        Approach::South,
        Approach::East,
        Approach::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Approach::North => "north",
            Approach::South => "south",
            Approach::East => "east",
            Approach::West => "west",
        }
    }

    /// Whether this approach travels along the x axis.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Approach::East | Approach::West)
    }

    /// Sign of displacement along the travel axis per unit of speed.
    pub fn direction_sign(&self) -> f64 {
        match self {
            Approach::East | Approach::North => 1.0,
            Approach::West | Approach::South => -1.0,
        }
    }

    /// Off-scene boundary for this approach's travel axis.
    pub fn scene_bound(&self) -> f64 {
        if self.is_horizontal() {
            SCENE_BOUND_X
        } else {
            SCENE_BOUND_Y
        }
    }

    /// The start position for a vehicle entering on the given lane.
    pub fn spawn_position(&self, lane: u8) -> Position {
        let offset = LANE_OFFSETS[(lane % LANE_COUNT) as usize];
        match self {
            Approach::East => Position::new(-SPAWN_DISTANCE_X, offset),
            Approach::West => Position::new(SPAWN_DISTANCE_X, offset),
            Approach::North => Position::new(offset, -SPAWN_DISTANCE_Y),
            Approach::South => Position::new(offset, SPAWN_DISTANCE_Y),
        }
    }

    /// Whether `other` lies ahead of `reference` along this approach's
    /// direction of travel.
    pub fn is_ahead(&self, reference: &Position, other: &Position) -> bool {
        match self {
            Approach::East => other.x > reference.x,
            Approach::West => other.x < reference.x,
            Approach::North => other.y > reference.y,
            Approach::South => other.y < reference.y,
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The color shown by the intersection's traffic lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightColor {
    Red,
    Orange,
    Green,
    OrangeBlinking,
}

impl LightColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightColor::Red => "red",
            LightColor::Orange => "orange",
            LightColor::Green => "green",
            LightColor::OrangeBlinking => "orange_blinking",
        }
    }
}

impl fmt::Display for LightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A vehicle's current motion regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorState {
    Moving,
    Accelerating,
    Slowing,
    Stopped,
}

impl BehaviorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorState::Moving => "moving",
            BehaviorState::Accelerating => "accelerating",
            BehaviorState::Slowing => "slowing",
            BehaviorState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 2D position in scene coordinates, with the intersection centre at the
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
