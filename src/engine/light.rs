//! Traffic-light state machine
//!
//! The four approach lights always show the same color, so a single
//! automaton drives the logical signal and per-approach views are derived
//! read-only. The automatic cycle is `Red -> Green -> Orange -> Red`;
//! blinking orange is a separate mode entered and left only through an
//! explicit switch, never as part of the cycle.

use log::debug;

use super::scenario::{LightTiming, ScenarioConfig};
use super::types::{Approach, LightColor};

/// The shared signal controller for all four approaches.
#[derive(Debug, Clone)]
pub struct SignalController {
    /// The current color of the logical signal.
    color: LightColor,
    /// Seconds accumulated since the last transition or toggle.
    elapsed: f64,
    /// On/off phase while blinking.
    blink_phase: bool,
}

impl Default for SignalController {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalController {
    /// Creates a controller showing red, the state every run begins in.
    pub fn new() -> Self {
        Self {
            color: LightColor::Red,
            elapsed: 0.0,
            blink_phase: false,
        }
    }

    pub fn color(&self) -> LightColor {
        self.color
    }

    /// Seconds spent in the current state.
    pub fn time_in_state(&self) -> f64 {
        self.elapsed
    }

    pub fn blink_phase(&self) -> bool {
        self.blink_phase
    }

    /// Per-approach read views; identical color across approaches by design.
    pub fn approach_colors(&self) -> [(Approach, LightColor); 4] {
        Approach::ALL.map(|approach| (approach, self.color))
    }

    /// Advances the automatic timing by `dt` seconds.
    ///
    /// In cycle mode the signal moves to the next color once the configured
    /// duration is reached (`elapsed >= duration`, so an overshooting tick
    /// still transitions exactly once and the remainder is dropped). In
    /// blink mode the phase toggles once per interval. Returns whether a
    /// transition or toggle occurred.
    pub fn advance(&mut self, scenario: &ScenarioConfig, dt: f64) -> bool {
        match scenario.timing {
            LightTiming::Blink { interval_secs } => {
                if self.color != LightColor::OrangeBlinking {
                    // Blink mode is entered via set_blinking, not here.
                    return false;
                }
                self.elapsed += dt;
                if self.elapsed >= interval_secs {
                    self.blink_phase = !self.blink_phase;
                    self.elapsed = 0.0;
                    true
                } else {
                    false
                }
            }
            LightTiming::Cycle {
                green_secs,
                orange_secs,
                red_secs,
            } => {
                let duration = match self.color {
                    LightColor::Red => red_secs,
                    LightColor::Green => green_secs,
                    LightColor::Orange => orange_secs,
                    // A manually forced blink under a cycling scenario holds
                    // until the next explicit mode switch.
                    LightColor::OrangeBlinking => return false,
                };
                self.elapsed += dt;
                if self.elapsed >= duration {
                    let next = Self::next_in_cycle(self.color);
                    debug!("light transition {} -> {}", self.color, next);
                    self.color = next;
                    self.elapsed = 0.0;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Force-sets the signal to `color`, resetting the state timer.
    /// Returns the previous color for logging.
    pub fn force(&mut self, color: LightColor, manual: bool) -> LightColor {
        let previous = self.color;
        self.color = color;
        self.elapsed = 0.0;
        debug!(
            "light forced {} -> {} ({})",
            previous,
            color,
            if manual { "manual" } else { "automatic" }
        );
        previous
    }

    /// Switches blinking mode on or off, clearing the state timer.
    /// Leaving blink mode returns the signal to red.
    pub fn set_blinking(&mut self, enabled: bool) {
        if enabled && self.color != LightColor::OrangeBlinking {
            self.color = LightColor::OrangeBlinking;
            self.elapsed = 0.0;
            self.blink_phase = false;
        } else if !enabled && self.color == LightColor::OrangeBlinking {
            self.color = LightColor::Red;
            self.elapsed = 0.0;
            self.blink_phase = false;
        }
    }

    fn next_in_cycle(color: LightColor) -> LightColor {
        match color {
            LightColor::Red => LightColor::Green,
            LightColor::Green => LightColor::Orange,
            LightColor::Orange => LightColor::Red,
            LightColor::OrangeBlinking => LightColor::OrangeBlinking,
        }
    }
}
