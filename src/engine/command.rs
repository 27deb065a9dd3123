//! Control commands
//!
//! The textual command grammar used by the headless runner's `--force-light`
//! option and by any embedder driving the clock from a wire protocol.
//! Simple verbs stand alone; `scenario:` and `light:` carry an argument
//! after a colon.

use std::fmt;
use std::str::FromStr;

use super::error::EngineError;
use super::scenario::ScenarioId;
use super::types::LightColor;

/// A control command applied to the simulation clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
    SetScenario(ScenarioId),
    SetLight(LightColor),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => f.write_str("start"),
            Command::Pause => f.write_str("pause"),
            Command::Resume => f.write_str("resume"),
            Command::Stop => f.write_str("stop"),
            Command::Reset => f.write_str("reset"),
            Command::SetScenario(id) => write!(f, "scenario:{id}"),
            Command::SetLight(color) => write!(f, "light:{color}"),
        }
    }
}

impl FromStr for Command {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "start" => Ok(Command::Start),
            "pause" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "stop" => Ok(Command::Stop),
            "reset" => Ok(Command::Reset),
            other => {
                if let Some(id) = other.strip_prefix("scenario:") {
                    return Ok(Command::SetScenario(id.parse()?));
                }
                if let Some(color) = other.strip_prefix("light:") {
                    return Ok(Command::SetLight(parse_light(color)?));
                }
                Err(EngineError::InvalidCommand(other.to_string()))
            }
        }
    }
}

/// Parses a manually forceable light color. Blinking orange is a mode, not
/// a color, and cannot be forced directly.
pub fn parse_light(s: &str) -> Result<LightColor, EngineError> {
    match s {
        "red" => Ok(LightColor::Red),
        "orange" => Ok(LightColor::Orange),
        "green" => Ok(LightColor::Green),
        other => Err(EngineError::InvalidLightColor(other.to_string())),
    }
}
