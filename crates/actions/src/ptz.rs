//! Translation of the supported movement vocabularies into [`PtzCommand`]s.
//!
//! Three vocabularies are supported:
//! - [`MoveParams`]: named directions or explicit pan, tilt and zoom speeds.
//! - [`PtzRequest::Stop`]: an unconditional halt.
//! - [`ContinuousMoveParams`]: ONVIF style `LEFT`/`RIGHT`, `UP`/`DOWN` and `ZOOM_IN`/`ZOOM_OUT`
//!   tokens.
//!
//! [`PtzRequest`] selects one of them.
//!
//! Translation never talks to a device; it fails only on bad parameters.

use std::str::FromStr;

use hikctl_isapi::PtzCommand;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::Error;

/// The speed used for every axis that an ONVIF style token moves.
const CONTINUOUS_SPEED: i32 = 70;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
    ZoomIn,
    ZoomOut,
    Stop,
}

impl Direction {
    pub const ALL: [Self; 11] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
        Self::ZoomIn,
        Self::ZoomOut,
        Self::Stop,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::UpLeft => "up_left",
            Self::UpRight => "up_right",
            Self::DownLeft => "down_left",
            Self::DownRight => "down_right",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::Stop => "stop",
        }
    }

    /// The preset `(pan, tilt, zoom)` for this direction.
    pub const fn preset(self) -> (i32, i32, i32) {
        match self {
            Self::Up => (0, 50, 0),
            Self::Down => (0, -50, 0),
            Self::Left => (-50, 0, 0),
            Self::Right => (50, 0, 0),
            Self::UpLeft => (-50, 50, 0),
            Self::UpRight => (50, 50, 0),
            Self::DownLeft => (-50, -50, 0),
            Self::DownRight => (50, -50, 0),
            Self::ZoomIn => (0, 0, 50),
            Self::ZoomOut => (0, 0, -50),
            Self::Stop => (0, 0, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("Invalid direction: {s}")))
    }
}

fn default_duration() -> u32 {
    1000
}

/// Treat `null` like an absent field.
fn or_default<'de, D, T>(deserializer: D, default: fn() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_else(default))
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    or_default(deserializer, default_duration)
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    or_default(deserializer, bool::default)
}

/// Parameters of the `ptz_move` action.
///
/// Explicit speeds take precedence over `direction`; as soon as one of them is given, the others
/// are `0` rather than taken from the direction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MoveParams {
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub pan: Option<i32>,
    #[serde(default)]
    pub tilt: Option<i32>,
    #[serde(default)]
    pub zoom: Option<i32>,
    /// Milliseconds.
    #[serde(default = "default_duration", deserialize_with = "deserialize_duration")]
    pub duration: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub continuous: bool,
}

impl Default for MoveParams {
    fn default() -> Self {
        Self {
            direction: None,
            pan: None,
            tilt: None,
            zoom: None,
            duration: default_duration(),
            continuous: false,
        }
    }
}

impl MoveParams {
    pub fn translate(&self) -> Result<PtzCommand, Error> {
        let Self {
            direction,
            pan,
            tilt,
            zoom,
            duration,
            continuous,
        } = self;
        let (pan, tilt, zoom) = if pan.is_some() || tilt.is_some() || zoom.is_some() {
            (pan.unwrap_or(0), tilt.unwrap_or(0), zoom.unwrap_or(0))
        } else {
            match direction.as_deref() {
                Some(direction) if !direction.is_empty() => {
                    direction.parse::<Direction>()?.preset()
                }
                _ => {
                    return Err(Error::MissingParameter(
                        "Either direction or pan/tilt/zoom parameters must be provided"
                            .to_string(),
                    ))
                }
            }
        };
        Ok(PtzCommand {
            pan,
            tilt,
            zoom,
            duration_ms: *duration,
            continuous: *continuous,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveMode {
    #[default]
    ContinuousMove,
    Stop,
}

impl From<&str> for MoveMode {
    fn from(value: &str) -> Self {
        match value {
            "Stop" => Self::Stop,
            _ => Self::ContinuousMove,
        }
    }
}

impl<'de> Deserialize<'de> for MoveMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mode = Option::<Value>::deserialize(deserializer)?;
        Ok(match mode {
            Some(Value::String(mode)) => Self::from(mode.as_str()),
            _ => Self::ContinuousMove,
        })
    }
}

/// Keep strings, treat anything else as absent.
fn deserialize_token<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn default_continuous_duration() -> f64 {
    2.0
}

fn deserialize_continuous_duration<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    or_default(deserializer, default_continuous_duration)
}

/// Parameters of the ONVIF style `ptz` action.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ContinuousMoveParams {
    /// `LEFT` or `RIGHT`.
    #[serde(default, deserialize_with = "deserialize_token")]
    pub pan: Option<String>,
    /// `UP` or `DOWN`.
    #[serde(default, deserialize_with = "deserialize_token")]
    pub tilt: Option<String>,
    /// `ZOOM_IN` or `ZOOM_OUT`.
    #[serde(default, deserialize_with = "deserialize_token")]
    pub zoom: Option<String>,
    #[serde(default)]
    pub move_mode: MoveMode,
    /// Seconds until the movement stops by itself, `0` or less to hold until stopped.
    #[serde(
        default = "default_continuous_duration",
        deserialize_with = "deserialize_continuous_duration"
    )]
    pub continuous_duration: f64,
}

impl Default for ContinuousMoveParams {
    fn default() -> Self {
        Self {
            pan: None,
            tilt: None,
            zoom: None,
            move_mode: MoveMode::default(),
            continuous_duration: default_continuous_duration(),
        }
    }
}

fn axis(token: Option<&str>, negative: &str, positive: &str) -> i32 {
    match token {
        Some(t) if t == negative => -CONTINUOUS_SPEED,
        Some(t) if t == positive => CONTINUOUS_SPEED,
        _ => 0,
    }
}

impl ContinuousMoveParams {
    pub fn translate(&self) -> PtzCommand {
        if self.move_mode == MoveMode::Stop {
            return PtzCommand::STOP;
        }
        let duration_ms = if self.continuous_duration > 0.0 {
            (self.continuous_duration * 1000.0).round() as u32
        } else {
            0
        };
        PtzCommand {
            pan: axis(self.pan.as_deref(), "LEFT", "RIGHT"),
            tilt: axis(self.tilt.as_deref(), "DOWN", "UP"),
            // Zooming in is negative, unlike the named directions.
            zoom: axis(self.zoom.as_deref(), "ZOOM_IN", "ZOOM_OUT"),
            duration_ms,
            continuous: true,
        }
    }
}

/// A movement in any of the supported vocabularies.
#[derive(Clone, Debug, PartialEq)]
pub enum PtzRequest {
    Move(MoveParams),
    Stop,
    ContinuousMove(ContinuousMoveParams),
}

impl PtzRequest {
    pub fn translate(&self) -> Result<PtzCommand, Error> {
        match self {
            Self::Move(params) => params.translate(),
            Self::Stop => Ok(PtzCommand::STOP),
            Self::ContinuousMove(params) => Ok(params.translate()),
        }
    }
}
