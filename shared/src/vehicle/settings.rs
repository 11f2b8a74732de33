use serde::{Deserialize, Serialize};

use crate::constants::{
    BRAKE_STEP, FALL_RESET_HEIGHT, GRAVITY_PER_TICK, IDLE_FRICTION, MAX_STEER_ANGLE,
    ROLL_DIVISOR, SPEED_SNAP, SPEED_TIME_SCALE_MS, STEER_RATE, STEER_SNAP, THROTTLE_RESPONSE,
};

/// Milliseconds of input over which [`DriveSettings::steer_rate`] is applied.
pub const STEER_RATE_INTERVAL_MS: f32 = 100.0;

/// Tuning shared by every car: gravity, fall detection, steering and speed response.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveSettings {
    /// Downward speed added every tick.
    pub gravity_per_tick: f32,
    /// Chassis height that triggers off-track recovery.
    pub fall_reset_height: f32,
    pub max_steer_angle: f32,
    /// Steering change per [`STEER_RATE_INTERVAL_MS`].
    pub steer_rate: f32,
    pub steer_snap: f32,
    pub speed_snap: f32,
    pub idle_friction: f32,
    pub brake_step: f32,
    pub throttle_response: f32,
    pub roll_divisor: f32,
    pub speed_time_scale_ms: f32,
}

impl Default for DriveSettings {
    fn default() -> Self {
        Self {
            gravity_per_tick: GRAVITY_PER_TICK,
            fall_reset_height: FALL_RESET_HEIGHT,
            max_steer_angle: MAX_STEER_ANGLE,
            steer_rate: STEER_RATE,
            steer_snap: STEER_SNAP,
            speed_snap: SPEED_SNAP,
            idle_friction: IDLE_FRICTION,
            brake_step: BRAKE_STEP,
            throttle_response: THROTTLE_RESPONSE,
            roll_divisor: ROLL_DIVISOR,
            speed_time_scale_ms: SPEED_TIME_SCALE_MS,
        }
    }
}

/// Per-car tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarSpec {
    pub name: String,
    pub top_speed: f32,
    /// Larger values turn more slowly at the same speed and steering angle.
    pub turn_divisor: f32,
}

impl CarSpec {
    pub fn new(name: impl Into<String>, top_speed: f32, turn_divisor: f32) -> Self {
        Self {
            name: name.into(),
            top_speed,
            turn_divisor,
        }
    }

    pub fn muscle() -> Self {
        Self::new("muscle", 5.0, 60.0)
    }

    pub fn streek() -> Self {
        Self::new("streek", 10.0, 80.0)
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "muscle" => Some(Self::muscle()),
            "streek" => Some(Self::streek()),
            _ => None,
        }
    }
}

impl Default for CarSpec {
    fn default() -> Self {
        Self::muscle()
    }
}
