/*!
Speed and steering model.

All functions are pure: they take the current scalar state plus input and return the next
value. Tick length enters as milliseconds.
*/

use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};

use super::settings::{DriveSettings, STEER_RATE_INTERVAL_MS};
use crate::collision::types::Vec3;

/// Driver intent for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub accelerate: bool,
    pub brake: bool,
}

impl DriveInput {
    pub const IDLE: Self = Self {
        steer_left: false,
        steer_right: false,
        accelerate: false,
        brake: false,
    };

    #[inline]
    pub fn is_steering(&self) -> bool {
        self.steer_left || self.steer_right
    }
}

/// Next scalar speed.
///
/// Throttle closes a fixed fraction of the gap to `top_speed` when rolling forward and
/// recovers by a fixed step when rolling backward. Braking mirrors that. With neither,
/// idle friction pulls speed toward zero. Speeds below the snap threshold become zero.
pub fn update_speed(speed: f32, input: &DriveInput, top_speed: f32, s: &DriveSettings) -> f32 {
    let mut speed = speed;

    if input.accelerate {
        if speed >= 0.0 {
            speed += (top_speed - speed) / s.throttle_response;
        } else {
            speed += s.brake_step;
        }
    }

    if input.brake {
        if speed > 0.0 {
            speed -= s.brake_step;
        } else {
            speed -= (top_speed - speed.abs()) / s.throttle_response;
        }
    }

    if !input.accelerate && !input.brake {
        if speed > 0.0 {
            speed -= s.idle_friction;
        } else if speed < 0.0 {
            speed += s.idle_friction;
        }
    }

    if speed.abs() < s.speed_snap {
        speed = 0.0;
    }

    speed
}

/// Next steering angle.
///
/// Input moves the angle toward `±max_steer_angle` at `steer_rate` per 100 ms. Without input
/// it relaxes toward zero at the same rate without crossing it.
pub fn update_steering(angle: f32, input: &DriveInput, tick_ms: f32, s: &DriveSettings) -> f32 {
    let step = s.steer_rate * (tick_ms / STEER_RATE_INTERVAL_MS);
    let mut angle = angle;

    if input.steer_left {
        angle = (angle + step).min(s.max_steer_angle);
    }
    if input.steer_right {
        angle = (angle - step).max(-s.max_steer_angle);
    }
    if !input.is_steering() {
        if angle > 0.0 {
            angle = (angle - step).max(0.0);
        } else if angle < 0.0 {
            angle = (angle + step).min(0.0);
        }
    }

    if angle.abs() < s.steer_snap {
        angle = 0.0;
    }

    angle
}

/// Rotate `facing` about +Y by `steer * speed / turn_divisor`.
pub fn turn_facing(facing: &Vec3, steer: f32, speed: f32, turn_divisor: f32) -> Vec3 {
    let angle = steer * speed / turn_divisor;
    Rotation3::from_axis_angle(&Vec3::y_axis(), angle) * facing
}

/// Chassis translation for this tick: `speed * facing * (tick_ms / speed_time_scale_ms)`.
#[inline]
pub fn chassis_translation(speed: f32, facing: &Vec3, tick_ms: f32, s: &DriveSettings) -> Vec3 {
    facing * (speed * (tick_ms / s.speed_time_scale_ms))
}

/// Wheel roll for a tick's travel, proportional to the squared distance and signed by the
/// direction of travel.
pub fn roll_increment(speed: f32, translation: &Vec3, s: &DriveSettings) -> f32 {
    let amount = translation.norm_squared() / s.roll_divisor;
    if speed < 0.0 { -amount } else { amount }
}
