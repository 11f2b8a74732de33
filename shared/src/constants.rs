use std::time::Duration;

/// Segment identifier that closes a lap on every shipped track.
pub const FINISH_SEGMENT: &str = "c_02";

/// Fixed simulation step used by hosts that do not supply their own.
pub const DEFAULT_TICK: Duration = Duration::from_millis(16);

/// Ticks the session keeps running after the lap completes before it reports `Finished`.
pub const FINISH_HOLD_TICKS: u32 = 200;

/// Downward speed added to the vertical velocity every tick (world units per millisecond).
pub const GRAVITY_PER_TICK: f32 = 0.035;

/// Chassis height below which the vehicle is considered off the track.
pub const FALL_RESET_HEIGHT: f32 = -2000.0;

/// Steering target magnitude under left/right input (radians).
pub const MAX_STEER_ANGLE: f32 = 0.7;

/// Steering change per 100 ms of input (radians).
pub const STEER_RATE: f32 = 0.4;

/// Steering magnitude below which the angle snaps to exactly zero.
pub const STEER_SNAP: f32 = 0.01;

/// Speed magnitude below which speed snaps to exactly zero.
pub const SPEED_SNAP: f32 = 0.3;

/// Speed lost per tick while coasting.
pub const IDLE_FRICTION: f32 = 0.2;

/// Speed lost per tick while braking forward, or gained while accelerating out of reverse.
pub const BRAKE_STEP: f32 = 0.5;

/// Divisor applied to the remaining gap to top speed each throttle tick.
///
/// Larger values approach top speed more slowly.
pub const THROTTLE_RESPONSE: f32 = 15.0;

/// Divisor applied to the squared travel distance when rolling the wheels.
pub const ROLL_DIVISOR: f32 = 10.0;

/// Milliseconds per unit of chassis travel scale (`translation = speed * facing * ms / 10`).
pub const SPEED_TIME_SCALE_MS: f32 = 10.0;

/// Heading of a freshly placed vehicle.
pub const INITIAL_FACING: [f32; 3] = [0.0, 0.0, -1.0];

/// Minimum squared horizontal length for a facing vector to define a yaw.
pub const YAW_EPS: f32 = 1.0e-6;
