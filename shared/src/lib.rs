pub mod collision;
pub mod constants;
pub mod error;
pub mod lap;
pub mod observer;
pub mod session;
pub mod track;
pub mod utils;
pub mod vehicle;

pub use collision::{CollisionSettings, check_wheel_track_collision, move_wheel};
pub use constants::{
    BRAKE_STEP, DEFAULT_TICK, FALL_RESET_HEIGHT, FINISH_HOLD_TICKS, FINISH_SEGMENT,
    GRAVITY_PER_TICK, IDLE_FRICTION, INITIAL_FACING, MAX_STEER_ANGLE, ROLL_DIVISOR, SPEED_SNAP,
    SPEED_TIME_SCALE_MS, STEER_RATE, STEER_SNAP, THROTTLE_RESPONSE, YAW_EPS,
};
pub use error::{MeshInfoError, MeshInfoResult, TrackError, TrackResult};
pub use lap::{LapProgress, LapState};
pub use observer::{NoopObserver, RecordingObserver, ResetReason, TickObserver};
pub use session::{RacePhase, RaceSession, SimSettings};
pub use track::{MeshInfo, Segment, SegmentId, SegmentSource, Track, TrackBundle, TrackInfo};
pub use utils::{planar_distance, planar_distance_sq, to_planar, yaw_from_facing};
pub use vehicle::{
    CarRig, CarSpec, ChassisPose, DriveInput, DriveSettings, Vehicle, VehicleTick, Wheel,
    WheelSlot, solve_chassis_pose,
};
