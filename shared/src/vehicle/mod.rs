/*!
Vehicle root module.

A [`Vehicle`] owns four wheels and the scalar driving state (speed, steering, heading,
vertical velocity). One call to [`Vehicle::update`] advances it by one fixed tick:

1. Gravity: the vertical velocity grows by one gravity step and becomes this tick's
   movement vector.
2. Collision: each wheel in index order runs broad phase, narrow phase and contact
   resolution against the track along that movement vector.
3. Pose: the chassis is rebuilt from the four wheels and the wheels are re-derived from
   their bones in the new frame.
4. Locomotion: speed, steering and heading advance, every wheel moves by the chassis
   translation and rolls.
5. Pose again, then the fall check, which may reset the vehicle and the lap.

Submodules:
- wheel:      per-wheel state and slot convention
- rig:        chassis-local wheel bones and boxes
- pose:       chassis pose solver
- locomotion: speed and steering model
- settings:   drive tuning and car presets
*/

pub mod locomotion;
pub mod pose;
pub mod rig;
pub mod settings;
pub mod wheel;

use std::time::Duration;

pub use locomotion::DriveInput;
pub use pose::{ChassisPose, solve_chassis_pose};
pub use rig::CarRig;
pub use settings::{CarSpec, DriveSettings};
pub use wheel::{Wheel, WheelSlot};

use crate::{
    INITIAL_FACING,
    collision::{
        self, CollisionSettings,
        types::{Mat4, Point3, Vec3},
    },
    lap::LapState,
    observer::{ResetReason, TickObserver},
    track::Track,
    utils::{average, midpoint, tick_ms},
};

/// What happened during one [`Vehicle::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleTick {
    /// At least one wheel was supported by the ground this tick.
    pub grounded: bool,
    /// Set when the fall check put the vehicle back at the start.
    pub reset: Option<ResetReason>,
}

#[derive(Clone, Debug)]
pub struct Vehicle {
    spec: CarSpec,
    rig: CarRig,
    drive: DriveSettings,
    collision: CollisionSettings,

    start: Point3,
    wheels: [Wheel; 4],
    pose: ChassisPose,

    facing: Vec3,
    speed: f32,
    steer_angle: f32,
    velocity: Vec3,
    input: DriveInput,

    position_offset: Vec3,
    neutral_delta: f32,
}

impl Vehicle {
    /// Build a vehicle and place it at `start`.
    pub fn new(
        spec: CarSpec,
        rig: CarRig,
        drive: DriveSettings,
        collision: CollisionSettings,
        start: Point3,
    ) -> Self {
        // Placeholders; `place` derives the real wheels from the rig.
        let wheels = WheelSlot::ALL.map(|slot| Wheel::new(slot, start, *rig.wheel_bounds(slot)));

        let mut vehicle = Self {
            spec,
            rig,
            drive,
            collision,
            start,
            wheels,
            pose: ChassisPose::placed(start),
            facing: Vec3::from(INITIAL_FACING),
            speed: 0.0,
            steer_angle: 0.0,
            velocity: Vec3::zeros(),
            input: DriveInput::IDLE,
            position_offset: Vec3::zeros(),
            neutral_delta: 0.0,
        };
        vehicle.place(start);
        vehicle
    }

    /// Put the chassis at `position` with identity orientation and zeroed motion.
    ///
    /// Wheel positions come from the rig; the position offset and the neutral front/back
    /// height delta are measured here and stay fixed until the next placement.
    pub fn place(&mut self, position: Point3) {
        let placed = Mat4::new_translation(&position.coords);
        for wheel in &mut self.wheels {
            let slot = wheel.slot();
            wheel.follow_bone(&(placed * self.rig.bone(slot)), self.rig.wheel_bounds(slot));
            wheel.clear_rotation();
        }

        let points = self.wheel_positions();
        self.position_offset = position - average(&points);
        let front = midpoint(
            &points[WheelSlot::FrontLeft.index()],
            &points[WheelSlot::FrontRight.index()],
        );
        let back = midpoint(
            &points[WheelSlot::BackLeft.index()],
            &points[WheelSlot::BackRight.index()],
        );
        self.neutral_delta = front.y - back.y;

        self.pose = ChassisPose::placed(position);
        self.facing = Vec3::from(INITIAL_FACING);
        self.speed = 0.0;
        self.steer_angle = 0.0;
        self.velocity = Vec3::zeros();

        log::debug!(
            "placed {} at {:?}, offset {:?}",
            self.spec.name,
            position,
            self.position_offset
        );
    }

    /// Back to the start position. Calling it repeatedly yields the same state.
    pub fn reset(&mut self) {
        self.place(self.start);
    }

    /// Driver input applied from the next tick on.
    #[inline]
    pub fn set_input(&mut self, input: DriveInput) {
        self.input = input;
    }

    /// Advance one tick. See the module docs for the order of operations.
    pub fn update(
        &mut self,
        tick: Duration,
        world: &Mat4,
        track: &Track,
        lap: &mut LapState,
        observer: &mut dyn TickObserver,
    ) -> VehicleTick {
        let ms = tick_ms(tick);

        // Gravity and per-wheel contact.
        self.velocity.y -= self.drive.gravity_per_tick;
        let movement = self.velocity * ms;

        let mut grounded = false;
        for wheel in &mut self.wheels {
            let (contact, resolved) =
                collision::move_wheel(wheel, track, &movement, lap, &self.collision);
            observer.on_wheel_contact(wheel.slot(), contact, resolved.resolution);
            grounded |= resolved.resolution.is_grounded();
        }
        if grounded {
            self.velocity = Vec3::zeros();
        }
        self.update_pose(world);

        // Locomotion.
        self.speed = locomotion::update_speed(self.speed, &self.input, self.spec.top_speed, &self.drive);
        self.steer_angle = locomotion::update_steering(self.steer_angle, &self.input, ms, &self.drive);
        self.facing = locomotion::turn_facing(
            &self.facing,
            self.steer_angle,
            self.speed,
            self.spec.turn_divisor,
        );

        let translation = locomotion::chassis_translation(self.speed, &self.facing, ms, &self.drive);
        let roll = locomotion::roll_increment(self.speed, &translation, &self.drive);
        for wheel in &mut self.wheels {
            wheel.translate(&translation);
            wheel.rotate(roll, self.steer_angle);
        }
        self.update_pose(world);

        let mut reset = None;
        if self.pose.position.y < self.drive.fall_reset_height {
            log::info!(
                "{} fell off the track at {:?}, resetting",
                self.spec.name,
                self.pose.position
            );
            self.reset();
            lap.reset();
            observer.on_reset(ResetReason::FellOffTrack);
            reset = Some(ResetReason::FellOffTrack);
        }

        VehicleTick { grounded, reset }
    }

    /// Rebuild the chassis pose from the wheels, then move the wheels onto their bones.
    ///
    /// Wheels follow the chassis frame, not the world-parented transform.
    fn update_pose(&mut self, world: &Mat4) {
        self.pose = solve_chassis_pose(
            &self.wheel_positions(),
            &self.position_offset,
            self.neutral_delta,
            &self.facing,
            world,
        );
        let frame = self.pose.chassis_frame();
        for wheel in &mut self.wheels {
            let slot = wheel.slot();
            wheel.follow_bone(&(frame * self.rig.bone(slot)), self.rig.wheel_bounds(slot));
        }
    }

    /// Full wheel transform for rendering: chassis transform, wheel bone, then the wheel's
    /// own steer and roll.
    pub fn wheel_transform(&self, slot: WheelSlot) -> Mat4 {
        self.pose.transform
            * self.rig.bone(slot)
            * self.wheel(slot).local_rotation().to_homogeneous()
    }

    fn wheel_positions(&self) -> [Point3; 4] {
        self.wheels.each_ref().map(|w| *w.position())
    }

    /// Chassis position.
    #[inline]
    pub fn position(&self) -> &Point3 {
        &self.pose.position
    }

    /// Unit heading on the horizontal plane.
    #[inline]
    pub fn facing(&self) -> &Vec3 {
        &self.facing
    }

    #[inline]
    pub fn pose(&self) -> &ChassisPose {
        &self.pose
    }

    #[inline]
    pub fn wheels(&self) -> &[Wheel; 4] {
        &self.wheels
    }

    #[inline]
    pub fn wheel(&self, slot: WheelSlot) -> &Wheel {
        &self.wheels[slot.index()]
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn steer_angle(&self) -> f32 {
        self.steer_angle
    }

    #[inline]
    pub fn velocity(&self) -> &Vec3 {
        &self.velocity
    }

    #[inline]
    pub fn input(&self) -> &DriveInput {
        &self.input
    }

    #[inline]
    pub fn spec(&self) -> &CarSpec {
        &self.spec
    }

    #[inline]
    pub fn start_position(&self) -> &Point3 {
        &self.start
    }

    #[inline]
    pub fn position_offset(&self) -> &Vec3 {
        &self.position_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collision::types::{Aabb, Quat, Triangle},
        observer::{NoopObserver, RecordingObserver},
        track::{MeshInfo, SegmentId, SegmentSource},
    };
    use approx::assert_abs_diff_eq;

    const TICK: Duration = Duration::from_millis(16);

    fn flat_track(half: f32) -> Track {
        let mesh = MeshInfo::new(
            vec![
                Triangle::new(
                    Point3::new(-half, 0.0, -half),
                    Point3::new(-half, 0.0, half),
                    Point3::new(half, 0.0, -half),
                ),
                Triangle::new(
                    Point3::new(half, 0.0, -half),
                    Point3::new(-half, 0.0, half),
                    Point3::new(half, 0.0, half),
                ),
            ],
            Aabb::new(Point3::new(-half, 0.0, -half), Point3::new(half, 0.0, half)),
        );
        Track::build(
            vec![Mat4::identity()],
            vec![SegmentSource {
                id: SegmentId::from("c_02"),
                bone: 0,
                mesh: Some(mesh),
            }],
        )
        .unwrap()
    }

    fn vehicle(start: Point3) -> Vehicle {
        Vehicle::new(
            CarSpec::muscle(),
            CarRig::default(),
            DriveSettings::default(),
            CollisionSettings::default(),
            start,
        )
    }

    #[test]
    fn placement_measures_offset_and_faces_forward() {
        let v = vehicle(Point3::new(10.0, 5.0, -3.0));
        assert_eq!(*v.position(), Point3::new(10.0, 5.0, -3.0));
        assert_eq!(*v.facing(), Vec3::new(0.0, 0.0, -1.0));
        // Default rig hangs the wheels one unit below the chassis.
        assert_abs_diff_eq!(*v.position_offset(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1.0e-6);
        assert_abs_diff_eq!(v.wheel(WheelSlot::FrontLeft).position().z, -9.0, epsilon = 1.0e-6);
    }

    #[test]
    fn vehicle_settles_on_flat_ground() {
        let track = flat_track(100.0);
        let mut lap = LapState::new(&track, SegmentId::from("c_02"));
        let mut v = vehicle(Point3::new(0.0, 6.0, 0.0));

        let mut obs = NoopObserver;
        for _ in 0..200 {
            v.update(TICK, &Mat4::identity(), &track, &mut lap, &mut obs);
        }

        for w in v.wheels() {
            assert_abs_diff_eq!(w.position().y, 2.0, epsilon = 1.0e-3);
        }
        assert_abs_diff_eq!(v.pose().pitch, 0.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(v.pose().roll, 0.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(v.position().y, 3.0, epsilon = 1.0e-3);
        assert!(lap.lap_done());
    }

    #[test]
    fn throttle_drives_along_the_facing() {
        let track = flat_track(500.0);
        let mut lap = LapState::new(&track, SegmentId::from("c_02"));
        let mut v = vehicle(Point3::new(0.0, 3.0, 0.0));
        v.set_input(DriveInput {
            accelerate: true,
            ..DriveInput::IDLE
        });

        let mut obs = NoopObserver;
        for _ in 0..60 {
            v.update(TICK, &Mat4::identity(), &track, &mut lap, &mut obs);
        }
        assert!(v.speed() > 0.0);
        assert!(v.position().z < -10.0);
        assert_abs_diff_eq!(v.position().x, 0.0, epsilon = 1.0e-3);
        assert!(v.wheel(WheelSlot::BackLeft).roll_angle() > 0.0);
    }

    #[test]
    fn falling_off_the_world_resets_vehicle_and_lap() {
        let track = flat_track(10.0);
        let mut lap = LapState::new(&track, SegmentId::from("c_02"));
        // Far away from the only segment: nothing to land on.
        let start = Point3::new(1000.0, 0.0, 1000.0);
        let mut v = vehicle(start);

        lap.mark_overlapped(&SegmentId::from("c_02"));
        let mut obs = RecordingObserver::default();
        let mut ticks = 0;
        loop {
            let out = v.update(TICK, &Mat4::identity(), &track, &mut lap, &mut obs);
            ticks += 1;
            if out.reset.is_some() {
                break;
            }
            assert!(ticks < 2000, "never fell below the reset height");
        }

        assert_eq!(obs.resets, vec![ResetReason::FellOffTrack]);
        assert_eq!(*v.position(), start);
        assert_eq!(v.speed(), 0.0);
        assert_eq!(*v.velocity(), Vec3::zeros());
        assert_eq!(lap.visited_count(), 0);
        assert!(v.wheels().iter().all(|w| w.roll_angle() == 0.0));
    }

    #[test]
    fn idle_car_under_a_translated_world_stays_put() {
        let track = flat_track(100.0);
        let mut lap = LapState::new(&track, SegmentId::from("c_02"));
        let mut v = vehicle(Point3::new(0.0, 3.0, 0.0));
        let world = Mat4::new_translation(&Vec3::new(5.0, 0.0, 0.0));

        let mut obs = NoopObserver;
        for _ in 0..10 {
            v.update(TICK, &world, &track, &mut lap, &mut obs);
        }

        assert_abs_diff_eq!(v.position().x, 0.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(v.position().z, 0.0, epsilon = 1.0e-4);
        assert_abs_diff_eq!(v.wheel(WheelSlot::FrontLeft).position().x, -4.0, epsilon = 1.0e-4);
        // The world parent shows up only in the render transform.
        assert_abs_diff_eq!(v.pose().transform[(0, 3)], 5.0, epsilon = 1.0e-4);
    }

    #[test]
    fn steered_front_wheel_differs_from_rear_by_the_steer_rotation() {
        let track = flat_track(500.0);
        let mut lap = LapState::new(&track, SegmentId::from("c_02"));
        let mut v = vehicle(Point3::new(0.0, 3.0, 0.0));
        v.set_input(DriveInput {
            accelerate: true,
            steer_left: true,
            ..DriveInput::IDLE
        });

        let mut obs = NoopObserver;
        for _ in 0..20 {
            v.update(TICK, &Mat4::identity(), &track, &mut lap, &mut obs);
        }

        let front = v.wheel(WheelSlot::FrontLeft);
        let rear = v.wheel(WheelSlot::BackLeft);
        assert!(front.steer_angle() != 0.0);
        assert_eq!(rear.steer_angle(), 0.0);
        assert_abs_diff_eq!(front.roll_angle(), rear.roll_angle(), epsilon = 1.0e-6);

        // Flat ground: the chassis only yaws, which commutes with the steer rotation.
        let rot = |m: Mat4| m.fixed_view::<3, 3>(0, 0).into_owned();
        let relative = rot(v.wheel_transform(WheelSlot::FrontLeft))
            * rot(v.wheel_transform(WheelSlot::BackLeft)).transpose();
        let steer = Quat::from_axis_angle(&Vec3::y_axis(), front.steer_angle());
        assert_abs_diff_eq!(relative, steer.to_rotation_matrix().into_inner(), epsilon = 1.0e-4);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut v = vehicle(Point3::new(0.0, 3.0, 0.0));
        v.reset();
        let once = (*v.position(), *v.facing(), v.wheel_positions());
        v.reset();
        assert_eq!((*v.position(), *v.facing(), v.wheel_positions()), once);
    }
}
