/*!
Chassis pose reconstruction from four wheel contact points.

The chassis is never integrated on its own: each tick its orientation and position are
rebuilt from where the wheels ended up.

- Pitch: height difference between the front and back axle midpoints, corrected by the
  neutral delta measured at placement, over their horizontal distance. Rotation about +X.
- Roll: height difference between the left and right side midpoints over their horizontal
  distance. Rotation about -Z (the chassis forward axis).
- Yaw: from the facing vector, rotation about +Y.

The orientation applies pitch first, then roll, then yaw. The chassis center is the wheel
average plus the placement offset rotated into the new orientation.
*/

use nalgebra::Unit;

use crate::{
    collision::types::{Mat4, Point3, Quat, Vec3},
    utils::{average, midpoint, planar_distance, yaw_from_facing},
};

use super::wheel::WheelSlot;

/// Reconstructed chassis frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChassisPose {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
    pub orientation: Quat,
    pub position: Point3,
    /// `world * translation(position) * rotation(orientation)`.
    pub transform: Mat4,
}

impl ChassisPose {
    /// Untilted pose at `position` with identity orientation.
    pub fn placed(position: Point3) -> Self {
        Self {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            orientation: Quat::identity(),
            position,
            transform: Mat4::new_translation(&position.coords),
        }
    }

    /// `translation(position) * rotation(orientation)` without the world parent.
    ///
    /// Wheels are collided in this frame, so the world transform never feeds back into the
    /// next solve.
    pub fn chassis_frame(&self) -> Mat4 {
        Mat4::new_translation(&self.position.coords) * self.orientation.to_homogeneous()
    }
}

/// Rebuild the chassis pose.
///
/// `wheels` are in [`WheelSlot`] index order. `offset` is the chassis center minus the wheel
/// average measured at placement. `neutral_delta` is the front-minus-back height measured at
/// placement.
pub fn solve_chassis_pose(
    wheels: &[Point3; 4],
    offset: &Vec3,
    neutral_delta: f32,
    facing: &Vec3,
    world: &Mat4,
) -> ChassisPose {
    let at = |slot: WheelSlot| wheels[slot.index()];

    let front = midpoint(&at(WheelSlot::FrontLeft), &at(WheelSlot::FrontRight));
    let back = midpoint(&at(WheelSlot::BackLeft), &at(WheelSlot::BackRight));
    let pitch = (front.y - back.y - neutral_delta).atan2(planar_distance(&front, &back));

    let left = midpoint(&at(WheelSlot::FrontLeft), &at(WheelSlot::BackLeft));
    let right = midpoint(&at(WheelSlot::FrontRight), &at(WheelSlot::BackRight));
    let roll = (left.y - right.y).atan2(planar_distance(&left, &right));

    let yaw = yaw_from_facing(facing).unwrap_or(0.0);

    let pitch_q = Quat::from_axis_angle(&Vec3::x_axis(), pitch);
    let roll_q = Quat::from_axis_angle(&Unit::new_unchecked(Vec3::new(0.0, 0.0, -1.0)), roll);
    let yaw_q = Quat::from_axis_angle(&Vec3::y_axis(), yaw);
    let orientation = yaw_q * roll_q * pitch_q;

    let position = average(wheels) + orientation * offset;
    let mut pose = ChassisPose {
        pitch,
        roll,
        yaw,
        orientation,
        position,
        transform: Mat4::identity(),
    };
    pose.transform = world * pose.chassis_frame();
    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn level(y: f32) -> [Point3; 4] {
        [
            Point3::new(-2.0, y, -3.0),
            Point3::new(2.0, y, -3.0),
            Point3::new(-2.0, y, 3.0),
            Point3::new(2.0, y, 3.0),
        ]
    }

    fn forward() -> Vec3 {
        Vec3::new(0.0, 0.0, -1.0)
    }

    #[test]
    fn level_wheels_give_zero_pitch_and_roll() {
        let pose = solve_chassis_pose(&level(7.0), &Vec3::new(0.0, 1.0, 0.0), 0.0, &forward(), &Mat4::identity());
        assert_eq!(pose.pitch, 0.0);
        assert_eq!(pose.roll, 0.0);
        assert_abs_diff_eq!(pose.position, Point3::new(0.0, 8.0, 0.0), epsilon = 1.0e-5);
    }

    #[test]
    fn world_parent_only_touches_the_render_transform() {
        let world = Mat4::new_translation(&Vec3::new(5.0, 0.0, 0.0));
        let pose = solve_chassis_pose(&level(7.0), &Vec3::new(0.0, 1.0, 0.0), 0.0, &forward(), &world);
        assert_abs_diff_eq!(pose.position, Point3::new(0.0, 8.0, 0.0), epsilon = 1.0e-5);
        assert_abs_diff_eq!(pose.transform, world * pose.chassis_frame(), epsilon = 1.0e-6);
        assert_abs_diff_eq!(pose.chassis_frame()[(0, 3)], 0.0, epsilon = 1.0e-5);
        assert_abs_diff_eq!(pose.transform[(0, 3)], 5.0, epsilon = 1.0e-5);
    }

    #[test]
    fn neutral_delta_cancels_the_placement_rake() {
        let mut w = level(0.0);
        w[0].y = 0.5;
        w[1].y = 0.5;
        let pose = solve_chassis_pose(&w, &Vec3::zeros(), 0.5, &forward(), &Mat4::identity());
        assert_abs_diff_eq!(pose.pitch, 0.0, epsilon = 1.0e-6);
    }

    #[test]
    fn raised_front_pitches_the_nose_up() {
        let mut w = level(0.0);
        w[0].y = 6.0;
        w[1].y = 6.0;
        let pose = solve_chassis_pose(&w, &Vec3::zeros(), 0.0, &forward(), &Mat4::identity());
        assert_abs_diff_eq!(pose.pitch, std::f32::consts::FRAC_PI_4, epsilon = 1.0e-5);
        let nose = pose.orientation * forward();
        assert!(nose.y > 0.0);
    }

    #[test]
    fn raised_left_side_rolls_left_up() {
        let mut w = level(0.0);
        w[0].y = 4.0;
        w[2].y = 4.0;
        let pose = solve_chassis_pose(&w, &Vec3::zeros(), 0.0, &forward(), &Mat4::identity());
        assert_abs_diff_eq!(pose.roll, std::f32::consts::FRAC_PI_4, epsilon = 1.0e-5);
        let left = pose.orientation * Vec3::new(-1.0, 0.0, 0.0);
        assert!(left.y > 0.0);
    }

    #[test]
    fn yaw_maps_chassis_forward_onto_facing() {
        let facing = Vec3::new(1.0, 0.0, 0.0);
        let pose = solve_chassis_pose(&level(0.0), &Vec3::zeros(), 0.0, &facing, &Mat4::identity());
        let fwd = pose.orientation * forward();
        assert_abs_diff_eq!(fwd, facing, epsilon = 1.0e-5);
    }

    #[test]
    fn offset_is_rotated_and_world_is_applied_last() {
        let facing = Vec3::new(1.0, 0.0, 0.0);
        let world = Mat4::new_translation(&Vec3::new(0.0, 100.0, 0.0));
        let pose = solve_chassis_pose(&level(0.0), &Vec3::new(0.0, 0.0, -1.0), 0.0, &facing, &world);
        // Offset pointed forward, so it follows the facing.
        assert_abs_diff_eq!(pose.position, Point3::new(1.0, 0.0, 0.0), epsilon = 1.0e-5);
        let origin = pose.transform.transform_point(&Point3::origin());
        assert_abs_diff_eq!(origin, Point3::new(1.0, 100.0, 0.0), epsilon = 1.0e-5);
    }
}
