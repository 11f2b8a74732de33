use std::f32::consts::TAU;

use crate::collision::types::{Aabb, Mat4, Point3, Quat, Vec3, aabb_from_corners};

/// Fixed wheel index convention: 0 front-left, 1 front-right, 2 back-left, 3 back-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WheelSlot {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl WheelSlot {
    /// Every slot in index order. Collision is resolved in this order each tick.
    pub const ALL: [WheelSlot; 4] = [
        WheelSlot::FrontLeft,
        WheelSlot::FrontRight,
        WheelSlot::BackLeft,
        WheelSlot::BackRight,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::BackLeft)
    }

    /// Short rig name (`lf`, `rf`, `lb`, `rb`).
    pub fn name(self) -> &'static str {
        match self {
            Self::FrontLeft => "lf",
            Self::FrontRight => "rf",
            Self::BackLeft => "lb",
            Self::BackRight => "rb",
        }
    }
}

/// One wheel: a contact point, a world box for the broad phase and its visual angles.
#[derive(Clone, Debug)]
pub struct Wheel {
    slot: WheelSlot,
    position: Point3,
    bounds: Aabb,
    roll_angle: f32,
    steer_angle: f32,
}

impl Wheel {
    pub fn new(slot: WheelSlot, position: Point3, bounds: Aabb) -> Self {
        Self {
            slot,
            position,
            bounds,
            roll_angle: 0.0,
            steer_angle: 0.0,
        }
    }

    /// Re-derive position and box from the absolute bone transform, keeping roll and steer.
    ///
    /// The position is the bone origin and the box is the wheel-local box with its two
    /// corners transformed separately.
    pub fn follow_bone(&mut self, absolute: &Mat4, local_bounds: &Aabb) {
        self.position = absolute.transform_point(&Point3::origin());
        self.bounds = aabb_from_corners(
            absolute.transform_point(&local_bounds.mins),
            absolute.transform_point(&local_bounds.maxs),
        );
    }

    /// Move the contact point and the box together.
    pub fn translate(&mut self, delta: &Vec3) {
        self.position += delta;
        self.bounds.mins += delta;
        self.bounds.maxs += delta;
    }

    /// Accumulate roll (wrapped into `[0, 2π)`) and set the steering direction.
    ///
    /// Rear wheels ignore `steer`.
    pub fn rotate(&mut self, roll: f32, steer: f32) {
        self.roll_angle = (self.roll_angle + roll).rem_euclid(TAU);
        self.steer_angle = if self.slot.is_front() { steer } else { 0.0 };
    }

    /// Zero both angles.
    pub fn clear_rotation(&mut self) {
        self.roll_angle = 0.0;
        self.steer_angle = 0.0;
    }

    /// Wheel-local visual rotation: steering about the vertical axis, then roll about the axle.
    pub fn local_rotation(&self) -> Quat {
        Quat::from_axis_angle(&Vec3::y_axis(), self.steer_angle)
            * Quat::from_axis_angle(&Vec3::x_axis(), self.roll_angle)
    }

    #[inline]
    pub fn slot(&self) -> WheelSlot {
        self.slot
    }

    #[inline]
    pub fn position(&self) -> &Point3 {
        &self.position
    }

    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    #[inline]
    pub fn roll_angle(&self) -> f32 {
        self.roll_angle
    }

    #[inline]
    pub fn steer_angle(&self) -> f32 {
        self.steer_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::types::aabb_around;
    use approx::assert_abs_diff_eq;

    fn wheel(slot: WheelSlot) -> Wheel {
        let p = Point3::new(1.0, 2.0, 3.0);
        Wheel::new(slot, p, aabb_around(&p, &Vec3::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn translate_moves_point_and_box_together() {
        let mut w = wheel(WheelSlot::FrontLeft);
        w.translate(&Vec3::new(0.0, -1.5, 2.0));
        assert_eq!(*w.position(), Point3::new(1.0, 0.5, 5.0));
        assert_eq!(w.bounds().center(), *w.position());
    }

    #[test]
    fn roll_wraps_into_one_turn() {
        let mut w = wheel(WheelSlot::BackLeft);
        w.rotate(TAU + 0.5, 0.0);
        assert_abs_diff_eq!(w.roll_angle(), 0.5, epsilon = 1.0e-5);
        w.rotate(-1.0, 0.0);
        assert_abs_diff_eq!(w.roll_angle(), TAU - 0.5, epsilon = 1.0e-5);
    }

    #[test]
    fn only_front_wheels_steer() {
        let mut front = wheel(WheelSlot::FrontRight);
        let mut back = wheel(WheelSlot::BackRight);
        front.rotate(0.0, 0.3);
        back.rotate(0.0, 0.3);
        assert_eq!(front.steer_angle(), 0.3);
        assert_eq!(back.steer_angle(), 0.0);

        // Steering turns the axle about the vertical axis.
        let axle = front.local_rotation() * Vec3::x();
        assert_abs_diff_eq!(axle.y, 0.0, epsilon = 1.0e-6);
        assert_abs_diff_eq!(axle.z, -(0.3f32).sin(), epsilon = 1.0e-6);
    }

    #[test]
    fn follows_its_bone() {
        let local = aabb_around(&Point3::origin(), &Vec3::new(0.5, 1.0, 1.0));
        let bone = Mat4::new_translation(&Vec3::new(-4.0, -1.0, -6.0));
        let mut w = Wheel::new(WheelSlot::FrontLeft, Point3::origin(), local);
        w.follow_bone(&bone, &local);
        w.rotate(1.0, 0.2);
        assert_eq!(*w.position(), Point3::new(-4.0, -1.0, -6.0));

        let moved = Mat4::new_translation(&Vec3::new(0.0, 10.0, 0.0)) * bone;
        w.follow_bone(&moved, &local);
        assert_eq!(*w.position(), Point3::new(-4.0, 9.0, -6.0));
        assert_eq!(w.bounds().mins, Point3::new(-4.5, 8.0, -7.0));
        assert_abs_diff_eq!(w.roll_angle(), 1.0);
    }
}
