use crate::collision::types::{Aabb, Mat4, Point3, Vec3, aabb_around};

use super::wheel::WheelSlot;

/// Chassis-local wheel bones and wheel-local boxes, indexed by [`WheelSlot`].
///
/// The chassis faces -Z in its own frame with +X to the right.
#[derive(Clone, Debug, PartialEq)]
pub struct CarRig {
    bones: [Mat4; 4],
    wheel_bounds: [Aabb; 4],
}

impl CarRig {
    pub fn new(bones: [Mat4; 4], wheel_bounds: [Aabb; 4]) -> Self {
        Self {
            bones,
            wheel_bounds,
        }
    }

    /// Mirror-symmetric rig with identical wheels.
    ///
    /// Wheels sit `half_track` left and right of the center line, `half_wheelbase` ahead and
    /// behind the center, and `ride_height` below it.
    pub fn symmetric(
        half_track: f32,
        half_wheelbase: f32,
        ride_height: f32,
        wheel_half_extents: Vec3,
    ) -> Self {
        let bone = |slot: WheelSlot| {
            let x = if slot.is_left() { -half_track } else { half_track };
            let z = if slot.is_front() { -half_wheelbase } else { half_wheelbase };
            Mat4::new_translation(&Vec3::new(x, -ride_height, z))
        };
        let bounds = aabb_around(&Point3::origin(), &wheel_half_extents);

        Self {
            bones: WheelSlot::ALL.map(bone),
            wheel_bounds: [bounds; 4],
        }
    }

    /// Chassis-local transform of a wheel bone.
    #[inline]
    pub fn bone(&self, slot: WheelSlot) -> &Mat4 {
        &self.bones[slot.index()]
    }

    /// Wheel-local box of a wheel.
    #[inline]
    pub fn wheel_bounds(&self, slot: WheelSlot) -> &Aabb {
        &self.wheel_bounds[slot.index()]
    }
}

impl Default for CarRig {
    fn default() -> Self {
        Self::symmetric(4.0, 6.0, 1.0, Vec3::new(0.6, 1.0, 1.0))
    }
}
