use std::f32::consts::PI;

use nalgebra::Vector2;

use crate::{
    YAW_EPS,
    collision::types::{Point3, Vec3},
};

/// Chassis yaw for a facing vector: `atan2(f.x, f.z) + π`.
///
/// Returns `None` when the facing has no horizontal component.
pub fn yaw_from_facing(facing: &Vec3) -> Option<f32> {
    let xz = to_planar(facing);
    if xz.norm_squared() > YAW_EPS {
        return Some(xz.x.atan2(xz.y) + PI);
    }

    None
}

/// Project a 3-D vector onto the horizontal (XZ) plane.
#[inline]
pub fn to_planar(v: &Vec3) -> Vector2<f32> {
    Vector2::new(v.x, v.z)
}

/// Planar (XZ) distance squared between two world positions.
pub fn planar_distance_sq(a: &Point3, b: &Point3) -> f32 {
    let x = b.x - a.x;
    let z = b.z - a.z;
    x * x + z * z
}

/// Planar (XZ) distance between two world positions.
#[inline]
pub fn planar_distance(a: &Point3, b: &Point3) -> f32 {
    planar_distance_sq(a, b).sqrt()
}

/// Midpoint of two points.
#[inline]
pub fn midpoint(a: &Point3, b: &Point3) -> Point3 {
    nalgebra::center(a, b)
}

/// Arithmetic mean of a non-empty set of points.
pub fn average(points: &[Point3]) -> Point3 {
    let sum = points.iter().fold(Vec3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len().max(1) as f32)
}

/// Milliseconds in a tick as `f32`.
#[inline]
pub fn tick_ms(tick: std::time::Duration) -> f32 {
    tick.as_secs_f32() * 1000.0
}
