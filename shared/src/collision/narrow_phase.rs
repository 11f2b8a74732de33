use super::{
    settings::PARALLEL_EPS,
    types::{Plane, Point3, Triangle, Vec3},
};

/// Signed ray parameter `t` at which `origin + t * direction` meets `plane`.
///
/// `t = (-(normal ⋅ origin) - offset) / (normal ⋅ direction)`
///
/// Returns `None` when the ray is parallel to the plane (denominator within
/// [`PARALLEL_EPS`]) or when the result is not finite.
#[inline]
pub fn ray_plane_parameter(origin: &Point3, direction: &Vec3, plane: &Plane) -> Option<f32> {
    let denom = plane.dot_normal(direction);
    if !(denom.abs() > PARALLEL_EPS) {
        return None;
    }
    let t = (-plane.dot_normal(&origin.coords) - plane.offset) / denom;
    t.is_finite().then_some(t)
}

/// Whether a point lying in the triangle's plane is strictly inside the triangle.
///
/// The three edge cross products `(p - a) × (b - a)` must all point the same way. Reversing
/// the winding flips all three at once, so the answer does not depend on point order.
/// Points on an edge or vertex are rejected.
pub fn point_in_triangle(tri: &Triangle, p: &Point3) -> bool {
    let [p0, p1, p2] = tri.points();

    let cross0 = (p - p0).cross(&(p1 - p0));
    let cross1 = (p - p1).cross(&(p2 - p1));
    let cross2 = (p - p2).cross(&(p0 - p2));

    same_direction(&cross0, &cross1) && same_direction(&cross0, &cross2)
}

#[inline]
fn same_direction(a: &Vec3, b: &Vec3) -> bool {
    a.dot(b) > 0.0
}

/// Travel distance along `movement` from `origin` until the ray meets `tri`.
///
/// The ray is unbounded in both directions: a negative result means the triangle lies
/// behind the origin (the wheel has already passed through it). The parametric hit is
/// scaled by `|movement|`, so the result is a true distance when `movement` is non-zero.
pub fn ray_triangle_distance(tri: &Triangle, origin: &Point3, movement: &Vec3) -> Option<f32> {
    let plane = tri.plane()?;
    let t = ray_plane_parameter(origin, movement, &plane)?;

    let hit = origin + movement * t;
    if !point_in_triangle(tri, &hit) {
        return None;
    }

    let distance = t * movement.norm();
    distance.is_finite().then_some(distance)
}

/// Minimum [`ray_triangle_distance`] across `triangles`, or `None` if nothing is hit.
pub fn min_distance_to_triangles(
    triangles: &[Triangle],
    origin: &Point3,
    movement: &Vec3,
) -> Option<f32> {
    let mut best: Option<f32> = None;
    for tri in triangles {
        if let Some(d) = ray_triangle_distance(tri, origin, movement) {
            if best.map_or(true, |b| d < b) {
                best = Some(d);
            }
        }
    }
    best
}
