/*!
Core geometry types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms beyond the plane derivation of a
triangle. It defines the data exchanged between:
- broad phase (wheel box vs. segment box pretest)
- narrow phase (ray/triangle distance along a wheel's movement vector)
- contact resolution (turning a distance into a wheel translation)
- the vehicle and its pose solver

Conventions
- World units are the track's authored units; +Y is up.
- Triangles are stored in world space, exactly as the mesh preprocessor emitted them.
- Bounding boxes may be authored unordered (min > max on some axis). Consumers that need
  ordered bounds must go through [`crate::collision::broad::normalized`].
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Mat4 = na::Matrix4<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Axis-aligned bounding box used for segments and wheels.
pub use rapier3d::parry::bounding_volume::Aabb;

/// Squared cross-product length below which a triangle is treated as zero-area.
const DEGENERATE_AREA_SQ: f32 = 1.0e-12;

/// A terrain triangle: three world-space points in their authored winding order.
///
/// Immutable once constructed; the implicit plane is derived on demand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    points: [Point3; 3],
}

impl Triangle {
    #[inline]
    pub fn new(p0: Point3, p1: Point3, p2: Point3) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    #[inline]
    pub fn p0(&self) -> &Point3 {
        &self.points[0]
    }

    #[inline]
    pub fn p1(&self) -> &Point3 {
        &self.points[1]
    }

    #[inline]
    pub fn p2(&self) -> &Point3 {
        &self.points[2]
    }

    #[inline]
    pub fn points(&self) -> &[Point3; 3] {
        &self.points
    }

    /// The same triangle with the winding order reversed.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.points[2], self.points[1], self.points[0])
    }

    /// Plane through the three points, or `None` for a zero-area triangle.
    #[inline]
    pub fn plane(&self) -> Option<Plane> {
        Plane::from_points(&self.points[0], &self.points[1], &self.points[2])
    }
}

/// Infinite plane in Hessian normal form: `normal ⋅ x + offset = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    /// Unit normal. Its orientation follows the winding of the source points.
    pub normal: Vec3,
    /// Signed offset, i.e. `-(normal ⋅ p)` for any point `p` on the plane.
    pub offset: f32,
}

impl Plane {
    /// Plane through three points, normal = normalize((b - a) × (c - a)).
    ///
    /// Returns `None` when the points are collinear or coincident.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        let n = (b - a).cross(&(c - a));
        let len_sq = n.norm_squared();
        if !(len_sq > DEGENERATE_AREA_SQ) || !len_sq.is_finite() {
            return None;
        }
        let normal = n / len_sq.sqrt();
        Some(Self {
            normal,
            offset: -normal.dot(&a.coords),
        })
    }

    /// `normal ⋅ v`
    #[inline]
    pub fn dot_normal(&self, v: &Vec3) -> f32 {
        self.normal.dot(v)
    }

    /// Signed distance of `p` from the plane along the normal.
    #[inline]
    pub fn signed_distance(&self, p: &Point3) -> f32 {
        self.dot_normal(&p.coords) + self.offset
    }
}

/// Build an [`Aabb`] from two corners without reordering them.
#[inline]
pub fn aabb_from_corners(a: Point3, b: Point3) -> Aabb {
    Aabb::new(a, b)
}

/// Box centered on `center` with the given half extents.
#[inline]
pub fn aabb_around(center: &Point3, half_extents: &Vec3) -> Aabb {
    Aabb::new(center - half_extents, center + half_extents)
}
