//! Preprocessed per-mesh collision data.
//!
//! # Binary Format
//!
//! Little-endian throughout:
//!
//! ```text
//! INT32          – Number of triangles
//! foreach triangle
//!     REAL32[3]  – Point 0
//!     REAL32[3]  – Point 1
//!     REAL32[3]  – Point 2
//! end
//! REAL32[3]      – Bounding box min (mesh-local)
//! REAL32[3]      – Bounding box max (mesh-local)
//! ```

use std::io::{Read, Write};

use crate::{
    collision::types::{Aabb, Point3, Triangle},
    error::{MeshInfoError, MeshInfoResult},
};

/// Upper bound for the up-front allocation when decoding; larger counts grow on demand.
const PREALLOC_TRIANGLES: usize = 1 << 16;

/// World-space triangles plus a mesh-local bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshInfo {
    pub triangles: Vec<Triangle>,
    pub bounds: Aabb,
}

impl MeshInfo {
    pub fn new(triangles: Vec<Triangle>, bounds: Aabb) -> Self {
        Self { triangles, bounds }
    }

    /// Decode one record from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is truncated or the triangle count is negative.
    pub fn read_from<R: Read>(reader: &mut R) -> MeshInfoResult<Self> {
        let count = read_i32(reader)?;
        if count < 0 {
            return Err(MeshInfoError::NegativeCount(count));
        }
        let count = count as usize;

        let mut triangles = Vec::with_capacity(count.min(PREALLOC_TRIANGLES));
        for _ in 0..count {
            let p0 = read_point(reader)?;
            let p1 = read_point(reader)?;
            let p2 = read_point(reader)?;
            triangles.push(Triangle::new(p0, p1, p2));
        }

        let min = read_point(reader)?;
        let max = read_point(reader)?;

        Ok(Self {
            triangles,
            bounds: Aabb::new(min, max),
        })
    }

    /// Encode this record to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error on write failure or if the triangle count does not fit in an `i32`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> MeshInfoResult<()> {
        let count = i32::try_from(self.triangles.len())
            .map_err(|_| MeshInfoError::TooManyTriangles(self.triangles.len()))?;
        writer.write_all(&count.to_le_bytes())?;

        for tri in &self.triangles {
            for p in tri.points() {
                write_point(writer, p)?;
            }
        }

        write_point(writer, &self.bounds.mins)?;
        write_point(writer, &self.bounds.maxs)?;
        Ok(())
    }
}

pub(crate) fn read_i32<R: Read>(reader: &mut R) -> MeshInfoResult<i32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

pub(crate) fn read_u32<R: Read>(reader: &mut R) -> MeshInfoResult<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

pub(crate) fn read_f32<R: Read>(reader: &mut R) -> MeshInfoResult<f32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

fn read_point<R: Read>(reader: &mut R) -> MeshInfoResult<Point3> {
    let x = read_f32(reader)?;
    let y = read_f32(reader)?;
    let z = read_f32(reader)?;
    Ok(Point3::new(x, y, z))
}

fn write_point<W: Write>(writer: &mut W, p: &Point3) -> MeshInfoResult<()> {
    writer.write_all(&p.x.to_le_bytes())?;
    writer.write_all(&p.y.to_le_bytes())?;
    writer.write_all(&p.z.to_le_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> MeshInfo {
        MeshInfo::new(
            vec![
                Triangle::new(
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(0.0, 0.0, 4.0),
                    Point3::new(4.0, 0.0, 0.0),
                ),
                Triangle::new(
                    Point3::new(4.0, 0.0, 0.0),
                    Point3::new(0.0, 0.0, 4.0),
                    Point3::new(4.0, 1.5, 4.0),
                ),
            ],
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 1.5, 4.0)),
        )
    }

    #[test]
    fn record_layout_is_count_points_then_box() {
        let mut buf = Vec::new();
        sample().write_to(&mut buf).unwrap();
        // 4 count + 2 * 9 floats + 6 floats
        assert_eq!(buf.len(), 4 + 2 * 36 + 24);
        assert_eq!(&buf[..4], &2i32.to_le_bytes());

        let decoded = MeshInfo::read_from(&mut Cursor::new(buf)).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut buf = (-1i32).to_le_bytes().to_vec();
        buf.extend_from_slice(&[0u8; 24]);
        let err = MeshInfo::read_from(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, MeshInfoError::NegativeCount(-1)));
    }

    #[test]
    fn truncated_input_is_an_io_error() {
        let mut buf = Vec::new();
        sample().write_to(&mut buf).unwrap();
        buf.truncate(buf.len() - 3);
        let err = MeshInfo::read_from(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, MeshInfoError::Io(_)));
    }

    #[test]
    fn empty_mesh_still_carries_its_box() {
        let mesh = MeshInfo::new(
            Vec::new(),
            Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)),
        );
        let mut buf = Vec::new();
        mesh.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), 28);
        assert_eq!(MeshInfo::read_from(&mut Cursor::new(buf)).unwrap(), mesh);
    }
}
