//! Single-file container for a whole track: bone table plus per-segment mesh info.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[4]       – Magic "KRTK"
//! UINT32         – Format version (1)
//! UINT32         – Bone count
//! foreach bone
//!     REAL32[16] – Absolute transform, column-major
//! end
//! UINT32         – Segment count
//! foreach segment
//!     UINT32     – Name length in bytes
//!     UINT8[n]   – UTF-8 name
//!     UINT32     – Bone index
//!     MeshInfo   – See [`super::mesh_info`]
//! end
//! ```

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use super::{MeshInfo, SegmentId, SegmentSource, Track, mesh_info};
use crate::{
    collision::types::Mat4,
    error::{MeshInfoError, MeshInfoResult},
};

/// Bundle magic bytes.
pub const BUNDLE_MAGIC: [u8; 4] = *b"KRTK";

/// Current bundle format version.
pub const BUNDLE_VERSION: u32 = 1;

/// One segment entry inside a bundle.
#[derive(Clone, Debug, PartialEq)]
pub struct BundleSegment {
    pub id: SegmentId,
    pub bone: u32,
    pub mesh: MeshInfo,
}

/// Decoded track bundle, not yet validated as a [`Track`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackBundle {
    pub bones: Vec<Mat4>,
    pub segments: Vec<BundleSegment>,
}

impl TrackBundle {
    /// Load a bundle from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> MeshInfoResult<Self> {
        let file = File::open(path)?;
        Self::read_from(&mut BufReader::new(file))
    }

    /// Write the bundle to disk, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MeshInfoResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> MeshInfoResult<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != BUNDLE_MAGIC {
            return Err(MeshInfoError::BadMagic);
        }
        let version = mesh_info::read_u32(reader)?;
        if version != BUNDLE_VERSION {
            return Err(MeshInfoError::UnsupportedVersion(version));
        }

        let bone_count = mesh_info::read_u32(reader)? as usize;
        let mut bones = Vec::with_capacity(bone_count.min(1024));
        for _ in 0..bone_count {
            let mut cols = [0f32; 16];
            for v in &mut cols {
                *v = mesh_info::read_f32(reader)?;
            }
            bones.push(Mat4::from_column_slice(&cols));
        }

        let segment_count = mesh_info::read_u32(reader)? as usize;
        let mut segments = Vec::with_capacity(segment_count.min(1024));
        for _ in 0..segment_count {
            // Bounded by what the input actually holds.
            let len = mesh_info::read_u32(reader)?;
            let mut name = Vec::new();
            Read::take(&mut *reader, u64::from(len)).read_to_end(&mut name)?;
            if name.len() != len as usize {
                return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
            }
            let id = SegmentId::from(String::from_utf8(name)?);
            let bone = mesh_info::read_u32(reader)?;
            let mesh = MeshInfo::read_from(reader)?;
            segments.push(BundleSegment { id, bone, mesh });
        }

        log::debug!(
            "decoded track bundle: {} bones, {} segments",
            bones.len(),
            segments.len()
        );
        Ok(Self { bones, segments })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> MeshInfoResult<()> {
        writer.write_all(&BUNDLE_MAGIC)?;
        writer.write_all(&BUNDLE_VERSION.to_le_bytes())?;

        writer.write_all(&len_u32(self.bones.len())?.to_le_bytes())?;
        for bone in &self.bones {
            for v in bone.as_slice() {
                writer.write_all(&v.to_le_bytes())?;
            }
        }

        writer.write_all(&len_u32(self.segments.len())?.to_le_bytes())?;
        for seg in &self.segments {
            let name = seg.id.as_str().as_bytes();
            writer.write_all(&len_u32(name.len())?.to_le_bytes())?;
            writer.write_all(name)?;
            writer.write_all(&seg.bone.to_le_bytes())?;
            seg.mesh.write_to(writer)?;
        }
        Ok(())
    }

    /// Validate and build the immutable [`Track`].
    pub fn into_track(self) -> MeshInfoResult<Track> {
        let sources = self
            .segments
            .into_iter()
            .map(|s| SegmentSource {
                id: s.id,
                bone: s.bone as usize,
                mesh: Some(s.mesh),
            })
            .collect();
        Ok(Track::build(self.bones, sources)?)
    }
}

fn len_u32(len: usize) -> MeshInfoResult<u32> {
    u32::try_from(len).map_err(|_| MeshInfoError::TooManyTriangles(len))
}
