//! Imported mesh binary format (.ogmesh)
//!
//! One file per drawn geometry. POD format - no magic bytes.
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32
//! 0x04: index_count u32
//! 0x08: index_width u8 (0 = not indexed, 2 or 4 bytes)
//! 0x09: attribute_count u8
//! 0x0A: flags u8 (bit 0: interleaved vertex data)
//! 0x0B: lod_count u8
//! 0x0C: attribute descriptors (attribute_count * 4 bytes)
//! var:  vertex data (vertex_count * stride, interleaved or stream after stream)
//! var:  index data (index_count * index_width bytes)
//! var:  per LOD level: index_count u32, then index_count * 2 bytes
//! ```

use crate::buffer::{BufferKind, Format};
use crate::packing::VertexAttribute;

/// File extension of exported meshes
pub const OGRE_MESH_EXT: &str = "ogmesh";

/// Header flag: vertex data is one interleaved stream
pub const FLAG_INTERLEAVED: u8 = 1;

/// Mesh file header (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct OgreMeshHeader {
    pub vertex_count: u32,
    pub index_count: u32,
    pub index_width: u8,
    pub attribute_count: u8,
    pub flags: u8,
    pub lod_count: u8,
}

impl OgreMeshHeader {
    pub const SIZE: usize = 12;

    pub fn new(vertex_count: u32, index_count: u32, index_width: u8, attribute_count: u8) -> Self {
        Self {
            vertex_count,
            index_count,
            index_width,
            attribute_count,
            flags: 0,
            lod_count: 0,
        }
    }

    pub fn is_interleaved(&self) -> bool {
        self.flags & FLAG_INTERLEAVED != 0
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[8] = self.index_width;
        bytes[9] = self.attribute_count;
        bytes[10] = self.flags;
        bytes[11] = self.lod_count;
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            vertex_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            index_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            index_width: bytes[8],
            attribute_count: bytes[9],
            flags: bytes[10],
            lod_count: bytes[11],
        })
    }
}

/// Per-attribute descriptor following the header (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub kind: BufferKind,
    pub components: u8,
    pub format: Format,
}

impl AttributeDescriptor {
    pub const SIZE: usize = 4;

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        [
            self.kind.id(),
            self.kind.set(),
            self.components,
            self.format.id(),
        ]
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let [id, set, components, format] = *bytes.get(..Self::SIZE)? else {
            return None;
        };
        Some(Self {
            kind: BufferKind::from_id(id, set)?,
            components,
            format: Format::from_id(format)?,
        })
    }

    /// Bytes one vertex of this attribute occupies
    pub fn size(&self) -> usize {
        self.components as usize * self.format.size()
    }
}

impl From<&VertexAttribute> for AttributeDescriptor {
    fn from(attribute: &VertexAttribute) -> Self {
        Self {
            kind: attribute.kind,
            components: attribute.components,
            format: attribute.format,
        }
    }
}

/// Read the header and its attribute descriptors from the start of a mesh file
pub fn read_mesh_header(bytes: &[u8]) -> Option<(OgreMeshHeader, Vec<AttributeDescriptor>)> {
    let header = OgreMeshHeader::from_bytes(bytes)?;
    let descriptors = bytes
        .get(OgreMeshHeader::SIZE..)?
        .chunks(AttributeDescriptor::SIZE)
        .take(header.attribute_count as usize)
        .map(AttributeDescriptor::from_bytes)
        .collect::<Option<Vec<_>>>()?;
    if descriptors.len() != header.attribute_count as usize {
        return None;
    }
    Some((header, descriptors))
}
