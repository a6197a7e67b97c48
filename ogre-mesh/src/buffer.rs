//! Typed vertex and index buffers
//!
//! A [`TypedBuffer`] is allocated from a declared element count and filled
//! strictly front to back. Closing it ("flipping") makes the written prefix
//! readable and forbids further writes; closed buffers are shared between
//! meshes as [`SharedBuffer`].

use std::sync::Arc;

use bytemuck::cast_slice;

use crate::error::BufferError;

/// Number of vertices addressable by 16-bit indices
pub const UNSIGNED_SHORT_VERTEX_LIMIT: usize = 65536;

/// Maximum number of texture coordinate sets per mesh
pub const MAX_TEX_COORD_SETS: u8 = 8;

/// Closed, read-only buffer shared between meshes
pub type SharedBuffer = Arc<TypedBuffer>;

/// Semantic of a buffer
///
/// Variant order is the interleaving order used by [`crate::packing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BufferKind {
    Position,
    Normal,
    Tangent,
    Binormal,
    Color,
    /// Texture coordinate set `n` (0-based)
    TexCoord(u8),
    BoneIndex,
    BoneWeight,
    BindPosePosition,
    BindPoseNormal,
    Index,
}

impl BufferKind {
    /// Whether this buffer is part of the drawable vertex stream
    ///
    /// Bind pose copies are CPU-side skinning inputs and are never uploaded.
    pub fn is_vertex_attribute(self) -> bool {
        !matches!(
            self,
            BufferKind::Index | BufferKind::BindPosePosition | BufferKind::BindPoseNormal
        )
    }

    /// Stable identifier used by the binary mesh format
    pub fn id(self) -> u8 {
        match self {
            BufferKind::Position => 0,
            BufferKind::Normal => 1,
            BufferKind::Tangent => 2,
            BufferKind::Binormal => 3,
            BufferKind::Color => 4,
            BufferKind::TexCoord(_) => 5,
            BufferKind::BoneIndex => 6,
            BufferKind::BoneWeight => 7,
            BufferKind::BindPosePosition => 8,
            BufferKind::BindPoseNormal => 9,
            BufferKind::Index => 10,
        }
    }

    /// Texture coordinate set, 0 for every other kind
    pub fn set(self) -> u8 {
        match self {
            BufferKind::TexCoord(set) => set,
            _ => 0,
        }
    }

    /// Inverse of [`BufferKind::id`]
    pub fn from_id(id: u8, set: u8) -> Option<Self> {
        Some(match id {
            0 => BufferKind::Position,
            1 => BufferKind::Normal,
            2 => BufferKind::Tangent,
            3 => BufferKind::Binormal,
            4 => BufferKind::Color,
            5 if set < MAX_TEX_COORD_SETS => BufferKind::TexCoord(set),
            6 => BufferKind::BoneIndex,
            7 => BufferKind::BoneWeight,
            8 => BufferKind::BindPosePosition,
            9 => BufferKind::BindPoseNormal,
            10 => BufferKind::Index,
            _ => return None,
        })
    }
}

/// Element format of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Float,
    UnsignedShort,
    UnsignedInt,
    UnsignedByte,
}

impl Format {
    /// Size of one element in bytes
    pub const fn size(self) -> usize {
        match self {
            Format::Float | Format::UnsignedInt => 4,
            Format::UnsignedShort => 2,
            Format::UnsignedByte => 1,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Format::Float => 0,
            Format::UnsignedShort => 1,
            Format::UnsignedInt => 2,
            Format::UnsignedByte => 3,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Format::Float),
            1 => Some(Format::UnsignedShort),
            2 => Some(Format::UnsignedInt),
            3 => Some(Format::UnsignedByte),
            _ => None,
        }
    }
}

/// Upload hint for the render path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Usage {
    /// Uploaded once, never modified
    #[default]
    Static,
    /// Rewritten every frame (software skinning targets)
    Stream,
    /// Never uploaded
    CpuOnly,
}

/// Index format for a mesh with `vertex_count` vertices
///
/// 16-bit exactly when every vertex is addressable by a `u16`.
#[inline]
pub fn select_index_format(vertex_count: usize) -> Format {
    if vertex_count < UNSIGNED_SHORT_VERTEX_LIMIT {
        Format::UnsignedShort
    } else {
        Format::UnsignedInt
    }
}

/// Backing storage, zero-filled to capacity on allocation
#[derive(Debug, Clone, PartialEq)]
pub enum BufferData {
    Float(Vec<f32>),
    UnsignedShort(Vec<u16>),
    UnsignedInt(Vec<u32>),
    UnsignedByte(Vec<u8>),
}

impl BufferData {
    fn zeroed(format: Format, len: usize) -> Self {
        match format {
            Format::Float => BufferData::Float(vec![0.0; len]),
            Format::UnsignedShort => BufferData::UnsignedShort(vec![0; len]),
            Format::UnsignedInt => BufferData::UnsignedInt(vec![0; len]),
            Format::UnsignedByte => BufferData::UnsignedByte(vec![0; len]),
        }
    }

    pub fn format(&self) -> Format {
        match self {
            BufferData::Float(_) => Format::Float,
            BufferData::UnsignedShort(_) => Format::UnsignedShort,
            BufferData::UnsignedInt(_) => Format::UnsignedInt,
            BufferData::UnsignedByte(_) => Format::UnsignedByte,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            BufferData::Float(v) => v.len(),
            BufferData::UnsignedShort(v) => v.len(),
            BufferData::UnsignedInt(v) => v.len(),
            BufferData::UnsignedByte(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bytes(&self) -> &[u8] {
        match self {
            BufferData::Float(v) => cast_slice(v.as_slice()),
            BufferData::UnsignedShort(v) => cast_slice(v.as_slice()),
            BufferData::UnsignedInt(v) => cast_slice(v.as_slice()),
            BufferData::UnsignedByte(v) => v,
        }
    }
}

/// Vertex or index buffer with a forward-only write cursor
#[derive(Debug, Clone, PartialEq)]
pub struct TypedBuffer {
    kind: BufferKind,
    components: usize,
    usage: Usage,
    data: BufferData,
    cursor: usize,
    limit: usize,
    closed: bool,
}

impl TypedBuffer {
    /// Allocate a buffer for `count` elements of `components` values each
    ///
    /// `count` is a vertex count, or a face count times three for indices.
    pub fn new(
        kind: BufferKind,
        count: i64,
        components: usize,
        format: Format,
    ) -> Result<Self, BufferError> {
        if !(1..=4).contains(&components) {
            return Err(BufferError::InvalidComponents { kind, components });
        }
        if count < 0 {
            return Err(BufferError::NegativeCapacity { kind, count });
        }
        let capacity = count as usize * components;
        Ok(Self {
            kind,
            components,
            usage: Usage::Static,
            data: BufferData::zeroed(format, capacity),
            cursor: 0,
            limit: capacity,
            closed: false,
        })
    }

    /// Wrap fully populated data as an already closed buffer
    pub fn from_data(kind: BufferKind, components: usize, usage: Usage, data: BufferData) -> Self {
        let limit = data.len();
        Self {
            kind,
            components,
            usage,
            data,
            cursor: 0,
            limit,
            closed: true,
        }
    }

    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = usage;
        self
    }

    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn format(&self) -> Format {
        self.data.format()
    }

    /// Declared number of values (elements × components)
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Write cursor; zero once closed
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.cursor
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Values readable after close, or written so far while open
    pub fn len(&self) -> usize {
        if self.closed { self.limit } else { self.cursor }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Readable element groups (vertices, or index triples for faces)
    pub fn element_count(&self) -> usize {
        self.len() / self.components
    }

    fn check_writable(&self, count: usize) -> Result<(), BufferError> {
        if self.closed {
            return Err(BufferError::Closed(self.kind));
        }
        if self.remaining() < count {
            return Err(BufferError::Overflow {
                kind: self.kind,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Append float values; all or nothing
    pub fn push_floats(&mut self, values: &[f32]) -> Result<(), BufferError> {
        self.check_writable(values.len())?;
        let (kind, format) = (self.kind, self.format());
        let start = self.cursor;
        match &mut self.data {
            BufferData::Float(v) => v[start..start + values.len()].copy_from_slice(values),
            _ => return Err(BufferError::FormatMismatch { kind, format }),
        }
        self.cursor += values.len();
        Ok(())
    }

    pub fn push_vector3(&mut self, x: f32, y: f32, z: f32) -> Result<(), BufferError> {
        self.push_floats(&[x, y, z])
    }

    /// Append index values; all or nothing
    pub fn push_indices(&mut self, values: &[u32]) -> Result<(), BufferError> {
        self.check_writable(values.len())?;
        let (kind, format) = (self.kind, self.format());
        let start = self.cursor;
        match &mut self.data {
            BufferData::UnsignedShort(v) => {
                if let Some(&value) = values.iter().find(|&&i| i > u16::MAX as u32) {
                    return Err(BufferError::ValueOutOfRange {
                        kind,
                        format,
                        value,
                    });
                }
                for (slot, &value) in v[start..start + values.len()].iter_mut().zip(values) {
                    *slot = value as u16;
                }
            }
            BufferData::UnsignedInt(v) => v[start..start + values.len()].copy_from_slice(values),
            _ => return Err(BufferError::FormatMismatch { kind, format }),
        }
        self.cursor += values.len();
        Ok(())
    }

    /// Flip the buffer to read-only and rewind the cursor
    ///
    /// A buffer nothing was written to keeps its full zero-filled capacity
    /// readable. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.cursor != 0 {
            if self.cursor < self.capacity() {
                tracing::warn!(
                    "{:?} buffer closed with {} of {} values written",
                    self.kind,
                    self.cursor,
                    self.capacity()
                );
            }
            self.limit = self.cursor;
        }
        self.cursor = 0;
        self.closed = true;
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match &self.data {
            BufferData::Float(v) => Some(&v[..self.len()]),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.data {
            BufferData::UnsignedShort(v) => Some(&v[..self.len()]),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<&[u32]> {
        match &self.data {
            BufferData::UnsignedInt(v) => Some(&v[..self.len()]),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.data {
            BufferData::UnsignedByte(v) => Some(&v[..self.len()]),
            _ => None,
        }
    }

    /// Readable values widened to `u32` (index buffers and bone indices)
    pub fn indices(&self) -> Vec<u32> {
        let len = self.len();
        match &self.data {
            BufferData::UnsignedShort(v) => v[..len].iter().map(|&i| i as u32).collect(),
            BufferData::UnsignedInt(v) => v[..len].to_vec(),
            BufferData::UnsignedByte(v) => v[..len].iter().map(|&i| i as u32).collect(),
            BufferData::Float(_) => Vec::new(),
        }
    }

    /// Little-endian bytes of the readable values
    pub fn as_bytes(&self) -> &[u8] {
        &self.data.bytes()[..self.len() * self.format().size()]
    }

    /// Bytes of element group `index`, or `None` past the readable range
    pub fn element_bytes(&self, index: usize) -> Option<&[u8]> {
        let stride = self.components * self.format().size();
        let start = index * stride;
        self.as_bytes().get(start..start + stride)
    }

    /// Copy of the readable data as a new closed buffer of another kind
    pub(crate) fn clone_as(&self, kind: BufferKind, usage: Usage) -> TypedBuffer {
        let len = self.len();
        let data = match &self.data {
            BufferData::Float(v) => BufferData::Float(v[..len].to_vec()),
            BufferData::UnsignedShort(v) => BufferData::UnsignedShort(v[..len].to_vec()),
            BufferData::UnsignedInt(v) => BufferData::UnsignedInt(v[..len].to_vec()),
            BufferData::UnsignedByte(v) => BufferData::UnsignedByte(v[..len].to_vec()),
        };
        TypedBuffer::from_data(kind, self.components, usage, data)
    }
}
