//! Vertex stream packing
//!
//! Lays out the vertex attribute buffers of a [`Mesh`] either as one
//! interleaved stream or as one stream per attribute, ready for upload.
//! Attributes are ordered by [`BufferKind`]; bind-pose copies and the index
//! buffer never take part.

use crate::buffer::{BufferKind, Format, SharedBuffer};
use crate::mesh::Mesh;

/// One attribute inside a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub kind: BufferKind,
    pub components: u8,
    pub format: Format,
    /// Byte offset within the interleaved vertex
    pub offset: u32,
}

impl VertexAttribute {
    pub fn size(&self) -> u32 {
        u32::from(self.components) * self.format.size() as u32
    }
}

/// Ordered attributes of a mesh and the resulting vertex stride
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    pub attributes: Vec<VertexAttribute>,
    pub stride: u32,
}

impl VertexLayout {
    pub fn of(mesh: &Mesh) -> Self {
        Self::from_buffers(&vertex_buffers(mesh))
    }

    fn from_buffers(buffers: &[&SharedBuffer]) -> Self {
        let mut attributes = Vec::with_capacity(buffers.len());
        let mut stride = 0;
        for buffer in buffers {
            let attribute = VertexAttribute {
                kind: buffer.kind(),
                components: buffer.components() as u8,
                format: buffer.format(),
                offset: stride,
            };
            stride += attribute.size();
            attributes.push(attribute);
        }
        Self { attributes, stride }
    }

    pub fn attribute(&self, kind: BufferKind) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.kind == kind)
    }
}

fn vertex_buffers(mesh: &Mesh) -> Vec<&SharedBuffer> {
    mesh.buffers()
        .into_iter()
        .filter(|b| b.kind().is_vertex_attribute())
        .collect()
}

/// Interleave every vertex attribute of `mesh` into a single stream
///
/// Vertices past the readable end of a short buffer are zero-filled.
pub fn interleave(mesh: &Mesh) -> (VertexLayout, Vec<u8>) {
    let buffers = vertex_buffers(mesh);
    let layout = VertexLayout::from_buffers(&buffers);
    let vertex_count = mesh.vertex_count();

    let mut data = Vec::with_capacity(vertex_count * layout.stride as usize);
    for vertex in 0..vertex_count {
        for (buffer, attribute) in buffers.iter().zip(&layout.attributes) {
            match buffer.element_bytes(vertex) {
                Some(bytes) => data.extend_from_slice(bytes),
                None => data.resize(data.len() + attribute.size() as usize, 0),
            }
        }
    }
    (layout, data)
}

/// One tightly packed stream per vertex attribute
pub fn separate_streams(mesh: &Mesh) -> (VertexLayout, Vec<&[u8]>) {
    let buffers = vertex_buffers(mesh);
    let layout = VertexLayout::from_buffers(&buffers);
    let streams = buffers.into_iter().map(|b| b.as_bytes()).collect();
    (layout, streams)
}

/// Index data as little-endian bytes in the buffer's own width
pub fn index_bytes(mesh: &Mesh) -> Option<(Format, &[u8])> {
    mesh.buffer(BufferKind::Index)
        .map(|b| (b.format(), b.as_bytes()))
}
