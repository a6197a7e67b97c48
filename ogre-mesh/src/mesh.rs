//! Mesh: topology, buffers by kind, bound and LOD levels

use glam::Vec3;
use hashbrown::HashMap;
use std::sync::Arc;

use crate::buffer::{BufferKind, SharedBuffer, TypedBuffer};

/// Primitive topology of a submesh (`operationtype`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    #[default]
    TriangleList,
    TriangleStrip,
    TriangleFan,
}

impl Topology {
    /// Parse an `operationtype` value
    pub fn from_operation_type(value: &str) -> Option<Self> {
        match value {
            "triangle_list" => Some(Topology::TriangleList),
            "triangle_strip" => Some(Topology::TriangleStrip),
            "triangle_fan" => Some(Topology::TriangleFan),
            _ => None,
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Bound of tightly packed xyz triples; `None` when there are none
    pub fn from_positions(positions: &[f32]) -> Option<Self> {
        let mut points = positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]));
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Geometry data of one submesh or of the shared geometry
///
/// Buffers being populated are held exclusively in `open`; once closed they
/// move to `buffers` as [`SharedBuffer`]s and become read-only.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    mode: Topology,
    vertex_count: usize,
    triangle_count: usize,
    open: HashMap<BufferKind, TypedBuffer>,
    buffers: HashMap<BufferKind, SharedBuffer>,
    lod_levels: Vec<SharedBuffer>,
    bound: Option<BoundingBox>,
    max_num_weights: u8,
    is_static: bool,
}

impl Mesh {
    pub fn new(mode: Topology) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> Topology {
        self.mode
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn set_vertex_count(&mut self, count: usize) {
        self.vertex_count = count;
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    pub fn set_triangle_count(&mut self, count: usize) {
        self.triangle_count = count;
    }

    /// Start populating `buffer`, replacing any buffer of the same kind
    pub fn set_buffer(&mut self, buffer: TypedBuffer) {
        let kind = buffer.kind();
        self.buffers.remove(&kind);
        self.open.insert(kind, buffer);
    }

    /// Attach an already closed buffer, possibly owned by another mesh too
    pub fn set_shared_buffer(&mut self, buffer: SharedBuffer) {
        let kind = buffer.kind();
        self.open.remove(&kind);
        self.buffers.insert(kind, buffer);
    }

    /// Buffer of `kind` still accepting writes
    pub fn open_buffer_mut(&mut self, kind: BufferKind) -> Option<&mut TypedBuffer> {
        self.open.get_mut(&kind)
    }

    /// Closed buffer of `kind`
    pub fn buffer(&self, kind: BufferKind) -> Option<&SharedBuffer> {
        self.buffers.get(&kind)
    }

    /// Closed buffers sorted by kind
    pub fn buffers(&self) -> Vec<&SharedBuffer> {
        let mut buffers: Vec<_> = self.buffers.values().collect();
        buffers.sort_by_key(|b| b.kind());
        buffers
    }

    pub fn has_open_buffers(&self) -> bool {
        !self.open.is_empty()
    }

    /// Flip the open buffer of `kind` and make it shareable
    pub fn close_buffer(&mut self, kind: BufferKind) -> Option<SharedBuffer> {
        let mut buffer = self.open.remove(&kind)?;
        buffer.close();
        let shared = Arc::new(buffer);
        self.buffers.insert(kind, Arc::clone(&shared));
        Some(shared)
    }

    /// Flip every open buffer
    pub fn close_buffers(&mut self) {
        for (kind, mut buffer) in self.open.drain() {
            buffer.close();
            self.buffers.insert(kind, Arc::new(buffer));
        }
    }

    /// Recompute the bound from the closed position buffer
    pub fn update_bound(&mut self) {
        self.bound = self
            .buffer(BufferKind::Position)
            .and_then(|p| p.as_f32())
            .and_then(BoundingBox::from_positions);
    }

    pub fn bound(&self) -> Option<&BoundingBox> {
        self.bound.as_ref()
    }

    pub fn set_bound(&mut self, bound: Option<BoundingBox>) {
        self.bound = bound;
    }

    /// Hint that the render path may treat this mesh as immutable
    pub fn set_static(&mut self) {
        self.is_static = true;
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn lod_levels(&self) -> &[SharedBuffer] {
        &self.lod_levels
    }

    pub fn set_lod_levels(&mut self, levels: Vec<SharedBuffer>) {
        self.lod_levels = levels;
    }

    /// Largest number of bone influences used by any vertex
    pub fn max_num_weights(&self) -> u8 {
        self.max_num_weights
    }

    pub fn set_max_num_weights(&mut self, count: u8) {
        self.max_num_weights = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Format;

    #[test]
    fn operation_types() {
        assert_eq!(
            Topology::from_operation_type("triangle_fan"),
            Some(Topology::TriangleFan)
        );
        assert_eq!(Topology::from_operation_type("line_list"), None);
    }

    #[test]
    fn bound_from_positions() {
        let bound = BoundingBox::from_positions(&[0.0, 1.0, 2.0, -1.0, 3.0, 0.5]).unwrap();
        assert_eq!(bound.min, Vec3::new(-1.0, 1.0, 0.5));
        assert_eq!(bound.max, Vec3::new(0.0, 3.0, 2.0));
        assert_eq!(bound.center(), Vec3::new(-0.5, 2.0, 1.25));
        assert!(BoundingBox::from_positions(&[]).is_none());
    }

    #[test]
    fn closing_moves_buffers_to_shared_storage() {
        let mut mesh = Mesh::new(Topology::TriangleList);
        mesh.set_vertex_count(2);
        let mut pos = TypedBuffer::new(BufferKind::Position, 2, 3, Format::Float).unwrap();
        pos.push_vector3(1.0, 0.0, 0.0).unwrap();
        mesh.set_buffer(pos);

        assert!(mesh.buffer(BufferKind::Position).is_none());
        mesh.open_buffer_mut(BufferKind::Position)
            .unwrap()
            .push_vector3(0.0, 2.0, 0.0)
            .unwrap();

        mesh.close_buffers();
        mesh.update_bound();
        assert!(!mesh.has_open_buffers());

        let pos = mesh.buffer(BufferKind::Position).unwrap();
        assert!(pos.is_closed());
        assert_eq!(pos.element_count(), 2);
        assert_eq!(mesh.bound().unwrap().max, Vec3::new(1.0, 2.0, 0.0));
    }
}
