//! Submesh assembly: the records a parse accumulates
//!
//! A [`MeshDocument`] lists every geometry in declaration order, the shared
//! geometry included, so LOD submesh indices count it too.

use std::sync::Arc;

use crate::assets::{AssetResolver, NATIVE_MATERIAL_EXT};
use crate::buffer::BufferKind;
use crate::error::ParseError;
use crate::lod::LodTable;
use crate::mesh::{Mesh, Topology};
use crate::scene::{AnimData, CullHint, Geometry, Material};

/// One geometry of the document: a submesh or the shared geometry
#[derive(Debug, Clone)]
pub struct SubmeshRecord {
    pub geometry: Geometry,
    /// `material` attribute as written; `None` for the shared geometry
    pub material_ref: Option<String>,
    pub uses_shared_vertices: bool,
    /// `use32bitindexes` as declared; the index format is chosen from the vertex count
    pub declares_32bit_indices: bool,
}

impl SubmeshRecord {
    pub fn mesh(&self) -> &Mesh {
        &self.geometry.mesh
    }

    pub fn is_shared_geometry(&self) -> bool {
        self.material_ref.is_none()
    }
}

/// Everything collected from one `mesh.xml` parse
#[derive(Debug, Clone, Default)]
pub struct MeshDocument {
    records: Vec<SubmeshRecord>,
    shared: Option<usize>,
    lod: LodTable,
    anim_data: Option<AnimData>,
    mesh_name: Option<String>,
}

impl MeshDocument {
    pub fn new(mesh_name: Option<String>) -> Self {
        Self {
            mesh_name,
            ..Default::default()
        }
    }

    pub fn mesh_name(&self) -> Option<&str> {
        self.mesh_name.as_deref()
    }

    pub fn records(&self) -> &[SubmeshRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&SubmeshRecord> {
        self.records.get(index)
    }

    pub(crate) fn record_mut(&mut self, index: usize) -> Option<&mut SubmeshRecord> {
        self.records.get_mut(index)
    }

    pub(crate) fn mesh_mut(&mut self, index: usize) -> Option<&mut Mesh> {
        self.records.get_mut(index).map(|r| &mut r.geometry.mesh)
    }

    /// Records that are real submeshes, in order
    pub fn submeshes(&self) -> impl Iterator<Item = &SubmeshRecord> {
        self.records.iter().filter(|r| !r.is_shared_geometry())
    }

    pub fn shared_index(&self) -> Option<usize> {
        self.shared
    }

    pub fn shared_geometry(&self) -> Option<&SubmeshRecord> {
        self.shared.and_then(|i| self.records.get(i))
    }

    pub fn lod(&self) -> &LodTable {
        &self.lod
    }

    pub(crate) fn lod_mut(&mut self) -> &mut LodTable {
        &mut self.lod
    }

    pub fn anim_data(&self) -> Option<&AnimData> {
        self.anim_data.as_ref()
    }

    pub(crate) fn set_anim_data(&mut self, anim_data: Option<AnimData>) {
        self.anim_data = anim_data;
    }

    pub(crate) fn into_parts(self) -> (Vec<SubmeshRecord>, Option<usize>, Option<AnimData>) {
        (self.records, self.shared, self.anim_data)
    }

    /// Declare the shared vertex storage and return its record index
    ///
    /// The shared geometry is never drawn itself.
    pub fn begin_shared_geometry(&mut self, name: String, vertex_count: usize) -> usize {
        let mut mesh = Mesh::new(Topology::TriangleList);
        mesh.set_vertex_count(vertex_count);

        let mut geometry = Geometry::new(name, mesh);
        geometry.cull_hint = CullHint::Always;

        let index = self.records.len();
        self.records.push(SubmeshRecord {
            geometry,
            material_ref: None,
            uses_shared_vertices: false,
            declares_32bit_indices: false,
        });
        self.shared = Some(index);
        index
    }

    /// Declare a submesh and return its record index
    ///
    /// A submesh using shared vertices references the shared geometry's
    /// closed buffers; nothing is copied.
    pub fn begin_submesh(
        &mut self,
        name: String,
        material_ref: &str,
        uses_shared_vertices: bool,
        declares_32bit_indices: bool,
        topology: Topology,
    ) -> Result<usize, ParseError> {
        let mut mesh = Mesh::new(topology);
        if uses_shared_vertices {
            let shared = self
                .shared_geometry()
                .ok_or(ParseError::MissingSharedGeometry)?
                .mesh();
            mesh.set_vertex_count(shared.vertex_count());
            for buffer in shared.buffers() {
                mesh.set_shared_buffer(Arc::clone(buffer));
            }
        }

        let index = self.records.len();
        self.records.push(SubmeshRecord {
            geometry: Geometry::new(name, mesh),
            material_ref: Some(material_ref.to_string()),
            uses_shared_vertices,
            declares_32bit_indices,
        });
        Ok(index)
    }

    /// Vertex count that decides the index width of `index`'s faces
    pub fn face_vertex_count(&self, index: usize) -> usize {
        match self.records.get(index) {
            Some(record) if record.uses_shared_vertices => self
                .shared_geometry()
                .map_or(0, |shared| shared.mesh().vertex_count()),
            Some(record) => record.mesh().vertex_count(),
            None => 0,
        }
    }

    /// Close all open buffers of a record, recompute its bound and mark it static
    pub fn finish_mesh(&mut self, index: usize) {
        if let Some(mesh) = self.mesh_mut(index) {
            mesh.close_buffers();
            mesh.update_bound();
            mesh.set_static();
        }
    }

    /// Hand every LOD chain to the mesh it belongs to
    pub fn apply_lod_levels(&mut self) {
        for (index, levels) in self.lod.chains() {
            if let Some(record) = self.records.get_mut(index) {
                record.geometry.mesh.set_lod_levels(levels.to_vec());
            }
        }
    }

    /// Full-resolution index buffer of a record, seed of its LOD chain
    pub(crate) fn base_indices(&self, index: usize) -> Option<crate::buffer::SharedBuffer> {
        self.records
            .get(index)
            .and_then(|r| r.mesh().buffer(BufferKind::Index))
            .cloned()
    }
}

/// Resolve a submesh material through the asset collaborator
///
/// A miss in the material list degrades to the fallback material with a
/// warning. Only a missing fallback (or native material) is fatal.
pub fn resolve_material(assets: &dyn AssetResolver, name: &str) -> Result<Material, ParseError> {
    let material = if name.ends_with(NATIVE_MATERIAL_EXT) {
        assets.load_material(name)
    } else {
        assets.material(name).or_else(|| {
            tracing::warn!("Material {} not found. Applying default material", name);
            assets.fallback_material()
        })
    };
    material.ok_or_else(|| ParseError::MaterialNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialList;
    use crate::buffer::{Format, TypedBuffer};

    fn shared_document(vertex_count: usize) -> MeshDocument {
        let mut doc = MeshDocument::new(None);
        let shared = doc.begin_shared_geometry("Ogre-SharedGeom".into(), vertex_count);
        let mesh = doc.mesh_mut(shared).unwrap();
        let mut pos =
            TypedBuffer::new(BufferKind::Position, vertex_count as i64, 3, Format::Float).unwrap();
        for i in 0..vertex_count {
            pos.push_vector3(i as f32, 0.0, 0.0).unwrap();
        }
        mesh.set_buffer(pos);
        doc.finish_mesh(shared);
        doc
    }

    #[test]
    fn shared_submesh_references_shared_buffers() {
        let mut doc = shared_document(100);
        let sub = doc
            .begin_submesh("sub".into(), "Wood", true, false, Topology::TriangleList)
            .unwrap();
        doc.finish_mesh(sub);

        let shared_pos = doc.shared_geometry().unwrap().mesh().buffer(BufferKind::Position);
        let sub_pos = doc.record(sub).unwrap().mesh().buffer(BufferKind::Position);
        assert!(Arc::ptr_eq(shared_pos.unwrap(), sub_pos.unwrap()));
        assert_eq!(doc.record(sub).unwrap().mesh().vertex_count(), 100);
        assert_eq!(doc.face_vertex_count(sub), 100);
    }

    #[test]
    fn shared_geometry_is_culled_and_ordered() {
        let mut doc = shared_document(3);
        doc.begin_submesh("a".into(), "m", true, false, Topology::TriangleList)
            .unwrap();
        let shared = doc.shared_geometry().unwrap();
        assert_eq!(shared.geometry.cull_hint, CullHint::Always);
        assert_eq!(doc.shared_index(), Some(0));
        assert_eq!(doc.submeshes().count(), 1);
        assert!(doc.mesh_mut(0).unwrap().is_static());
    }

    #[test]
    fn shared_vertices_without_shared_geometry_fail() {
        let mut doc = MeshDocument::new(None);
        assert_eq!(
            doc.begin_submesh("a".into(), "m", true, false, Topology::TriangleList),
            Err(ParseError::MissingSharedGeometry)
        );
    }

    #[test]
    fn missing_material_falls_back() {
        let list: MaterialList = [Material::new("Wood")].into_iter().collect();
        assert_eq!(resolve_material(&list, "Wood").unwrap().name, "Wood");
        assert_eq!(resolve_material(&list, "Stone").unwrap(), Material::fallback());
        assert_eq!(
            resolve_material(&list, "Stone.j3m"),
            Err(ParseError::MaterialNotFound("Stone.j3m".into()))
        );
    }
}
