//! Mesh converter (Ogre3D mesh.xml -> .ogmesh)

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ogre_mesh::packing::{index_bytes, interleave, separate_streams};
use ogre_mesh::{
    AttributeDescriptor, BufferKind, Geometry, ImportConfig, MaterialList, MeshLoader, Node,
};

use crate::formats::write_ogre_mesh;

/// Result of in-memory conversion of one drawn geometry
pub struct ConvertedMesh {
    /// Geometry name from the import (`<mesh>-geom-<n>`)
    pub name: String,
    /// Number of vertices
    pub vertex_count: u32,
    /// Number of indices
    pub index_count: u32,
    /// Bytes per index, 0 when not indexed
    pub index_width: u8,
    /// Vertex attributes in stream order
    pub attributes: Vec<AttributeDescriptor>,
    /// Whether `vertex_data` is one interleaved stream
    pub interleaved: bool,
    /// Packed vertex data
    pub vertex_data: Vec<u8>,
    /// Index data in `index_width` bytes per index
    pub index_data: Vec<u8>,
    /// Coarser index lists, finest first
    pub lod_levels: Vec<Vec<u16>>,
}

/// Import a mesh.xml file into a scene node
pub fn import_mesh_xml(input: &Path, materials: &MaterialList, config: ImportConfig) -> Result<Node> {
    let mut loader = MeshLoader::new(config);
    loader
        .load_file(input, materials)
        .with_context(|| format!("Failed to import mesh.xml: {:?}", input))
}

/// Convert a mesh.xml file to in-memory mesh data, one entry per drawn geometry
pub fn convert_mesh_xml_to_memory(
    input: &Path,
    materials: &MaterialList,
    config: ImportConfig,
) -> Result<Vec<ConvertedMesh>> {
    let node = import_mesh_xml(input, materials, config)?;
    let meshes: Vec<ConvertedMesh> = node
        .visible_children()
        .map(|geometry| convert_geometry(geometry, config.auto_interleave))
        .collect();

    if meshes.is_empty() {
        anyhow::bail!("No submeshes found in {:?}", input);
    }
    Ok(meshes)
}

/// Pack one geometry's buffers
pub fn convert_geometry(geometry: &Geometry, interleaved: bool) -> ConvertedMesh {
    let mesh = &geometry.mesh;

    let (layout, vertex_data) = if interleaved {
        interleave(mesh)
    } else {
        let (layout, streams) = separate_streams(mesh);
        (layout, streams.concat())
    };

    let (index_width, index_data) = match index_bytes(mesh) {
        Some((format, bytes)) => (format.size() as u8, bytes.to_vec()),
        None => (0, Vec::new()),
    };
    let index_count = mesh.buffer(BufferKind::Index).map_or(0, |b| b.len() as u32);

    // level 0 is the index buffer itself
    let lod_levels = mesh
        .lod_levels()
        .iter()
        .skip(1)
        .map(|level| level.indices().into_iter().map(|i| i as u16).collect())
        .collect();

    ConvertedMesh {
        name: geometry.name.clone(),
        vertex_count: mesh.vertex_count() as u32,
        index_count,
        index_width,
        attributes: layout.attributes.iter().map(AttributeDescriptor::from).collect(),
        interleaved,
        vertex_data,
        index_data,
        lod_levels,
    }
}

/// Convert a mesh.xml file and write .ogmesh output
///
/// A single drawn geometry is written to `output`. Several geometries go to
/// numbered siblings (`name.0.ogmesh`, `name.1.ogmesh`, ...).
pub fn convert_mesh_xml(
    input: &Path,
    output: &Path,
    materials: &MaterialList,
    config: ImportConfig,
) -> Result<Vec<PathBuf>> {
    let meshes = convert_mesh_xml_to_memory(input, materials, config)?;

    let outputs: Vec<PathBuf> = if meshes.len() == 1 {
        vec![output.to_path_buf()]
    } else {
        (0..meshes.len())
            .map(|i| numbered_output(output, i))
            .collect()
    };

    for (mesh, path) in meshes.iter().zip(&outputs) {
        let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        let mut writer = BufWriter::new(file);
        write_ogre_mesh(&mut writer, mesh)?;
        tracing::info!(
            "Wrote {} -> {:?} ({} vertices, {} indices, {} LOD levels)",
            mesh.name,
            path,
            mesh.vertex_count,
            mesh.index_count,
            mesh.lod_levels.len()
        );
    }

    Ok(outputs)
}

fn numbered_output(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| crate::OGRE_MESH_EXT.to_string());
    output.with_file_name(format!("{stem}.{index}.{ext}"))
}
