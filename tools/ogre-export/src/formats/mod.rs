//! Binary format writers for exported mesh files
//!
//! Re-exports the format definitions from ogre-mesh for writing asset files.

pub use ogre_mesh::formats::*;

use anyhow::{Context, Result};
use std::io::Write;

use crate::mesh::ConvertedMesh;

/// Write a complete mesh file
///
/// LOD levels are always 16-bit; the full-resolution indices use the width
/// recorded in the header.
pub fn write_ogre_mesh<W: Write>(w: &mut W, mesh: &ConvertedMesh) -> Result<()> {
    let attribute_count =
        u8::try_from(mesh.attributes.len()).context("Too many vertex attributes")?;
    let lod_count = u8::try_from(mesh.lod_levels.len()).context("Too many LOD levels")?;

    let mut header = OgreMeshHeader::new(
        mesh.vertex_count,
        mesh.index_count,
        mesh.index_width,
        attribute_count,
    );
    if mesh.interleaved {
        header.flags |= FLAG_INTERLEAVED;
    }
    header.lod_count = lod_count;

    w.write_all(&header.to_bytes())?;
    for attribute in &mesh.attributes {
        w.write_all(&attribute.to_bytes())?;
    }
    w.write_all(&mesh.vertex_data)?;
    w.write_all(&mesh.index_data)?;

    for level in &mesh.lod_levels {
        w.write_all(&(level.len() as u32).to_le_bytes())?;
        for index in level {
            w.write_all(&index.to_le_bytes())?;
        }
    }

    Ok(())
}
