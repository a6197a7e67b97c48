//! ogre-export library
//!
//! Provides mesh.xml conversion functions for use by other tools.

pub mod formats;
pub mod manifest;
pub mod materials;
pub mod mesh;

// Re-export binary format items from ogre-mesh
pub use ogre_mesh::{
    AttributeDescriptor, FLAG_INTERLEAVED, OGRE_MESH_EXT, OgreMeshHeader, formats::read_mesh_header,
};

// Re-export key types for mesh conversion
pub use mesh::{ConvertedMesh, convert_mesh_xml, convert_mesh_xml_to_memory};
