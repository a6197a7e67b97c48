//! Streaming importer for Ogre3D `mesh.xml` documents
//!
//! The importer is driven by SAX-style element events. A [`MeshBuilder`]
//! walks the document as a state machine and fills typed vertex and index
//! buffers sized from the declared counts. Geometry is collected into a
//! [`MeshDocument`] and finally compiled into a [`Node`].
//!
//! # Modules
//!
//! - [`buffer`] - Typed, capacity-checked buffers
//! - [`builder`] - Event dispatcher and per-element handlers
//! - [`document`] - Submesh records, shared geometry and material resolution
//! - [`skinning`] - Bone assignment accumulation and weight normalization
//! - [`lod`] - Level-of-detail index chains
//! - [`compile`] - Bind pose, animation control and node assembly
//! - [`packing`] - Interleaved or per-attribute vertex streams
//! - [`formats`] - Binary mesh format written by exporters
//! - `xml` - quick-xml event source (feature `xml`)
//!
//! ```no_run
//! # #[cfg(feature = "xml")]
//! # fn main() -> Result<(), ogre_mesh::ImportError> {
//! use ogre_mesh::{MaterialList, MeshLoader};
//!
//! let materials = MaterialList::new();
//! let mut loader = MeshLoader::default();
//! let node = loader.load_file("Models/Ninja/Ninja.mesh.xml".as_ref(), &materials)?;
//! for geometry in node.visible_children() {
//!     println!("{}: {} vertices", geometry.name, geometry.mesh.vertex_count());
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "xml"))]
//! # fn main() {}
//! ```

pub mod assets;
pub mod attributes;
pub mod buffer;
pub mod builder;
pub mod compile;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod formats;
pub mod loader;
pub mod lod;
pub mod mesh;
pub mod packing;
pub mod scene;
pub mod skinning;
pub mod tags;
#[cfg(feature = "xml")]
pub mod xml;

pub use assets::{AssetKey, AssetResolver, MaterialList};
pub use attributes::Attributes;
pub use buffer::{
    BufferData, BufferKind, Format, SharedBuffer, TypedBuffer, UNSIGNED_SHORT_VERTEX_LIMIT, Usage,
    select_index_format,
};
pub use builder::MeshBuilder;
pub use config::ImportConfig;
pub use document::{MeshDocument, SubmeshRecord};
pub use error::{BufferError, ImportError, ParseError};
pub use events::{ContentHandler, XmlEvent};
pub use formats::{AttributeDescriptor, FLAG_INTERLEAVED, OGRE_MESH_EXT, OgreMeshHeader};
pub use loader::MeshLoader;
pub use mesh::{BoundingBox, Mesh, Topology};
pub use packing::{VertexAttribute, VertexLayout};
pub use scene::{
    AnimControl, AnimData, Bone, BoneAnimation, Bucket, CullHint, Geometry, Material, Node,
    Skeleton,
};
