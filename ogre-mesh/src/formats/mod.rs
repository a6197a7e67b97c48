//! Binary output formats for imported meshes
//!
//! POD layouts with no magic bytes; the file extension identifies the format.

pub mod mesh;

pub use mesh::*;
