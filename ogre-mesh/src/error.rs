//! Error types for buffer population, document parsing and import

use crate::buffer::{BufferKind, Format};
use crate::mesh::Topology;

/// Failure while declaring or writing a [`TypedBuffer`](crate::TypedBuffer)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BufferError {
    /// Declared element count was negative
    #[error("cannot allocate {kind:?} buffer for {count} elements")]
    NegativeCapacity { kind: BufferKind, count: i64 },

    /// Write would exceed the declared capacity
    #[error("{kind:?} buffer overflow (capacity {capacity})")]
    Overflow { kind: BufferKind, capacity: usize },

    /// Write after the buffer was flipped to read-only
    #[error("{0:?} buffer is closed")]
    Closed(BufferKind),

    /// Write used an element type the buffer was not declared with
    #[error("{kind:?} buffer has format {format:?}")]
    FormatMismatch { kind: BufferKind, format: Format },

    /// Index value does not fit the buffer's element format
    #[error("value {value} does not fit {kind:?} buffer of format {format:?}")]
    ValueOutOfRange {
        kind: BufferKind,
        format: Format,
        value: u32,
    },

    /// Component width outside 1..=4
    #[error("{kind:?} buffer cannot have {components} components")]
    InvalidComponents { kind: BufferKind, components: usize },
}

/// Fatal condition that aborts a `mesh.xml` parse
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("attribute '{attribute}' has malformed value '{value}'")]
    InvalidNumber { attribute: String, value: String },

    #[error("{0:?} not supported for <faces>, only triangle lists")]
    UnsupportedTopology(Topology),

    #[error("texture coord dimensions must be 1 <= dims <= 4, got {0}")]
    TexCoordDimensions(i32),

    #[error("tangent dimensions must be 3 or 4, got {0}")]
    TangentDimensions(i32),

    #[error("color value must contain 3 or 4 components, got {0}")]
    ColorComponents(usize),

    #[error("lodfacelist refers to unknown submesh {0}")]
    UnresolvedLodSubmesh(i32),

    #[error("submesh uses shared vertices but no sharedgeometry was declared")]
    MissingSharedGeometry,

    #[error("<{element}> has no mesh to write to")]
    NoActiveMesh { element: String },

    #[error("no {0:?} buffer declared for this vertex")]
    UndeclaredBuffer(BufferKind),

    #[error("bone assignment for vertex {vertex}, but mesh has {vertex_count} vertices")]
    VertexIndexOutOfRange { vertex: i32, vertex_count: usize },

    #[error("bone index {0} out of range 0..=255")]
    BoneIndexOutOfRange(i32),

    #[error("cannot locate material named {0}")]
    MaterialNotFound(String),

    #[error("expected </{expected}>, found </{found}>")]
    UnbalancedElement { expected: String, found: String },

    #[error("document ended inside <{0}>")]
    UnexpectedEnd(String),

    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },
}

/// Import failure surfaced to callers of [`MeshLoader`](crate::MeshLoader)
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("error while parsing Ogre3D mesh.xml '{key}'")]
    Parse {
        key: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to read '{key}'")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
