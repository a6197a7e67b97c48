//! `mesh.xml` element names and the dispatcher's transition table

/// Element recognized by the importer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Mesh,
    SharedGeometry,
    Submeshes,
    Submesh,
    Geometry,
    VertexBuffer,
    Vertex,
    Position,
    Normal,
    Tangent,
    Binormal,
    ColourDiffuse,
    TexCoord,
    Faces,
    Face,
    BoneAssignments,
    VertexBoneAssignment,
    LevelOfDetail,
    LodGenerated,
    LodFaceList,
    SkeletonLink,
}

const TAG_NAMES: &[(&str, Tag)] = &[
    ("mesh", Tag::Mesh),
    ("sharedgeometry", Tag::SharedGeometry),
    ("submeshes", Tag::Submeshes),
    ("submesh", Tag::Submesh),
    ("geometry", Tag::Geometry),
    ("vertexbuffer", Tag::VertexBuffer),
    ("vertex", Tag::Vertex),
    ("position", Tag::Position),
    ("normal", Tag::Normal),
    ("tangent", Tag::Tangent),
    ("binormal", Tag::Binormal),
    ("colour_diffuse", Tag::ColourDiffuse),
    ("texcoord", Tag::TexCoord),
    ("faces", Tag::Faces),
    ("face", Tag::Face),
    ("boneassignments", Tag::BoneAssignments),
    ("vertexboneassignment", Tag::VertexBoneAssignment),
    ("levelofdetail", Tag::LevelOfDetail),
    ("lodgenerated", Tag::LodGenerated),
    ("lodfacelist", Tag::LodFaceList),
    ("skeletonlink", Tag::SkeletonLink),
];

impl Tag {
    pub fn from_name(name: &str) -> Option<Tag> {
        TAG_NAMES
            .iter()
            .find(|(tag_name, _)| *tag_name == name)
            .map(|&(_, tag)| tag)
    }

    pub fn name(self) -> &'static str {
        TAG_NAMES
            .iter()
            .find(|(_, tag)| *tag == self)
            .map_or("", |&(name, _)| name)
    }
}

/// Dispatcher state: the innermost recognized element being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    Idle,
    Mesh,
    SharedGeometry,
    Submeshes,
    Submesh,
    Geometry,
    VertexBuffer,
    Vertex,
    VertexAttribute,
    Faces,
    Face,
    BoneAssignments,
    BoneAssignment,
    LevelOfDetail,
    LodGenerated,
    LodFaceList,
    LodFace,
    SkeletonLink,
}

impl ParseState {
    /// State entered when `tag` opens inside `self`; `None` if not allowed here
    pub fn child(self, tag: Tag) -> Option<ParseState> {
        use self::ParseState as S;
        let next = match (self, tag) {
            (S::Idle, Tag::Mesh) => S::Mesh,

            (S::Mesh, Tag::SharedGeometry) => S::SharedGeometry,
            (S::Mesh, Tag::Submeshes) => S::Submeshes,
            (S::Mesh, Tag::SkeletonLink) => S::SkeletonLink,
            // mesh-level assignments belong to the shared geometry
            (S::Mesh, Tag::BoneAssignments) => S::BoneAssignments,
            (S::Mesh, Tag::LevelOfDetail) => S::LevelOfDetail,

            (S::SharedGeometry, Tag::VertexBuffer) => S::VertexBuffer,

            (S::Submeshes, Tag::Submesh) => S::Submesh,

            (S::Submesh, Tag::Faces) => S::Faces,
            (S::Submesh, Tag::Geometry) => S::Geometry,
            (S::Submesh, Tag::BoneAssignments) => S::BoneAssignments,

            (S::Geometry, Tag::VertexBuffer) => S::VertexBuffer,
            (S::VertexBuffer, Tag::Vertex) => S::Vertex,
            (
                S::Vertex,
                Tag::Position
                | Tag::Normal
                | Tag::Tangent
                | Tag::Binormal
                | Tag::ColourDiffuse
                | Tag::TexCoord,
            ) => S::VertexAttribute,

            (S::Faces, Tag::Face) => S::Face,
            (S::BoneAssignments, Tag::VertexBoneAssignment) => S::BoneAssignment,

            (S::LevelOfDetail, Tag::LodGenerated) => S::LodGenerated,
            (S::LevelOfDetail | S::LodGenerated, Tag::LodFaceList) => S::LodFaceList,
            (S::LodFaceList, Tag::Face) => S::LodFace,

            _ => return None,
        };
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for &(name, tag) in TAG_NAMES {
            assert_eq!(Tag::from_name(name), Some(tag));
            assert_eq!(tag.name(), name);
        }
        assert_eq!(Tag::from_name("colour_specular"), None);
        assert_eq!(Tag::from_name("Mesh"), None);
    }

    #[test]
    fn face_meaning_depends_on_parent() {
        assert_eq!(ParseState::Faces.child(Tag::Face), Some(ParseState::Face));
        assert_eq!(
            ParseState::LodFaceList.child(Tag::Face),
            Some(ParseState::LodFace)
        );
        assert_eq!(ParseState::Submesh.child(Tag::Face), None);
    }

    #[test]
    fn vertex_attributes_only_inside_vertex() {
        assert_eq!(
            ParseState::Vertex.child(Tag::Position),
            Some(ParseState::VertexAttribute)
        );
        assert_eq!(ParseState::Geometry.child(Tag::Position), None);
        assert_eq!(ParseState::VertexAttribute.child(Tag::Position), None);
    }

    #[test]
    fn document_must_start_with_mesh() {
        assert_eq!(ParseState::Idle.child(Tag::Mesh), Some(ParseState::Mesh));
        assert_eq!(ParseState::Idle.child(Tag::Submesh), None);
        assert_eq!(ParseState::Mesh.child(Tag::Mesh), None);
    }
}
