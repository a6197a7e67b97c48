//! Event-driven mesh builder
//!
//! [`MeshBuilder`] consumes document events and populates a [`MeshDocument`].
//! Each recognized element moves the builder into a [`ParseState`]; an
//! element that is unknown, or not allowed where it appears, is skipped
//! together with everything nested inside it.

use std::sync::Arc;

use crate::assets::{AssetKey, AssetResolver};
use crate::attributes::Attributes;
use crate::buffer::{BufferKind, Format, MAX_TEX_COORD_SETS, TypedBuffer, select_index_format};
use crate::config::ImportConfig;
use crate::document::{MeshDocument, resolve_material};
use crate::error::{BufferError, ParseError};
use crate::events::ContentHandler;
use crate::mesh::{Mesh, Topology};
use crate::skinning::SkinningAccumulator;
use crate::tags::{ParseState, Tag};

/// Texture coordinate component attributes, in order
const TEX_COORD_COMPONENTS: [&str; 4] = ["u", "v", "w", "x"];

/// Recognized element currently open
#[derive(Debug, Clone, Copy)]
struct Frame {
    tag: Tag,
    state: ParseState,
}

/// Element being skipped together with its subtree
#[derive(Debug, Clone)]
struct IgnoredSubtree {
    name: String,
    depth: usize,
}

/// Builds a [`MeshDocument`] from SAX-style events
pub struct MeshBuilder<'a> {
    assets: &'a dyn AssetResolver,
    config: ImportConfig,
    mesh_name: Option<String>,
    folder: String,

    document: MeshDocument,
    stack: Vec<Frame>,
    ignored: Option<IgnoredSubtree>,

    /// Record receiving geometry, faces and bone assignments
    current: Option<usize>,
    tex_coord_index: u8,
    skinning: Option<(usize, SkinningAccumulator)>,
    lod_level: Option<(usize, TypedBuffer)>,
    geom_index: usize,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(assets: &'a dyn AssetResolver) -> Self {
        Self {
            assets,
            config: ImportConfig::default(),
            mesh_name: None,
            folder: String::new(),
            document: MeshDocument::default(),
            stack: Vec::new(),
            ignored: None,
            current: None,
            tex_coord_index: 0,
            skinning: None,
            lod_level: None,
            geom_index: 0,
        }
    }

    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Name geometries after the asset and resolve skeletons relative to its folder
    pub fn with_key(mut self, key: &AssetKey) -> Self {
        let name = key.mesh_name();
        self.mesh_name = (!name.is_empty()).then(|| name.to_string());
        self.folder = key.folder().to_string();
        self
    }

    pub fn finish(self) -> MeshDocument {
        self.document
    }

    fn state(&self) -> ParseState {
        self.stack.last().map_or(ParseState::Idle, |f| f.state)
    }

    fn next_geometry_name(&mut self) -> String {
        self.geom_index += 1;
        match &self.mesh_name {
            Some(name) => format!("{}-geom-{}", name, self.geom_index),
            None => format!("OgreSubmesh-{}", self.geom_index),
        }
    }

    fn shared_geometry_name(&self) -> String {
        match &self.mesh_name {
            Some(name) => format!("{name}-sharedgeom"),
            None => "Ogre-SharedGeom".to_string(),
        }
    }

    fn current_mesh(&mut self, tag: Tag) -> Result<&mut Mesh, ParseError> {
        self.current
            .and_then(|index| self.document.mesh_mut(index))
            .ok_or_else(|| ParseError::NoActiveMesh {
                element: tag.name().to_string(),
            })
    }

    fn open_buffer(&mut self, tag: Tag, kind: BufferKind) -> Result<&mut TypedBuffer, ParseError> {
        self.current_mesh(tag)?
            .open_buffer_mut(kind)
            .ok_or(ParseError::UndeclaredBuffer(kind))
    }

    fn ignore(&mut self, name: &str) {
        self.ignored = Some(IgnoredSubtree {
            name: name.to_string(),
            depth: 1,
        });
    }

    fn open(&mut self, tag: Tag, parent: ParseState, attrs: &Attributes) -> Result<(), ParseError> {
        match tag {
            Tag::Mesh | Tag::Submeshes => Ok(()),
            Tag::SharedGeometry => self.begin_shared_geometry(attrs),
            Tag::Submesh => self.begin_submesh(attrs),
            Tag::Geometry => {
                let count = vertex_count(attrs.int("vertexcount")?)?;
                self.current_mesh(tag)?.set_vertex_count(count);
                Ok(())
            }
            Tag::VertexBuffer => self.declare_vertex_buffers(attrs),
            Tag::Vertex => {
                self.tex_coord_index = 0;
                Ok(())
            }
            Tag::Position => self.push_vector(tag, BufferKind::Position, attrs),
            Tag::Normal => self.push_vector(tag, BufferKind::Normal, attrs),
            Tag::Tangent => self.push_vector(tag, BufferKind::Tangent, attrs),
            Tag::Binormal => self.push_vector(tag, BufferKind::Binormal, attrs),
            Tag::ColourDiffuse => self.push_color(attrs),
            Tag::TexCoord => self.push_tex_coord(attrs),
            Tag::Faces => self.begin_faces(attrs),
            Tag::Face => self.push_face(parent, attrs),
            Tag::BoneAssignments => self.begin_bone_assignments(parent),
            Tag::VertexBoneAssignment => self.push_bone_assignment(attrs),
            Tag::LevelOfDetail => {
                tracing::debug!(
                    "level of detail: {} levels",
                    attrs.get("numlevels").unwrap_or("?")
                );
                Ok(())
            }
            Tag::LodGenerated => {
                tracing::debug!(
                    "generated LOD level at squared distance {}",
                    attrs.get("fromdepthsquared").unwrap_or("?")
                );
                Ok(())
            }
            Tag::LodFaceList => self.begin_lod_level(attrs),
            Tag::SkeletonLink => self.link_skeleton(attrs),
        }
    }

    fn close(&mut self, tag: Tag) -> Result<(), ParseError> {
        match tag {
            Tag::Submesh => {
                if let Some(index) = self.current.take() {
                    self.document.finish_mesh(index);
                }
            }
            // mesh-level elements after the submeshes address the shared geometry
            Tag::Submeshes => self.current = self.document.shared_index(),
            Tag::Faces => {
                if let Some(index) = self.current {
                    if let Some(mesh) = self.document.mesh_mut(index) {
                        mesh.close_buffer(BufferKind::Index);
                    }
                }
            }
            Tag::Geometry => {
                if let Some(index) = self.current {
                    self.document.finish_mesh(index);
                }
            }
            Tag::SharedGeometry => {
                if let Some(index) = self.current.take() {
                    self.document.finish_mesh(index);
                }
            }
            Tag::BoneAssignments => self.end_bone_assignments(),
            Tag::LodFaceList => {
                if let Some((index, mut level)) = self.lod_level.take() {
                    level.close();
                    self.document.lod_mut().push_level(index, Arc::new(level));
                }
            }
            Tag::LevelOfDetail => self.document.apply_lod_levels(),
            _ => {}
        }
        Ok(())
    }

    fn begin_shared_geometry(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let count = vertex_count(attrs.int("vertexcount")?)?;
        let name = self.shared_geometry_name();
        self.current = Some(self.document.begin_shared_geometry(name, count));
        Ok(())
    }

    fn begin_submesh(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let material_ref = attrs.string("material")?;
        let uses_shared_vertices = attrs.bool_or("usesharedvertices", false);
        let declares_32bit_indices = attrs.bool_or("use32bitindexes", false);
        let topology = match attrs.get("operationtype").filter(|op| !op.is_empty()) {
            None => Topology::TriangleList,
            Some(op) => Topology::from_operation_type(op).unwrap_or_else(|| {
                tracing::warn!("Unknown operationtype '{}', using triangle_list", op);
                Topology::TriangleList
            }),
        };

        let name = self.next_geometry_name();
        let material = resolve_material(self.assets, material_ref)?;
        let index = self.document.begin_submesh(
            name,
            material_ref,
            uses_shared_vertices,
            declares_32bit_indices,
            topology,
        )?;
        if let Some(record) = self.document.record_mut(index) {
            record.geometry.set_material(material);
        }
        self.current = Some(index);
        Ok(())
    }

    fn declare_vertex_buffers(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let tangent_dims = if attrs.bool_or("tangents", false) {
            let dims = attrs.int_or("tangent_dimensions", 3)?;
            if dims != 3 && dims != 4 {
                return Err(ParseError::TangentDimensions(dims));
            }
            Some(dims as usize)
        } else {
            None
        };

        let mut tex_coord_dims = Vec::new();
        let sets = attrs.int_or("texture_coords", 0)?;
        if sets > i32::from(MAX_TEX_COORD_SETS) {
            tracing::warn!(
                "{} texture coordinate sets declared, keeping the first {}",
                sets,
                MAX_TEX_COORD_SETS
            );
        }
        for set in 0..sets.clamp(0, i32::from(MAX_TEX_COORD_SETS)) {
            let dims = attrs.int_or(&format!("texture_coord_dimensions_{set}"), 2)?;
            if !(1..=4).contains(&dims) {
                return Err(ParseError::TexCoordDimensions(dims));
            }
            tex_coord_dims.push(dims as usize);
        }

        let mut declared = Vec::new();
        if attrs.bool_or("positions", false) {
            declared.push((BufferKind::Position, 3));
        }
        if attrs.bool_or("normals", false) {
            declared.push((BufferKind::Normal, 3));
        }
        if attrs.bool_or("colours_diffuse", false) {
            declared.push((BufferKind::Color, 4));
        }
        if let Some(dims) = tangent_dims {
            declared.push((BufferKind::Tangent, dims));
        }
        if attrs.bool_or("binormals", false) {
            declared.push((BufferKind::Binormal, 3));
        }
        for (set, dims) in tex_coord_dims.into_iter().enumerate() {
            declared.push((BufferKind::TexCoord(set as u8), dims));
        }

        let mesh = self.current_mesh(Tag::VertexBuffer)?;
        let count = mesh.vertex_count() as i64;
        for (kind, components) in declared {
            mesh.set_buffer(TypedBuffer::new(kind, count, components, Format::Float)?);
        }
        Ok(())
    }

    fn push_vector(&mut self, tag: Tag, kind: BufferKind, attrs: &Attributes) -> Result<(), ParseError> {
        let x = attrs.float("x")?;
        let y = attrs.float("y")?;
        let z = attrs.float("z")?;
        let buffer = self.open_buffer(tag, kind)?;
        if buffer.components() == 4 {
            let w = attrs.float_or("w", 1.0)?;
            buffer.push_floats(&[x, y, z, w])?;
        } else {
            buffer.push_vector3(x, y, z)?;
        }
        Ok(())
    }

    fn push_color(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let value = attrs.string("value")?;
        let parts: Vec<&str> = value.split_whitespace().collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(ParseError::ColorComponents(parts.len()));
        }
        let mut rgba = [1.0f32; 4];
        for (slot, part) in rgba.iter_mut().zip(&parts) {
            *slot = crate::attributes::parse_float("value", part)?;
        }
        self.open_buffer(Tag::ColourDiffuse, BufferKind::Color)?
            .push_floats(&rgba)?;
        Ok(())
    }

    fn push_tex_coord(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let set = self.tex_coord_index;
        self.tex_coord_index = self.tex_coord_index.saturating_add(1);

        let kind = BufferKind::TexCoord(set);
        let declared = set < MAX_TEX_COORD_SETS
            && self
                .current_mesh(Tag::TexCoord)?
                .open_buffer_mut(kind)
                .is_some();
        if !declared {
            if set == 0 {
                return Err(ParseError::UndeclaredBuffer(kind));
            }
            tracing::trace!("texcoord set {} not declared, skipping", set);
            return Ok(());
        }

        let buffer = self.open_buffer(Tag::TexCoord, kind)?;
        let mut values = [0.0f32; 4];
        let components = buffer.components();
        for (value, name) in values.iter_mut().zip(TEX_COORD_COMPONENTS).take(components) {
            *value = attrs.float(name)?;
        }
        buffer.push_floats(&values[..components])?;
        Ok(())
    }

    fn begin_faces(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let count = attrs.int("count")?;
        let index = self.current.ok_or_else(|| ParseError::NoActiveMesh {
            element: Tag::Faces.name().to_string(),
        })?;

        let mode = self.current_mesh(Tag::Faces)?.mode();
        if mode != Topology::TriangleList {
            return Err(ParseError::UnsupportedTopology(mode));
        }

        let format = select_index_format(self.document.face_vertex_count(index));
        let buffer = TypedBuffer::new(BufferKind::Index, i64::from(count), 3, format)?;
        let mesh = self.current_mesh(Tag::Faces)?;
        mesh.set_triangle_count(count as usize);
        mesh.set_buffer(buffer);
        Ok(())
    }

    fn push_face(&mut self, parent: ParseState, attrs: &Attributes) -> Result<(), ParseError> {
        let face = [
            face_index(attrs, "v1")?,
            face_index(attrs, "v2")?,
            face_index(attrs, "v3")?,
        ];
        match parent {
            ParseState::LodFaceList => {
                if let Some((_, level)) = self.lod_level.as_mut() {
                    level.push_indices(&face)?;
                }
            }
            _ => self
                .open_buffer(Tag::Face, BufferKind::Index)?
                .push_indices(&face)?,
        }
        Ok(())
    }

    fn begin_bone_assignments(&mut self, parent: ParseState) -> Result<(), ParseError> {
        let target = match parent {
            ParseState::Mesh => self
                .document
                .shared_index()
                .ok_or(ParseError::MissingSharedGeometry)?,
            _ => self.current.ok_or_else(|| ParseError::NoActiveMesh {
                element: Tag::BoneAssignments.name().to_string(),
            })?,
        };

        let Some(record) = self.document.record(target) else {
            return Ok(());
        };
        if record.uses_shared_vertices {
            tracing::debug!("submesh {} shares vertices, skipping its bone assignments", target);
            self.skinning = None;
            return Ok(());
        }
        let vertex_count = record.mesh().vertex_count();
        self.skinning = Some((target, SkinningAccumulator::new(vertex_count)));
        Ok(())
    }

    fn push_bone_assignment(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let Some((target, accumulator)) = self.skinning.as_mut() else {
            return Ok(());
        };
        let vertex = attrs.int("vertexindex")?;
        let bone = attrs.int("boneindex")?;
        let weight = attrs.float("weight")?;
        if !accumulator.push(vertex, bone, weight)? {
            tracing::debug!(
                "vertex {} of geometry {} already has 4 influences, dropping bone {}",
                vertex,
                target,
                bone
            );
        }
        Ok(())
    }

    fn end_bone_assignments(&mut self) {
        let Some((target, accumulator)) = self.skinning.take() else {
            return;
        };
        let data = accumulator.finish();
        if data.zero_weight_vertices > 0 {
            tracing::warn!(
                "{} vertices of geometry {} have bone weights summing to zero",
                data.zero_weight_vertices,
                target
            );
        }
        let usage = self.config.bone_buffer_usage();
        if let Some(mesh) = self.document.mesh_mut(target) {
            mesh.set_shared_buffer(Arc::new(data.weight_buffer(usage)));
            mesh.set_shared_buffer(Arc::new(data.index_buffer(usage)));
            mesh.set_max_num_weights(data.max_weights_per_vertex);
        }
    }

    fn begin_lod_level(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let submesh_index = attrs.int("submeshindex")?;
        let num_faces = attrs.int("numfaces")?;
        let level = TypedBuffer::new(
            BufferKind::Index,
            i64::from(num_faces),
            3,
            Format::UnsignedShort,
        )?;

        let index = usize::try_from(submesh_index)
            .ok()
            .filter(|&i| i < self.document.records().len())
            .ok_or(ParseError::UnresolvedLodSubmesh(submesh_index))?;
        let base = match self.document.base_indices(index) {
            Some(base) => base,
            None => {
                tracing::debug!("LOD chain for record {} starts without a base level", index);
                let mut empty = TypedBuffer::new(BufferKind::Index, 0, 3, Format::UnsignedShort)?;
                empty.close();
                Arc::new(empty)
            }
        };
        self.document.lod_mut().ensure_chain(index, || base);
        self.lod_level = Some((index, level));
        Ok(())
    }

    fn link_skeleton(&mut self, attrs: &Attributes) -> Result<(), ParseError> {
        let name = attrs.string("name")?;
        let anim_data = self
            .assets
            .load_anim_data(&format!("{}{}.xml", self.folder, name))
            .or_else(|| self.assets.load_anim_data(&format!("{}{}xml", self.folder, name)));
        if anim_data.is_none() {
            tracing::warn!("Cannot locate skeleton {}{}.xml", self.folder, name);
        }
        self.document.set_anim_data(anim_data);
        Ok(())
    }
}

impl ContentHandler for MeshBuilder<'_> {
    fn start_document(&mut self) {
        self.document = MeshDocument::new(self.mesh_name.clone());
        self.stack.clear();
        self.ignored = None;
        self.current = None;
        self.tex_coord_index = 0;
        self.skinning = None;
        self.lod_level = None;
        self.geom_index = 0;
    }

    fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<(), ParseError> {
        if let Some(ignored) = self.ignored.as_mut() {
            ignored.depth += 1;
            return Ok(());
        }

        let parent = self.state();
        let transition = Tag::from_name(name).map(|tag| (tag, parent.child(tag)));
        match transition {
            Some((tag, Some(next))) => {
                self.open(tag, parent, attributes)?;
                self.stack.push(Frame { tag, state: next });
            }
            Some((_, None)) => {
                tracing::warn!("Unexpected <{}> inside {:?}. Ignoring.", name, parent);
                self.ignore(name);
            }
            None => {
                tracing::warn!("Unknown tag: {}. Ignoring.", name);
                self.ignore(name);
            }
        }
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), ParseError> {
        if let Some(ignored) = self.ignored.as_mut() {
            ignored.depth -= 1;
            if ignored.depth == 0 {
                if ignored.name != name {
                    return Err(ParseError::UnbalancedElement {
                        expected: ignored.name.clone(),
                        found: name.to_string(),
                    });
                }
                self.ignored = None;
            }
            return Ok(());
        }

        let frame = self.stack.pop().ok_or_else(|| ParseError::UnbalancedElement {
            expected: String::new(),
            found: name.to_string(),
        })?;
        if frame.tag.name() != name {
            return Err(ParseError::UnbalancedElement {
                expected: frame.tag.name().to_string(),
                found: name.to_string(),
            });
        }
        self.close(frame.tag)
    }

    fn end_document(&mut self) -> Result<(), ParseError> {
        if let Some(ignored) = &self.ignored {
            return Err(ParseError::UnexpectedEnd(ignored.name.clone()));
        }
        match self.stack.last() {
            Some(frame) => Err(ParseError::UnexpectedEnd(frame.tag.name().to_string())),
            None => Ok(()),
        }
    }
}

fn vertex_count(count: i32) -> Result<usize, ParseError> {
    usize::try_from(count).map_err(|_| {
        ParseError::Buffer(BufferError::NegativeCapacity {
            kind: BufferKind::Position,
            count: i64::from(count),
        })
    })
}

fn face_index(attrs: &Attributes, name: &str) -> Result<u32, ParseError> {
    let value = attrs.int(name)?;
    u32::try_from(value).map_err(|_| ParseError::InvalidNumber {
        attribute: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialList;
    use crate::events::{XmlEvent, dispatch};

    fn start(name: &str, attrs: &[(&str, &str)]) -> XmlEvent {
        let mut attributes = Attributes::new(name);
        for (k, v) in attrs {
            attributes.push(*k, *v);
        }
        XmlEvent::start(attributes)
    }

    fn end(name: &str) -> XmlEvent {
        XmlEvent::end(name)
    }

    fn build(events: Vec<XmlEvent>) -> Result<MeshDocument, ParseError> {
        let materials = MaterialList::new();
        let mut builder = MeshBuilder::new(&materials);
        dispatch(&mut builder, events)?;
        Ok(builder.finish())
    }

    fn triangle_submesh() -> Vec<XmlEvent> {
        vec![
            start("mesh", &[]),
            start("submeshes", &[]),
            start("submesh", &[("material", "Wood")]),
            start("faces", &[("count", "1")]),
            start("face", &[("v1", "0"), ("v2", "1"), ("v3", "2")]),
            end("face"),
            end("faces"),
            start("geometry", &[("vertexcount", "3")]),
            start("vertexbuffer", &[("positions", "true")]),
            start("vertex", &[]),
            start("position", &[("x", "0"), ("y", "0"), ("z", "0")]),
            end("position"),
            end("vertex"),
            start("vertex", &[]),
            start("position", &[("x", "1"), ("y", "0"), ("z", "0")]),
            end("position"),
            end("vertex"),
            start("vertex", &[]),
            start("position", &[("x", "0"), ("y", "2"), ("z", "0")]),
            end("position"),
            end("vertex"),
            end("vertexbuffer"),
            end("geometry"),
            end("submesh"),
            end("submeshes"),
            end("mesh"),
        ]
    }

    #[test]
    fn builds_single_triangle() {
        let doc = build(triangle_submesh()).unwrap();
        assert_eq!(doc.records().len(), 1);

        let mesh = doc.record(0).unwrap().mesh();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_open_buffers());
        assert!(mesh.is_static());

        let index = mesh.buffer(BufferKind::Index).unwrap();
        assert_eq!(index.format(), Format::UnsignedShort);
        assert_eq!(index.indices(), [0, 1, 2]);

        let bound = mesh.bound().unwrap();
        assert_eq!(bound.max, glam::Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(doc.record(0).unwrap().geometry.name, "OgreSubmesh-1");
    }

    #[test]
    fn unknown_subtree_is_skipped() {
        let mut events = triangle_submesh();
        let extra = vec![
            start("foo", &[]),
            start("bar", &[]),
            end("bar"),
            start("foo", &[]),
            end("foo"),
            end("foo"),
        ];
        events.splice(1..1, extra);
        let doc = build(events).unwrap();
        assert_eq!(doc.records().len(), 1);
    }

    #[test]
    fn misplaced_tag_is_skipped_with_subtree() {
        let mut events = triangle_submesh();
        // <position> directly under <mesh> is not a vertex attribute
        let extra = vec![
            start("position", &[("x", "9"), ("y", "9"), ("z", "9")]),
            start("vertex", &[]),
            end("vertex"),
            end("position"),
        ];
        events.splice(1..1, extra);
        assert!(build(events).is_ok());
    }

    #[test]
    fn mismatched_close_is_fatal() {
        let events = vec![start("mesh", &[]), start("submeshes", &[]), end("mesh")];
        assert_eq!(
            build(events).unwrap_err(),
            ParseError::UnbalancedElement {
                expected: "submeshes".into(),
                found: "mesh".into()
            }
        );
    }

    #[test]
    fn truncated_document_is_fatal() {
        let events = vec![start("mesh", &[]), start("submeshes", &[])];
        assert_eq!(
            build(events).unwrap_err(),
            ParseError::UnexpectedEnd("submeshes".into())
        );
    }

    #[test]
    fn vertex_data_without_declaration_fails() {
        let events = vec![
            start("mesh", &[]),
            start("submeshes", &[]),
            start("submesh", &[("material", "Wood")]),
            start("geometry", &[("vertexcount", "1")]),
            start("vertexbuffer", &[("positions", "true")]),
            start("vertex", &[]),
            start("normal", &[("x", "0"), ("y", "1"), ("z", "0")]),
        ];
        assert_eq!(
            build(events).unwrap_err(),
            ParseError::UndeclaredBuffer(BufferKind::Normal)
        );
    }

    #[test]
    fn colour_alpha_defaults_to_one() {
        let events = vec![
            start("mesh", &[]),
            start("submeshes", &[]),
            start("submesh", &[("material", "Wood")]),
            start("geometry", &[("vertexcount", "1")]),
            start("vertexbuffer", &[("colours_diffuse", "true")]),
            start("vertex", &[]),
            start("colour_diffuse", &[("value", "0.5 0.25 1")]),
            end("colour_diffuse"),
            end("vertex"),
            end("vertexbuffer"),
            end("geometry"),
            end("submesh"),
            end("submeshes"),
            end("mesh"),
        ];
        let doc = build(events).unwrap();
        let colors = doc.record(0).unwrap().mesh().buffer(BufferKind::Color).unwrap();
        assert_eq!(colors.as_f32().unwrap(), [0.5, 0.25, 1.0, 1.0]);
    }

    #[test]
    fn four_component_tangents_read_w() {
        let events = vec![
            start("mesh", &[]),
            start("submeshes", &[]),
            start("submesh", &[("material", "Wood")]),
            start("geometry", &[("vertexcount", "1")]),
            start(
                "vertexbuffer",
                &[("tangents", "true"), ("tangent_dimensions", "4")],
            ),
            start("vertex", &[]),
            start("tangent", &[("x", "1"), ("y", "0"), ("z", "0"), ("w", "-1")]),
            end("tangent"),
            end("vertex"),
            end("vertexbuffer"),
            end("geometry"),
            end("submesh"),
            end("submeshes"),
            end("mesh"),
        ];
        let doc = build(events).unwrap();
        let tangents = doc
            .record(0)
            .unwrap()
            .mesh()
            .buffer(BufferKind::Tangent)
            .unwrap();
        assert_eq!(tangents.components(), 4);
        assert_eq!(tangents.as_f32().unwrap(), [1.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn unknown_operation_type_falls_back_to_list() {
        let mut events = triangle_submesh();
        events[2] = start(
            "submesh",
            &[("material", "Wood"), ("operationtype", "line_list")],
        );
        let doc = build(events).unwrap();
        assert_eq!(doc.record(0).unwrap().mesh().mode(), Topology::TriangleList);
    }
}
