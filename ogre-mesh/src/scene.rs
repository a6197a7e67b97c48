//! Scene output of an import: node, geometries, materials and animation control

use hashbrown::HashMap;
use serde::Deserialize;

use crate::mesh::{BoundingBox, Mesh};

/// Name given to the material substituted for unresolved references
pub const FALLBACK_MATERIAL_NAME: &str = "Common/Materials/RedColor";

/// Render queue a geometry is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bucket {
    #[default]
    Opaque,
    Transparent,
}

/// Whether a geometry is ever drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullHint {
    /// Frustum-tested as usual
    #[default]
    Dynamic,
    /// Storage only, never drawn
    Always,
}

/// Minimal material description resolved by name
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default = "default_diffuse")]
    pub diffuse: [f32; 4],
    #[serde(default)]
    pub texture: Option<String>,
}

fn default_diffuse() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

impl Material {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transparent: false,
            diffuse: default_diffuse(),
            texture: None,
        }
    }

    /// Solid red stand-in for materials that could not be found
    pub fn fallback() -> Self {
        Self {
            diffuse: [1.0, 0.0, 0.0, 1.0],
            ..Self::new(FALLBACK_MATERIAL_NAME)
        }
    }
}

/// A drawable (or storage-only) mesh with its material
#[derive(Debug, Clone)]
pub struct Geometry {
    pub name: String,
    pub mesh: Mesh,
    pub material: Option<Material>,
    pub cull_hint: CullHint,
    pub queue_bucket: Bucket,
}

impl Geometry {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            material: None,
            cull_hint: CullHint::default(),
            queue_bucket: Bucket::default(),
        }
    }

    /// Assign a material, moving transparent ones to the transparent bucket
    pub fn set_material(&mut self, material: Material) {
        if material.transparent {
            self.queue_bucket = Bucket::Transparent;
        }
        self.material = Some(material);
    }
}

/// One skeleton bone
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    pub parent: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}

/// Named animation clip; keyframe data stays with the animation collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct BoneAnimation {
    pub name: String,
    /// Length in seconds
    pub length: f32,
}

/// Skeleton and clips loaded for a `skeletonlink`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimData {
    pub skeleton: Skeleton,
    pub animations: Vec<BoneAnimation>,
}

/// Skinning control binding a skeleton to the bind-posed meshes of a node
#[derive(Debug, Clone)]
pub struct AnimControl {
    /// Indices into [`Node::children`] of the meshes that own skinning data
    pub skinned_meshes: Vec<usize>,
    pub skeleton: Skeleton,
    pub animations: HashMap<String, BoneAnimation>,
}

impl AnimControl {
    pub fn animation(&self, name: &str) -> Option<&BoneAnimation> {
        self.animations.get(name)
    }

    /// Clip names, sorted
    pub fn animation_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.animations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Root of an imported model
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    children: Vec<Geometry>,
    anim_control: Option<AnimControl>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            anim_control: None,
        }
    }

    pub fn attach_child(&mut self, child: Geometry) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[Geometry] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&Geometry> {
        self.children.iter().find(|g| g.name == name)
    }

    /// Children that are actually drawn
    pub fn visible_children(&self) -> impl Iterator<Item = &Geometry> {
        self.children
            .iter()
            .filter(|g| g.cull_hint != CullHint::Always)
    }

    pub fn set_anim_control(&mut self, control: AnimControl) {
        self.anim_control = Some(control);
    }

    pub fn anim_control(&self) -> Option<&AnimControl> {
        self.anim_control.as_ref()
    }

    /// Union of the children's bounds
    pub fn world_bound(&self) -> Option<BoundingBox> {
        self.children
            .iter()
            .filter_map(|g| g.mesh.bound().copied())
            .reduce(|a, b| a.merge(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_material_changes_bucket() {
        let mut geom = Geometry::new("g", Mesh::default());
        geom.set_material(Material::new("opaque"));
        assert_eq!(geom.queue_bucket, Bucket::Opaque);

        let mut glass = Material::new("glass");
        glass.transparent = true;
        geom.set_material(glass);
        assert_eq!(geom.queue_bucket, Bucket::Transparent);
    }

    #[test]
    fn material_defaults_when_deserialized() {
        let material: Material = toml::from_str("transparent = true").unwrap();
        assert!(material.transparent);
        assert_eq!(material.diffuse, [1.0; 4]);
        assert!(material.name.is_empty());
    }

    #[test]
    fn culled_children_are_not_visible() {
        let mut node = Node::new("n");
        let mut shared = Geometry::new("shared", Mesh::default());
        shared.cull_hint = CullHint::Always;
        node.attach_child(shared);
        node.attach_child(Geometry::new("sub", Mesh::default()));

        let visible: Vec<_> = node.visible_children().map(|g| g.name.as_str()).collect();
        assert_eq!(visible, ["sub"]);
        assert!(node.child("shared").is_some());
        assert!(node.world_bound().is_none());
    }
}
