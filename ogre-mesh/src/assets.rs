//! Asset keys and the lookup collaborators consulted during import

use hashbrown::HashMap;

use crate::scene::{AnimData, Material};

/// Extension of material definitions loaded directly instead of by list lookup
pub const NATIVE_MATERIAL_EXT: &str = ".j3m";

/// Path-like name of an asset, e.g. `Models/Ninja/Ninja.mesh.xml`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    name: String,
}

impl AssetKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().replace('\\', "/"),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory part including the trailing `/`, empty at the root
    pub fn folder(&self) -> &str {
        match self.name.rfind('/') {
            Some(idx) => &self.name[..=idx],
            None => "",
        }
    }

    /// Text after the last `.` of the file name
    pub fn extension(&self) -> &str {
        let file = &self.name[self.folder().len()..];
        match file.rfind('.') {
            Some(idx) => &file[idx + 1..],
            None => "",
        }
    }

    /// File name with folder and extension stripped (`Ninja.mesh`)
    pub fn mesh_name(&self) -> &str {
        let file = &self.name[self.folder().len()..];
        let ext = self.extension();
        if ext.is_empty() {
            file
        } else {
            &file[..file.len() - ext.len() - 1]
        }
    }
}

/// Collaborator resolving materials and animation data by name
///
/// Every lookup may fail; the importer decides whether a miss is fatal.
pub trait AssetResolver {
    /// Material from the mesh's material list
    fn material(&self, name: &str) -> Option<Material>;

    /// Material definition loaded by path (names ending in [`NATIVE_MATERIAL_EXT`])
    fn load_material(&self, _path: &str) -> Option<Material> {
        None
    }

    /// Material substituted when a list lookup misses
    fn fallback_material(&self) -> Option<Material> {
        Some(Material::fallback())
    }

    /// Skeleton and animations stored at `path`
    fn load_anim_data(&self, _path: &str) -> Option<AnimData> {
        None
    }
}

/// Named materials, usually the contents of one `.material` file
#[derive(Debug, Clone, Default)]
pub struct MaterialList {
    materials: HashMap<String, Material>,
}

impl MaterialList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl FromIterator<Material> for MaterialList {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        let mut list = MaterialList::new();
        for material in iter {
            list.insert(material);
        }
        list
    }
}

impl AssetResolver for MaterialList {
    fn material(&self, name: &str) -> Option<Material> {
        self.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parts() {
        let key = AssetKey::new("Models/Ninja/Ninja.mesh.xml");
        assert_eq!(key.folder(), "Models/Ninja/");
        assert_eq!(key.extension(), "xml");
        assert_eq!(key.mesh_name(), "Ninja.mesh");
    }

    #[test]
    fn key_without_folder_or_extension() {
        let key = AssetKey::new("box");
        assert_eq!(key.folder(), "");
        assert_eq!(key.extension(), "");
        assert_eq!(key.mesh_name(), "box");

        let key = AssetKey::new("C:\\assets\\crate.xml");
        assert_eq!(key.folder(), "C:/assets/");
        assert_eq!(key.mesh_name(), "crate");
    }

    #[test]
    fn material_list_resolves_by_name() {
        let list: MaterialList = [Material::new("Wood"), Material::new("Metal")]
            .into_iter()
            .collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.material("Wood").unwrap().name, "Wood");
        assert!(list.material("Stone").is_none());
        assert_eq!(list.fallback_material(), Some(Material::fallback()));
        assert!(list.load_anim_data("Ninja.skeleton.xml").is_none());
    }
}
