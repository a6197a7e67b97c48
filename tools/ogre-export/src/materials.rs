//! Material lists for mesh import
//!
//! Materials are plain TOML tables keyed by material name:
//!
//! ```toml
//! [Wood]
//! texture = "wood.png"
//!
//! [Glass]
//! transparent = true
//! diffuse = [0.8, 0.9, 1.0, 0.3]
//! ```

use anyhow::{Context, Result};
use hashbrown::HashMap;
use std::path::Path;

use ogre_mesh::{Material, MaterialList};

/// Build a material list from name -> material tables
///
/// The table key names the material; a `name` inside the table is ignored.
pub fn material_list(entries: &HashMap<String, Material>) -> MaterialList {
    entries
        .iter()
        .map(|(name, material)| Material {
            name: name.clone(),
            ..material.clone()
        })
        .collect()
}

/// Parse a material TOML document
pub fn parse_materials(content: &str) -> Result<MaterialList> {
    let entries: HashMap<String, Material> = toml::from_str(content)?;
    Ok(material_list(&entries))
}

/// Load a material TOML file
pub fn load_materials(path: &Path) -> Result<MaterialList> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read materials: {:?}", path))?;
    parse_materials(&content).with_context(|| format!("Failed to parse materials: {:?}", path))
}
