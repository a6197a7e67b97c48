//! Manifest parsing and build orchestration
//!
//! Parses assets.toml and coordinates mesh.xml conversion.
//!
//! ```toml
//! [output]
//! dir = "assets/"
//!
//! [import]
//! hardware_skinning = true
//!
//! [materials.Wood]
//! texture = "wood.png"
//!
//! [meshes]
//! crate = "models/crate.mesh.xml"
//! ninja = { path = "models/ninja.mesh.xml", interleave = false }
//! ```

use anyhow::{Context, Result};
use hashbrown::HashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use ogre_mesh::{ImportConfig, Material};

use crate::OGRE_MESH_EXT;

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub materials: HashMap<String, Material>,
    #[serde(default)]
    pub meshes: HashMap<String, MeshEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets/")
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MeshEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default)]
        interleave: Option<bool>,
    },
}

impl MeshEntry {
    pub fn path(&self) -> &Path {
        match self {
            MeshEntry::Simple(p) => p,
            MeshEntry::Detailed { path, .. } => path,
        }
    }

    /// Import settings for this entry, starting from the manifest-wide ones
    pub fn import_config(&self, base: ImportConfig) -> ImportConfig {
        match self {
            MeshEntry::Detailed {
                interleave: Some(interleave),
                ..
            } => ImportConfig {
                auto_interleave: *interleave,
                ..base
            },
            _ => base,
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    let manifest: Manifest = toml::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {:?}", path))?;
    Ok(manifest)
}

fn is_mesh_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    for name in sorted_names(manifest) {
        let entry = &manifest.meshes[name];
        if !entry.path().exists() {
            anyhow::bail!("Mesh '{}' source not found: {:?}", name, entry.path());
        }
        if !is_mesh_xml(entry.path()) {
            anyhow::bail!("Unsupported mesh format for '{}': {:?}", name, entry.path());
        }
    }
    Ok(())
}

fn sorted_names(manifest: &Manifest) -> Vec<&String> {
    let mut names: Vec<&String> = manifest.meshes.keys().collect();
    names.sort();
    names
}

/// Build all meshes from a manifest
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<Vec<PathBuf>> {
    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {:?}", output_dir))?;

    let materials = crate::materials::material_list(&manifest.materials);
    let mut written = Vec::new();

    for name in sorted_names(manifest) {
        let entry = &manifest.meshes[name];
        if !is_mesh_xml(entry.path()) {
            anyhow::bail!("Unsupported mesh format for '{}': {:?}", name, entry.path());
        }

        let output = output_dir.join(format!("{}.{}", name, OGRE_MESH_EXT));
        tracing::info!("Converting mesh: {} -> {:?}", name, output);

        let config = entry.import_config(manifest.import);
        written.extend(crate::mesh::convert_mesh_xml(
            entry.path(),
            &output,
            &materials,
            config,
        )?);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_and_detailed_entries() {
        let manifest: Manifest = toml::from_str(
            r#"
            [import]
            hardware_skinning = true

            [materials.Wood]
            texture = "wood.png"

            [meshes]
            crate = "models/crate.mesh.xml"
            ninja = { path = "models/ninja.mesh.xml", interleave = false }
            "#,
        )
        .unwrap();

        assert_eq!(manifest.output.dir, PathBuf::from("assets/"));
        assert!(manifest.import.hardware_skinning);
        assert_eq!(manifest.materials.len(), 1);

        let simple = &manifest.meshes["crate"];
        assert_eq!(simple.path(), Path::new("models/crate.mesh.xml"));
        assert_eq!(simple.import_config(manifest.import), manifest.import);

        let detailed = &manifest.meshes["ninja"];
        assert_eq!(detailed.path(), Path::new("models/ninja.mesh.xml"));
        let config = detailed.import_config(manifest.import);
        assert!(!config.auto_interleave);
        assert!(config.hardware_skinning);
    }

    #[test]
    fn empty_manifest_uses_defaults() {
        let manifest: Manifest = toml::from_str("").unwrap();
        assert!(manifest.meshes.is_empty());
        assert_eq!(manifest.import, ImportConfig::default());
        assert!(validate(&manifest).is_ok());
    }

    #[test]
    fn validate_rejects_missing_source() {
        let manifest: Manifest =
            toml::from_str(r#"meshes = { ghost = "does/not/exist.mesh.xml" }"#).unwrap();
        let err = validate(&manifest).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
