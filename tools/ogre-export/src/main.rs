//! ogre-export - Ogre3D mesh.xml export tool
//!
//! Converts Ogre3D mesh.xml documents to GPU-ready binary meshes (.ogmesh)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ogre_export::{manifest, materials, mesh, read_mesh_header, OGRE_MESH_EXT};
use ogre_mesh::{ImportConfig, MaterialList};

#[derive(Parser)]
#[command(name = "ogre-export")]
#[command(about = "Ogre3D mesh.xml export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build meshes from a manifest file
    Build {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to assets.toml manifest
        #[arg(default_value = "assets.toml")]
        manifest: PathBuf,
    },

    /// Export a single mesh.xml file
    Mesh {
        /// Input mesh.xml file
        input: PathBuf,

        /// Output .ogmesh file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Material TOML file
        #[arg(short, long)]
        materials: Option<PathBuf>,

        /// Interleave vertex attributes (default: true)
        #[arg(long)]
        interleave: Option<bool>,

        /// Keep bone buffers for GPU skinning
        #[arg(long)]
        hardware_skinning: bool,
    },

    /// Print a summary of a mesh.xml or .ogmesh file
    Info {
        /// Input file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building meshes from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            let written = manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete! ({} files)", written.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Mesh {
            input,
            output,
            materials,
            interleave,
            hardware_skinning,
        } => {
            let output = output.unwrap_or_else(|| default_output(&input));
            tracing::info!("Converting {:?} -> {:?}", input, output);

            let list = match materials {
                Some(path) => materials::load_materials(&path)?,
                None => MaterialList::new(),
            };
            let defaults = ImportConfig::default();
            let config = ImportConfig {
                hardware_skinning,
                auto_interleave: interleave.unwrap_or(defaults.auto_interleave),
            };
            mesh::convert_mesh_xml(&input, &output, &list, config)?;
            tracing::info!("Done!");
        }

        Commands::Info { input } => {
            if is_xml(&input) {
                print_xml_info(&input)?;
            } else {
                print_binary_info(&input)?;
            }
        }
    }

    Ok(())
}

/// `ninja.mesh.xml` -> `ninja.ogmesh`
fn default_output(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name
        .strip_suffix(".mesh.xml")
        .or_else(|| name.strip_suffix(".xml"))
        .unwrap_or(&name);
    input.with_file_name(format!("{}.{}", stem, OGRE_MESH_EXT))
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
}

fn print_xml_info(input: &Path) -> Result<()> {
    let node = mesh::import_mesh_xml(input, &MaterialList::new(), ImportConfig::default())?;
    println!("{}", node.name);
    for geometry in node.visible_children() {
        let mesh = &geometry.mesh;
        println!(
            "  {}: {} vertices, {} LOD levels, bucket {:?}",
            geometry.name,
            mesh.vertex_count(),
            mesh.lod_levels().len(),
            geometry.queue_bucket
        );
        for buffer in mesh.buffers() {
            println!(
                "    {:?}: {} x {:?}[{}]",
                buffer.kind(),
                buffer.len() / buffer.components().max(1),
                buffer.format(),
                buffer.components()
            );
        }
    }
    if let Some(control) = node.anim_control() {
        println!(
            "  skeleton: {} bones, animations: {}",
            control.skeleton.bones.len(),
            control.animation_names().join(", ")
        );
    }
    Ok(())
}

fn print_binary_info(input: &Path) -> Result<()> {
    let data = std::fs::read(input).with_context(|| format!("Failed to read {:?}", input))?;
    let Some((header, attributes)) = read_mesh_header(&data) else {
        anyhow::bail!("Not an .{} file: {:?}", OGRE_MESH_EXT, input);
    };

    println!(
        "{}: {} vertices, {} indices ({} bytes each), {} LOD levels, {}",
        input.display(),
        header.vertex_count,
        header.index_count,
        header.index_width,
        header.lod_count,
        if header.is_interleaved() {
            "interleaved"
        } else {
            "separate streams"
        }
    );
    for attribute in &attributes {
        println!(
            "  {:?}: {:?}[{}]",
            attribute.kind, attribute.format, attribute.components
        );
    }
    Ok(())
}
