//! Import entry points

use crate::assets::{AssetKey, AssetResolver};
use crate::builder::MeshBuilder;
use crate::config::ImportConfig;
use crate::document::MeshDocument;
use crate::error::{ImportError, ParseError};
use crate::events::{XmlEvent, dispatch};
use crate::scene::Node;

/// Imports Ogre3D `mesh.xml` documents into scene nodes
///
/// Each load runs on a fresh [`MeshBuilder`]; the loader itself only keeps
/// the import options and the counter naming anonymous nodes.
#[derive(Debug, Clone, Default)]
pub struct MeshLoader {
    config: ImportConfig,
    node_index: usize,
}

impl MeshLoader {
    pub fn new(config: ImportConfig) -> Self {
        Self {
            config,
            node_index: 0,
        }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Build a document from pre-tokenized events without compiling it
    pub fn parse_events<I>(
        &self,
        key: &AssetKey,
        events: I,
        assets: &dyn AssetResolver,
    ) -> Result<MeshDocument, ImportError>
    where
        I: IntoIterator<Item = XmlEvent>,
    {
        let mut builder = self.builder(key, assets);
        dispatch(&mut builder, events).map_err(|source| parse_error(key, source))?;
        Ok(builder.finish())
    }

    /// Import from pre-tokenized events
    pub fn load_events<I>(
        &mut self,
        key: &AssetKey,
        events: I,
        assets: &dyn AssetResolver,
    ) -> Result<Node, ImportError>
    where
        I: IntoIterator<Item = XmlEvent>,
    {
        let document = self.parse_events(key, events, assets)?;
        Ok(self.compile(document))
    }

    /// Build a document from XML text without compiling it
    #[cfg(feature = "xml")]
    pub fn parse_reader<R: std::io::BufRead>(
        &self,
        key: &AssetKey,
        source: R,
        assets: &dyn AssetResolver,
    ) -> Result<MeshDocument, ImportError> {
        tracing::debug!("Parsing {}", key.name());
        let mut builder = self.builder(key, assets);
        crate::xml::parse_reader(source, &mut builder).map_err(|source| parse_error(key, source))?;
        Ok(builder.finish())
    }

    #[cfg(feature = "xml")]
    pub fn load_reader<R: std::io::BufRead>(
        &mut self,
        key: &AssetKey,
        source: R,
        assets: &dyn AssetResolver,
    ) -> Result<Node, ImportError> {
        let document = self.parse_reader(key, source, assets)?;
        Ok(self.compile(document))
    }

    #[cfg(feature = "xml")]
    pub fn load_str(
        &mut self,
        key: &AssetKey,
        xml: &str,
        assets: &dyn AssetResolver,
    ) -> Result<Node, ImportError> {
        self.load_reader(key, xml.as_bytes(), assets)
    }

    /// Import a file; the path doubles as the asset key
    #[cfg(feature = "xml")]
    pub fn load_file(
        &mut self,
        path: &std::path::Path,
        assets: &dyn AssetResolver,
    ) -> Result<Node, ImportError> {
        let key = AssetKey::new(path.to_string_lossy());
        let file = std::fs::File::open(path).map_err(|source| ImportError::Io {
            key: key.name().to_string(),
            source,
        })?;
        self.load_reader(&key, std::io::BufReader::new(file), assets)
    }

    /// Compile a parsed document into a node named after its mesh
    pub fn compile(&mut self, document: MeshDocument) -> Node {
        let name = match document.mesh_name() {
            Some(name) => format!("{name}-ogremesh"),
            None => {
                self.node_index += 1;
                format!("OgreMesh{}", self.node_index)
            }
        };
        let node = crate::compile::compile(document, name);
        tracing::debug!("Compiled {} ({} geometries)", node.name, node.children().len());
        node
    }

    fn builder<'a>(&self, key: &AssetKey, assets: &'a dyn AssetResolver) -> MeshBuilder<'a> {
        MeshBuilder::new(assets)
            .with_config(self.config)
            .with_key(key)
    }
}

fn parse_error(key: &AssetKey, source: ParseError) -> ImportError {
    ImportError::Parse {
        key: key.name().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialList;
    use crate::attributes::Attributes;

    #[test]
    fn anonymous_documents_get_numbered_nodes() {
        let mut loader = MeshLoader::default();
        let first = loader.compile(MeshDocument::new(None));
        let second = loader.compile(MeshDocument::new(None));
        assert_eq!(first.name, "OgreMesh1");
        assert_eq!(second.name, "OgreMesh2");

        let named = loader.compile(MeshDocument::new(Some("Ninja.mesh".into())));
        assert_eq!(named.name, "Ninja.mesh-ogremesh");
    }

    #[test]
    fn parse_errors_carry_the_asset_key() {
        let mut loader = MeshLoader::default();
        let events = vec![
            XmlEvent::start(Attributes::new("mesh")),
            XmlEvent::start(Attributes::new("submeshes")),
            XmlEvent::start(Attributes::new("submesh")),
        ];
        let err = loader
            .load_events(&AssetKey::new("Models/a.mesh.xml"), events, &MaterialList::new())
            .unwrap_err();
        match err {
            ImportError::Parse { key, source } => {
                assert_eq!(key, "Models/a.mesh.xml");
                assert!(matches!(source, ParseError::MissingAttribute { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
