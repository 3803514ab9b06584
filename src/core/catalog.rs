//! Diagram catalog: the ordered set of architectures offered by the picker.
//!
//! The built-in catalog is embedded JSON parsed once at startup. A replacement can be read
//! from disk (`--catalog <path>` or the panel's Open action).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::model::Architecture;

const BUILTIN_JSON: &str = include_str!("../../assets/architectures.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog contains no diagrams")]
    Empty,
    #[error("diagram id `{0}` appears more than once")]
    DuplicateDiagram(String),
    #[error("diagram `{diagram}` has duplicate node id `{node}`")]
    DuplicateNode { diagram: String, node: String },
}

#[derive(Serialize, Deserialize)]
struct CatalogFile {
    diagrams: Vec<Architecture>,
}

/// Immutable, ordered list of diagrams.
#[derive(Resource, Debug, Clone)]
pub struct Catalog {
    diagrams: Vec<Architecture>,
}

impl Catalog {
    /// The three authored diagrams shipped with the viewer.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.diagrams)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks id uniqueness. Dangling edges are tolerated and only logged.
    pub fn new(diagrams: Vec<Architecture>) -> Result<Self, CatalogError> {
        if diagrams.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for arch in &diagrams {
            if !seen.insert(arch.id.as_str()) {
                return Err(CatalogError::DuplicateDiagram(arch.id.clone()));
            }
            if let Some(node) = arch.duplicate_node_id() {
                return Err(CatalogError::DuplicateNode {
                    diagram: arch.id.clone(),
                    node: node.to_string(),
                });
            }
            for edge in arch.dangling_edges() {
                warn!(
                    "[CATALOG] {}: edge {} → {} references a missing node and will not be drawn",
                    arch.id, edge.from, edge.to
                );
            }
        }
        Ok(Self { diagrams })
    }

    pub fn diagrams(&self) -> &[Architecture] {
        &self.diagrams
    }

    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Architecture> {
        self.diagrams.iter().find(|d| d.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.diagrams.iter().position(|d| d.id == id)
    }

    /// Diagram `id`, or the first one when `id` is unknown.
    pub fn get_or_first(&self, id: &str) -> &Architecture {
        self.get(id).unwrap_or(&self.diagrams[0])
    }

    /// Id of the diagram after `id` in picker order, wrapping around.
    pub fn next_id(&self, id: &str) -> &str {
        let next = self.index_of(id).map_or(0, |i| (i + 1) % self.diagrams.len());
        &self.diagrams[next].id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::NodeGroup;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        let ids: Vec<_> = catalog.diagrams().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["roomie", "sweetcontrol", "nexted"]);

        let roomie = catalog.get("roomie").unwrap();
        assert_eq!(roomie.nodes.len(), 10);
        assert_eq!(roomie.edges.len(), 10);
        let core = roomie.node("core").unwrap();
        assert_eq!(core.group, NodeGroup::Core);
        assert_eq!(core.position, [0.3, 0.6, 0.0]);
        assert_eq!(
            core.details.as_ref().unwrap().tech,
            ["Node.js", "Express", "Docker"]
        );

        assert_eq!(catalog.get("sweetcontrol").unwrap().nodes.len(), 8);
        assert_eq!(catalog.get("nexted").unwrap().edges.len(), 6);
    }

    #[test]
    fn builtin_diagrams_have_no_dangling_edges() {
        let catalog = Catalog::builtin().unwrap();
        for d in catalog.diagrams() {
            assert!(d.dangling_edges().is_empty(), "{} has dangling edges", d.id);
        }
    }

    #[test]
    fn next_id_wraps() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.next_id("roomie"), "sweetcontrol");
        assert_eq!(catalog.next_id("nexted"), "roomie");
        assert_eq!(catalog.next_id("unknown"), "roomie");
    }

    #[test]
    fn get_or_first_falls_back() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.get_or_first("nexted").id, "nexted");
        assert_eq!(catalog.get_or_first("missing").id, "roomie");
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            Catalog::from_json(r#"{"diagrams":[]}"#),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let dup_diagram = r#"{"diagrams":[
            {"id":"a","title":"A","nodes":[],"edges":[]},
            {"id":"a","title":"A2","nodes":[],"edges":[]}
        ]}"#;
        assert!(matches!(
            Catalog::from_json(dup_diagram),
            Err(CatalogError::DuplicateDiagram(id)) if id == "a"
        ));

        let dup_node = r#"{"diagrams":[{"id":"a","title":"A","nodes":[
            {"id":"n","label":"N","group":"core","position":[0,0,0]},
            {"id":"n","label":"N2","group":"db","position":[1,0,0]}
        ],"edges":[]}]}"#;
        assert!(matches!(
            Catalog::from_json(dup_node),
            Err(CatalogError::DuplicateNode { node, .. }) if node == "n"
        ));
    }

    #[test]
    fn dangling_edge_is_not_an_error() {
        let json = r#"{"diagrams":[{"id":"a","title":"A","nodes":[
            {"id":"n","label":"N","group":"core","position":[0,0,0]}
        ],"edges":[{"from":"n","to":"typo"}]}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.get("a").unwrap().edges.len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
