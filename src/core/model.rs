//! Graph model: authored architecture diagrams. Loaded once, never mutated.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// UI language for localized node details and panel text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Nl,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Nl];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Nl => "nl",
        }
    }

    /// Parses `en` / `nl` (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// One string per supported locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub nl: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Nl => &self.nl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    Client,
    Cloud,
    Core,
    Vision,
    Hardware,
    Db,
    Server,
}

/// Payload shown in the details panel when a node is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDetails {
    pub role: LocalizedText,
    pub description: LocalizedText,
    #[serde(default)]
    pub tech: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchNode {
    pub id: String,
    pub label: String,
    pub group: NodeGroup,
    /// Authored layout coordinate. Never written at runtime.
    pub position: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<NodeDetails>,
}

impl ArchNode {
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Directed edge between two node ids. Endpoints are not checked at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchEdge {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ArchEdge {
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

/// One named system diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Architecture {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<ArchNode>,
    #[serde(default)]
    pub edges: Vec<ArchEdge>,
}

impl Architecture {
    pub fn node(&self, id: &str) -> Option<&ArchNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// First node id that appears more than once, if any.
    pub fn duplicate_node_id(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        self.nodes
            .iter()
            .map(|n| n.id.as_str())
            .find(|id| !seen.insert(*id))
    }

    /// Edges with at least one endpoint that names no node. These are skipped when rendering.
    pub fn dangling_edges(&self) -> Vec<&ArchEdge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.from.as_str()) || !ids.contains(e.to.as_str()))
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn locale_from_code() {
        assert_eq!(Locale::from_code("nl"), Some(Locale::Nl));
        assert_eq!(Locale::from_code(" EN "), Some(Locale::En));
        assert_eq!(Locale::from_code("de"), None);
    }

    #[test]
    fn localized_text_picks_locale() {
        let t = LocalizedText {
            en: "Database".into(),
            nl: "Databank".into(),
        };
        assert_eq!(t.get(Locale::En), "Database");
        assert_eq!(t.get(Locale::Nl), "Databank");
    }

    #[test]
    fn node_deserializes_without_details() {
        let json = r#"{"id":"db","label":"Database","group":"db","position":[1.2,0.6,0]}"#;
        let node: ArchNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.group, NodeGroup::Db);
        assert_eq!(node.position(), Vec3::new(1.2, 0.6, 0.0));
        assert!(node.details.is_none());
    }

    #[test]
    fn unknown_group_is_rejected() {
        let json = r#"{"id":"x","label":"X","group":"mainframe","position":[0,0,0]}"#;
        assert!(serde_json::from_str::<ArchNode>(json).is_err());
    }

    #[test]
    fn dangling_edges_reported() {
        let a = arch(
            "d",
            vec![node("a", NodeGroup::Client, 0.0, 0.0), node("b", NodeGroup::Db, 1.0, 0.0)],
            vec![edge("a", "b", None), edge("a", "ghost", None), edge("nope", "b", None)],
        );
        let dangling = a.dangling_edges();
        assert_eq!(dangling.len(), 2);
        assert_eq!(dangling[0].to, "ghost");
        assert_eq!(dangling[1].from, "nope");
    }

    #[test]
    fn duplicate_node_id_found() {
        let a = arch(
            "d",
            vec![
                node("a", NodeGroup::Client, 0.0, 0.0),
                node("b", NodeGroup::Db, 1.0, 0.0),
                node("a", NodeGroup::Core, 2.0, 0.0),
            ],
            vec![],
        );
        assert_eq!(a.duplicate_node_id(), Some("a"));
        assert_eq!(arch("e", vec![], vec![]).duplicate_node_id(), None);
    }
}
