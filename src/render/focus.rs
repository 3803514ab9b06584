//! Focus weights: connected set plus per-node and per-edge visual weights.
//!
//! Everything here is a pure function of the layout, the edge list and the hover/selection
//! pair, so it can be tested without a window or a renderer.

use bevy::prelude::*;
use std::collections::HashSet;

use super::layout::Layout;
use crate::core::model::{ArchEdge, NodeGroup};
use crate::core::state::FocusState;

/// Opacity ceiling for nodes outside the connected set.
pub const DIMMED_NODE_OPACITY: f32 = 0.18;
/// Scale boost for the active node.
pub const ACTIVE_SCALE: f32 = 1.08;
pub const ACTIVE_EMISSIVE: f32 = 0.7;
pub const IDLE_EMISSIVE: f32 = 0.28;

pub const STRONG_STROKE: f32 = 2.2;
pub const WEAK_STROKE: f32 = 1.0;
pub const STRONG_EDGE_OPACITY: f32 = 0.9;
pub const WEAK_EDGE_OPACITY: f32 = 0.22;
pub const DIMMED_EDGE_OPACITY: f32 = 0.1;

/// Base (scale, opacity) per group.
pub fn group_style(group: NodeGroup) -> (f32, f32) {
    match group {
        NodeGroup::Client => (1.0, 0.95),
        NodeGroup::Core => (1.06, 0.95),
        _ => (1.0, 0.9),
    }
}

pub fn group_color(group: NodeGroup) -> Color {
    match group {
        NodeGroup::Client => Color::srgb_u8(0x7d, 0xd3, 0xfc),
        NodeGroup::Cloud => Color::srgb_u8(0xa7, 0x8b, 0xfa),
        NodeGroup::Core => Color::srgb_u8(0xfb, 0xbf, 0x24),
        NodeGroup::Vision => Color::srgb_u8(0x34, 0xd3, 0x99),
        NodeGroup::Hardware => Color::srgb_u8(0xfb, 0x71, 0x85),
        NodeGroup::Db => Color::srgb_u8(0x60, 0xa5, 0xfa),
        NodeGroup::Server => Color::srgb_u8(0xe5, 0xe7, 0xeb),
    }
}

/// Focus node plus every node sharing an edge with it. `None` without a focus.
pub fn connected_set<'a>(edges: &'a [ArchEdge], focus: Option<&'a str>) -> Option<HashSet<&'a str>> {
    let focus = focus?;
    let mut set = HashSet::from([focus]);
    for e in edges {
        if e.from == focus {
            set.insert(e.to.as_str());
        }
        if e.to == focus {
            set.insert(e.from.as_str());
        }
    }
    Some(set)
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub id: String,
    pub label: String,
    pub position: Vec3,
    pub color: Color,
    pub opacity: f32,
    pub scale: f32,
    pub emissive: f32,
    pub active: bool,
    pub dimmed: bool,
    pub show_label: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeVisual {
    pub from: String,
    pub to: String,
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
    pub stroke_width: f32,
    pub opacity: f32,
    pub dashed: bool,
    pub strong: bool,
    pub dimmed: bool,
    pub label: Option<String>,
    pub show_label: bool,
}

impl EdgeVisual {
    /// Where the label chip sits: segment midpoint on the diagram plane.
    pub fn label_anchor(&self) -> Vec3 {
        ((self.start + self.end) / 2.0).with_z(0.0)
    }
}

/// Visual weights for one (layout, edges, focus) triple.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FocusWeights {
    pub focus_id: Option<String>,
    pub connected: Option<HashSet<String>>,
    pub nodes: Vec<NodeVisual>,
    pub edges: Vec<EdgeVisual>,
}

pub fn compute_weights(layout: &Layout, edges: &[ArchEdge], focus: &FocusState) -> FocusWeights {
    let focus_id = focus.focus_id();
    let connected = connected_set(edges, focus_id);
    let in_set = |id: &str| connected.as_ref().is_none_or(|s| s.contains(id));

    let nodes = layout
        .nodes
        .iter()
        .map(|n| {
            let id = n.node.id.as_str();
            let (base_scale, base_opacity) = group_style(n.node.group);
            let active = focus_id == Some(id) || focus.hovered() == Some(id) || focus.selected() == Some(id);
            let dimmed = focus_id.is_some() && !in_set(id);
            let opacity = if active { 1.0 } else { base_opacity };
            NodeVisual {
                id: id.to_string(),
                label: n.node.label.clone(),
                position: n.scaled,
                color: group_color(n.node.group),
                opacity: if dimmed { opacity.min(DIMMED_NODE_OPACITY) } else { opacity },
                scale: if active { base_scale * ACTIVE_SCALE } else { base_scale },
                emissive: if active { ACTIVE_EMISSIVE } else { IDLE_EMISSIVE },
                active,
                dimmed,
                show_label: in_set(id),
            }
        })
        .collect();

    let edges = edges
        .iter()
        .filter_map(|e| {
            let a = layout.get(&e.from)?;
            let b = layout.get(&e.to)?;
            let incident = focus_id.is_some_and(|f| e.touches(f));
            let hover_touch = focus_id.is_none() && focus.hovered().is_some_and(|h| e.touches(h));
            let strong = incident || hover_touch;
            let dimmed = focus_id.is_some() && !(in_set(&e.from) && in_set(&e.to));
            let opacity = if dimmed {
                DIMMED_EDGE_OPACITY
            } else if strong {
                STRONG_EDGE_OPACITY
            } else {
                WEAK_EDGE_OPACITY
            };
            Some(EdgeVisual {
                from: e.from.clone(),
                to: e.to.clone(),
                start: a.scaled,
                end: b.scaled,
                color: group_color(a.node.group),
                stroke_width: if strong { STRONG_STROKE } else { WEAK_STROKE },
                opacity,
                dashed: !strong,
                strong,
                dimmed,
                label: e.label.clone(),
                show_label: e.label.is_some() && strong && !dimmed,
            })
        })
        .collect();

    FocusWeights {
        focus_id: focus_id.map(str::to_string),
        connected: connected.map(|s| s.into_iter().map(str::to_string).collect()),
        nodes,
        edges,
    }
}
