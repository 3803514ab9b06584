//! Layout normalization: scales authored positions and derives centroid and padded bounds.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::core::model::{ArchNode, Architecture};

/// Default multiplier applied to authored coordinates.
pub const LAYOUT_SCALE: f32 = 1.25;
/// Padding left, right and below the outermost nodes.
pub const BOUNDS_PAD: f32 = 0.8;
/// Padding above the topmost node; leaves room for label chips.
pub const BOUNDS_PAD_TOP: f32 = 1.2;

/// Axis-aligned box in the diagram plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds {
    /// `[-1, 1]²`, used when a diagram has no nodes.
    pub const UNIT: Bounds = Bounds {
        min_x: -1.0,
        max_x: 1.0,
        min_y: -1.0,
        max_y: 1.0,
    };

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaledNode {
    pub node: ArchNode,
    pub scaled: Vec3,
}

/// Scaled nodes plus the framing data derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub nodes: Vec<ScaledNode>,
    pub centroid: Vec3,
    pub bounds: Bounds,
    index: HashMap<String, usize>,
}

impl Layout {
    /// Pure function of the diagram and scale.
    pub fn new(arch: &Architecture, scale: f32) -> Self {
        let nodes: Vec<ScaledNode> = arch
            .nodes
            .iter()
            .map(|n| ScaledNode {
                node: n.clone(),
                scaled: n.position() * scale,
            })
            .collect();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.node.id.clone(), i))
            .collect();
        let centroid = centroid(&nodes);
        let bounds = padded_bounds(&nodes);
        Self {
            nodes,
            centroid,
            bounds,
            index,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ScaledNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }
}

/// Mean of scaled x and y; z is pinned to the diagram plane.
fn centroid(nodes: &[ScaledNode]) -> Vec3 {
    if nodes.is_empty() {
        return Vec3::ZERO;
    }
    let sum: Vec2 = nodes.iter().map(|n| n.scaled.truncate()).sum();
    (sum / nodes.len() as f32).extend(0.0)
}

fn padded_bounds(nodes: &[ScaledNode]) -> Bounds {
    if nodes.is_empty() {
        return Bounds::UNIT;
    }
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for n in nodes {
        min_x = min_x.min(n.scaled.x);
        max_x = max_x.max(n.scaled.x);
        min_y = min_y.min(n.scaled.y);
        max_y = max_y.max(n.scaled.y);
    }
    Bounds {
        min_x: min_x - BOUNDS_PAD,
        max_x: max_x + BOUNDS_PAD,
        min_y: min_y - BOUNDS_PAD,
        max_y: max_y + BOUNDS_PAD_TOP,
    }
}
