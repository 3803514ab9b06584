//! Edge rendering with gizmos. Strong edges are solid and thick, weak edges thin and dashed.

use bevy::prelude::*;

use super::focus::{STRONG_STROKE, WEAK_STROKE};
use crate::input::controller::ArchView;

/// Gizmo group for edges touching the focus.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct StrongEdgeGizmos;

/// Gizmo group for every other drawn edge.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct WeakEdgeGizmos;

/// Dash and gap length, in multiples of the line width.
const DASH_SCALE: f32 = 7.0;
const GAP_SCALE: f32 = 6.0;

pub fn setup_edge_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (strong, _) = config_store.config_mut::<StrongEdgeGizmos>();
    strong.line.width = STRONG_STROKE;
    strong.line.style = GizmoLineStyle::Solid;

    let (weak, _) = config_store.config_mut::<WeakEdgeGizmos>();
    weak.line.width = WEAK_STROKE;
    weak.line.style = GizmoLineStyle::Dashed {
        gap_scale: GAP_SCALE,
        line_scale: DASH_SCALE,
    };
}

/// Immediate-mode: redraws every frame from the current weights.
pub fn draw_edges_system(
    view: Res<ArchView>,
    mut strong: Gizmos<StrongEdgeGizmos>,
    mut weak: Gizmos<WeakEdgeGizmos>,
) {
    for edge in view.frame().edges {
        let color = edge.color.with_alpha(edge.opacity);
        if edge.dashed {
            weak.line(edge.start, edge.end, color);
        } else {
            strong.line(edge.start, edge.end, color);
        }
    }
}
