//! Label chips for nodes and strong edges, drawn as egui areas pinned to projected positions.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::core::components::MainCamera;
use crate::input::controller::ArchView;

/// World-space lift of a node label above its sphere.
const NODE_LABEL_LIFT: f32 = 0.44;

fn chip(ctx: &egui::Context, id: egui::Id, pos: Vec2, text: &str, alpha: u8) {
    egui::Area::new(id)
        .fixed_pos(egui::pos2(pos.x, pos.y))
        .pivot(egui::Align2::CENTER_CENTER)
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_black_alpha(alpha))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(26)))
                .corner_radius(egui::CornerRadius::same(8))
                .inner_margin(egui::Margin::symmetric(8, 4))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(text).size(11.0).color(egui::Color32::WHITE));
                });
        });
}

pub fn labels_ui_system(
    mut contexts: EguiContexts,
    view: Res<ArchView>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.single() else {
        return;
    };
    let frame = view.frame();

    for edge in frame.edges.iter().filter(|e| e.show_label) {
        let Some(text) = edge.label.as_deref() else {
            continue;
        };
        let Ok(pos) = camera.world_to_viewport(cam_transform, edge.label_anchor()) else {
            continue;
        };
        chip(ctx, egui::Id::new(("edge", &edge.from, &edge.to)), pos, text, 179);
    }

    for node in frame.nodes.iter().filter(|n| n.show_label) {
        let anchor = node.position + Vec3::Y * NODE_LABEL_LIFT;
        let Ok(pos) = camera.world_to_viewport(cam_transform, anchor) else {
            continue;
        };
        chip(ctx, egui::Id::new(("node", &node.id)), pos, &node.label, 153);
    }
}
