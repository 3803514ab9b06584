//! Pointer picking: cursor ray vs node spheres, turned into enter/leave/click/miss signals.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::controller::{ArchView, ViewSignal};
use crate::core::components::MainCamera;
use crate::render::focus::NodeVisual;

/// Radius of a node sphere at scale 1.0 (world units).
pub const NODE_RADIUS: f32 = 0.15;
/// Pointer travel (logical px) between press and release at which a click becomes a drag.
const CLICK_SLOP: f32 = 4.0;

/// Which node the pointer is over, and where the left button went down.
#[derive(Resource, Default)]
pub struct PointerState {
    pub over: Option<String>,
    pub press_pos: Option<Vec2>,
}

/// Distance along the ray to the first hit with the sphere, if any.
/// `dir` must be normalized.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sqrt = disc.sqrt();
    let t = if -b - sqrt >= 0.0 { -b - sqrt } else { -b + sqrt };
    (t >= 0.0).then_some(t)
}

/// Nearest node hit by the ray.
pub fn pick_node<'a>(origin: Vec3, dir: Vec3, nodes: &'a [NodeVisual]) -> Option<&'a str> {
    nodes
        .iter()
        .filter_map(|n| ray_sphere(origin, dir, n.position, NODE_RADIUS * n.scale).map(|t| (t, n)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, n)| n.id.as_str())
}

/// Signals for a change of the node under the cursor: leave(old) first, then enter(new).
/// Empty when nothing changed.
pub fn hover_signals(over: Option<&str>, hit: Option<&str>) -> Vec<ViewSignal> {
    if over == hit {
        return Vec::new();
    }
    over.map(|old| ViewSignal::PointerLeave(old.to_string()))
        .into_iter()
        .chain(hit.map(|new| ViewSignal::PointerEnter(new.to_string())))
        .collect()
}

/// Press and release closer together than the slop.
pub fn is_click(press: Vec2, release: Vec2) -> bool {
    press.distance(release) < CLICK_SLOP
}

/// Forgets the hovered node and any pending press when a new diagram is loaded,
/// so the first hover in the new diagram always emits an enter.
pub fn pointer_reset_system(
    view: Res<ArchView>,
    mut seen: Local<Option<u64>>,
    mut pointer: ResMut<PointerState>,
) {
    let generation = view.generation();
    match *seen {
        Some(prev) if prev != generation => {
            pointer.over = None;
            pointer.press_pos = None;
        }
        _ => {}
    }
    *seen = Some(generation);
}

/// Emits leave(old) then enter(new) whenever the node under the cursor changes.
pub fn pointer_hover_system(
    window_q: Query<&Window, With<PrimaryWindow>>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    view: Res<ArchView>,
    mut pointer: ResMut<PointerState>,
    mut signals: MessageWriter<ViewSignal>,
) {
    let Ok(window) = window_q.single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.single() else {
        return;
    };
    let hit = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world(cam_transform, cursor).ok())
        .and_then(|ray| pick_node(ray.origin, *ray.direction, &view.weights().nodes))
        .map(str::to_string);

    for signal in hover_signals(pointer.over.as_deref(), hit.as_deref()) {
        signals.write(signal);
    }
    pointer.over = hit;
}

/// Runs while egui owns the pointer: the node under a panel is no longer hovered.
pub fn pointer_blocked_system(
    mut pointer: ResMut<PointerState>,
    mut signals: MessageWriter<ViewSignal>,
) {
    if let Some(old) = pointer.over.take() {
        signals.write(ViewSignal::PointerLeave(old));
    }
}

/// Press + release without dragging: click on the hovered node, or a miss on background.
pub fn pointer_click_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
    mut signals: MessageWriter<ViewSignal>,
) {
    let Ok(window) = window_q.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if mouse_buttons.just_pressed(MouseButton::Left) {
        pointer.press_pos = cursor;
    }
    if !mouse_buttons.just_released(MouseButton::Left) {
        return;
    }
    let Some(start) = pointer.press_pos.take() else {
        return;
    };
    let Some(end) = cursor else {
        return;
    };
    if !is_click(start, end) {
        return;
    }
    match &pointer.over {
        Some(id) => signals.write(ViewSignal::Click(id.clone())),
        None => signals.write(ViewSignal::PointerMiss),
    };
}
