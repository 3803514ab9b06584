//! Camera placement: applies auto-fit poses, then an orbit/zoom layer on top.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use super::controller::ArchView;
use crate::core::components::MainCamera;
use crate::core::config::ViewerConfig;
use crate::render::camera_fit::CameraPose;

/// Radians of orbit per pixel of drag at `orbit_speed == 1.0`.
const ORBIT_RAD_PER_PX: f32 = 0.005;
/// Keeps the camera from flipping over the poles.
const MAX_PITCH: f32 = 1.45;

/// User rotation / zoom relative to the fitted pose. Reset on every re-fit.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    /// Overrides the fitted distance when zoom is enabled.
    pub distance: Option<f32>,
}

/// Camera transform after rotating `pose` around its look-at point.
pub fn orbit_transform(pose: &CameraPose, orbit: &OrbitState) -> Transform {
    let distance = orbit.distance.unwrap_or_else(|| pose.distance());
    let rotation = Quat::from_euler(EulerRot::YXZ, orbit.yaw, -orbit.pitch, 0.0);
    let position = pose.look_at + rotation * Vec3::new(0.0, 0.0, distance);
    Transform::from_translation(position).looking_at(pose.look_at, Vec3::Y)
}

/// Applies a pending auto-fit pose. Runs after signals are drained, so hover/selection never
/// reach here; only diagram switches and resizes set a pending pose.
pub fn camera_fit_system(
    mut view: ResMut<ArchView>,
    mut orbit: ResMut<OrbitState>,
    mut camera_q: Query<(&mut Transform, &mut Projection), With<MainCamera>>,
) {
    let Ok((mut transform, mut projection)) = camera_q.single_mut() else {
        return;
    };
    let Some(pose) = view.bypass_change_detection().take_refit() else {
        return;
    };
    *orbit = OrbitState::default();
    *transform = pose.transform();
    if let Projection::Perspective(persp) = projection.as_mut() {
        persp.fov = pose.fov_degrees.to_radians();
    }
    info!("[CAMERA] fit at z = {:.2} looking at {:?}", pose.position.z, pose.look_at);
}

/// Right-drag orbits around the diagram centroid.
pub fn camera_orbit_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    config: Res<ViewerConfig>,
    view: Res<ArchView>,
    mut orbit: ResMut<OrbitState>,
    mut camera_q: Query<&mut Transform, With<MainCamera>>,
) {
    if !mouse_buttons.pressed(MouseButton::Right) {
        for _ in mouse_motion.read() {}
        return;
    }
    let delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }
    let step = ORBIT_RAD_PER_PX * config.orbit_speed;
    orbit.yaw -= delta.x * step;
    orbit.pitch = (orbit.pitch + delta.y * step).clamp(-MAX_PITCH, MAX_PITCH);

    let Ok(mut transform) = camera_q.single_mut() else {
        return;
    };
    *transform = orbit_transform(&view.pose(), &orbit);
}

/// Scroll-wheel dolly, limited to the auto-fit distance range. Off unless `zoom_enabled`.
pub fn camera_zoom_system(
    mut mouse_wheel: MessageReader<MouseWheel>,
    config: Res<ViewerConfig>,
    view: Res<ArchView>,
    mut orbit: ResMut<OrbitState>,
    mut camera_q: Query<&mut Transform, With<MainCamera>>,
) {
    if !config.zoom_enabled {
        for _ in mouse_wheel.read() {}
        return;
    }
    let pose = view.pose();
    let mut distance = orbit.distance.unwrap_or_else(|| pose.distance());
    let mut moved = false;
    for event in mouse_wheel.read() {
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y * 0.10,
            MouseScrollUnit::Pixel => event.y * 0.001,
        };
        distance = (distance * (1.0 - delta)).clamp(config.min_distance, config.max_distance);
        moved = true;
    }
    if !moved {
        return;
    }
    orbit.distance = Some(distance);
    let Ok(mut transform) = camera_q.single_mut() else {
        return;
    };
    *transform = orbit_transform(&pose, &orbit);
}
