//! Scene sync: camera, lights, and one emissive sphere per node of the active diagram.

use bevy::prelude::*;

use super::focus::NodeVisual;
use crate::core::components::{DiagramEntity, MainCamera, NodeSphere};
use crate::core::config::ViewerConfig;
use crate::input::controller::ArchView;
use crate::input::picking::NODE_RADIUS;

/// Shared sphere mesh for every node.
#[derive(Resource)]
pub struct SceneAssets {
    pub sphere: Handle<Mesh>,
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    config: Res<ViewerConfig>,
    view: Res<ArchView>,
) {
    let pose = view.pose();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: pose.fov_degrees.to_radians(),
            ..default()
        }),
        pose.transform(),
        DistanceFog {
            color: config.bg_color(),
            falloff: FogFalloff::Linear {
                start: 7.0,
                end: 15.0,
            },
            ..default()
        },
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 4_000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 4.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 600_000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 6.0),
    ));

    commands.insert_resource(SceneAssets {
        sphere: meshes.add(Sphere::new(NODE_RADIUS).mesh().uv(24, 24)),
    });
}

fn node_material(visual: &NodeVisual) -> StandardMaterial {
    let mut material = StandardMaterial {
        metallic: 0.2,
        perceptual_roughness: 0.35,
        alpha_mode: AlphaMode::Blend,
        ..default()
    };
    paint(&mut material, visual);
    material
}

fn paint(material: &mut StandardMaterial, visual: &NodeVisual) {
    material.base_color = visual.color.with_alpha(visual.opacity);
    material.emissive = visual.color.to_linear() * visual.emissive;
}

/// Despawns the old diagram and spawns the new one whenever the view loads a diagram.
pub fn sync_diagram_system(
    mut commands: Commands,
    view: Res<ArchView>,
    assets: Option<Res<SceneAssets>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, With<DiagramEntity>>,
    mut spawned: Local<Option<u64>>,
) {
    let Some(assets) = assets else {
        return;
    };
    if *spawned == Some(view.generation()) {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn();
    }
    for visual in view.frame().nodes {
        commands.spawn((
            Mesh3d(assets.sphere.clone()),
            MeshMaterial3d(materials.add(node_material(visual))),
            Transform::from_translation(visual.position).with_scale(Vec3::splat(visual.scale)),
            NodeSphere {
                id: visual.id.clone(),
            },
            DiagramEntity,
        ));
    }
    *spawned = Some(view.generation());
}

/// Pushes opacity, emissive and scale onto spawned spheres after a focus change.
pub fn apply_node_weights_system(
    view: Res<ArchView>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut spheres: Query<(&NodeSphere, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
) {
    if !view.is_changed() {
        return;
    }
    let nodes = view.frame().nodes;
    for (sphere, mut transform, material) in &mut spheres {
        let Some(visual) = nodes.iter().find(|n| n.id == sphere.id) else {
            continue;
        };
        transform.scale = Vec3::splat(visual.scale);
        if let Some(mut mat) = materials.get_mut(&material.0) {
            paint(&mut mat, visual);
        }
    }
}
