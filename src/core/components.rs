//! ECS components for the diagram scene.

use bevy::prelude::*;

/// Marker for the perspective camera that frames the diagram.
#[derive(Component)]
pub struct MainCamera;

/// Anything spawned for the current diagram. Despawned on diagram switch.
#[derive(Component)]
pub struct DiagramEntity;

/// Sphere drawn for one node.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct NodeSphere {
    pub id: String,
}
