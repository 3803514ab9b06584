//! archscope: interactive 3D system-architecture diagrams. Library for testing and reuse.

pub mod core;
pub mod input;
pub mod render;
pub mod ui;

use bevy::prelude::*;
use bevy_egui::input::{egui_wants_any_keyboard_input, egui_wants_any_pointer_input};
use bevy_egui::EguiPlugin;

use core::catalog::{Catalog, CatalogError};
use core::config::ViewerConfig;

use input::camera::{camera_fit_system, camera_orbit_system, camera_zoom_system, OrbitState};
use input::controller::{apply_view_signals_system, viewport_sync_system, ArchView, ViewSignal};
use input::keys::view_keys_system;
use input::picking::{
    pointer_blocked_system, pointer_click_system, pointer_hover_system, pointer_reset_system,
    PointerState,
};

use render::edges::{draw_edges_system, setup_edge_gizmos, StrongEdgeGizmos, WeakEdgeGizmos};
use render::scene::{apply_node_weights_system, setup_scene, sync_diagram_system};

use ui::labels::labels_ui_system;
use ui::panel::{
    details_ui_system, header_ui_system, process_pending_catalog_system, PendingCatalogDialog,
};

/// Per-frame order: collect signals, apply them, then update the scene.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewSet {
    Input,
    Apply,
    Scene,
}

/// Signal handling and camera auto-fit. Needs no window, renderer or egui, so it also runs
/// under `MinimalPlugins`. Expects `Catalog` and `ArchView` resources.
pub struct ArchViewPlugin;

impl Plugin for ArchViewPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ViewSignal>()
            .init_resource::<OrbitState>()
            .configure_sets(
                Update,
                (ViewSet::Input, ViewSet::Apply, ViewSet::Scene).chain(),
            )
            .add_systems(Update, apply_view_signals_system.in_set(ViewSet::Apply))
            .add_systems(Update, camera_fit_system.in_set(ViewSet::Scene));
    }
}

/// Catalog from `config.catalog_path`, falling back to the built-in one if that fails.
pub fn load_catalog(config: &ViewerConfig) -> Result<Catalog, CatalogError> {
    if let Some(path) = &config.catalog_path {
        match Catalog::load(path) {
            Ok(catalog) => return Ok(catalog),
            Err(e) => eprintln!("{}; using built-in diagrams", e),
        }
    }
    Catalog::builtin()
}

/// Build and run the viewer.
pub fn run() -> Result<(), CatalogError> {
    let mut config = core::config::load_config();
    config.apply_args(std::env::args().skip(1));
    let catalog = load_catalog(&config)?;
    let view = ArchView::new(catalog.get_or_first(&config.default_diagram), &config);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "archscope".to_string(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(config.bg_color()))
        .insert_resource(config)
        .insert_resource(catalog)
        .insert_resource(view)
        .add_plugins(EguiPlugin::default())
        .add_plugins(ArchViewPlugin)
        .init_resource::<PointerState>()
        .init_resource::<PendingCatalogDialog>()
        .init_gizmo_group::<StrongEdgeGizmos>()
        .init_gizmo_group::<WeakEdgeGizmos>()
        .add_systems(Startup, (setup_scene, setup_edge_gizmos))
        .add_systems(
            Update,
            (
                viewport_sync_system,
                (
                    pointer_reset_system,
                    pointer_hover_system.run_if(not(egui_wants_any_pointer_input)),
                    pointer_blocked_system.run_if(egui_wants_any_pointer_input),
                    pointer_click_system.run_if(not(egui_wants_any_pointer_input)),
                )
                    .chain()
                    .after(process_pending_catalog_system),
                view_keys_system.run_if(not(egui_wants_any_keyboard_input)),
                process_pending_catalog_system,
            )
                .in_set(ViewSet::Input),
        )
        .add_systems(
            Update,
            (
                (sync_diagram_system, apply_node_weights_system).chain(),
                draw_edges_system,
                (camera_orbit_system, camera_zoom_system).after(camera_fit_system),
            )
                .in_set(ViewSet::Scene),
        )
        .add_systems(
            bevy_egui::EguiPrimaryContextPass,
            (labels_ui_system, header_ui_system, details_ui_system),
        )
        .run();
    Ok(())
}
