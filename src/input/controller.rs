//! Interaction controller: turns view signals into focus transitions, diagram switches and
//! re-fits. Owns the derived state of the active diagram.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::catalog::Catalog;
use crate::core::config::ViewerConfig;
use crate::core::model::{Architecture, Locale};
use crate::core::state::FocusState;
use crate::render::camera_fit::{fit_camera, CameraPose, FitParams, Viewport};
use crate::render::focus::{compute_weights, EdgeVisual, FocusWeights, NodeVisual};
use crate::render::layout::Layout;

/// Everything the host surface can tell the view.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum ViewSignal {
    PointerEnter(String),
    PointerLeave(String),
    Click(String),
    /// Click on empty background.
    PointerMiss,
    /// Explicit clear from the panel button or Escape.
    ClearSelection,
    SelectDiagram(String),
    NextDiagram,
    Resize { width: f32, height: f32 },
    SetLocale(Locale),
}

/// Selected node's details, localized for the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView<'a> {
    pub label: &'a str,
    pub role: &'a str,
    pub description: &'a str,
    pub tech: &'a [String],
}

/// What the renderer draws this frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub nodes: &'a [NodeVisual],
    pub edges: &'a [EdgeVisual],
    pub camera: CameraPose,
}

/// State of the diagram on screen.
#[derive(Resource, Debug)]
pub struct ArchView {
    arch: Architecture,
    layout: Layout,
    focus: FocusState,
    weights: FocusWeights,
    viewport: Viewport,
    fit: FitParams,
    layout_scale: f32,
    locale: Locale,
    pose: CameraPose,
    refit_pending: bool,
    /// Bumped on every diagram load so the scene knows to respawn.
    generation: u64,
}

impl ArchView {
    pub fn new(arch: &Architecture, config: &ViewerConfig) -> Self {
        let layout = Layout::new(arch, config.layout_scale);
        let fit = FitParams::from(config);
        let viewport = Viewport::default();
        let pose = fit_camera(layout.centroid, &layout.bounds, viewport, &fit);
        let focus = FocusState::default();
        let weights = compute_weights(&layout, &arch.edges, &focus);
        Self {
            arch: arch.clone(),
            layout,
            focus,
            weights,
            viewport,
            fit,
            layout_scale: config.layout_scale,
            locale: config.locale,
            pose,
            refit_pending: true,
            generation: 0,
        }
    }

    pub fn arch(&self) -> &Architecture {
        &self.arch
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn weights(&self) -> &FocusWeights {
        &self.weights
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            nodes: &self.weights.nodes,
            edges: &self.weights.edges,
            camera: self.pose,
        }
    }

    /// Applies one signal. Returns true when anything visible changed.
    pub fn apply(&mut self, signal: &ViewSignal, catalog: &Catalog) -> bool {
        let focus_changed = match signal {
            ViewSignal::PointerEnter(id) => self.focus.pointer_enter(id),
            ViewSignal::PointerLeave(id) => self.focus.pointer_leave(id),
            ViewSignal::Click(id) => self.focus.click(id),
            ViewSignal::PointerMiss | ViewSignal::ClearSelection => self.focus.pointer_miss(),
            ViewSignal::SelectDiagram(id) => {
                let Some(arch) = catalog.get(id) else {
                    warn!("[DIAGRAM] unknown diagram `{}`", id);
                    return false;
                };
                self.load_diagram(arch);
                return true;
            }
            ViewSignal::NextDiagram => {
                let next = catalog.get_or_first(catalog.next_id(&self.arch.id));
                self.load_diagram(next);
                return true;
            }
            ViewSignal::Resize { width, height } => {
                return self.resize(Viewport {
                    width: *width,
                    height: *height,
                });
            }
            ViewSignal::SetLocale(locale) => {
                let changed = self.locale != *locale;
                self.locale = *locale;
                return changed;
            }
        };
        if focus_changed {
            debug!("[FOCUS] {:?}", self.focus.phase());
            self.recompute_weights();
        }
        focus_changed
    }

    /// Replaces the diagram and resets hover, selection and camera framing.
    pub fn load_diagram(&mut self, arch: &Architecture) {
        self.arch = arch.clone();
        self.layout = Layout::new(arch, self.layout_scale);
        self.focus.reset();
        self.recompute_weights();
        self.refit();
        self.generation += 1;
        info!(
            "[DIAGRAM] {} ({} nodes, {} edges)",
            arch.id,
            arch.nodes.len(),
            arch.edges.len()
        );
    }

    /// Re-fits only when the size actually changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        self.refit();
        true
    }

    /// Pose to apply to the camera, once per re-fit.
    pub fn take_refit(&mut self) -> Option<CameraPose> {
        std::mem::take(&mut self.refit_pending).then_some(self.pose)
    }

    pub fn selected_details(&self) -> Option<DetailsView<'_>> {
        let node = self.arch.node(self.focus.selected()?)?;
        let details = node.details.as_ref()?;
        Some(DetailsView {
            label: &node.label,
            role: details.role.get(self.locale),
            description: details.description.get(self.locale),
            tech: &details.tech,
        })
    }

    fn recompute_weights(&mut self) {
        self.weights = compute_weights(&self.layout, &self.arch.edges, &self.focus);
    }

    fn refit(&mut self) {
        self.pose = fit_camera(self.layout.centroid, &self.layout.bounds, self.viewport, &self.fit);
        self.refit_pending = true;
    }
}

/// Drains queued signals into the view. Marks the resource changed only on real changes.
pub fn apply_view_signals_system(
    mut signals: MessageReader<ViewSignal>,
    catalog: Res<Catalog>,
    mut view: ResMut<ArchView>,
) {
    let mut changed = false;
    for signal in signals.read() {
        changed |= view.bypass_change_detection().apply(signal, &catalog);
    }
    if changed {
        view.set_changed();
    }
}

/// Reports the primary window's logical size when it differs from the view's.
pub fn viewport_sync_system(
    window_q: Query<&Window, With<PrimaryWindow>>,
    view: Res<ArchView>,
    mut signals: MessageWriter<ViewSignal>,
) {
    let Ok(window) = window_q.single() else {
        return;
    };
    let (width, height) = (window.width(), window.height());
    let current = view.viewport();
    if current.width != width || current.height != height {
        signals.write(ViewSignal::Resize { width, height });
    }
}
