//! Header bar (title, hint, picker, clear) and the details side panel.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use std::path::PathBuf;
use std::sync::mpsc;

use super::text::tr;
use crate::core::catalog::Catalog;
use crate::core::model::Locale;
use crate::input::controller::{ArchView, ViewSignal};

/// Result of the native "Open catalog" dialog, delivered from a helper thread.
/// Wrapped in Mutex because Receiver is Send but not Sync.
#[derive(Resource, Default)]
pub struct PendingCatalogDialog(pub std::sync::Mutex<Option<mpsc::Receiver<PathBuf>>>);

fn open_catalog_dialog(pending: &PendingCatalogDialog) {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("diagram catalog", &["json"])
            .pick_file()
        {
            let _ = tx.send(path);
        }
    });
    if let Ok(mut slot) = pending.0.lock() {
        *slot = Some(rx);
    }
}

pub fn header_ui_system(
    mut contexts: EguiContexts,
    view: Res<ArchView>,
    catalog: Res<Catalog>,
    pending: Res<PendingCatalogDialog>,
    mut signals: MessageWriter<ViewSignal>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let locale = view.locale();

    egui::TopBottomPanel::top("arch_header")
        .default_height(48.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(tr(locale, "heading"));
                ui.separator();

                egui::ComboBox::from_id_salt("diagram_picker")
                    .selected_text(view.arch().title.as_str())
                    .show_ui(ui, |ui| {
                        for arch in catalog.diagrams() {
                            let current = arch.id == view.arch().id;
                            if ui.selectable_label(current, arch.title.as_str()).clicked() && !current {
                                signals.write(ViewSignal::SelectDiagram(arch.id.clone()));
                            }
                        }
                    });

                for option in Locale::ALL {
                    let label = option.code().to_uppercase();
                    if ui.selectable_label(option == locale, label).clicked() && option != locale {
                        signals.write(ViewSignal::SetLocale(option));
                    }
                }

                if ui.button(tr(locale, "open")).clicked() {
                    open_catalog_dialog(&pending);
                }

                if view.focus().selected().is_some() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button(tr(locale, "clear")).clicked() {
                            signals.write(ViewSignal::ClearSelection);
                        }
                    });
                }
            });
            ui.label(
                egui::RichText::new(tr(locale, "hint"))
                    .small()
                    .color(egui::Color32::GRAY),
            );
        });
}

/// Shown only while a node with details is selected.
pub fn details_ui_system(mut contexts: EguiContexts, view: Res<ArchView>) {
    let Some(details) = view.selected_details() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("node_details")
        .resizable(false)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(details.label).strong().color(egui::Color32::WHITE));
            ui.label(
                egui::RichText::new(details.role)
                    .small()
                    .color(egui::Color32::GRAY),
            );
            ui.add_space(8.0);
            ui.label(details.description);
            ui.add_space(8.0);
            ui.label(egui::RichText::new(tr(view.locale(), "tech")).small());
            ui.horizontal_wrapped(|ui| {
                for tech in details.tech {
                    egui::Frame::new()
                        .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(26)))
                        .corner_radius(egui::CornerRadius::same(12))
                        .inner_margin(egui::Margin::symmetric(10, 3))
                        .show(ui, |ui| {
                            ui.label(egui::RichText::new(tech).small());
                        });
                }
            });
        });
}

/// Loads a picked catalog file and swaps it in. Keeps the current diagram id if the new
/// catalog has it, else shows its first diagram.
pub fn process_pending_catalog_system(
    pending: Res<PendingCatalogDialog>,
    mut commands: Commands,
    mut view: ResMut<ArchView>,
) {
    let Ok(mut guard) = pending.0.try_lock() else {
        return;
    };
    let Some(rx) = guard.as_ref() else {
        return;
    };
    let path = match rx.try_recv() {
        Ok(path) => path,
        Err(mpsc::TryRecvError::Empty) => return,
        Err(mpsc::TryRecvError::Disconnected) => {
            *guard = None;
            return;
        }
    };
    *guard = None;

    match Catalog::load(&path) {
        Ok(catalog) => {
            info!("[CATALOG] Loaded {} diagrams from {}", catalog.len(), path.display());
            let current = view.arch().id.clone();
            view.load_diagram(catalog.get_or_first(&current));
            commands.insert_resource(catalog);
        }
        Err(e) => error!("[CATALOG] {}", e),
    }
}
