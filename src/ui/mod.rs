//! Immediate-mode overlays via bevy_egui.

pub mod labels;
pub mod panel;
pub mod text;
