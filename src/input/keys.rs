//! Keyboard shortcuts: Escape clears the selection, Tab and 1–9 drive the diagram picker.

use bevy::prelude::*;

use super::controller::ViewSignal;
use crate::core::catalog::Catalog;

const DIGITS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

pub fn view_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    catalog: Res<Catalog>,
    mut signals: MessageWriter<ViewSignal>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        signals.write(ViewSignal::ClearSelection);
    }
    if keys.just_pressed(KeyCode::Tab) {
        signals.write(ViewSignal::NextDiagram);
    }
    for (i, key) in DIGITS.iter().enumerate() {
        if !keys.just_pressed(*key) {
            continue;
        }
        if let Some(arch) = catalog.diagrams().get(i) {
            signals.write(ViewSignal::SelectDiagram(arch.id.clone()));
        }
    }
}
