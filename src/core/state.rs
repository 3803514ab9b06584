//! Hover / selection state machine.

/// Named view of the hover/selection pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusPhase<'a> {
    Idle,
    Hovering(&'a str),
    Selected(&'a str),
    /// Hover wins for focus; the selection is kept for when the pointer leaves.
    HoveringOverSelected { hovered: &'a str, selected: &'a str },
}

/// Hovered and selected node ids for the active diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    hovered: Option<String>,
    selected: Option<String>,
}

impl FocusState {
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Hovered id, else selected id.
    pub fn focus_id(&self) -> Option<&str> {
        self.hovered().or(self.selected())
    }

    pub fn phase(&self) -> FocusPhase<'_> {
        match (self.hovered(), self.selected()) {
            (None, None) => FocusPhase::Idle,
            (Some(h), None) => FocusPhase::Hovering(h),
            (None, Some(s)) => FocusPhase::Selected(s),
            (Some(h), Some(s)) => FocusPhase::HoveringOverSelected {
                hovered: h,
                selected: s,
            },
        }
    }

    /// Replaces any previous hover. Returns true when state changed.
    pub fn pointer_enter(&mut self, id: &str) -> bool {
        if self.hovered() == Some(id) {
            return false;
        }
        self.hovered = Some(id.to_string());
        true
    }

    /// Clears hover only if `id` is the hovered node; a stale leave is a no-op.
    pub fn pointer_leave(&mut self, id: &str) -> bool {
        if self.hovered() != Some(id) {
            return false;
        }
        self.hovered = None;
        true
    }

    /// Selects `id`. Clicking the selected node again keeps it selected.
    pub fn click(&mut self, id: &str) -> bool {
        if self.selected() == Some(id) {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Background click: drops the selection, keeps the hover.
    pub fn pointer_miss(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn reset(&mut self) {
        self.hovered = None;
        self.selected = None;
    }
}
