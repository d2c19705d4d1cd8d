//! Slide-in navigation menu state.

/// Binary open/closed state of the navigation panel.
///
/// Independent of the 3D scene; hosts apply [`NavMenu::panel_offset`] to
/// the panel's right edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    /// Panel offset when open.
    pub const OPEN_OFFSET: &'static str = "0";
    /// Panel offset when closed (off-screen).
    pub const CLOSED_OFFSET: &'static str = "-250px";

    /// Closed menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the state and return the new panel offset.
    pub fn toggle(&mut self) -> &'static str {
        self.open = !self.open;
        self.panel_offset()
    }

    /// Whether the panel is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// CSS `right` offset for the current state.
    #[must_use]
    pub fn panel_offset(&self) -> &'static str {
        if self.open {
            Self::OPEN_OFFSET
        } else {
            Self::CLOSED_OFFSET
        }
    }
}
