/// Which device produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    /// Mouse or pen.
    Mouse,
    /// First touch point of a touch gesture.
    Touch,
}

/// Platform-agnostic input events.
///
/// Hosts translate their native window or DOM events into these and feed
/// them to [`ShowcaseEngine::handle_input`](crate::ShowcaseEngine::handle_input).
/// Coordinates are in viewport pixels with the origin at the top left.
///
/// # Example
///
/// ```ignore
/// let response = engine.handle_input(
///     InputEvent::PointerMoved { x: 100.0, y: 200.0, source: PointerSource::Mouse },
///     &mut opener,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to an absolute viewport position.
    PointerMoved {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
        /// Originating device.
        source: PointerSource,
    },
    /// Primary button pressed or touch started.
    PointerDown {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
        /// Originating device.
        source: PointerSource,
    },
    /// Viewport resized.
    Resized {
        /// New width in pixels.
        width: u32,
        /// New height in pixels.
        height: u32,
    },
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    #[must_use]
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            Self::PointerMoved { x, y, .. } | Self::PointerDown { x, y, .. } => {
                Some((x, y))
            }
            Self::Resized { .. } => None,
        }
    }
}
