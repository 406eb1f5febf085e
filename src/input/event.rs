//! Input event types shared by the native viewer and the web entry point.

/// A single pointer, scroll, or touch event in surface coordinates.
///
/// Positions are physical pixels with the origin at the top-left corner of
/// the surface. Only primary-button pointer interaction is represented; the
/// windowing layer filters out other buttons before translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The primary pointer button went down at the given position.
    PointerPressed {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// The pointer moved to the given position.
    PointerMoved {
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// The primary pointer button was released.
    PointerReleased,
    /// Scroll wheel movement, normalized so positive values zoom out.
    Scroll {
        /// Scroll amount in pixel-equivalent units.
        delta: f32,
    },
    /// A new touch contact appeared.
    TouchStarted {
        /// Stable identifier for this contact.
        id: u64,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// A tracked touch contact moved.
    TouchMoved {
        /// Stable identifier for this contact.
        id: u64,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// A touch contact lifted or was cancelled by the platform.
    TouchEnded {
        /// Stable identifier for this contact.
        id: u64,
    },
}

#[cfg(feature = "viewer")]
impl From<winit::event::Touch> for InputEvent {
    #[allow(clippy::cast_possible_truncation)]
    fn from(touch: winit::event::Touch) -> Self {
        let (x, y) = (touch.location.x as f32, touch.location.y as f32);
        match touch.phase {
            winit::event::TouchPhase::Started => Self::TouchStarted {
                id: touch.id,
                x,
                y,
            },
            winit::event::TouchPhase::Moved => Self::TouchMoved {
                id: touch.id,
                x,
                y,
            },
            winit::event::TouchPhase::Ended
            | winit::event::TouchPhase::Cancelled => {
                Self::TouchEnded { id: touch.id }
            }
        }
    }
}
