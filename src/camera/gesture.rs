//! Gesture recognition over raw input events.
//!
//! [`GestureTracker`] is a small state machine with exactly three states:
//! idle, dragging (one pointer or one finger down), and pinching (two
//! fingers down). Feeding it an [`InputEvent`] advances the state and may
//! yield a [`CameraAction`] for the controller to apply. Scroll wheel input
//! bypasses the states entirely and always zooms.

use glam::Vec2;

use crate::input::InputEvent;

/// Scale applied to pinch distance changes before they become zoom deltas.
pub const PINCH_SENSITIVITY: f32 = 0.5;

/// Camera-level action produced by a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraAction {
    /// Orbit by a screen-space drag delta, in pixels.
    Rotate {
        /// Horizontal drag since the last anchor.
        dx: f32,
        /// Vertical drag since the last anchor.
        dy: f32,
    },
    /// Change the orbit radius; positive moves the eye away from the target.
    Zoom {
        /// Unscaled zoom amount, in pixel-equivalent units.
        delta: f32,
    },
}

/// Current interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// No pointer or touch interaction in progress.
    Idle,
    /// One pointer or finger down; deltas are measured from `anchor`.
    Dragging {
        /// Last seen position, re-anchored after every move.
        anchor: Vec2,
    },
    /// Two fingers down; zoom follows the change in their separation.
    Pinching {
        /// Inter-finger distance the next move is compared against.
        baseline: f32,
    },
}

/// Tracks the active gesture and up to two touch contacts.
///
/// Touch contacts beyond the second are ignored entirely, so a stray palm
/// contact cannot corrupt an in-progress pinch.
#[derive(Debug)]
pub struct GestureTracker {
    gesture: Gesture,
    touches: Vec<(u64, Vec2)>,
}

impl GestureTracker {
    /// Tracker in the idle state with no touches.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
            touches: Vec::with_capacity(2),
        }
    }

    /// Currently recognized gesture.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    /// Drops all gesture state and tracked touches.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.touches.clear();
    }

    /// Advances the state machine and returns the action to apply, if any.
    pub fn handle(&mut self, event: InputEvent) -> Option<CameraAction> {
        match event {
            InputEvent::PointerPressed { x, y } => {
                self.gesture = Gesture::Dragging {
                    anchor: Vec2::new(x, y),
                };
                None
            }
            InputEvent::PointerMoved { x, y } => self.drag_to(Vec2::new(x, y)),
            InputEvent::PointerReleased => {
                // A release only ends a drag; an in-progress pinch is owned
                // by the touch contacts, not the pointer button.
                if matches!(self.gesture, Gesture::Dragging { .. }) {
                    self.gesture = Gesture::Idle;
                }
                None
            }
            InputEvent::Scroll { delta } => Some(CameraAction::Zoom { delta }),
            InputEvent::TouchStarted { id, x, y } => {
                self.touch_started(id, Vec2::new(x, y));
                None
            }
            InputEvent::TouchMoved { id, x, y } => self.touch_moved(id, Vec2::new(x, y)),
            InputEvent::TouchEnded { id } => {
                self.touch_ended(id);
                None
            }
        }
    }

    fn drag_to(&mut self, position: Vec2) -> Option<CameraAction> {
        let Gesture::Dragging { anchor } = self.gesture else {
            return None;
        };
        let delta = position - anchor;
        self.gesture = Gesture::Dragging { anchor: position };
        Some(CameraAction::Rotate {
            dx: delta.x,
            dy: delta.y,
        })
    }

    fn touch_started(&mut self, id: u64, position: Vec2) {
        if self.touches.len() >= 2 {
            return;
        }
        self.touches.push((id, position));
        match self.touches.as_slice() {
            [(_, anchor)] => self.gesture = Gesture::Dragging { anchor: *anchor },
            [(_, a), (_, b)] => {
                self.gesture = Gesture::Pinching {
                    baseline: a.distance(*b),
                }
            }
            _ => {}
        }
    }

    fn touch_moved(&mut self, id: u64, position: Vec2) -> Option<CameraAction> {
        let tracked = self.touches.iter_mut().find(|(tid, _)| *tid == id)?;
        tracked.1 = position;

        match self.gesture {
            Gesture::Dragging { .. } if self.touches.len() == 1 => self.drag_to(position),
            Gesture::Pinching { baseline } if self.touches.len() == 2 => {
                let distance = self.touches[0].1.distance(self.touches[1].1);
                self.gesture = Gesture::Pinching { baseline: distance };
                // Fingers moving together shrink the distance and zoom in.
                Some(CameraAction::Zoom {
                    delta: (baseline - distance) * PINCH_SENSITIVITY,
                })
            }
            _ => None,
        }
    }

    fn touch_ended(&mut self, id: u64) {
        let before = self.touches.len();
        self.touches.retain(|(tid, _)| *tid != id);
        if self.touches.len() == before {
            return;
        }
        match self.touches.as_slice() {
            [] => self.gesture = Gesture::Idle,
            [(_, anchor)] => self.gesture = Gesture::Dragging { anchor: *anchor },
            _ => {}
        }
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_then_move_rotates_and_reanchors() {
        let mut tracker = GestureTracker::new();
        assert_eq!(
            tracker.handle(InputEvent::PointerPressed { x: 100.0, y: 50.0 }),
            None
        );
        assert_eq!(
            tracker.handle(InputEvent::PointerMoved { x: 110.0, y: 45.0 }),
            Some(CameraAction::Rotate { dx: 10.0, dy: -5.0 })
        );
        // Second move is measured from the re-anchored position.
        assert_eq!(
            tracker.handle(InputEvent::PointerMoved { x: 113.0, y: 45.0 }),
            Some(CameraAction::Rotate { dx: 3.0, dy: 0.0 })
        );
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(
            tracker.handle(InputEvent::PointerMoved { x: 10.0, y: 10.0 }),
            None
        );
        assert_eq!(tracker.gesture(), Gesture::Idle);
    }

    #[test]
    fn release_ends_the_drag() {
        let mut tracker = GestureTracker::new();
        let _ = tracker.handle(InputEvent::PointerPressed { x: 0.0, y: 0.0 });
        let _ = tracker.handle(InputEvent::PointerReleased);
        assert_eq!(tracker.gesture(), Gesture::Idle);
        assert_eq!(
            tracker.handle(InputEvent::PointerMoved { x: 20.0, y: 0.0 }),
            None
        );
    }

    #[test]
    fn scroll_zooms_from_any_state() {
        let mut tracker = GestureTracker::new();
        assert_eq!(
            tracker.handle(InputEvent::Scroll { delta: 120.0 }),
            Some(CameraAction::Zoom { delta: 120.0 })
        );
        let _ = tracker.handle(InputEvent::PointerPressed { x: 0.0, y: 0.0 });
        assert_eq!(
            tracker.handle(InputEvent::Scroll { delta: -40.0 }),
            Some(CameraAction::Zoom { delta: -40.0 })
        );
        assert!(
            matches!(tracker.gesture(), Gesture::Dragging { .. }),
            "scroll must not disturb the drag"
        );
    }

    #[test]
    fn single_touch_drags_like_a_pointer() {
        let mut tracker = GestureTracker::new();
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 7,
            x: 40.0,
            y: 40.0,
        });
        assert_eq!(
            tracker.handle(InputEvent::TouchMoved {
                id: 7,
                x: 48.0,
                y: 42.0
            }),
            Some(CameraAction::Rotate { dx: 8.0, dy: 2.0 })
        );
        let _ = tracker.handle(InputEvent::TouchEnded { id: 7 });
        assert_eq!(tracker.gesture(), Gesture::Idle);
    }

    #[test]
    fn second_finger_starts_a_pinch() {
        let mut tracker = GestureTracker::new();
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 1,
            x: 0.0,
            y: 0.0,
        });
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 2,
            x: 100.0,
            y: 0.0,
        });
        assert_eq!(tracker.gesture(), Gesture::Pinching { baseline: 100.0 });
    }

    #[test]
    fn pinch_narrowing_zooms_in_with_half_scale() {
        let mut tracker = GestureTracker::new();
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 1,
            x: 0.0,
            y: 0.0,
        });
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 2,
            x: 100.0,
            y: 0.0,
        });
        // 100 -> 60 pixels of separation gives (100 - 60) * 0.5 = +20.
        assert_eq!(
            tracker.handle(InputEvent::TouchMoved {
                id: 2,
                x: 60.0,
                y: 0.0
            }),
            Some(CameraAction::Zoom { delta: 20.0 })
        );
        // The baseline follows, so holding still yields zero.
        assert_eq!(
            tracker.handle(InputEvent::TouchMoved {
                id: 2,
                x: 60.0,
                y: 0.0
            }),
            Some(CameraAction::Zoom { delta: 0.0 })
        );
    }

    #[test]
    fn lifting_one_finger_returns_to_dragging() {
        let mut tracker = GestureTracker::new();
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 1,
            x: 0.0,
            y: 0.0,
        });
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 2,
            x: 100.0,
            y: 0.0,
        });
        let _ = tracker.handle(InputEvent::TouchEnded { id: 1 });
        assert_eq!(
            tracker.gesture(),
            Gesture::Dragging {
                anchor: Vec2::new(100.0, 0.0)
            }
        );
        // The remaining finger drags from its own position.
        assert_eq!(
            tracker.handle(InputEvent::TouchMoved {
                id: 2,
                x: 104.0,
                y: 3.0
            }),
            Some(CameraAction::Rotate { dx: 4.0, dy: 3.0 })
        );
    }

    #[test]
    fn third_finger_is_ignored() {
        let mut tracker = GestureTracker::new();
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 1,
            x: 0.0,
            y: 0.0,
        });
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 2,
            x: 100.0,
            y: 0.0,
        });
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 3,
            x: 50.0,
            y: 80.0,
        });
        assert_eq!(tracker.gesture(), Gesture::Pinching { baseline: 100.0 });
        assert_eq!(
            tracker.handle(InputEvent::TouchMoved {
                id: 3,
                x: 55.0,
                y: 80.0
            }),
            None,
            "untracked contact must not produce actions"
        );
        // Ending the untracked contact must not disturb the pinch either.
        let _ = tracker.handle(InputEvent::TouchEnded { id: 3 });
        assert_eq!(tracker.gesture(), Gesture::Pinching { baseline: 100.0 });
    }

    #[test]
    fn reset_clears_everything() {
        let mut tracker = GestureTracker::new();
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 1,
            x: 0.0,
            y: 0.0,
        });
        let _ = tracker.handle(InputEvent::TouchStarted {
            id: 2,
            x: 10.0,
            y: 0.0,
        });
        tracker.reset();
        assert_eq!(tracker.gesture(), Gesture::Idle);
        assert_eq!(
            tracker.handle(InputEvent::TouchMoved {
                id: 1,
                x: 5.0,
                y: 5.0
            }),
            None
        );
    }
}
