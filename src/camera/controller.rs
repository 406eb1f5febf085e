//! Orbit controller: applies gestures to the pose and emits the uniform.

use glam::Vec4;

use crate::camera::core::{CameraUniform, Orbit, PITCH_LIMIT};
use crate::camera::gesture::{CameraAction, Gesture, GestureTracker};
use crate::input::InputEvent;
use crate::options::CameraOptions;

/// Radians of orbit per pixel of drag.
pub const ROTATE_SENSITIVITY: f32 = 0.005;

/// World units of radius change per unit of scroll delta.
pub const ZOOM_SENSITIVITY: f32 = 0.05;

/// Receives the recomputed uniform block after every camera change.
///
/// The borrow is only valid for the duration of the call; the same block is
/// rewritten in place on the next change, so a sink that needs to retain any
/// bytes must copy them out.
pub type UniformSink = Box<dyn FnMut(&CameraUniform)>;

/// Owns the orbit pose, the gesture tracker, and the uniform block.
///
/// Every state change (construction included) recomputes the affected half
/// of the uniform block and pushes the whole block through the sink exactly
/// once. Aspect ratio is treated as a trusted positive input; the surface
/// layer guards against zero-sized viewports before calling in.
pub struct OrbitController {
    orbit: Orbit,
    min_radius: f32,
    max_radius: f32,
    drag_sign: f32,
    uniform: CameraUniform,
    sink: UniformSink,
    gestures: GestureTracker,
    disposed: bool,
}

impl OrbitController {
    /// Builds a controller from options, derives the initial spherical pose
    /// from the configured position and target, and emits the first uniform
    /// block through `sink` before returning.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32, sink: UniformSink) -> Self {
        let orbit = Orbit::from_pose(options.position_point(), options.target_point());
        let mut controller = Self {
            orbit,
            min_radius: options.min_radius,
            max_radius: options.max_radius,
            drag_sign: if options.invert_drag { -1.0 } else { 1.0 },
            uniform: CameraUniform::new(),
            sink,
            gestures: GestureTracker::new(),
            disposed: false,
        };
        controller.uniform.update_pose(&controller.orbit);
        controller.uniform.update_projection(aspect);
        controller.emit();
        controller
    }

    /// Jumps the camera to a new framing, re-deriving radius, yaw, and pitch
    /// from the two absolute points exactly as construction does.
    pub fn retarget(&mut self, position: Vec4, target: Vec4) {
        self.orbit = Orbit::from_pose(position, target);
        self.uniform.update_pose(&self.orbit);
        self.emit();
    }

    /// Orbits by a screen-space drag delta in pixels.
    ///
    /// Yaw is unbounded; pitch clamps to +-[`PITCH_LIMIT`] so the pose never
    /// reaches the poles. The projection half of the uniform is untouched.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.orbit.yaw -= dx * ROTATE_SENSITIVITY * self.drag_sign;
        self.orbit.pitch = (self.orbit.pitch + dy * ROTATE_SENSITIVITY * self.drag_sign)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.uniform.update_pose(&self.orbit);
        self.emit();
    }

    /// Moves the eye along the view ray; positive deltas zoom out.
    ///
    /// The radius stays within the configured `[min, max]` range inclusive.
    pub fn zoom(&mut self, delta: f32) {
        self.orbit.radius =
            (self.orbit.radius + delta * ZOOM_SENSITIVITY).clamp(self.min_radius, self.max_radius);
        self.uniform.update_pose(&self.orbit);
        self.emit();
    }

    /// Reacts to a viewport aspect change.
    ///
    /// Only the projection and inverse-projection fields of the emitted
    /// block change; the pose fields stay bit-identical.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.uniform.update_projection(aspect);
        self.emit();
    }

    /// Feeds one input event through the gesture tracker and applies the
    /// resulting action, if any. Returns `false` once disposed, without
    /// touching any state.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if self.disposed {
            return false;
        }
        match self.gestures.handle(event) {
            Some(CameraAction::Rotate { dx, dy }) => self.rotate(dx, dy),
            Some(CameraAction::Zoom { delta }) => self.zoom(delta),
            None => {}
        }
        true
    }

    /// Detaches the controller from input.
    ///
    /// Idempotent. Later [`Self::handle_event`] calls are ignored, while
    /// direct method calls (`rotate`, `zoom`, `retarget`, `set_aspect`)
    /// remain legal and keep emitting.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.gestures.reset();
    }

    /// Whether [`Self::dispose`] has been called.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current distance from the eye to the target.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.orbit.radius
    }

    /// Current azimuth in radians.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.orbit.yaw
    }

    /// Current elevation in radians.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.orbit.pitch
    }

    /// Current look-at target, w = 1.
    #[must_use]
    pub fn target(&self) -> Vec4 {
        self.orbit.target
    }

    /// Current eye position derived from the spherical pose, w = 1.
    #[must_use]
    pub fn position(&self) -> Vec4 {
        self.orbit.position()
    }

    /// Gesture the tracker currently recognizes.
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gestures.gesture()
    }

    /// Last uniform block handed to the sink.
    #[must_use]
    pub fn uniform(&self) -> &CameraUniform {
        &self.uniform
    }

    fn emit(&mut self) {
        (self.sink)(&self.uniform);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn scenario_options() -> CameraOptions {
        CameraOptions {
            position: [-10.0, 4.0, -8.0],
            target: [0.0, 1.0, 0.0],
            min_radius: 8.0,
            max_radius: 40.0,
            invert_drag: false,
        }
    }

    fn recording_sink() -> (Rc<RefCell<Vec<CameraUniform>>>, UniformSink) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let writer = Rc::clone(&log);
        let sink: UniformSink = Box::new(move |uniform: &CameraUniform| {
            writer.borrow_mut().push(*uniform);
        });
        (log, sink)
    }

    fn null_sink() -> UniformSink {
        Box::new(|_| {})
    }

    #[test]
    fn construction_emits_exactly_once() {
        let (log, sink) = recording_sink();
        let controller = OrbitController::new(&scenario_options(), 16.0 / 9.0, sink);
        assert_eq!(log.borrow().len(), 1);
        assert!(
            (controller.radius() - 173.0_f32.sqrt()).abs() < 1e-4,
            "radius {}",
            controller.radius()
        );
    }

    #[test]
    fn zoom_clamps_to_both_limits() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        assert!((controller.radius() - 13.1529).abs() < 1e-3);

        controller.zoom(1000.0);
        assert_eq!(controller.radius(), 40.0, "huge zoom-out must hit max");

        controller.zoom(-10000.0);
        assert_eq!(controller.radius(), 8.0, "huge zoom-in must hit min");
    }

    #[test]
    fn radius_stays_in_range_across_any_zoom_sequence() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        for delta in [5.0, -300.0, 9999.0, -0.25, -9999.0, 42.0] {
            controller.zoom(delta);
            assert!(
                (8.0..=40.0).contains(&controller.radius()),
                "radius {} escaped after zoom({delta})",
                controller.radius()
            );
        }
    }

    #[test]
    fn pitch_never_reaches_the_poles() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        for _ in 0..100 {
            controller.rotate(35.0, 400.0);
            assert!(
                controller.pitch().abs() < std::f32::consts::FRAC_PI_2,
                "pitch {} reached a pole",
                controller.pitch()
            );
        }
        assert_eq!(controller.pitch(), PITCH_LIMIT);

        for _ in 0..100 {
            controller.rotate(0.0, -400.0);
        }
        assert_eq!(controller.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn rotate_applies_sensitivity_and_sign() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        let yaw = controller.yaw();
        let pitch = controller.pitch();

        controller.rotate(10.0, 6.0);
        assert!(
            (controller.yaw() - (yaw - 10.0 * ROTATE_SENSITIVITY)).abs() < 1e-6,
            "yaw {}",
            controller.yaw()
        );
        assert!(
            (controller.pitch() - (pitch + 6.0 * ROTATE_SENSITIVITY)).abs() < 1e-6,
            "pitch {}",
            controller.pitch()
        );
    }

    #[test]
    fn invert_flag_flips_the_drag_direction() {
        let mut options = scenario_options();
        options.invert_drag = true;
        let mut controller = OrbitController::new(&options, 1.0, null_sink());
        let yaw = controller.yaw();

        controller.rotate(10.0, 0.0);
        assert!(
            (controller.yaw() - (yaw + 10.0 * ROTATE_SENSITIVITY)).abs() < 1e-6,
            "yaw {}",
            controller.yaw()
        );
    }

    #[test]
    fn retarget_re_derives_like_construction() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        let position = Vec4::new(0.0, 6.0, 12.0, 1.0);
        let target = Vec4::new(0.0, 2.0, 0.0, 1.0);

        controller.retarget(position, target);
        assert!(
            (controller.radius() - 32.0_f32.sqrt()).abs() < 1e-4,
            "radius {}",
            controller.radius()
        );
        assert_eq!(controller.target(), target);
        assert!(
            (controller.position() - position).length() < 1e-4,
            "position {:?}",
            controller.position()
        );
    }

    #[test]
    fn every_operation_emits_exactly_once() {
        let (log, sink) = recording_sink();
        let mut controller = OrbitController::new(&scenario_options(), 1.0, sink);

        controller.rotate(1.0, 1.0);
        controller.zoom(3.0);
        controller.set_aspect(2.0);
        controller.retarget(Vec4::new(5.0, 5.0, 5.0, 1.0), Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(log.borrow().len(), 5, "construction plus four operations");
    }

    #[test]
    fn resize_touches_only_projection_fields() {
        let (log, sink) = recording_sink();
        let mut controller = OrbitController::new(&scenario_options(), 4.0 / 3.0, sink);

        controller.set_aspect(21.0 / 9.0);
        let emitted = log.borrow();
        let before = &emitted[0];
        let after = &emitted[1];

        assert_eq!(
            bytemuck::bytes_of(&before.position),
            bytemuck::bytes_of(&after.position)
        );
        assert_eq!(
            bytemuck::bytes_of(&before.target),
            bytemuck::bytes_of(&after.target)
        );
        assert_eq!(
            bytemuck::bytes_of(&before.view),
            bytemuck::bytes_of(&after.view)
        );
        assert_eq!(
            bytemuck::bytes_of(&before.inv_view),
            bytemuck::bytes_of(&after.inv_view)
        );
        assert_ne!(
            bytemuck::bytes_of(&before.proj),
            bytemuck::bytes_of(&after.proj)
        );
    }

    #[test]
    fn pinch_gesture_zooms_through_handle_event() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        let before = controller.radius();

        let _ = controller.handle_event(InputEvent::TouchStarted {
            id: 1,
            x: 0.0,
            y: 0.0,
        });
        let _ = controller.handle_event(InputEvent::TouchStarted {
            id: 2,
            x: 100.0,
            y: 0.0,
        });
        // Separation 100 -> 60 yields zoom(+20), i.e. radius +1 before clamping.
        let _ = controller.handle_event(InputEvent::TouchMoved {
            id: 2,
            x: 60.0,
            y: 0.0,
        });
        assert!(
            (controller.radius() - (before + 1.0)).abs() < 1e-4,
            "radius went {before} -> {}",
            controller.radius()
        );
    }

    #[test]
    fn drag_gesture_rotates_through_handle_event() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        let yaw = controller.yaw();

        let _ = controller.handle_event(InputEvent::PointerPressed { x: 50.0, y: 50.0 });
        let _ = controller.handle_event(InputEvent::PointerMoved { x: 70.0, y: 50.0 });
        assert!(
            (controller.yaw() - (yaw - 20.0 * ROTATE_SENSITIVITY)).abs() < 1e-6,
            "yaw {}",
            controller.yaw()
        );
    }

    #[test]
    fn dispose_is_idempotent_and_detaches_input() {
        let (log, sink) = recording_sink();
        let mut controller = OrbitController::new(&scenario_options(), 1.0, sink);
        let yaw = controller.yaw();

        controller.dispose();
        controller.dispose();
        assert!(controller.is_disposed());

        assert!(!controller.handle_event(InputEvent::PointerPressed { x: 0.0, y: 0.0 }));
        assert!(!controller.handle_event(InputEvent::PointerMoved { x: 50.0, y: 0.0 }));
        assert_eq!(controller.yaw(), yaw, "input after dispose must be inert");
        assert_eq!(log.borrow().len(), 1, "no emissions after dispose");

        // Direct calls stay legal and keep emitting.
        controller.rotate(10.0, 0.0);
        assert_eq!(log.borrow().len(), 2);
        assert!(controller.yaw() != yaw);
    }

    #[test]
    fn mid_gesture_dispose_drops_the_drag() {
        let mut controller = OrbitController::new(&scenario_options(), 1.0, null_sink());
        let _ = controller.handle_event(InputEvent::PointerPressed { x: 0.0, y: 0.0 });
        assert!(matches!(controller.gesture(), Gesture::Dragging { .. }));

        controller.dispose();
        assert_eq!(controller.gesture(), Gesture::Idle);
    }
}
