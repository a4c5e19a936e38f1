//! Gimbal controller state machine
//!
//! State is the product of transform mode, orientation and the snap toggle.
//! Every transition reconciles a [`GizmoConfig`] onto the mounted handle.
//! Drag start/end events are forwarded to the [`OrbitArbiter`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::{
    GimbalError, GimbalResult, GizmoConfig, Key, KeyBus, KeySubscription, Orientation,
    OrbitArbiter, SharedGizmoHandle, SharedOrbitSwitch, SnapSpec, TransformMode,
    WeakGizmoHandle, apply,
};

/// Key that flips between local and world space
pub const ORIENTATION_TOGGLE_KEY: Key = Key::Alt;

/// Read-only view of controller state for UI code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GimbalSnapshot {
    pub mode: TransformMode,
    pub orientation: Orientation,
    pub snap_enabled: bool,
    pub snap: SnapSpec,
    pub orbit_enabled: bool,
    pub dragging: bool,
}

struct GimbalState {
    mode: TransformMode,
    orientation: Orientation,
    snap_enabled: bool,
    handle: Option<WeakGizmoHandle>,
    /// Last record written to the current handle
    applied: Option<GizmoConfig>,
    arbiter: OrbitArbiter,
}

impl GimbalState {
    fn config(&self) -> GizmoConfig {
        GizmoConfig::reconcile(self.mode, self.orientation, self.snap_enabled)
    }

    /// Push the current record to the handle if it changed
    ///
    /// Returns Ok(false) when the handle already has this record.
    fn reconcile(&mut self) -> GimbalResult<bool> {
        let config = self.config();
        if self.applied == Some(config) {
            return Ok(false);
        }

        let handle = self
            .handle
            .as_ref()
            .and_then(|weak| weak.upgrade())
            .ok_or(GimbalError::HandleUnavailable)?;
        apply(&config, &mut *handle.lock());
        self.applied = Some(config);
        Ok(true)
    }

    fn reconcile_or_skip(&mut self) {
        match self.reconcile() {
            Ok(true) => tracing::debug!("Applied gizmo config {:?}", self.applied),
            Ok(false) => {}
            Err(e) => tracing::debug!("Skipped gizmo reconcile: {}", e),
        }
    }

    fn toggle_orientation(&mut self) {
        self.orientation.toggle();
        tracing::info!("Orientation: {}", self.orientation.name());
        self.reconcile_or_skip();
    }
}

/// Owns the gimbal editing state and keeps the gizmo handle in sync with it
pub struct GimbalController {
    state: Arc<Mutex<GimbalState>>,
    key_subscription: KeySubscription,
}

impl GimbalController {
    /// Create a controller in (Translate, World, snapping off) and start
    /// listening for the orientation toggle key on `keys`
    pub fn new(keys: &KeyBus) -> Self {
        let state = Arc::new(Mutex::new(GimbalState {
            mode: TransformMode::default(),
            orientation: Orientation::default(),
            snap_enabled: false,
            handle: None,
            applied: None,
            arbiter: OrbitArbiter::new(),
        }));

        let weak_state = Arc::downgrade(&state);
        let key_subscription = keys.subscribe(move |event| {
            if !event.is_press_of(ORIENTATION_TOGGLE_KEY) {
                return;
            }
            if let Some(state) = weak_state.upgrade() {
                state.lock().toggle_orientation();
            }
        });

        Self {
            state,
            key_subscription,
        }
    }

    /// Hand the camera's orbit switch to the drag arbiter
    pub fn attach_orbit_switch(&self, switch: SharedOrbitSwitch) {
        self.state.lock().arbiter.attach_switch(switch);
    }

    /// Force-release drags that never see a matching end after `timeout`
    pub fn set_drag_timeout(&self, timeout: Option<Duration>) {
        self.state.lock().arbiter.set_drag_timeout(timeout);
    }

    /// Remember a newly mounted gizmo handle and configure it
    ///
    /// The controller keeps only a weak reference; once the renderer drops
    /// the handle, reconciliation silently becomes a no-op.
    pub fn mount_handle(&self, handle: &SharedGizmoHandle) {
        let mut state = self.state.lock();
        state.handle = Some(Arc::downgrade(handle));
        state.applied = None;
        tracing::debug!("Gizmo handle mounted");
        state.reconcile_or_skip();
    }

    pub fn unmount_handle(&self) {
        let mut state = self.state.lock();
        state.handle = None;
        state.applied = None;
        tracing::debug!("Gizmo handle unmounted");
    }

    pub fn select_mode(&self, mode: TransformMode) {
        let mut state = self.state.lock();
        if state.mode != mode {
            tracing::info!("Transform mode: {}", mode.name());
        }
        state.mode = mode;
        state.reconcile_or_skip();
    }

    pub fn toggle_snap(&self) {
        let enabled = !self.state.lock().snap_enabled;
        self.set_snap_enabled(enabled);
    }

    pub fn set_snap_enabled(&self, enabled: bool) {
        let mut state = self.state.lock();
        if state.snap_enabled != enabled {
            tracing::info!("Snapping {}", if enabled { "enabled" } else { "disabled" });
        }
        state.snap_enabled = enabled;
        state.reconcile_or_skip();
    }

    /// Same transition as pressing the toggle key
    pub fn toggle_orientation(&self) {
        self.state.lock().toggle_orientation();
    }

    /// Gizmo pointer-down
    pub fn on_drag_start(&self) -> GimbalResult<()> {
        self.state
            .lock()
            .arbiter
            .acquire_exclusive()
            .map_err(GimbalError::from)
    }

    /// Gizmo pointer-up
    pub fn on_drag_end(&self) -> GimbalResult<()> {
        self.state.lock().arbiter.release().map_err(GimbalError::from)
    }

    /// Gizmo pointer-move during a drag; keeps the watchdog from firing
    pub fn on_drag_moved(&self, now: Instant) {
        self.state.lock().arbiter.touch(now);
    }

    /// Per-frame housekeeping; returns true if a stale drag was released
    pub fn tick(&self, now: Instant) -> bool {
        self.state.lock().arbiter.poll_watchdog(now)
    }

    pub fn snapshot(&self) -> GimbalSnapshot {
        let state = self.state.lock();
        GimbalSnapshot {
            mode: state.mode,
            orientation: state.orientation,
            snap_enabled: state.snap_enabled,
            snap: state.config().snap(),
            orbit_enabled: state.arbiter.orbit_enabled(),
            dragging: state.arbiter.is_dragging(),
        }
    }

    pub fn mode(&self) -> TransformMode {
        self.state.lock().mode
    }

    pub fn orientation(&self) -> Orientation {
        self.state.lock().orientation
    }

    pub fn snap_enabled(&self) -> bool {
        self.state.lock().snap_enabled
    }

    pub fn orbit_enabled(&self) -> bool {
        self.state.lock().arbiter.orbit_enabled()
    }

    /// Whether the key listener is still registered
    pub fn is_listening(&self) -> bool {
        self.key_subscription.is_active()
    }
}

impl Drop for GimbalController {
    fn drop(&mut self) {
        // Don't leave the camera locked if we go away mid-drag
        let mut state = self.state.lock();
        if state.arbiter.is_dragging() {
            let _ = state.arbiter.release();
        }
        tracing::debug!("Gimbal controller torn down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyEvent;
    use crate::arbiter::test_support::shared_orbit;
    use crate::gizmo::test_support::shared_recording;
    use crate::{ROTATION_SNAP, TRANSLATION_SNAP};
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_state() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        let snap = controller.snapshot();

        assert_eq!(snap.mode, TransformMode::Translate);
        assert_eq!(snap.orientation, Orientation::World);
        assert!(!snap.snap_enabled);
        assert_eq!(snap.snap, SnapSpec::None);
        assert!(snap.orbit_enabled);
        assert!(!snap.dragging);
        assert!(controller.is_listening());
    }

    #[test]
    fn test_mount_applies_current_state() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        controller.select_mode(TransformMode::Scale);
        controller.set_snap_enabled(true);

        let (gizmo, handle) = shared_recording();
        assert_eq!(gizmo.lock().writes, 0);

        controller.mount_handle(&handle);
        let g = gizmo.lock();
        assert_eq!(g.mode, TransformMode::Scale);
        assert_eq!(g.scale_snap, Some(0.1));
        assert_eq!(g.writes, 5);
    }

    #[test]
    fn test_reapply_is_idempotent() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        let (gizmo, handle) = shared_recording();
        controller.mount_handle(&handle);

        controller.select_mode(TransformMode::Rotate);
        let first = controller.snapshot().snap;
        let writes = gizmo.lock().writes;

        controller.select_mode(TransformMode::Rotate);
        assert_eq!(controller.snapshot().snap, first);
        assert_eq!(gizmo.lock().writes, writes);
    }

    #[test]
    fn test_unmounted_handle_is_skipped_then_retried() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        controller.set_snap_enabled(true);

        let (gizmo, handle) = shared_recording();
        controller.mount_handle(&handle);
        assert_eq!(gizmo.lock().translation_snap, Some(TRANSLATION_SNAP));

        // Renderer drops its handle: reconciles become no-ops
        drop(handle);
        drop(gizmo);
        controller.select_mode(TransformMode::Rotate);
        assert_eq!(controller.mode(), TransformMode::Rotate);

        let (gizmo, handle) = shared_recording();
        controller.mount_handle(&handle);
        assert_eq!(gizmo.lock().mode, TransformMode::Rotate);
        assert_eq!(gizmo.lock().rotation_snap, Some(ROTATION_SNAP));
    }

    #[test]
    fn test_explicit_unmount() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        let (gizmo, handle) = shared_recording();
        controller.mount_handle(&handle);
        controller.unmount_handle();

        controller.select_mode(TransformMode::Scale);
        assert_eq!(gizmo.lock().mode, TransformMode::Translate);
    }

    #[test]
    fn test_other_keys_ignored() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);

        keys.dispatch(&KeyEvent::pressed(Key::Shift));
        keys.dispatch(&KeyEvent::pressed(Key::Character('r')));
        keys.dispatch(&KeyEvent::released(Key::Alt));
        assert_eq!(controller.orientation(), Orientation::World);
    }

    #[test]
    fn test_alt_twice_restores_orientation() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        keys.dispatch(&KeyEvent::pressed(Key::Alt));
        assert_eq!(controller.orientation(), Orientation::Local);
        keys.dispatch(&KeyEvent::pressed(Key::Alt));
        assert_eq!(controller.orientation(), Orientation::World);
    }

    #[test]
    fn test_orientation_survives_mode_change() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        controller.toggle_orientation();
        controller.select_mode(TransformMode::Scale);
        controller.toggle_snap();
        assert_eq!(controller.orientation(), Orientation::Local);
    }

    #[test]
    fn test_end_to_end_session() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        let (gizmo, handle) = shared_recording();
        let (orbit, switch) = shared_orbit();
        controller.mount_handle(&handle);
        controller.attach_orbit_switch(switch);

        controller.select_mode(TransformMode::Rotate);
        controller.toggle_snap();
        {
            let g = gizmo.lock();
            assert_eq!(g.mode, TransformMode::Rotate);
            assert_relative_eq!(g.rotation_snap.unwrap(), 0.1745, epsilon = 1e-4);
        }
        assert_eq!(controller.snapshot().snap, SnapSpec::Angle(ROTATION_SNAP));

        keys.dispatch(&KeyEvent::pressed(Key::Alt));
        let snap = controller.snapshot();
        assert_eq!(snap.orientation, Orientation::Local);
        assert_eq!(snap.mode, TransformMode::Rotate);
        assert!(snap.snap_enabled);
        assert_eq!(gizmo.lock().space, Orientation::Local);

        controller.on_drag_start().unwrap();
        assert!(!controller.orbit_enabled());
        assert!(!orbit.lock().enabled);

        controller.on_drag_end().unwrap();
        assert!(controller.orbit_enabled());
        assert!(orbit.lock().enabled);
    }

    #[test]
    fn test_unmatched_drag_events_do_not_panic() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);

        assert_eq!(
            controller.on_drag_end(),
            Err(GimbalError::Arbiter(crate::ArbiterError::NotHeld))
        );
        assert!(controller.orbit_enabled());

        controller.on_drag_start().unwrap();
        assert!(controller.on_drag_start().is_err());
        assert!(!controller.orbit_enabled());
    }

    #[test]
    fn test_tick_releases_stale_drag() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        controller.set_drag_timeout(Some(Duration::from_millis(500)));

        controller.on_drag_start().unwrap();
        assert!(!controller.tick(Instant::now()));
        assert!(controller.tick(Instant::now() + Duration::from_secs(1)));
        assert!(controller.orbit_enabled());
    }

    #[test]
    fn test_long_drag_with_motion_keeps_orbit_off() {
        let keys = KeyBus::new();
        let controller = GimbalController::new(&keys);
        let (orbit, switch) = shared_orbit();
        controller.attach_orbit_switch(switch);
        controller.set_drag_timeout(Some(Duration::from_secs(10)));

        let start = Instant::now();
        controller.on_drag_start().unwrap();
        controller.on_drag_moved(start + Duration::from_secs(8));
        assert!(!controller.tick(start + Duration::from_secs(11)));
        assert!(!controller.orbit_enabled());
        assert!(!orbit.lock().enabled);

        controller.on_drag_end().unwrap();
        assert!(controller.orbit_enabled());
    }

    #[test]
    fn test_teardown_removes_listener() {
        let keys = KeyBus::new();
        let (gizmo, handle) = shared_recording();
        let (orbit, switch) = shared_orbit();

        let controller = GimbalController::new(&keys);
        controller.mount_handle(&handle);
        controller.attach_orbit_switch(switch);
        controller.on_drag_start().unwrap();
        assert_eq!(keys.listener_count(), 1);

        drop(controller);
        assert_eq!(keys.listener_count(), 0);
        assert!(orbit.lock().enabled);

        let writes = gizmo.lock().writes;
        assert_eq!(keys.dispatch(&KeyEvent::pressed(Key::Alt)), 0);
        assert_eq!(gizmo.lock().space, Orientation::World);
        assert_eq!(gizmo.lock().writes, writes);
    }
}
