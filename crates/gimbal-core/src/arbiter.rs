//! Drag / orbit arbitration
//!
//! A gizmo drag and camera orbit navigation must never be active at the same
//! time. [`OrbitArbiter`] is the single writer of the orbit switch: acquiring
//! it for a drag turns orbiting off, releasing it turns orbiting back on.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::ArbiterError;

/// Camera navigation that can be suspended while the gizmo is dragged
pub trait OrbitSwitch {
    fn set_orbit_enabled(&mut self, enabled: bool);
}

/// Orbit switch shared with the camera that owns it
pub type SharedOrbitSwitch = Arc<Mutex<dyn OrbitSwitch>>;

/// Exclusive drag lease over camera orbiting
pub struct OrbitArbiter {
    /// Mirror of the value last written to the switch
    orbit_enabled: bool,
    /// Last drag start or move, set while a drag holds the lease
    last_drag_activity: Option<Instant>,
    /// Force-release a drag idle for longer than this
    drag_timeout: Option<Duration>,
    switch: Option<SharedOrbitSwitch>,
}

impl Default for OrbitArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitArbiter {
    pub fn new() -> Self {
        Self {
            orbit_enabled: true,
            last_drag_activity: None,
            drag_timeout: None,
            switch: None,
        }
    }

    /// Attach the camera switch and push the current state to it
    pub fn attach_switch(&mut self, switch: SharedOrbitSwitch) {
        switch.lock().set_orbit_enabled(self.orbit_enabled);
        self.switch = Some(switch);
    }

    pub fn set_drag_timeout(&mut self, timeout: Option<Duration>) {
        self.drag_timeout = timeout;
    }

    pub fn drag_timeout(&self) -> Option<Duration> {
        self.drag_timeout
    }

    pub fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.last_drag_activity.is_some()
    }

    /// Take the lease for a gizmo drag, disabling orbit
    ///
    /// A second acquire without a release is reported, and orbit stays off.
    pub fn acquire_exclusive(&mut self) -> Result<(), ArbiterError> {
        self.acquire_exclusive_at(Instant::now())
    }

    pub fn acquire_exclusive_at(&mut self, now: Instant) -> Result<(), ArbiterError> {
        if self.is_dragging() {
            return Err(ArbiterError::AlreadyHeld);
        }
        self.last_drag_activity = Some(now);
        self.write_orbit(false);
        Ok(())
    }

    /// Record drag motion so a live drag never trips the watchdog
    ///
    /// Ignored when no drag holds the lease.
    pub fn touch(&mut self, now: Instant) {
        if let Some(last) = &mut self.last_drag_activity {
            *last = (*last).max(now);
        }
    }

    /// Return the lease, re-enabling orbit
    ///
    /// A release without a matching acquire is reported, but orbit is still
    /// forced back on.
    pub fn release(&mut self) -> Result<(), ArbiterError> {
        let held = self.last_drag_activity.take().is_some();
        self.write_orbit(true);
        if held {
            Ok(())
        } else {
            Err(ArbiterError::NotHeld)
        }
    }

    /// Release a drag that has seen no start or move for the timeout
    ///
    /// Returns true if the watchdog fired. The caller must end its own drag
    /// when this happens.
    pub fn poll_watchdog(&mut self, now: Instant) -> bool {
        let (Some(last), Some(timeout)) = (self.last_drag_activity, self.drag_timeout) else {
            return false;
        };
        if now.saturating_duration_since(last) < timeout {
            return false;
        }

        tracing::warn!(
            "No drag activity within {:?}, re-enabling orbit",
            timeout
        );
        self.last_drag_activity = None;
        self.write_orbit(true);
        true
    }

    fn write_orbit(&mut self, enabled: bool) {
        debug_assert!(!(enabled && self.is_dragging()));
        if self.orbit_enabled == enabled {
            return;
        }
        self.orbit_enabled = enabled;
        if let Some(switch) = &self.switch {
            switch.lock().set_orbit_enabled(enabled);
        }
        tracing::debug!("Orbit navigation {}", if enabled { "enabled" } else { "disabled" });
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Orbit switch double that remembers every write
    #[derive(Debug)]
    pub struct RecordingOrbit {
        pub enabled: bool,
        pub history: Vec<bool>,
    }

    impl Default for RecordingOrbit {
        fn default() -> Self {
            Self {
                enabled: true,
                history: Vec::new(),
            }
        }
    }

    impl OrbitSwitch for RecordingOrbit {
        fn set_orbit_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
            self.history.push(enabled);
        }
    }

    pub fn shared_orbit() -> (Arc<Mutex<RecordingOrbit>>, SharedOrbitSwitch) {
        let orbit = Arc::new(Mutex::new(RecordingOrbit::default()));
        let switch: SharedOrbitSwitch = orbit.clone();
        (orbit, switch)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::shared_orbit;
    use super::*;

    #[test]
    fn test_start_then_end_restores_orbit() {
        let (orbit, switch) = shared_orbit();
        let mut arbiter = OrbitArbiter::new();
        arbiter.attach_switch(switch);

        arbiter.acquire_exclusive().unwrap();
        assert!(!arbiter.orbit_enabled());
        assert!(arbiter.is_dragging());
        assert!(!orbit.lock().enabled);

        arbiter.release().unwrap();
        assert!(arbiter.orbit_enabled());
        assert!(!arbiter.is_dragging());
        assert!(orbit.lock().enabled);
    }

    #[test]
    fn test_start_alone_keeps_orbit_disabled() {
        let mut arbiter = OrbitArbiter::new();
        arbiter.acquire_exclusive().unwrap();
        assert!(!arbiter.orbit_enabled());
        assert!(!arbiter.poll_watchdog(Instant::now() + Duration::from_secs(3600)));
        assert!(!arbiter.orbit_enabled());
    }

    #[test]
    fn test_double_acquire_is_reported() {
        let mut arbiter = OrbitArbiter::new();
        arbiter.acquire_exclusive().unwrap();
        assert_eq!(arbiter.acquire_exclusive(), Err(ArbiterError::AlreadyHeld));
        assert!(!arbiter.orbit_enabled());

        arbiter.release().unwrap();
        assert!(arbiter.orbit_enabled());
    }

    #[test]
    fn test_unmatched_release_forces_orbit_on() {
        let (orbit, switch) = shared_orbit();
        let mut arbiter = OrbitArbiter::new();
        arbiter.attach_switch(switch);

        assert_eq!(arbiter.release(), Err(ArbiterError::NotHeld));
        assert!(arbiter.orbit_enabled());
        // attach pushes once; the redundant release writes nothing
        assert_eq!(orbit.lock().history, vec![true]);
    }

    #[test]
    fn test_watchdog_releases_stale_drag() {
        let mut arbiter = OrbitArbiter::new();
        arbiter.set_drag_timeout(Some(Duration::from_secs(5)));
        let start = Instant::now();
        arbiter.acquire_exclusive_at(start).unwrap();

        assert!(!arbiter.poll_watchdog(start + Duration::from_secs(1)));
        assert!(!arbiter.orbit_enabled());

        assert!(arbiter.poll_watchdog(start + Duration::from_secs(5)));
        assert!(arbiter.orbit_enabled());
        assert!(!arbiter.is_dragging());
        assert_eq!(arbiter.release(), Err(ArbiterError::NotHeld));
    }

    #[test]
    fn test_drag_motion_defers_watchdog() {
        let mut arbiter = OrbitArbiter::new();
        arbiter.set_drag_timeout(Some(Duration::from_secs(5)));
        let start = Instant::now();
        arbiter.acquire_exclusive_at(start).unwrap();

        // A drag held for 12 s with steady motion stays exclusive
        for secs in [3, 6, 9, 12] {
            let now = start + Duration::from_secs(secs);
            arbiter.touch(now);
            assert!(!arbiter.poll_watchdog(now + Duration::from_secs(1)));
            assert!(!arbiter.orbit_enabled());
        }

        assert!(arbiter.poll_watchdog(start + Duration::from_secs(17)));
        assert!(arbiter.orbit_enabled());
    }

    #[test]
    fn test_touch_without_drag_is_ignored() {
        let mut arbiter = OrbitArbiter::new();
        arbiter.touch(Instant::now());
        assert!(!arbiter.is_dragging());
        assert!(arbiter.orbit_enabled());
    }

    #[test]
    fn test_never_dragging_with_orbit_enabled() {
        let mut arbiter = OrbitArbiter::new();
        let steps: [fn(&mut OrbitArbiter); 4] = [
            |a| {
                let _ = a.acquire_exclusive();
            },
            |a| {
                let _ = a.acquire_exclusive();
            },
            |a| {
                let _ = a.release();
            },
            |a| {
                let _ = a.release();
            },
        ];
        for step in steps {
            step(&mut arbiter);
            assert!(!(arbiter.orbit_enabled() && arbiter.is_dragging()));
        }
    }
}
