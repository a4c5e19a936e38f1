//! Gimbal Interaction Core
//!
//! This crate contains the state machine behind the transform gimbal:
//! - TransformMode / Orientation: the editing frame
//! - SnapSpec: per-mode snap increments
//! - GizmoConfig: the record reconciled onto a mounted gizmo handle
//! - OrbitArbiter: mutual exclusion between gizmo drags and camera orbit
//! - KeyBus: injectable key-event source with RAII subscriptions
//! - GimbalController: ties all of the above together

pub mod arbiter;
pub mod controller;
pub mod error;
pub mod gizmo;
pub mod input;
pub mod snap;
pub mod types;

pub use arbiter::*;
pub use controller::*;
pub use error::*;
pub use gizmo::*;
pub use input::*;
pub use snap::*;
pub use types::*;
