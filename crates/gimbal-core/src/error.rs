//! Error types for the gimbal controller

use thiserror::Error;

/// Unmatched drag start/end reported by the orbit arbiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArbiterError {
    #[error("Drag already in progress")]
    AlreadyHeld,

    #[error("No drag in progress")]
    NotHeld,
}

/// Gimbal controller errors
///
/// None of these are fatal: the controller logs them and degrades to
/// "nothing applied" or "orbit re-enabled".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GimbalError {
    #[error("Orbit arbitration failed: {0}")]
    Arbiter(#[from] ArbiterError),

    #[error("Gizmo handle is not mounted")]
    HandleUnavailable,
}

/// Result type for controller operations
pub type GimbalResult<T> = Result<T, GimbalError>;
