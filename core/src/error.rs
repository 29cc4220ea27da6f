//! Error types and result handling for the Slate framework.
//!
//! Error handling follows these principles:
//! - Errors are typed and categorized
//! - No panics in production code paths
//! - Initialization errors are fatal and unwind eagerly
//! - Per-operation errors are returned to the immediate caller only

use core::fmt;

use alloc::collections::TryReserveError;

// =============================================================================
// RESULT TYPE
// =============================================================================

/// Result type alias for Slate operations.
pub type DevResult<T> = Result<T, DevError>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// Unified error type for the device stack.
///
/// Initialization failures (`Registration`, `OutOfMemory`) are fatal to the
/// device being brought up and require any partial registration to be rolled
/// back. Per-operation failures (`TransferFault`, `CapacityExceeded`,
/// `InvalidArgument`) are recoverable: the session cursor is left unchanged
/// and the caller may retry or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DevError {
    /// Identity acquisition or operation-table binding failed
    Registration(RegistrationError),
    /// Backing-store allocation failed
    OutOfMemory,
    /// The copy capability to/from the caller-supplied buffer failed
    TransferFault,
    /// Write attempted at or beyond full capacity
    CapacityExceeded,
    /// Malformed request (zero capacity, empty name, oversized flat-mode
    /// transfer, empty access mode)
    InvalidArgument,
}

impl DevError {
    /// Whether the device survives this error.
    ///
    /// Recoverable errors affect a single call; the device and its
    /// registration remain usable. Non-recoverable errors abort
    /// initialization.
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Registration(_) | Self::OutOfMemory => false,
            Self::TransferFault | Self::CapacityExceeded | Self::InvalidArgument => true,
        }
    }
}

impl fmt::Display for DevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registration(e) => write!(f, "registration failed: {}", e),
            Self::OutOfMemory => write!(f, "out of memory"),
            Self::TransferFault => write!(f, "user memory transfer fault"),
            Self::CapacityExceeded => write!(f, "device capacity exceeded"),
            Self::InvalidArgument => write!(f, "invalid argument"),
        }
    }
}

// =============================================================================
// REGISTRATION SUB-ERRORS
// =============================================================================

/// Registry-specific failure modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationError {
    /// The requested device name collides with an existing registration
    NameTaken,
    /// No device identity is available (major space or slot table exhausted)
    Exhausted,
    /// The region handle does not name a current registration
    UnknownRegion,
    /// The region already has an operation table bound
    AlreadyBound,
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTaken => write!(f, "device name already registered"),
            Self::Exhausted => write!(f, "no device identity available"),
            Self::UnknownRegion => write!(f, "unknown device region"),
            Self::AlreadyBound => write!(f, "operation table already bound"),
        }
    }
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<RegistrationError> for DevError {
    fn from(e: RegistrationError) -> Self {
        DevError::Registration(e)
    }
}

impl From<TryReserveError> for DevError {
    fn from(_: TryReserveError) -> Self {
        DevError::OutOfMemory
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverability_split() {
        assert!(!DevError::Registration(RegistrationError::NameTaken).is_recoverable());
        assert!(!DevError::OutOfMemory.is_recoverable());
        assert!(DevError::TransferFault.is_recoverable());
        assert!(DevError::CapacityExceeded.is_recoverable());
        assert!(DevError::InvalidArgument.is_recoverable());
    }

    #[test]
    fn test_display() {
        use alloc::string::ToString;

        assert_eq!(DevError::OutOfMemory.to_string(), "out of memory");
        assert_eq!(
            DevError::Registration(RegistrationError::NameTaken).to_string(),
            "registration failed: device name already registered"
        );
    }

    #[test]
    fn test_from_registration() {
        let err: DevError = RegistrationError::Exhausted.into();
        assert_eq!(err, DevError::Registration(RegistrationError::Exhausted));
    }
}
