//! Device location fixes and the platform service that produces them.
//!
//! A [`LocationService`] is the thin shim over whatever the host platform
//! offers. It reports [`PermissionState`], asks the user for access and,
//! once authorised, streams batches of [`LocationFix`] values. Batches
//! mirror platform delegates that hand over several readings at once; an
//! empty batch means the platform could not determine a position.

use std::time::SystemTime;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::Coordinate;

/// One reported device position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    /// Reported position.
    pub coordinate: Coordinate,
    /// When the platform produced the reading.
    pub timestamp: SystemTime,
}

impl LocationFix {
    /// Build a fix stamped with the current time.
    #[must_use]
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: SystemTime::now(),
        }
    }
}

/// Whether the user has allowed location access.
///
/// `NotDetermined` moves to one of the other three states after a single
/// authorisation request. `Denied` and `Restricted` are terminal for the
/// session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// The user refused access.
    Denied,
    /// Access is blocked by device policy.
    Restricted,
    /// Access granted; fixes may be streamed.
    Authorized,
}

impl PermissionState {
    /// Whether location updates may be streamed.
    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }

    /// Whether no further authorisation request can change the state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::NotDetermined)
    }
}

/// Errors raised while tracking the device location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// Access is denied or restricted; tracking will not start.
    #[error("location permission denied")]
    PermissionDenied,
    /// A platform callback carried no usable fix.
    #[error("current location could not be determined")]
    FixUnavailable,
    /// Updates were already started; the fix stream cannot be restarted.
    #[error("location updates already started")]
    AlreadyStreaming,
}

/// Stream of fix batches produced by [`LocationService::start_updates`].
pub type LocationUpdates = UnboundedReceiver<Vec<LocationFix>>;

/// Platform location capability.
///
/// Implementations wrap the host's location API. They are only called from
/// the owning tracker's thread.
pub trait LocationService {
    /// Current authorisation state, without prompting the user.
    fn authorization_status(&self) -> PermissionState;

    /// Prompt for access and return the resulting state.
    fn request_authorization(&mut self) -> PermissionState;

    /// Begin streaming fix batches.
    ///
    /// # Errors
    /// Returns [`LocationError::PermissionDenied`] when access has not been
    /// granted.
    fn start_updates(&mut self) -> Result<LocationUpdates, LocationError>;
}
