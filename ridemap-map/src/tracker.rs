//! Device location tracking over a [`LocationService`].

use ridemap_core::{LocationError, LocationFix, LocationService, LocationUpdates, PermissionState};

/// Tracks the most recent device location.
///
/// Only the latest fix is kept. The fix stream can be started once per
/// tracker; when it ends the tracker stops streaming for good.
#[derive(Debug)]
pub struct LocationTracker<S> {
    service: S,
    updates: Option<LocationUpdates>,
    started: bool,
    latest: Option<LocationFix>,
}

impl<S: LocationService> LocationTracker<S> {
    /// Wrap `service` without prompting for access.
    #[must_use]
    pub const fn new(service: S) -> Self {
        Self {
            service,
            updates: None,
            started: false,
            latest: None,
        }
    }

    /// Current authorisation state.
    #[must_use]
    pub fn permission(&self) -> PermissionState {
        self.service.authorization_status()
    }

    /// Ask for location access if the user has not been asked yet.
    ///
    /// Once the state is settled this returns it without prompting again.
    pub fn request_authorization(&mut self) -> PermissionState {
        match self.service.authorization_status() {
            PermissionState::NotDetermined => self.service.request_authorization(),
            settled => settled,
        }
    }

    /// Start streaming fixes.
    ///
    /// # Errors
    /// Returns [`LocationError::PermissionDenied`] unless access has been
    /// granted, and [`LocationError::AlreadyStreaming`] on any call after
    /// the first successful one.
    pub fn start_updating(&mut self) -> Result<(), LocationError> {
        if self.started {
            return Err(LocationError::AlreadyStreaming);
        }
        let permission = self.service.authorization_status();
        if !permission.is_authorized() {
            log::debug!("not starting location updates: permission is {permission:?}");
            return Err(LocationError::PermissionDenied);
        }
        self.updates = Some(self.service.start_updates()?);
        self.started = true;
        Ok(())
    }

    /// Whether fixes are currently being received.
    #[must_use]
    pub const fn is_streaming(&self) -> bool {
        self.updates.is_some()
    }

    /// Most recent fix, if any has arrived.
    #[must_use]
    pub const fn latest(&self) -> Option<&LocationFix> {
        self.latest.as_ref()
    }

    /// Wait for the next usable fix and record it as the latest.
    ///
    /// Batches that carry no fix are skipped. Returns `None` when the
    /// tracker is not streaming or the stream has ended.
    pub async fn next_fix(&mut self) -> Option<LocationFix> {
        loop {
            let updates = self.updates.as_mut()?;
            let Some(batch) = updates.recv().await else {
                log::debug!("location updates ended");
                self.updates = None;
                return None;
            };
            match batch.last() {
                Some(fix) => {
                    self.latest = Some(*fix);
                    return Some(*fix);
                }
                None => log::debug!("{}", LocationError::FixUnavailable),
            }
        }
    }
}
