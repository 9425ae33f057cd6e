//! Location service for a command-line run.
//!
//! A terminal has no device position, so the rider's location is an
//! optional flag. Supplying it grants access and yields exactly one fix;
//! omitting it behaves like a rider who refused access.

use ridemap_core::{
    Coordinate, LocationError, LocationFix, LocationService, LocationUpdates, PermissionState,
};
use tokio::sync::mpsc;

/// [`LocationService`] reporting a single configured position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StaticLocationService {
    position: Option<Coordinate>,
    started: bool,
}

impl StaticLocationService {
    pub(crate) const fn new(position: Option<Coordinate>) -> Self {
        Self {
            position,
            started: false,
        }
    }
}

impl LocationService for StaticLocationService {
    fn authorization_status(&self) -> PermissionState {
        if self.position.is_some() {
            PermissionState::Authorized
        } else {
            PermissionState::Denied
        }
    }

    fn request_authorization(&mut self) -> PermissionState {
        self.authorization_status()
    }

    fn start_updates(&mut self) -> Result<LocationUpdates, LocationError> {
        let position = self.position.ok_or(LocationError::PermissionDenied)?;
        if self.started {
            return Err(LocationError::AlreadyStreaming);
        }
        self.started = true;
        let (sender, updates) = mpsc::unbounded_channel();
        if sender.send(vec![LocationFix::now(position)]).is_err() {
            log::debug!("location stream closed before the first fix");
        }
        Ok(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_position_is_denied() {
        let mut service = StaticLocationService::new(None);
        assert_eq!(service.request_authorization(), PermissionState::Denied);
        assert_eq!(
            service.start_updates().expect_err("no position"),
            LocationError::PermissionDenied
        );
    }

    #[rstest]
    fn configured_position_yields_one_fix() {
        let position = Coordinate {
            latitude: -27.596_278_8,
            longitude: -48.551_487,
        };
        let mut service = StaticLocationService::new(Some(position));
        assert_eq!(service.request_authorization(), PermissionState::Authorized);

        let mut updates = service.start_updates().expect("authorised");
        let batch = updates.try_recv().expect("one batch");
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.first().map(|fix| fix.coordinate), Some(position));
        assert!(updates.try_recv().is_err());
        assert_eq!(
            service.start_updates().expect_err("second start"),
            LocationError::AlreadyStreaming
        );
    }
}
