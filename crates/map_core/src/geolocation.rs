//! Position sources for the booking map.

use thiserror::Error;

use crate::geo::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location access denied")]
    Denied,
    #[error("location unavailable")]
    Unavailable,
}

/// Capability: `request_current_position() -> Location | DeniedOrUnavailable`.
pub trait LocationSource {
    fn request_current_position(&mut self) -> Result<Location, GeolocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationSource(pub Location);

impl LocationSource for FixedLocationSource {
    fn request_current_position(&mut self) -> Result<Location, GeolocationError> {
        Ok(self.0)
    }
}

/// A source whose user declined the permission prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocationSource;

impl LocationSource for DeniedLocationSource {
    fn request_current_position(&mut self) -> Result<Location, GeolocationError> {
        Err(GeolocationError::Denied)
    }
}

/// A host without any geolocation capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocationSource;

impl LocationSource for NoLocationSource {
    fn request_current_position(&mut self) -> Result<Location, GeolocationError> {
        Err(GeolocationError::Unavailable)
    }
}
