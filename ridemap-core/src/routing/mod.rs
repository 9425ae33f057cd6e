//! Resolve drivable routes between two coordinates.
//!
//! The [`RouteProvider`] trait abstracts an external directions service.
//! Callers hand it a [`RouteRequest`](crate::RouteRequest) and receive
//! either a [`RouteResult`](crate::RouteResult) polyline or a
//! [`RouteError`]. Resolution is asynchronous and performs exactly one
//! request per call; retries are the caller's decision.

mod error;
mod provider;

pub use error::{ProviderFailureKind, RouteError};
pub use provider::RouteProvider;
