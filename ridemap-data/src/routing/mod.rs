//! HTTP-based route providers for routing services.
//!
//! This module provides [`HttpRouteProvider`], an implementation of
//! [`ridemap_core::RouteProvider`] that resolves driving routes from an
//! OSRM routing service.
//!
//! # Example
//!
//! ```no_run
//! use ridemap_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//! use std::time::Duration;
//!
//! // Create a provider with custom configuration
//! let config = HttpRouteProviderConfig::new("http://localhost:5000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpRouteProvider::with_config(config)?;
//!
//! // Or use the simple constructor
//! let provider = HttpRouteProvider::new("http://localhost:5000")?;
//! # Ok::<(), ridemap_data::routing::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpRouteProvider, HttpRouteProviderConfig,
    ProviderBuildError,
};
