//! Error types emitted by the ridemap CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ridemap_core::CoordinateError;
use ridemap_data::routing::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the ridemap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Long flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A coordinate option could not be parsed or is out of range.
    #[error("invalid {field}: {source}")]
    InvalidCoordinate {
        /// Long flag name of the option.
        field: &'static str,
        /// Why the value was rejected.
        #[source]
        source: CoordinateError,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Long flag name of the option.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the driver offers file failed.
    #[error("failed to open driver offers at {path:?}: {source}")]
    OpenOffers {
        /// Offers file path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Driver offers JSON could not be decoded.
    #[error("failed to parse driver offers JSON at {path:?}: {source}")]
    ParseOffers {
        /// Offers file path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        /// OSRM base URL the provider was configured with.
        base_url: String,
        /// Underlying construction error.
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serialising the estimate report failed.
    #[error("failed to serialise estimate report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the estimate report failed.
    #[error("failed to write estimate report: {0}")]
    WriteReport(#[source] std::io::Error),
}
