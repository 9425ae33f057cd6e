//! Estimate command implementation for the ridemap CLI.

use std::io::{BufReader, Write};
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ridemap_core::{Coordinate, DriverOffer, RouteProvider, TripEstimate};
use ridemap_data::routing::{DEFAULT_BASE_URL, HttpRouteProvider, HttpRouteProviderConfig};
use ridemap_map::{MapRenderer, MapSurface, TripCoordinator};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::fs::{file_is_file, open_utf8_file};
use crate::location::StaticLocationService;
use crate::report::EstimateReport;
use crate::{
    ARG_DESTINATION, ARG_LOCATION, ARG_OFFERS, ARG_ORIGIN, ARG_OSRM_BASE_URL, ARG_TIMEOUT_SECS,
    CliError, ENV_DESTINATION, ENV_ORIGIN,
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI arguments for the `estimate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve the driving route between two points with an OSRM \
                 instance and print the resulting map state: origin and \
                 destination annotations, the route overlay, the viewport \
                 and any driver offers loaded from a JSON file.",
    about = "Estimate a trip and print the map state"
)]
#[ortho_config(prefix = "RIDEMAP")]
pub(crate) struct EstimateArgs {
    /// Pick-up point as "latitude,longitude".
    #[arg(long = ARG_ORIGIN, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Drop-off point as "latitude,longitude".
    #[arg(long = ARG_DESTINATION, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Rider's current position as "latitude,longitude".
    #[arg(long = ARG_LOCATION, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Path to a JSON array of driver offers.
    #[arg(long = ARG_OFFERS, value_name = "path")]
    #[serde(default)]
    pub(crate) offers: Option<Utf8PathBuf>,
    /// Routing request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl EstimateArgs {
    pub(crate) fn into_config(self) -> Result<EstimateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EstimateConfig::try_from(merged)
    }
}

/// Resolved `estimate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EstimateConfig {
    /// Pick-up point.
    pub(crate) origin: Coordinate,
    /// Drop-off point.
    pub(crate) destination: Coordinate,
    /// Rider's position, when known.
    pub(crate) location: Option<Coordinate>,
    /// Base URL for the OSRM route service.
    pub(crate) osrm_base_url: String,
    /// Optional driver offers file.
    pub(crate) offers: Option<Utf8PathBuf>,
    /// Routing request timeout.
    pub(crate) timeout: Duration,
}

impl EstimateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.offers {
            Some(path) => Self::require_existing(path, ARG_OFFERS),
            None => Ok(()),
        }
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn parse_coordinate(raw: &str, field: &'static str) -> Result<Coordinate, CliError> {
    raw.parse()
        .map_err(|source| CliError::InvalidCoordinate { field, source })
}

impl TryFrom<EstimateArgs> for EstimateConfig {
    type Error = CliError;

    fn try_from(args: EstimateArgs) -> Result<Self, Self::Error> {
        let origin = args.origin.ok_or(CliError::MissingArgument {
            field: ARG_ORIGIN,
            env: ENV_ORIGIN,
        })?;
        let destination = args.destination.ok_or(CliError::MissingArgument {
            field: ARG_DESTINATION,
            env: ENV_DESTINATION,
        })?;
        let location = args
            .location
            .map(|raw| parse_coordinate(&raw, ARG_LOCATION))
            .transpose()?;

        Ok(Self {
            origin: parse_coordinate(&origin, ARG_ORIGIN)?,
            destination: parse_coordinate(&destination, ARG_DESTINATION)?,
            location,
            osrm_base_url: args
                .osrm_base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            offers: args.offers,
            timeout: Duration::from_secs(args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

/// Builds the route provider for the current estimate invocation.
pub(super) trait RouteProviderBuilder {
    fn build(&self, config: &EstimateConfig) -> Result<Arc<dyn RouteProvider>, CliError>;
}

pub(super) struct OsrmRouteProviderBuilder;

impl RouteProviderBuilder for OsrmRouteProviderBuilder {
    fn build(&self, config: &EstimateConfig) -> Result<Arc<dyn RouteProvider>, CliError> {
        let provider_config =
            HttpRouteProviderConfig::new(config.osrm_base_url.clone()).with_timeout(config.timeout);
        let provider = HttpRouteProvider::with_config(provider_config).map_err(|source| {
            CliError::BuildRouteProvider {
                base_url: config.osrm_base_url.clone(),
                source,
            }
        })?;
        Ok(Arc::new(provider))
    }
}

pub(super) fn run_estimate(args: EstimateArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_estimate_with(args, &OsrmRouteProviderBuilder, &mut stdout)
}

pub(super) fn run_estimate_with(
    args: EstimateArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_estimate(args, builder)?;
    write_report(writer, &report)
}

fn execute_estimate(
    args: EstimateArgs,
    builder: &dyn RouteProviderBuilder,
) -> Result<EstimateReport, CliError> {
    let config = resolve_estimate_config(args)?;
    let offers = match &config.offers {
        Some(path) => load_offers(path)?,
        None => Vec::new(),
    };
    let provider = builder.build(&config)?;
    let estimate = TripEstimate {
        origin: config.origin,
        destination: config.destination,
        offers: offers.clone(),
    };
    let surface = render_estimate(provider, config.location, estimate)?;
    if surface.overlay().is_none() {
        log::warn!(
            "no route drawn between {} and {}",
            config.origin,
            config.destination
        );
    }
    Ok(EstimateReport::new(&surface, offers))
}

fn resolve_estimate_config(args: EstimateArgs) -> Result<EstimateConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Drive a trip coordinator through a single estimate on a local runtime.
fn render_estimate(
    provider: Arc<dyn RouteProvider>,
    location: Option<Coordinate>,
    estimate: TripEstimate,
) -> Result<MapSurface, CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let renderer = MapRenderer::with_handle(provider, runtime.handle().clone());
    let coordinator = TripCoordinator::new(renderer, StaticLocationService::new(location));
    let (sender, estimates) = mpsc::channel(1);
    if sender.try_send(estimate).is_err() {
        log::debug!("estimate channel rejected the estimate");
    }
    drop(sender);
    Ok(runtime.block_on(coordinator.run(estimates, CancellationToken::new())))
}

/// Loads a JSON array of [`DriverOffer`] values from disk.
pub(super) fn load_offers(path: &Utf8Path) -> Result<Vec<DriverOffer>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenOffers {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseOffers {
        path: path.to_path_buf(),
        source,
    })
}

fn write_report(writer: &mut dyn Write, report: &EstimateReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<EstimateConfig, CliError> {
    let merged = EstimateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    EstimateConfig::try_from(merged)
}
