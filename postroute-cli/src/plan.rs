//! Plan command implementation for the Postroute CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use postroute_core::{GeocodeResolver, OrderingStrategy, PlanRequest, Route, RoutePlanner};
use postroute_data::geocode::{HttpGeocodeResolver, HttpGeocodeResolverConfig};
use postroute_fs::{create_utf8_file, file_is_file, open_utf8_file};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_PLAN_DESTINATION, ARG_PLAN_GEOCODER_BASE_URL, ARG_PLAN_LOCATION,
    ARG_PLAN_MAX_CONCURRENT_REQUESTS, ARG_PLAN_OUTPUT, ARG_PLAN_REQUEST, ARG_PLAN_START,
    ARG_PLAN_STRATEGY, ARG_PLAN_TIMEOUT_SECS, CliError, ENV_PLAN_DESTINATION, ENV_PLAN_START,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve postcodes through a postcodes.io compatible \
                 geocoder and print them in nearest-neighbour visiting \
                 order. Locations, start and destination may come from a \
                 JSON-encoded PlanRequest file, flags, configuration files, \
                 or environment variables; flags win over the file.",
    about = "Plan a visiting order for a set of postcodes"
)]
#[ortho_config(prefix = "POSTROUTE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a PlanRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Location to visit; repeat the flag for each postcode.
    #[arg(long = ARG_PLAN_LOCATION, value_name = "postcode")]
    #[serde(default)]
    pub(crate) locations: Option<Vec<String>>,
    /// Postcode the route starts from.
    #[arg(long = ARG_PLAN_START, value_name = "postcode")]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Postcode the route ends at.
    #[arg(long = ARG_PLAN_DESTINATION, value_name = "postcode")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Base URL for the geocoder (e.g. "https://api.postcodes.io").
    #[arg(long = ARG_PLAN_GEOCODER_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoder_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long = ARG_PLAN_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Maximum number of geocoder requests in flight.
    #[arg(long = ARG_PLAN_MAX_CONCURRENT_REQUESTS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_concurrent_requests: Option<usize>,
    /// Ordering heuristic: `nearest-neighbour` (default) or `radial`.
    #[arg(long = ARG_PLAN_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
    /// Write the route to this file instead of stdout.
    #[arg(long = ARG_PLAN_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct PlanConfig {
    /// Optional JSON request file supplying defaults for the fields below.
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Locations from flags; replaces the file's list when present.
    pub(crate) locations: Option<Vec<String>>,
    pub(crate) start: Option<String>,
    pub(crate) destination: Option<String>,
    pub(crate) strategy: OrderingStrategy,
    pub(crate) geocoder: HttpGeocodeResolverConfig,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        match &self.request_path {
            Some(path) => Self::require_existing(path, ARG_PLAN_REQUEST),
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

    /// Merge flag values over the request file into a complete request.
    pub(crate) fn build_request(&self) -> Result<PlanRequest, CliError> {
        let file = match &self.request_path {
            Some(path) => load_plan_request(path)?,
            None => PlanRequest::default(),
        };

        let locations = self.locations.clone().unwrap_or(file.locations);
        let start = self.start.clone().unwrap_or(file.start);
        if start.trim().is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_PLAN_START,
                env: ENV_PLAN_START,
            });
        }
        let destination = self.destination.clone().unwrap_or(file.destination);
        if destination.trim().is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_PLAN_DESTINATION,
                env: ENV_PLAN_DESTINATION,
            });
        }

        Ok(PlanRequest {
            locations,
            start,
            destination,
        })
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let strategy = args
            .strategy
            .as_deref()
            .map(parse_strategy)
            .transpose()?
            .unwrap_or_default();

        let mut geocoder = HttpGeocodeResolverConfig::default();
        if let Some(base_url) = args.geocoder_base_url {
            geocoder.base_url = base_url;
        }
        if let Some(secs) = args.timeout_secs {
            geocoder = geocoder.with_timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = args.max_concurrent_requests {
            geocoder = geocoder.with_max_concurrent_requests(limit);
        }

        Ok(Self {
            request_path: args.request_path,
            locations: args.locations,
            start: args.start,
            destination: args.destination,
            strategy,
            geocoder,
            output: args.output,
        })
    }
}

fn parse_strategy(name: &str) -> Result<OrderingStrategy, CliError> {
    match name.trim() {
        "nearest-neighbour" | "nearest-neighbor" => Ok(OrderingStrategy::NearestNeighbour),
        "radial" => Ok(OrderingStrategy::Radial),
        other => Err(CliError::UnknownStrategy {
            name: other.to_owned(),
        }),
    }
}

/// JSON document written by the `plan` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanOutput {
    /// Identifiers in visiting order.
    pub(crate) route: Vec<String>,
    /// Great-circle length of the route in kilometres.
    pub(crate) distance_km: f64,
}

impl From<&Route> for PlanOutput {
    fn from(route: &Route) -> Self {
        Self {
            route: route.identifiers(),
            distance_km: route.total_distance_km(),
        }
    }
}

/// Builds a geocode resolver for the current plan invocation.
pub(crate) trait PlanResolverBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn GeocodeResolver>, CliError>;
}

pub(crate) struct HttpResolverBuilder;

impl PlanResolverBuilder for HttpResolverBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn GeocodeResolver>, CliError> {
        let resolver = HttpGeocodeResolver::with_config(config.geocoder.clone()).map_err(
            |source| CliError::BuildGeocoder {
                base_url: config.geocoder.base_url.clone(),
                source,
            },
        )?;
        Ok(Box::new(resolver))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &HttpResolverBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanResolverBuilder,
    stdout: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let output = execute_plan(&config, builder)?;
    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            write_plan_output(&mut file, &output)
        }
        None => write_plan_output(stdout, &output),
    }
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanResolverBuilder,
) -> Result<PlanOutput, CliError> {
    let request = config.build_request()?;
    let resolver = builder.build(config)?;
    let planner = RoutePlanner::with_strategy(resolver, config.strategy);
    let route = planner.plan(&request)?;
    let output = PlanOutput::from(&route);
    log::info!(
        "route visits {} stops over {:.2} km",
        output.route.len(),
        output.distance_km
    );
    Ok(output)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(crate) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_plan_output(writer: &mut dyn Write, output: &PlanOutput) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerialisePlanOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer.write_all(b"\n").map_err(CliError::WritePlanOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
