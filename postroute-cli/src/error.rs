//! Error types emitted by the Postroute CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use postroute_core::PlanError;
use postroute_data::geocode::ResolverBuildError;
use thiserror::Error;

/// Errors emitted by the Postroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after merging flags and the request file.
    #[error("missing {field} (set --{field}, {env} or the request file)")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The ordering strategy name is not recognised.
    #[error("unknown strategy {name:?} (expected nearest-neighbour or radial)")]
    UnknownStrategy {
        /// Name as supplied.
        name: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name of the path option.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name of the path option.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name of the path option.
        field: &'static str,
        /// Path as supplied.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        /// Request file path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the geocode resolver failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        /// Configured service URL.
        base_url: String,
        /// Construction failure.
        #[source]
        source: ResolverBuildError,
    },
    /// Planning the route failed.
    #[error("route planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Serialising the planned route failed.
    #[error("failed to serialise route: {0}")]
    SerialisePlanOutput(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        /// Output file path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Writing the planned route failed.
    #[error("failed to write route: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
