//! HTTP-based `GeocodeResolver` using the postcodes.io lookup API.
//!
//! This module provides [`HttpGeocodeResolver`], an implementation of the
//! [`GeocodeResolver`] trait that resolves UK postcodes to coordinates via
//! `GET {base_url}/postcodes/{postcode}`.
//!
//! # Architecture
//!
//! The [`GeocodeResolver`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This resolver bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.
//! The runtime owned by the resolver runs a single worker thread, so its
//! handle can drive IO from any calling thread.
//! [`GeocodeResolver::resolve_all`] drives every lookup in the batch through
//! one bounded stream, so at most `max_concurrent_requests` calls are in
//! flight at once.
//!
//! # Example
//!
//! ```no_run
//! use postroute_data::geocode::HttpGeocodeResolver;
//! use postroute_core::GeocodeResolver;
//!
//! let resolver = HttpGeocodeResolver::new("https://api.postcodes.io")?;
//! let ids = vec!["BH12PE".to_owned(), "BH76HW".to_owned()];
//! for outcome in resolver.resolve_all(&ids) {
//!     println!("{outcome:?}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::future::Future;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use postroute_core::{GeocodeError, GeocodeResolver, Resolution, Waypoint};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::postcodes::LookupResponse;

/// Error type for [`HttpGeocodeResolver`] construction failures.
#[derive(Debug, Error)]
pub enum ResolverBuildError {
    /// The base URL could not be parsed.
    #[error("invalid geocoder base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The base URL cannot carry path segments, e.g. `mailto:`.
    #[error("geocoder base URL {url:?} cannot carry a path")]
    CannotBeABase {
        /// URL as configured.
        url: String,
    },
    /// `max_concurrent_requests` was zero.
    #[error("max_concurrent_requests must be at least 1")]
    ZeroConcurrency,
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default postcode lookup service.
pub const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";

/// Default user agent for geocoder requests.
pub const DEFAULT_USER_AGENT: &str = "postroute-geocode/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default bound on in-flight lookups per batch.
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

/// Configuration for [`HttpGeocodeResolver`].
#[derive(Debug, Clone)]
pub struct HttpGeocodeResolverConfig {
    /// Base URL for the lookup service (e.g., `"https://api.postcodes.io"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Maximum number of lookups in flight during `resolve_all`.
    pub max_concurrent_requests: usize,
}

impl Default for HttpGeocodeResolverConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl HttpGeocodeResolverConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the bound on concurrent lookups.
    #[must_use]
    pub fn with_max_concurrent_requests(mut self, limit: usize) -> Self {
        self.max_concurrent_requests = limit;
        self
    }
}

/// HTTP-based geocode resolver for postcodes.io compatible services.
///
/// The resolver owns one [`Client`] and one Tokio runtime, both reused for
/// every lookup.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the resolver blocks on its
/// own runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`].
///
/// A `current_thread` runtime cannot yield its only thread, so the lookup is
/// driven on the resolver's own runtime from a scoped helper thread while the
/// caller's thread waits. The caller's runtime makes no progress until the
/// lookup returns.
///
/// Dropping the resolver shuts its runtime down in the background, so it
/// may be dropped from async code.
///
/// # Lookup semantics
///
/// - HTTP 404, or a body reporting status 404, resolves to `Ok(None)`.
/// - A result with `null` coordinates (terminated or non-geographic
///   postcodes) resolves to `Ok(None)`.
/// - The returned waypoint carries the supplied identifier with surrounding
///   whitespace trimmed, not the normalised postcode from the response.
pub struct HttpGeocodeResolver {
    client: Client,
    config: HttpGeocodeResolverConfig,
    base_url: Url,
    handle: Handle,
    runtime: Option<Runtime>,
}

impl Drop for HttpGeocodeResolver {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for HttpGeocodeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeocodeResolver")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpGeocodeResolver {
    /// Create a resolver for the public postcodes.io service.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn postcodes_io() -> Result<Self, ResolverBuildError> {
        Self::with_config(HttpGeocodeResolverConfig::default())
    }

    /// Create a new resolver with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the lookup service (e.g., `"https://api.postcodes.io"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, or if the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ResolverBuildError> {
        Self::with_config(HttpGeocodeResolverConfig::new(base_url))
    }

    /// Create a new resolver with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the concurrency bound is
    /// zero, or the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpGeocodeResolverConfig) -> Result<Self, ResolverBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        if config.max_concurrent_requests == 0 {
            return Err(ResolverBuildError::ZeroConcurrency);
        }
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ResolverBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("postroute-geocode")
            .enable_all()
            .build()
            .map_err(ResolverBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            base_url,
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
        })
    }

    /// Configuration the resolver was built from.
    #[must_use]
    pub const fn config(&self) -> &HttpGeocodeResolverConfig {
        &self.config
    }

    /// Build the lookup URL for `identifier`.
    ///
    /// The identifier becomes a single percent-encoded path segment, so
    /// `"BH1 2PE"` is sent as `BH1%202PE` and a `/` cannot escape the
    /// `postcodes` collection.
    fn lookup_url(&self, identifier: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("postcodes").push(identifier);
        }
        url
    }

    /// Resolve one identifier asynchronously.
    async fn lookup(&self, identifier: &str) -> Resolution {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return Err(GeocodeError::EmptyIdentifier);
        }
        let url = self.lookup_url(trimmed);
        log::debug!("looking up {trimmed} at {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        if response.status() == StatusCode::NOT_FOUND {
            log::debug!("{trimmed} is not a known postcode");
            return Ok(None);
        }

        let body: LookupResponse = response
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .json()
            .await
            .map_err(|err| GeocodeError::ParseError {
                message: err.to_string(),
            })?;

        convert_response(trimmed, body)
    }

    /// Resolve a batch with bounded concurrency, preserving input order.
    async fn lookup_all(&self, identifiers: &[String]) -> Vec<Resolution> {
        let lookups: Vec<_> = identifiers
            .iter()
            .enumerate()
            .map(|(index, identifier)| async move { (index, self.lookup(identifier).await) })
            .collect();
        let mut outcomes: Vec<(usize, Resolution)> = stream::iter(lookups)
            .buffer_unordered(self.config.max_concurrent_requests)
            .collect()
            .await;
        outcomes.sort_unstable_by_key(|(index, _)| *index);
        outcomes.into_iter().map(|(_, outcome)| outcome).collect()
    }

    /// Run `future` to completion from synchronous code.
    fn block_on<F>(&self, future: F) -> F::Output
    where
        F: Future + Send,
        F::Output: Send,
    {
        match Handle::try_current() {
            Ok(ambient) if ambient.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| ambient.block_on(future))
            }
            // Blocking is forbidden on a thread that is inside a runtime, so
            // hand the future to a thread that is not.
            Ok(_) => std::thread::scope(|scope| {
                scope
                    .spawn(|| self.handle.block_on(future))
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            }),
            Err(_) => self.handle.block_on(future),
        }
    }

    /// Convert a reqwest error to a `GeocodeError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return GeocodeError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        GeocodeError::NetworkError {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ResolverBuildError> {
    let url = Url::parse(raw).map_err(|source| ResolverBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ResolverBuildError::CannotBeABase {
            url: raw.to_owned(),
        });
    }
    Ok(url)
}

/// Convert a decoded lookup body into a waypoint for `identifier`.
pub(super) fn convert_response(identifier: &str, response: LookupResponse) -> Resolution {
    if response.status == StatusCode::NOT_FOUND.as_u16() {
        return Ok(None);
    }
    if !response.is_ok() {
        return Err(GeocodeError::ServiceError {
            status: response.status,
            message: response.error.unwrap_or_default(),
        });
    }

    let result = response.result.ok_or_else(|| GeocodeError::ParseError {
        message: "lookup response missing result".to_owned(),
    })?;
    let Some((latitude, longitude)) = result.coordinates() else {
        log::debug!("{identifier} ({}) has no coordinates", result.postcode);
        return Ok(None);
    };

    Waypoint::new(identifier, latitude, longitude)
        .map(Some)
        .map_err(|source| GeocodeError::InvalidCoordinate {
            identifier: identifier.to_owned(),
            source,
        })
}

impl GeocodeResolver for HttpGeocodeResolver {
    /// Look up a single postcode.
    ///
    /// # Runtime requirements
    ///
    /// Inside a `current_thread` Tokio runtime the call blocks that runtime
    /// until the lookup completes; see the type-level docs.
    fn resolve(&self, identifier: &str) -> Resolution {
        self.block_on(self.lookup(identifier))
    }

    /// Look up every identifier, at most `max_concurrent_requests` at a time.
    fn resolve_all(&self, identifiers: &[String]) -> Vec<Resolution> {
        if identifiers.is_empty() {
            return Vec::new();
        }
        log::debug!(
            "resolving {} identifiers with up to {} concurrent requests",
            identifiers.len(),
            self.config.max_concurrent_requests
        );
        self.block_on(self.lookup_all(identifiers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::postcodes::PostcodeResult;
    use postroute_core::WaypointError;
    use rstest::{fixture, rstest};
    use std::collections::HashMap;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::Arc;
    use std::thread;

    const BH12PE_BODY: &str =
        r#"{"status":200,"result":{"postcode":"BH1 2PE","latitude":50.7209,"longitude":-1.8806}}"#;
    const BH76HW_BODY: &str =
        r#"{"status":200,"result":{"postcode":"BH7 6HW","latitude":50.76,"longitude":-2.0}}"#;
    const NOT_FOUND_BODY: &str = r#"{"status":404,"error":"Postcode not found"}"#;

    /// Canned answer for one postcode served by [`spawn_geocoder`].
    struct Reply {
        status: u16,
        body: &'static str,
        delay: Duration,
    }

    const fn reply(status: u16, body: &'static str, delay_ms: u64) -> Reply {
        Reply {
            status,
            body,
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Serve `replies`, keyed by the last path segment, on a loopback port and
    /// return its base URL. Unknown postcodes get a 404.
    fn spawn_geocoder(replies: HashMap<&'static str, Reply>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let address = listener.local_addr().expect("listener address");
        let replies = Arc::new(replies);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let replies = Arc::clone(&replies);
                thread::spawn(move || answer(stream, &replies));
            }
        });
        format!("http://{address}")
    }

    fn answer(mut stream: TcpStream, replies: &HashMap<&'static str, Reply>) {
        let mut request = Vec::new();
        let mut buffer = [0_u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = stream.read(&mut buffer).expect("read request");
            if read == 0 {
                return;
            }
            request.extend_from_slice(&buffer[..read]);
        }
        let head = String::from_utf8_lossy(&request);
        let path = head.split_whitespace().nth(1).unwrap_or_default();
        let postcode = path.rsplit('/').next().unwrap_or_default();
        let (status, body, delay) = replies.get(postcode).map_or(
            (404, NOT_FOUND_BODY, Duration::ZERO),
            |reply| (reply.status, reply.body, reply.delay),
        );

        thread::sleep(delay);
        let response = format!(
            "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response");
    }

    fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
        let address = listener.local_addr().expect("listener address");
        drop(listener);
        format!("http://{address}")
    }

    fn bh12pe() -> Waypoint {
        Waypoint::new("BH12PE", 50.7209, -1.8806).expect("valid waypoint")
    }

    #[fixture]
    fn resolver() -> HttpGeocodeResolver {
        HttpGeocodeResolver::new("http://geocoder.example.com").expect("resolver should build")
    }

    fn found(latitude: Option<f64>, longitude: Option<f64>) -> LookupResponse {
        LookupResponse {
            status: 200,
            result: Some(PostcodeResult {
                postcode: "BH1 2PE".to_owned(),
                latitude,
                longitude,
            }),
            error: None,
        }
    }

    #[rstest]
    #[case("http://geocoder.example.com", "http://geocoder.example.com/postcodes/BH12PE")]
    #[case("http://geocoder.example.com/", "http://geocoder.example.com/postcodes/BH12PE")]
    #[case("http://localhost:8000/api", "http://localhost:8000/api/postcodes/BH12PE")]
    #[case("http://localhost:8000/api/", "http://localhost:8000/api/postcodes/BH12PE")]
    fn lookup_url_appends_postcode_segment(#[case] base: &str, #[case] expected: &str) {
        let resolver = HttpGeocodeResolver::new(base).expect("resolver should build");

        assert_eq!(resolver.lookup_url("BH12PE").as_str(), expected);
    }

    #[rstest]
    fn lookup_url_percent_encodes_identifier(resolver: HttpGeocodeResolver) {
        let url = resolver.lookup_url("BH1 2PE/../x");

        assert_eq!(
            url.as_str(),
            "http://geocoder.example.com/postcodes/BH1%202PE%2F..%2Fx"
        );
    }

    #[rstest]
    fn convert_response_handles_success() {
        let waypoint = convert_response("bh12pe", found(Some(50.7209), Some(-1.8806)))
            .expect("should convert")
            .expect("should be found");

        assert_eq!(waypoint.id(), "bh12pe");
        assert_eq!(waypoint.latitude(), 50.7209);
        assert_eq!(waypoint.longitude(), -1.8806);
    }

    #[rstest]
    #[case(None, Some(-1.8806))]
    #[case(Some(50.7209), None)]
    #[case(None, None)]
    fn convert_response_treats_missing_coordinates_as_not_found(
        #[case] latitude: Option<f64>,
        #[case] longitude: Option<f64>,
    ) {
        let outcome = convert_response("GY11AA", found(latitude, longitude));

        assert_eq!(outcome, Ok(None));
    }

    #[rstest]
    fn convert_response_treats_body_404_as_not_found() {
        let response = LookupResponse {
            status: 404,
            result: None,
            error: Some("Postcode not found".to_owned()),
        };

        assert_eq!(convert_response("ZZ99ZZ", response), Ok(None));
    }

    #[rstest]
    fn convert_response_handles_service_error() {
        let response = LookupResponse {
            status: 400,
            result: None,
            error: Some("Invalid postcode".to_owned()),
        };

        let err = convert_response("???", response).expect_err("should fail");

        match err {
            GeocodeError::ServiceError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid postcode");
            }
            _ => panic!("expected ServiceError, got {err:?}"),
        }
    }

    #[rstest]
    fn convert_response_handles_missing_result() {
        let response = LookupResponse {
            status: 200,
            result: None,
            error: None,
        };

        let err = convert_response("BH12PE", response).expect_err("should fail");

        assert!(matches!(err, GeocodeError::ParseError { .. }));
    }

    #[rstest]
    fn convert_response_rejects_out_of_range_coordinates() {
        let err = convert_response("BH12PE", found(Some(95.0), Some(0.0))).expect_err("should fail");

        assert_eq!(
            err,
            GeocodeError::InvalidCoordinate {
                identifier: "BH12PE".to_owned(),
                source: WaypointError::LatitudeOutOfRange(95.0),
            }
        );
    }

    #[rstest]
    fn blank_identifier_is_rejected_without_a_request(resolver: HttpGeocodeResolver) {
        assert_eq!(resolver.resolve("  "), Err(GeocodeError::EmptyIdentifier));
    }

    #[rstest]
    fn resolve_all_preserves_input_order_for_blank_identifiers(resolver: HttpGeocodeResolver) {
        let outcomes = resolver.resolve_all(&[String::new(), " ".to_owned()]);

        assert_eq!(
            outcomes,
            vec![
                Err(GeocodeError::EmptyIdentifier),
                Err(GeocodeError::EmptyIdentifier),
            ]
        );
    }

    #[rstest]
    fn resolve_all_maps_statuses_in_input_order() {
        // Earlier identifiers answer later, so completion order is reversed.
        let base_url = spawn_geocoder(HashMap::from([
            ("BH12PE", reply(200, BH12PE_BODY, 300)),
            ("ZZ99ZZ", reply(404, NOT_FOUND_BODY, 200)),
            (
                "ERR500",
                reply(500, r#"{"status":500,"error":"Internal server error"}"#, 100),
            ),
            ("BH76HW", reply(200, BH76HW_BODY, 0)),
        ]));
        let config = HttpGeocodeResolverConfig::new(base_url).with_max_concurrent_requests(4);
        let resolver = HttpGeocodeResolver::with_config(config).expect("resolver should build");
        assert_eq!(resolver.config().max_concurrent_requests, 4);
        let identifiers = ["BH12PE", "ZZ99ZZ", "ERR500", "BH76HW"].map(str::to_owned);

        let outcomes = resolver.resolve_all(&identifiers);

        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0], Ok(Some(bh12pe())));
        assert_eq!(outcomes[1], Ok(None));
        assert!(
            matches!(
                &outcomes[2],
                Err(GeocodeError::HttpError { status: 500, url, .. }) if url.ends_with("/postcodes/ERR500")
            ),
            "expected HttpError 500, got {:?}",
            outcomes[2]
        );
        assert_eq!(
            outcomes[3],
            Ok(Some(Waypoint::new("BH76HW", 50.76, -2.0).expect("valid waypoint")))
        );
    }

    #[rstest]
    fn resolve_trims_identifier_before_lookup_and_in_result() {
        let base_url = spawn_geocoder(HashMap::from([("BH12PE", reply(200, BH12PE_BODY, 0))]));
        let resolver = HttpGeocodeResolver::new(base_url).expect("resolver should build");

        assert_eq!(resolver.resolve("  BH12PE "), Ok(Some(bh12pe())));
    }

    #[rstest]
    fn unreachable_server_is_network_error() {
        let resolver =
            HttpGeocodeResolver::new(unreachable_base_url()).expect("resolver should build");

        let outcome = resolver.resolve("BH12PE");

        assert!(
            matches!(outcome, Err(GeocodeError::NetworkError { .. })),
            "expected NetworkError, got {outcome:?}"
        );
    }

    #[tokio::test]
    async fn resolve_inside_current_thread_runtime_returns_error() {
        let resolver =
            HttpGeocodeResolver::new(unreachable_base_url()).expect("resolver should build");

        let outcome = resolver.resolve("BH12PE");

        assert!(
            matches!(outcome, Err(GeocodeError::NetworkError { .. })),
            "expected NetworkError, got {outcome:?}"
        );
    }

    #[tokio::test]
    async fn resolve_inside_current_thread_runtime_reaches_server() {
        let base_url = spawn_geocoder(HashMap::from([("BH12PE", reply(200, BH12PE_BODY, 0))]));
        let resolver = HttpGeocodeResolver::new(base_url).expect("resolver should build");

        assert_eq!(resolver.resolve("BH12PE"), Ok(Some(bh12pe())));
        assert_eq!(resolver.resolve("ZZ99ZZ"), Ok(None));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn resolve_inside_multi_thread_runtime_reaches_server() {
        let base_url = spawn_geocoder(HashMap::from([("BH12PE", reply(200, BH12PE_BODY, 0))]));
        let resolver = HttpGeocodeResolver::new(base_url).expect("resolver should build");

        let outcomes = resolver.resolve_all(&["ZZ99ZZ".to_owned(), "BH12PE".to_owned()]);

        assert_eq!(outcomes, vec![Ok(None), Ok(Some(bh12pe()))]);
    }

    #[rstest]
    fn resolve_all_of_nothing_is_empty(resolver: HttpGeocodeResolver) {
        assert!(resolver.resolve_all(&[]).is_empty());
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:geocoder@example.com")]
    fn rejects_unusable_base_url(#[case] base: &str) {
        let err = HttpGeocodeResolver::new(base).expect_err("should fail");

        assert!(matches!(
            err,
            ResolverBuildError::InvalidBaseUrl { .. } | ResolverBuildError::CannotBeABase { .. }
        ));
    }

    #[rstest]
    fn rejects_zero_concurrency() {
        let config = HttpGeocodeResolverConfig::default().with_max_concurrent_requests(0);

        let err = HttpGeocodeResolver::with_config(config).expect_err("should fail");

        assert!(matches!(err, ResolverBuildError::ZeroConcurrency));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpGeocodeResolverConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0")
            .with_max_concurrent_requests(2);

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.max_concurrent_requests, 2);
    }

    #[rstest]
    fn default_config_targets_postcodes_io() {
        let config = HttpGeocodeResolverConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.max_concurrent_requests, 8);
    }
}
