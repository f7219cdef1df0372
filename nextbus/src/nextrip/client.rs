//! NexTrip HTTP client.
//!
//! Issues one GET per call and converts the JSON response to domain types.
//! There is no caching and no retry: a failed request is returned as-is.

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Departure, Direction, Route, RouteId, Stop, StopId};
use crate::inquiry::TransitApi;

use super::convert::{convert_departures, convert_directions, convert_routes, convert_stops};
use super::error::TransitError;
use super::types::{DepartureDto, DirectionDto, RouteDto, StopDto};

/// Default base URL for the NexTrip API.
const DEFAULT_BASE_URL: &str = "http://svc.metrotransit.org/NexTrip";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the NexTrip client.
#[derive(Debug, Clone)]
pub struct NexTripConfig {
    /// Base URL for the API (defaults to production NexTrip)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Whether to honor `HTTP_PROXY`-style environment variables
    pub system_proxy: bool,
}

impl NexTripConfig {
    /// Create a config pointing at production NexTrip.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            system_proxy: true,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Connect directly, ignoring proxy environment variables.
    pub fn without_system_proxy(mut self) -> Self {
        self.system_proxy = false;
        self
    }
}

impl Default for NexTripConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One of the four NexTrip resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `Routes`
    Routes,
    /// `Directions/{route}`
    Directions(RouteId),
    /// `Stops/{route}/{direction}`
    Stops(RouteId, Direction),
    /// `{route}/{direction}/{stop}`
    Departures(RouteId, Direction, StopId),
}

impl Endpoint {
    /// Raw path segments relative to the API base URL.
    ///
    /// Ids are returned as the API sent them; [`NexTripClient::url`]
    /// percent-encodes each segment.
    pub fn segments(&self) -> Vec<String> {
        match self {
            Endpoint::Routes => vec!["Routes".to_string()],
            Endpoint::Directions(route) => vec!["Directions".to_string(), route.to_string()],
            Endpoint::Stops(route, direction) => vec![
                "Stops".to_string(),
                route.to_string(),
                direction.code().to_string(),
            ],
            Endpoint::Departures(route, direction, stop) => vec![
                route.to_string(),
                direction.code().to_string(),
                stop.to_string(),
            ],
        }
    }

    /// Unencoded path for logs and messages.
    pub fn path(&self) -> String {
        self.segments().join("/")
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// NexTrip API client.
#[derive(Debug, Clone)]
pub struct NexTripClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NexTripClient {
    /// Create a new NexTrip client with the given configuration.
    pub fn new(config: NexTripConfig) -> Result<Self, TransitError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| TransitError::InvalidBaseUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TransitError::InvalidBaseUrl {
                url: config.base_url,
                message: "not a hierarchical URL".to_string(),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build()?;

        Ok(Self { http, base_url })
    }

    /// Full URL for an endpoint, without the format query.
    ///
    /// Each segment is percent-encoded, so an id like "A Line" or "9/01"
    /// stays a single path segment.
    pub fn url(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base_url.clone();
        // Checked hierarchical in `new`.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(endpoint.segments());
        }
        url
    }

    /// Get all routes.
    pub async fn get_routes(&self) -> Result<Vec<Route>, TransitError> {
        let dtos: Vec<RouteDto> = self.fetch(&Endpoint::Routes).await?;
        Ok(convert_routes(dtos))
    }

    /// Get the directions a route runs in.
    pub async fn get_directions(&self, route: &RouteId) -> Result<Vec<Direction>, TransitError> {
        let dtos: Vec<DirectionDto> = self.fetch(&Endpoint::Directions(route.clone())).await?;
        Ok(convert_directions(dtos))
    }

    /// Get the stops a route serves in one direction.
    pub async fn get_stops(
        &self,
        route: &RouteId,
        direction: Direction,
    ) -> Result<Vec<Stop>, TransitError> {
        let dtos: Vec<StopDto> = self
            .fetch(&Endpoint::Stops(route.clone(), direction))
            .await?;
        Ok(convert_stops(dtos))
    }

    /// Get upcoming departures from a stop, soonest first.
    pub async fn get_departures(
        &self,
        route: &RouteId,
        direction: Direction,
        stop: &StopId,
    ) -> Result<Vec<Departure>, TransitError> {
        let endpoint = Endpoint::Departures(route.clone(), direction, stop.clone());
        let dtos: Vec<DepartureDto> = self.fetch(&endpoint).await?;
        Ok(convert_departures(dtos))
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, TransitError> {
        let url = self.url(endpoint);
        debug!(%url, "GET");

        let response = self
            .http
            .get(url.clone())
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(%url, bytes = body.len(), "response");

        serde_json::from_str(&body).map_err(|e| TransitError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl TransitApi for NexTripClient {
    async fn routes(&self) -> Result<Vec<Route>, TransitError> {
        self.get_routes().await
    }

    async fn directions(&self, route: &RouteId) -> Result<Vec<Direction>, TransitError> {
        self.get_directions(route).await
    }

    async fn stops(&self, route: &RouteId, direction: Direction) -> Result<Vec<Stop>, TransitError> {
        self.get_stops(route, direction).await
    }

    async fn departures(
        &self,
        route: &RouteId,
        direction: Direction,
        stop: &StopId,
    ) -> Result<Vec<Departure>, TransitError> {
        self.get_departures(route, direction, stop).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn route(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    /// Serve one canned HTTP response on a loopback port.
    ///
    /// Returns the base URL and a handle yielding the request line received.
    async fn serve_once(status: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            let request = String::from_utf8_lossy(&buf).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{addr}"), handle)
    }

    fn client(base_url: &str) -> NexTripClient {
        NexTripClient::new(
            NexTripConfig::new()
                .with_base_url(base_url)
                .without_system_proxy(),
        )
        .unwrap()
    }

    #[test]
    fn config_builder() {
        let config = NexTripConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5)
            .without_system_proxy();

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert!(!config.system_proxy);
    }

    #[test]
    fn config_defaults() {
        let config = NexTripConfig::default();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.system_proxy);
    }

    #[test]
    fn endpoint_paths() {
        let stop = StopId::parse("FRHI").unwrap();

        assert_eq!(Endpoint::Routes.path(), "Routes");
        assert_eq!(Endpoint::Directions(route("901")).path(), "Directions/901");
        assert_eq!(
            Endpoint::Stops(route("901"), Direction::South).path(),
            "Stops/901/1"
        );
        assert_eq!(
            Endpoint::Departures(route("901"), Direction::North, stop).path(),
            "901/4/FRHI"
        );
    }

    #[test]
    fn url_ignores_trailing_slash() {
        let client = client("http://localhost:8080/NexTrip/");
        assert_eq!(
            client.url(&Endpoint::Routes).as_str(),
            "http://localhost:8080/NexTrip/Routes"
        );
    }

    #[test]
    fn url_encodes_id_segments() {
        let client = client("http://localhost:8080/NexTrip");
        let endpoint = Endpoint::Departures(
            route("A Line"),
            Direction::North,
            StopId::parse("FR-5").unwrap(),
        );
        assert_eq!(
            client.url(&endpoint).as_str(),
            "http://localhost:8080/NexTrip/A%20Line/4/FR-5"
        );
        assert_eq!(
            client.url(&Endpoint::Directions(route("9/01"))).as_str(),
            "http://localhost:8080/NexTrip/Directions/9%2F01"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        for base in ["not a url", "mailto:ops@example.com"] {
            let err = NexTripClient::new(NexTripConfig::new().with_base_url(base)).unwrap_err();
            assert!(
                matches!(err, TransitError::InvalidBaseUrl { ref url, .. } if url == base),
                "{base}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn fetches_routes_as_json() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"Description":"METRO Blue Line","ProviderID":"8","Route":"901"}]"#,
        )
        .await;

        let routes = client(&base).get_routes().await.unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id, route("901"));
        assert_eq!(routes[0].description, "METRO Blue Line");
        assert_eq!(
            server.await.unwrap(),
            "GET /Routes?format=json HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let (base, server) = serve_once("503 Service Unavailable", "down for maintenance").await;

        let err = client(&base)
            .get_stops(&route("5"), Direction::North)
            .await
            .unwrap_err();

        match err {
            TransitError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("expected API error, got {other:?}"),
        }
        assert_eq!(
            server.await.unwrap(),
            "GET /Stops/5/4?format=json HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn spaced_route_id_is_sent_encoded() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"Text":"Franklin Ave & 5th","Value":"FR-5"}]"#,
        )
        .await;

        let stops = client(&base)
            .get_stops(&route("A Line"), Direction::North)
            .await
            .unwrap();

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].id.as_str(), "FR-5");
        assert_eq!(
            server.await.unwrap(),
            "GET /Stops/A%20Line/4?format=json HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let (base, _server) = serve_once("200 OK", "<ArrayOfRoute/>").await;

        let err = client(&base).get_routes().await.unwrap_err();

        match err {
            TransitError::Json { body, .. } => assert_eq!(body.as_deref(), Some("<ArrayOfRoute/>")),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_refused_is_http_error() {
        // Bind then drop to get a port nobody is listening on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let err = client(&format!("http://{addr}"))
            .get_routes()
            .await
            .unwrap_err();

        assert!(matches!(err, TransitError::Http(_)));
    }
}
