//! Seed loading.
//!
//! The seed is the bootstrap document used once, when the durable store holds
//! no collection yet. It is a JSON array of `{title, url, starred}` objects;
//! ids are assigned here, at load time.

use crate::models::{LinkId, LinkInput, LinkRecord};
use crate::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::instrument;

/// A place the bootstrap document can be fetched from.
pub trait SeedSource: Send + Sync {
    /// Fetches and parses the bootstrap document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedLoad`] on any retrieval or parse failure.
    fn fetch(&self) -> Result<Vec<LinkInput>>;

    /// Returns the URL or path of the document, for logs and errors.
    fn location(&self) -> String;
}

/// HTTP timeouts for seed retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHttpConfig {
    /// Request timeout in milliseconds (0 = none).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 = none).
    pub connect_timeout_ms: u64,
}

impl Default for SeedHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
        }
    }
}

/// Seed source backed by an HTTP(S) URL.
pub struct HttpSeedSource {
    url: String,
    /// The client, or why it could not be built. A build failure surfaces
    /// from [`SeedSource::fetch`] so startup degrades instead of aborting.
    client: std::result::Result<reqwest::blocking::Client, String>,
}

impl HttpSeedSource {
    /// Creates a source for `url` with the given timeouts.
    #[must_use]
    pub fn new(url: impl Into<String>, config: SeedHttpConfig) -> Self {
        let client = build_http_client(config).map_err(|e| {
            tracing::warn!(error = %e, "Failed to build seed HTTP client");
            e.to_string()
        });
        Self {
            url: url.into(),
            client,
        }
    }

    fn seed_error(&self, cause: impl Into<String>) -> Error {
        Error::SeedLoad {
            location: self.url.clone(),
            cause: cause.into(),
        }
    }
}

impl SeedSource for HttpSeedSource {
    fn fetch(&self) -> Result<Vec<LinkInput>> {
        let client = self
            .client
            .as_ref()
            .map_err(|cause| self.seed_error(cause.as_str()))?;

        let response = client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| self.seed_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.seed_error(format!("server returned status: {status}")));
        }

        let body = response
            .text()
            .map_err(|e| self.seed_error(e.to_string()))?;

        parse_seed_document(&self.url, &body)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Builds a blocking HTTP client with configured timeouts.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the client cannot be built, for
/// example when the TLS backend fails to initialise.
pub fn build_http_client(config: SeedHttpConfig) -> Result<reqwest::blocking::Client> {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().map_err(|e| Error::OperationFailed {
        operation: "build_seed_http_client".to_string(),
        cause: e.to_string(),
    })
}

/// Seed source backed by a local file.
#[derive(Debug, Clone)]
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeedSource for FileSeedSource {
    fn fetch(&self) -> Result<Vec<LinkInput>> {
        let body = std::fs::read_to_string(&self.path).map_err(|e| Error::SeedLoad {
            location: self.location(),
            cause: e.to_string(),
        })?;

        parse_seed_document(&self.location(), &body)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Seed source with a fixed outcome, for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticSeedSource {
    outcome: std::result::Result<Vec<LinkInput>, String>,
}

impl StaticSeedSource {
    /// Creates a source that always yields `inputs`.
    #[must_use]
    pub const fn new(inputs: Vec<LinkInput>) -> Self {
        Self { outcome: Ok(inputs) }
    }

    /// Creates a source that always fails with `cause`.
    #[must_use]
    pub fn failing(cause: impl Into<String>) -> Self {
        Self {
            outcome: Err(cause.into()),
        }
    }
}

impl Default for StaticSeedSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SeedSource for StaticSeedSource {
    fn fetch(&self) -> Result<Vec<LinkInput>> {
        self.outcome.clone().map_err(|cause| Error::SeedLoad {
            location: self.location(),
            cause,
        })
    }

    fn location(&self) -> String {
        "static".to_string()
    }
}

/// Parses a bootstrap document body.
///
/// Unknown fields (including any `id`) are ignored and a missing `starred`
/// defaults to `false`.
///
/// # Errors
///
/// Returns [`Error::SeedLoad`] if the body is not a JSON array of link inputs.
pub fn parse_seed_document(location: &str, body: &str) -> Result<Vec<LinkInput>> {
    serde_json::from_str(body).map_err(|e| Error::SeedLoad {
        location: location.to_string(),
        cause: format!("malformed seed document: {e}"),
    })
}

/// Picks a seed source for a configured location.
///
/// `http://` and `https://` locations use [`HttpSeedSource`]; anything else
/// is a file path, with an optional `file://` prefix.
#[must_use]
pub fn source_for_location(location: &str, http: SeedHttpConfig) -> Box<dyn SeedSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSeedSource::new(location, http))
    } else {
        let path = location.strip_prefix("file://").unwrap_or(location);
        Box::new(FileSeedSource::new(path))
    }
}

/// Fetches the seed and turns it into identified records.
pub struct SeedLoader {
    source: Box<dyn SeedSource>,
}

impl SeedLoader {
    /// Creates a loader over `source`.
    #[must_use]
    pub fn new(source: Box<dyn SeedSource>) -> Self {
        Self { source }
    }

    /// Returns the location of the seed document.
    #[must_use]
    pub fn location(&self) -> String {
        self.source.location()
    }

    /// Fetches the seed and assigns a fresh id to every record.
    ///
    /// Document order is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedLoad`] if the document cannot be fetched or parsed.
    #[instrument(skip(self), fields(location = %self.source.location()))]
    pub fn fetch_seed(&self) -> Result<Vec<LinkRecord>> {
        let result = self.source.fetch();

        match result {
            Ok(inputs) => {
                metrics::counter!("seed_loads_total", "status" => "success").increment(1);
                tracing::info!(count = inputs.len(), "Fetched seed document");
                Ok(inputs
                    .into_iter()
                    .map(|input| LinkRecord::from_input(LinkId::generate(), input))
                    .collect())
            },
            Err(e) => {
                metrics::counter!("seed_loads_total", "status" => "error").increment(1);
                tracing::error!(error = %e, "Seed load failed");
                Err(e)
            },
        }
    }
}
