//! Existence probes.
//!
//! A probe answers presence only — no body is ever fetched. Probes must be
//! free of side effects so a resolution pass can be repeated and always reach
//! the same verdict.

use std::future::Future;
use std::io;

use thiserror::Error;

/// Underlying failure of a single probe. The resolver treats these the same
/// as "does not exist for this extension" and moves on.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("filesystem error: {0}")]
    Io(#[from] io::Error),
}

/// Lightweight existence check for one candidate location.
pub trait ExistenceProbe {
    /// Whether an asset exists at `location`.
    fn exists(&self, location: &str)
    -> impl Future<Output = Result<bool, ProbeError>> + Send;
}

/// HEAD-request probe against an HTTP base.
///
/// A 2xx answer means the asset exists; any clean non-2xx answer means it
/// does not. The client is built without a request timeout — the resolver
/// imposes none, callers own deadlines.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    http: reqwest::Client,
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpProbe {
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("gatehouse/0.1")
                .build()
                .expect("reqwest client should build"),
        }
    }
}

impl ExistenceProbe for HttpProbe {
    async fn exists(&self, location: &str) -> Result<bool, ProbeError> {
        let resp = self.http.head(location).send().await?;
        Ok(resp.status().is_success())
    }
}

/// Metadata probe against a local directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl ExistenceProbe for FsProbe {
    async fn exists(&self, location: &str) -> Result<bool, ProbeError> {
        match tokio::fs::metadata(location).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ProbeError::Io(e)),
        }
    }
}

/// Probe picked from the shape of the base location: HTTP for URL bases,
/// filesystem for everything else.
#[derive(Debug, Clone)]
pub enum AutoProbe {
    Http(HttpProbe),
    Fs(FsProbe),
}

impl AutoProbe {
    #[must_use]
    pub fn for_base(base: &str) -> Self {
        if base.starts_with("http://") || base.starts_with("https://") {
            Self::Http(HttpProbe::new())
        } else {
            Self::Fs(FsProbe)
        }
    }
}

impl ExistenceProbe for AutoProbe {
    async fn exists(&self, location: &str) -> Result<bool, ProbeError> {
        match self {
            Self::Http(probe) => probe.exists(location).await,
            Self::Fs(probe) => probe.exists(location).await,
        }
    }
}
