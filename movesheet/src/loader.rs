//! Sheet loading from HTTP or the local filesystem.

use std::fmt;
use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::csv;
use crate::schema::{self, SheetRecord};

/// Where a sheet or sound comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Http(String),
    File(PathBuf),
}

impl Source {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Source::Http(location.to_string())
        } else {
            Source::File(PathBuf::from(location))
        }
    }

    /// Resolves a relative resource path against a base URL or directory.
    pub fn resolve(base_url: Option<&str>, resources: &std::path::Path, relative: &str) -> Self {
        match base_url {
            Some(base) => Source::Http(format!("{}/{}", base.trim_end_matches('/'), relative)),
            None => Source::File(resources.join(relative)),
        }
    }

    /// Final path segment, for status lines ("move-sheet.csv").
    pub fn file_name(&self) -> String {
        match self {
            Source::Http(url) => url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or(url)
                .to_string(),
            Source::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Http(url) => f.write_str(url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{location} is not valid UTF-8 text")]
    Encoding { location: String },
}

impl LoadError {
    /// True when the failure came from the network rather than the disk.
    pub fn is_remote(&self) -> bool {
        matches!(self, LoadError::Request { .. } | LoadError::Status { .. })
    }
}

pub async fn load_bytes(source: &Source) -> Result<Vec<u8>, LoadError> {
    match source {
        Source::Http(url) => fetch_bytes(url).await,
        Source::File(path) => fs::read(path).await.map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        }),
    }
}

pub async fn load_text(source: &Source) -> Result<String, LoadError> {
    let bytes = load_bytes(source).await?;
    String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
        location: source.to_string(),
    })
}

/// Loads, parses and normalizes one sheet.
pub async fn load_sheet<T: SheetRecord>(source: &Source) -> Result<Vec<T>, LoadError> {
    let text = load_text(source).await?;
    Ok(schema::normalize_all(&csv::parse(&text)))
}

async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LoadError> {
    let request_error = |source| LoadError::Request {
        url: url.to_string(),
        source,
    };
    let response = http_client()
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(request_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = response.bytes().await.map_err(request_error)?;
    Ok(bytes.to_vec())
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
