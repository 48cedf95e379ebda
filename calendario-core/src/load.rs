//! Fetching and decoding the feed.
//!
//! Loading is the only asynchronous step. A failed load is not fatal: callers
//! get an empty snapshot together with the error to surface.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use encoding_rs::{Encoding, WINDOWS_1252};
use tracing::{info, warn};
use url::Url;

use crate::error::{CalendarioError, CalendarioResult};
use crate::parse::{ParseOutcome, parse};
use crate::session::Snapshot;

/// Where a feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(Url),
}

impl FromStr for Source {
    type Err = CalendarioError;

    /// `http://` and `https://` are fetched, anything else is a local path
    /// (`~` expanded).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CalendarioError::InvalidSource(s.to_string()));
        }

        if s.starts_with("http://") || s.starts_with("https://") {
            let url = Url::parse(s).map_err(|e| CalendarioError::InvalidSource(format!("{s}: {e}")))?;
            return Ok(Source::Url(url));
        }

        Ok(Source::Path(PathBuf::from(shellexpand::tilde(s).into_owned())))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}

/// How raw bytes turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            encoding: WINDOWS_1252,
        }
    }
}

impl LoadOptions {
    /// Options for a WHATWG encoding label such as `windows-1252` or `utf-8`.
    pub fn with_encoding_label(label: &str) -> CalendarioResult<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| CalendarioError::UnknownEncoding(label.to_string()))?;

        Ok(LoadOptions { encoding })
    }
}

/// Result of a non-fatal load.
#[derive(Debug)]
pub struct Loaded {
    pub snapshot: Snapshot,
    /// Why the snapshot is empty, when it is empty because of a failure
    pub error: Option<CalendarioError>,
}

/// Read the raw bytes behind `source`.
pub async fn fetch(source: &Source) -> CalendarioResult<Vec<u8>> {
    match source {
        Source::Path(path) => Ok(tokio::fs::read(path).await?),
        Source::Url(url) => {
            let response = reqwest::get(url.clone()).await?.error_for_status()?;
            Ok(response.bytes().await?.to_vec())
        }
    }
}

/// Decode bytes with `encoding`; a byte-order mark overrides it.
pub fn decode(bytes: &[u8], encoding: &'static Encoding) -> CalendarioResult<String> {
    let (text, used, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(CalendarioError::Decode(used.name().to_string()));
    }

    Ok(text.into_owned())
}

/// Fetch, decode and parse. Fails as a whole on I/O or decoding errors.
pub async fn try_load(source: &Source, options: &LoadOptions) -> CalendarioResult<ParseOutcome> {
    let bytes = fetch(source).await?;
    let text = decode(&bytes, options.encoding)?;
    Ok(parse(&text))
}

/// Load `source`, degrading to an empty snapshot on failure.
pub async fn load(source: &Source, options: &LoadOptions) -> Loaded {
    match try_load(source, options).await {
        Ok(outcome) => {
            let stats = outcome.stats;
            info!(
                source = %source,
                events = stats.accepted,
                skipped = stats.skipped,
                hidden = stats.hidden,
                invalid_dates = stats.invalid_dates,
                "loaded calendar feed"
            );

            Loaded {
                snapshot: Snapshot::from_outcome(outcome, source),
                error: None,
            }
        }
        Err(e) => {
            warn!(source = %source, error = %e, "could not load calendar feed");

            Loaded {
                snapshot: Snapshot::empty(),
                error: Some(e),
            }
        }
    }
}
