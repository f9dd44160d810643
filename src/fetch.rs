//! HTTP fetching behind a trait seam
//!
//! The core never talks to the network directly; it goes through
//! [`Fetcher`] so sessions can run against a scripted implementation in
//! tests. [`HttpFetcher`] is the production implementation, built on ureq.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{CraftTuiError, Result};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("crafttui/", env!("CARGO_PKG_VERSION"));

/// Retrieval capability required by the session.
///
/// `progress` receives cumulative bytes downloaded and the total size as
/// reported by the transport; total is 0 when the server did not say.
pub trait Fetcher {
    /// Fetch a URL into memory as text.
    fn fetch_text(&self, url: &str) -> Result<String>;

    /// Stream a URL to a local file, reporting progress as bytes arrive.
    fn fetch_to_file(
        &self,
        url: &str,
        path: &Path,
        progress: &mut dyn FnMut(u64, u64),
    ) -> Result<()>;
}

/// Blocking HTTP fetcher. HTTP errors (4xx/5xx) and transport failures
/// both surface as fetch errors; retry policy is the caller's concern.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().redirects(8).build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| CraftTuiError::fetch(format!("could not fetch '{url}': {e}")))?;
        response
            .into_string()
            .map_err(|e| CraftTuiError::fetch(format!("could not read '{url}': {e}")))
    }

    fn fetch_to_file(
        &self,
        url: &str,
        path: &Path,
        progress: &mut dyn FnMut(u64, u64),
    ) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let response = self
            .agent
            .get(url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| CraftTuiError::fetch(format!("could not fetch '{url}': {e}")))?;
        let total: u64 = response
            .header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let mut reader = response.into_reader();
        let mut file = fs::File::create(path)?;
        let mut buffer = [0u8; 16 * 1024];
        let mut received: u64 = 0;
        loop {
            let n = reader.read(&mut buffer)?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n])?;
            received += n as u64;
            progress(received, total);
        }
        file.flush()?;
        Ok(())
    }
}
