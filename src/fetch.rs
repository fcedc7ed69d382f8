//! Thin helpers for fetching dataset files from data portals.
//!
//! No retries, no API-key management beyond a bearer header. Provenance
//! lives in the static citation table, not here.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::QaResult;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

fn client() -> QaResult<Client> {
    Ok(Client::builder().timeout(FETCH_TIMEOUT).build()?)
}

/// Download a CSV from `url` to `dest`, creating parent directories and
/// overwriting any existing file.
pub fn download_csv(url: &str, dest: &Path) -> QaResult<()> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    tracing::info!(url, dest = %dest.display(), "downloading dataset");
    let response = client()?.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    fs::write(dest, &bytes)?;
    Ok(())
}

/// GET a JSON resource from a data-portal API endpoint, with optional query
/// parameters and bearer API key.
pub fn fetch_resource(
    url: &str,
    params: &[(String, String)],
    api_key: Option<&str>,
) -> QaResult<serde_json::Value> {
    let mut request = client()?.get(url).query(params);
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }
    let response = request.send()?.error_for_status()?;
    Ok(response.json()?)
}
