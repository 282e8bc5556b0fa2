//! Options file loading.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info};

use crate::schema::Options;

/// Load and parse options from a YAML (or JSON) file.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_options(path: &Path) -> Result<Options> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Options file does not exist; using defaults");
        return Ok(Options::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read options file: {}", path.display()))?;

    let options = Options::from_yaml_str(&raw)
        .with_context(|| format!("Failed to parse options YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded logger options");
    Ok(options)
}

impl Options {
    /// Parse options from a YAML document. An empty document yields defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Options> {
        if raw.trim().is_empty() {
            return Ok(Options::default());
        }
        serde_yaml::from_str(raw).context("Invalid options document")
    }
}
