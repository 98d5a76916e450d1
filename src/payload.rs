//! Payload loading
//!
//! Reads raw API payloads from files or stdin and picks the items to hydrate
//! out of a response envelope.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Serialization format of a payload or of CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Guess from the file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse payload text
pub fn parse(content: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => serde_json::from_str(content).context("Failed to parse JSON payload"),
        Format::Yaml => serde_yaml::from_str(content).context("Failed to parse YAML payload"),
    }
}

/// Load a payload from `path`, or from stdin when the path is `None` or `-`.
pub fn load(path: Option<&Path>, format: Option<Format>) -> Result<Value> {
    match path {
        Some(path) if path != Path::new("-") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            tracing::debug!("loaded {} bytes from {}", content.len(), path.display());
            parse(&content, format.unwrap_or_else(|| Format::from_path(path)))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read payload from stdin")?;
            parse(&content, format.unwrap_or_default())
        }
    }
}

/// Extract a value using a dot-notation path; numeric segments index arrays.
/// An empty path returns the whole payload, a missing one `Null`.
pub fn select<'a>(payload: &'a Value, path: &str) -> &'a Value {
    const NULL: &Value = &Value::Null;

    if path.is_empty() {
        return payload;
    }

    let mut current = payload;
    for part in path.split('.') {
        let next = match current {
            Value::Array(items) => part.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => current.get(part),
        };
        current = match next {
            Some(v) => v,
            None => return NULL,
        };
    }
    current
}

/// A sequence yields its elements; anything else is a single item.
pub fn items(payload: &Value) -> Vec<&Value> {
    match payload {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Render plain data for output
pub fn render(value: &Value, format: Format, pretty: bool) -> Result<String> {
    match format {
        Format::Json if pretty => {
            serde_json::to_string_pretty(value).context("Failed to render JSON")
        }
        Format::Json => serde_json::to_string(value).context("Failed to render JSON"),
        Format::Yaml => serde_yaml::to_string(value).context("Failed to render YAML"),
    }
}
