use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GrabError, Result};

/// Report page fetched when no URL is configured.
pub const DEFAULT_REPORT_URL: &str = "https://cifrhs.salud.gob.mx/site1/enarm/reportes_academicos.html";

/// Heading asserted visible before any link is clicked.
pub const DEFAULT_REPORT_HEADING: &str =
	"Resultados de la Evaluación Nacional de Aspirantes a Residencias Médicas 2023";

/// Fully owned download-flow configuration.
///
/// This type is the stable handoff between the CLI (or a JSON config file)
/// and the flow/session internals. Absent file keys keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrabConfig {
	/// Page holding the report table.
	pub url: String,
	/// Heading that must be visible before links are collected.
	pub expected_heading: String,
	/// Pause after each click, giving the download time to start.
	pub download_wait_ms: u64,
	/// Whether the browser launches headless.
	pub headless: bool,
	/// Upper bound on the heading visibility wait.
	pub heading_timeout_ms: u64,
	/// Upper bound on page navigation.
	pub nav_timeout_ms: u64,
	/// Explicit Chrome/Chromium executable; autodetected when unset.
	pub chrome_path: Option<PathBuf>,
}

impl Default for GrabConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_REPORT_URL.to_string(),
			expected_heading: DEFAULT_REPORT_HEADING.to_string(),
			download_wait_ms: 1_000,
			headless: true,
			heading_timeout_ms: 5_000,
			nav_timeout_ms: 30_000,
			chrome_path: None,
		}
	}
}

impl GrabConfig {
	/// Loads configuration from a JSON file.
	pub fn from_file(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)
			.map_err(|e| GrabError::Config(format!("{}: {e}", path.display())))?;
		serde_json::from_str(&raw).map_err(|e| GrabError::Config(format!("{}: {e}", path.display())))
	}
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::TempDir;

	use super::*;

	#[test]
	fn defaults_target_the_enarm_report_page() {
		let config = GrabConfig::default();
		assert_eq!(config.url, DEFAULT_REPORT_URL);
		assert_eq!(config.expected_heading, DEFAULT_REPORT_HEADING);
		assert_eq!(config.download_wait_ms, 1_000);
		assert!(config.headless);
	}

	#[test]
	fn from_file_errors_for_missing_file() {
		let err = GrabConfig::from_file(Path::new("/definitely/missing/grab.json")).unwrap_err();
		assert!(err.to_string().contains("grab.json"));
	}

	#[test]
	fn from_file_accepts_partial_config() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("grab.json");
		fs::write(&path, r#"{ "url": "https://reports.example/archive.html", "downloadWaitMs": 250 }"#).unwrap();

		let config = GrabConfig::from_file(&path).unwrap();
		assert_eq!(config.url, "https://reports.example/archive.html");
		assert_eq!(config.download_wait_ms, 250);
		assert_eq!(config.expected_heading, DEFAULT_REPORT_HEADING);
	}

	#[test]
	fn from_file_rejects_malformed_json() {
		let temp = TempDir::new().unwrap();
		let path = temp.path().join("grab.json");
		fs::write(&path, "{ not json").unwrap();

		let err = GrabConfig::from_file(&path).unwrap_err();
		assert!(matches!(err, GrabError::Config(_)));
	}
}
