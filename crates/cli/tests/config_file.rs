//! Config-file loading and flag precedence.

use clap::Parser;
use pdfgrab_cli::cli::Cli;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) -> String {
	let path = dir.path().join("grab.json");
	std::fs::write(&path, contents).unwrap();
	path.to_string_lossy().into_owned()
}

#[test]
fn config_file_values_are_loaded() {
	let temp = TempDir::new().unwrap();
	let path = write_config(
		&temp,
		r#"{
  "url": "https://reports.example/archive.html",
  "expectedHeading": "Archivo de reportes",
  "downloadWaitMs": 500,
  "headless": false
}"#,
	);

	let cli = Cli::try_parse_from(["pdfgrab", "--config", path.as_str()]).unwrap();
	let config = cli.into_config().unwrap();

	assert_eq!(config.url, "https://reports.example/archive.html");
	assert_eq!(config.expected_heading, "Archivo de reportes");
	assert_eq!(config.download_wait_ms, 500);
	assert!(!config.headless);
}

#[test]
fn flags_override_config_file() {
	let temp = TempDir::new().unwrap();
	let path = write_config(
		&temp,
		r#"{ "url": "https://reports.example/archive.html", "downloadWaitMs": 500 }"#,
	);

	let cli = Cli::try_parse_from([
		"pdfgrab",
		"--config",
		path.as_str(),
		"--url",
		"https://reports.example/latest.html",
		"--wait-ms",
		"50",
	])
	.unwrap();
	let config = cli.into_config().unwrap();

	assert_eq!(config.url, "https://reports.example/latest.html");
	assert_eq!(config.download_wait_ms, 50);
}

#[test]
fn unreadable_config_file_is_an_error() {
	let cli = Cli::try_parse_from(["pdfgrab", "--config", "/definitely/missing/grab.json"]).unwrap();
	assert!(cli.into_config().is_err());
}
