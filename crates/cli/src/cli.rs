//! Command-line interface for `pdfgrab`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pdfgrab::GrabConfig;
use url::Url;

use crate::output::OutputFormat;

/// Click every PDF link in a report page's first table.
#[derive(Parser, Debug)]
#[command(name = "pdfgrab")]
#[command(about = "Download every PDF linked from a report page table")]
#[command(version)]
pub struct Cli {
	/// Report page to open
	#[arg(short = 'u', long, value_name = "URL")]
	pub url: Option<String>,

	/// Heading that must be visible before any link is clicked
	#[arg(long, value_name = "TEXT")]
	pub heading: Option<String>,

	/// Pause after each click, in milliseconds
	#[arg(long, value_name = "MS")]
	pub wait_ms: Option<u64>,

	/// Run the browser with a visible window
	#[arg(long)]
	pub headed: bool,

	/// Chrome or Chromium executable to launch
	#[arg(long, value_name = "PATH")]
	pub chrome: Option<PathBuf>,

	/// JSON configuration file; flags override its values
	#[arg(short = 'c', long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Output format
	#[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,
}

impl Cli {
	/// Builds the flow configuration from file values and flag overrides.
	pub fn into_config(self) -> anyhow::Result<GrabConfig> {
		let mut config = match &self.config {
			Some(path) => GrabConfig::from_file(path)?,
			None => GrabConfig::default(),
		};

		if let Some(url) = self.url {
			config.url = url;
		}
		if let Some(heading) = self.heading {
			config.expected_heading = heading;
		}
		if let Some(wait_ms) = self.wait_ms {
			config.download_wait_ms = wait_ms;
		}
		if self.headed {
			config.headless = false;
		}
		if let Some(chrome) = self.chrome {
			config.chrome_path = Some(chrome);
		}

		Url::parse(&config.url).with_context(|| format!("invalid url: {}", config.url))?;

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use pdfgrab::config::{DEFAULT_REPORT_HEADING, DEFAULT_REPORT_URL};

	use super::*;

	#[test]
	fn defaults_match_builtin_config() {
		let cli = Cli::try_parse_from(["pdfgrab"]).unwrap();
		let config = cli.into_config().unwrap();

		assert_eq!(config.url, DEFAULT_REPORT_URL);
		assert_eq!(config.expected_heading, DEFAULT_REPORT_HEADING);
		assert_eq!(config.download_wait_ms, 1_000);
		assert!(config.headless);
		assert!(config.chrome_path.is_none());
	}

	#[test]
	fn flags_override_defaults() {
		let cli = Cli::try_parse_from([
			"pdfgrab",
			"--url",
			"https://example.com/reports.html",
			"--heading",
			"Reportes",
			"--wait-ms",
			"250",
			"--headed",
			"--chrome",
			"/opt/chrome/chrome",
		])
		.unwrap();
		let config = cli.into_config().unwrap();

		assert_eq!(config.url, "https://example.com/reports.html");
		assert_eq!(config.expected_heading, "Reportes");
		assert_eq!(config.download_wait_ms, 250);
		assert!(!config.headless);
		assert_eq!(config.chrome_path.as_deref(), Some(std::path::Path::new("/opt/chrome/chrome")));
	}

	#[test]
	fn rejects_invalid_url() {
		let cli = Cli::try_parse_from(["pdfgrab", "--url", "not a url"]).unwrap();
		assert!(cli.into_config().is_err());
	}

	#[test]
	fn parses_output_format() {
		let cli = Cli::try_parse_from(["pdfgrab", "-f", "json"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Json);

		let cli = Cli::try_parse_from(["pdfgrab"]).unwrap();
		assert_eq!(cli.format, OutputFormat::Text);
	}

	#[test]
	fn counts_verbosity() {
		let cli = Cli::try_parse_from(["pdfgrab", "-vv"]).unwrap();
		assert_eq!(cli.verbose, 2);
	}
}
