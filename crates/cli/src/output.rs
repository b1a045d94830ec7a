//! Result envelope and terminal output.
//!
//! Text output is for humans. JSON output is a stable envelope for
//! scripting:
//!
//! ```json
//! { "ok": true, "command": "grab", "data": { ... } }
//! ```
//!
//! On failure:
//!
//! ```json
//! { "ok": false, "command": "grab", "error": { "message": "..." } }
//! ```

use clap::ValueEnum;
use colored::Colorize;
use pdfgrab::GrabReport;
use serde::Serialize;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text (default)
	#[default]
	Text,
	/// JSON envelope
	Json,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Text => write!(f, "text"),
			OutputFormat::Json => write!(f, "json"),
		}
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
	ok: bool,
	command: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	data: Option<&'a GrabReport>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<EnvelopeError>,
}

#[derive(Debug, Serialize)]
struct EnvelopeError {
	message: String,
}

/// Prints a completed report in the requested format.
pub fn print_report(report: &GrabReport, format: OutputFormat) {
	match format {
		OutputFormat::Text => print_report_text(report),
		OutputFormat::Json => {
			let envelope = Envelope {
				ok: true,
				command: "grab",
				data: Some(report),
				error: None,
			};
			print_json(&envelope);
		}
	}
}

/// Prints an error: a human-readable line on stderr, plus a JSON envelope on
/// stdout when JSON output was requested.
pub fn print_error(err: &anyhow::Error, format: OutputFormat) {
	eprintln!("{} {err:#}", "error:".red().bold());

	if format == OutputFormat::Json {
		let envelope = Envelope {
			ok: false,
			command: "grab",
			data: None,
			error: Some(EnvelopeError {
				message: format!("{err:#}"),
			}),
		};
		print_json(&envelope);
	}
}

fn print_report_text(report: &GrabReport) {
	if report.clicked.is_empty() {
		println!(
			"{} no PDF links in the first table on {} ({} links seen)",
			"done:".yellow().bold(),
			report.url,
			report.anchors_seen
		);
		return;
	}

	println!(
		"{} clicked {} PDF link(s) on {}",
		"done:".green().bold(),
		report.clicked.len(),
		report.url
	);
	for link in &report.clicked {
		println!("  [{}] {}", link.index, link.href);
	}
}

fn print_json(envelope: &Envelope<'_>) {
	match serde_json::to_string_pretty(envelope) {
		Ok(json) => println!("{json}"),
		Err(e) => eprintln!("{} failed to serialize output: {e}", "error:".red().bold()),
	}
}
