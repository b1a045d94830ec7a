//! End-to-end run against a real Chrome.
//!
//! Gated behind `PDFGRAB_E2E=1` so the default suite needs no browser. The
//! page is a `data:` URL to avoid network dependence.

use pdfgrab::{GrabConfig, flow};

const PAGE: &str = "data:text/html,<h1>Informes</h1><table><tr>\
	<td><a href='a.pdf'>a</a></td>\
	<td><a href='b.html'>b</a></td>\
	<td><a>sin destino</a></td>\
	</tr></table>";

#[tokio::test]
async fn flow_runs_against_a_real_browser() {
	if std::env::var("PDFGRAB_E2E").is_err() {
		eprintln!("skipping: set PDFGRAB_E2E=1 to run browser tests");
		return;
	}

	let config = GrabConfig {
		url: PAGE.to_string(),
		expected_heading: "Informes".to_string(),
		download_wait_ms: 100,
		..GrabConfig::default()
	};

	let report = flow::run_once(&config).await.unwrap();

	assert_eq!(report.anchors_seen, 3);
	assert_eq!(report.clicked.len(), 1);
	assert_eq!(report.clicked[0].href, "a.pdf");
}
