//! The download flow: navigate, assert the heading, click every PDF link.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::GrabConfig;
use crate::error::{GrabError, Result};
use crate::page::{PageLike, SessionLike};
use crate::session::BrowserSession;

/// Suffix a link destination must carry to be clicked.
pub const PDF_SUFFIX: &str = ".pdf";

const HEADING_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One clicked table link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickedLink {
	/// Position of the anchor within the table, in document order.
	pub index: usize,
	/// The anchor's `href` value.
	pub href: String,
}

/// Outcome of a completed flow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrabReport {
	/// Page the links were collected from.
	pub url: String,
	/// Heading that was asserted visible.
	pub heading: String,
	/// Number of anchors found in the first table.
	pub anchors_seen: usize,
	/// Links clicked, in click order.
	pub clicked: Vec<ClickedLink>,
}

/// Launches a browser, runs the flow once, and releases the browser.
pub async fn run_once(config: &GrabConfig) -> Result<GrabReport> {
	let session = BrowserSession::launch(config).await?;
	run_session(Box::new(session), config).await
}

/// Runs the flow over an owned session.
///
/// The session is closed exactly once on every exit path; a flow error takes
/// precedence over a close error.
pub async fn run_session(session: Box<dyn SessionLike>, config: &GrabConfig) -> Result<GrabReport> {
	let outcome = run(session.page(), config).await;
	let closed = session.close().await;
	let report = outcome?;
	closed?;
	Ok(report)
}

/// Runs the flow against an already-open page.
pub async fn run(page: &dyn PageLike, config: &GrabConfig) -> Result<GrabReport> {
	info!(target = "pdfgrab", url = %config.url, "opening report page");
	page.goto(&config.url).await?;

	wait_for_heading(page, &config.expected_heading, config.heading_timeout_ms).await?;

	let hrefs = page.table_anchor_hrefs().await?;
	debug!(target = "pdfgrab", anchors = hrefs.len(), "table links enumerated");

	let mut clicked = Vec::new();
	for (index, href) in hrefs.iter().enumerate() {
		let Some(href) = href.as_deref() else {
			// An anchor without the attribute never matches.
			continue;
		};
		if !is_pdf_href(href) {
			continue;
		}

		info!(target = "pdfgrab", index, href, "clicking table link");
		page.click_table_anchor(index).await?;
		if config.download_wait_ms > 0 {
			tokio::time::sleep(Duration::from_millis(config.download_wait_ms)).await;
		}
		clicked.push(ClickedLink {
			index,
			href: href.to_string(),
		});
	}

	info!(target = "pdfgrab", clicked = clicked.len(), "download flow finished");
	Ok(GrabReport {
		url: config.url.clone(),
		heading: config.expected_heading.clone(),
		anchors_seen: hrefs.len(),
		clicked,
	})
}

// Suffix matching is literal and case-sensitive: `b.PDF` does not match.
fn is_pdf_href(href: &str) -> bool {
	href.ends_with(PDF_SUFFIX)
}

/// Polls until a visible heading equals `heading`, or the timeout elapses.
async fn wait_for_heading(page: &dyn PageLike, heading: &str, timeout_ms: u64) -> Result<()> {
	let deadline = Instant::now() + Duration::from_millis(timeout_ms);
	loop {
		if page.visible_headings().await?.iter().any(|h| h == heading) {
			return Ok(());
		}

		let now = Instant::now();
		if now >= deadline {
			return Err(GrabError::HeadingNotVisible {
				heading: heading.to_string(),
				timeout_ms,
			});
		}
		tokio::time::sleep((deadline - now).min(HEADING_POLL_INTERVAL)).await;
	}
}
