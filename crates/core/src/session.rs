//! CDP-backed browser session.
//!
//! Owns the Chrome process for one flow run and implements the
//! [`PageLike`]/[`SessionLike`] seams over chromiumoxide.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::GrabConfig;
use crate::error::{GrabError, Result};
use crate::page::{PageLike, SessionLike};

// Trimmed text of heading-role elements that occupy layout space, the
// CDP-side stand-in for "visible heading with this accessible name".
const VISIBLE_HEADINGS_JS: &str = r#"
(() => {
	const headings = document.querySelectorAll('h1,h2,h3,h4,h5,h6,[role="heading"]');
	return Array.from(headings)
		.filter((el) => el.getClientRects().length > 0)
		.map((el) => (el.textContent || '').trim());
})()
"#;

/// Active browser session owning a Chrome process and one page.
pub struct BrowserSession {
	browser: Browser,
	page: Page,
	handler_task: JoinHandle<()>,
	nav_timeout_ms: u64,
}

impl BrowserSession {
	/// Launches a browser and opens the page used by the flow.
	pub async fn launch(config: &GrabConfig) -> Result<Self> {
		let executable = match &config.chrome_path {
			Some(path) => path.clone(),
			None => find_chrome_executable().ok_or_else(|| {
				GrabError::BrowserLaunch(
					"no Chrome or Chromium executable found; set chromePath or PDFGRAB_CHROME".to_string(),
				)
			})?,
		};

		debug!(
			target = "pdfgrab",
			executable = %executable.display(),
			headless = config.headless,
			"launching browser"
		);

		let mut builder = BrowserConfig::builder()
			.chrome_executable(executable)
			.no_sandbox()
			.window_size(1280, 720)
			.arg("--disable-gpu")
			.arg("--disable-dev-shm-usage")
			.arg("--no-first-run")
			.arg("--no-default-browser-check");
		if !config.headless {
			builder = builder.with_head();
		}
		let browser_config = builder.build().map_err(GrabError::BrowserLaunch)?;

		let (browser, mut handler) = Browser::launch(browser_config)
			.await
			.map_err(|e| GrabError::BrowserLaunch(e.to_string()))?;

		// The handler stream must be polled for the CDP connection to make
		// progress; it runs until the browser goes away.
		let handler_task = tokio::spawn(async move {
			while let Some(event) = handler.next().await {
				if event.is_err() {
					debug!(target = "pdfgrab", "CDP event loop ended");
					break;
				}
			}
		});

		// From here on the Chrome process exists; tear it down before
		// surfacing any setup failure.
		let page = match browser.new_page("about:blank").await {
			Ok(page) => page,
			Err(e) => {
				teardown(browser, handler_task).await;
				return Err(GrabError::BrowserLaunch(format!("failed to open page: {e}")));
			}
		};

		Ok(Self {
			browser,
			page,
			handler_task,
			nav_timeout_ms: config.nav_timeout_ms,
		})
	}
}

#[async_trait]
impl PageLike for BrowserSession {
	async fn goto(&self, url: &str) -> Result<()> {
		let navigate = async {
			self.page.goto(url).await?;
			self.page.wait_for_navigation().await?;
			Ok::<_, CdpError>(())
		};

		match tokio::time::timeout(Duration::from_millis(self.nav_timeout_ms), navigate).await {
			Ok(Ok(())) => Ok(()),
			Ok(Err(e)) => Err(GrabError::Navigation {
				url: url.to_string(),
				source: e.into(),
			}),
			Err(_) => Err(GrabError::Navigation {
				url: url.to_string(),
				source: anyhow::anyhow!("no load event within {}ms", self.nav_timeout_ms),
			}),
		}
	}

	async fn visible_headings(&self) -> Result<Vec<String>> {
		let evaluated = self.page.evaluate(VISIBLE_HEADINGS_JS).await?;
		Ok(evaluated.into_value::<Vec<String>>()?)
	}

	async fn table_anchor_hrefs(&self) -> Result<Vec<Option<String>>> {
		// chromiumoxide reports a missing node as an error; a page without
		// any table is a silent no-op, not a failure.
		let Ok(table) = self.page.find_element("table").await else {
			return Ok(Vec::new());
		};

		let anchors = table.find_elements("a").await?;
		let mut hrefs = Vec::with_capacity(anchors.len());
		for anchor in &anchors {
			hrefs.push(anchor.attribute("href").await?);
		}
		Ok(hrefs)
	}

	async fn click_table_anchor(&self, index: usize) -> Result<()> {
		let table = self
			.page
			.find_element("table")
			.await
			.map_err(|e| GrabError::Click { index, source: e.into() })?;
		let anchors = table
			.find_elements("a")
			.await
			.map_err(|e| GrabError::Click { index, source: e.into() })?;

		let anchor = anchors
			.get(index)
			.ok_or_else(|| GrabError::Page(format!("table link {index} is no longer on the page")))?;
		anchor
			.click()
			.await
			.map_err(|e| GrabError::Click { index, source: e.into() })?;
		Ok(())
	}
}

#[async_trait]
impl SessionLike for BrowserSession {
	fn page(&self) -> &dyn PageLike {
		self
	}

	async fn close(self: Box<Self>) -> Result<()> {
		let Self {
			browser,
			page,
			handler_task,
			..
		} = *self;
		drop(page);
		teardown_with_result(browser, handler_task).await
	}
}

async fn teardown(browser: Browser, handler_task: JoinHandle<()>) {
	if let Err(e) = teardown_with_result(browser, handler_task).await {
		warn!(target = "pdfgrab", error = %e, "browser teardown failed");
	}
}

async fn teardown_with_result(mut browser: Browser, handler_task: JoinHandle<()>) -> Result<()> {
	let closed = browser.close().await;
	let _ = browser.wait().await;
	handler_task.abort();
	closed.map(|_| ()).map_err(GrabError::from)
}

/// Locates a Chrome or Chromium executable: `PDFGRAB_CHROME` first, then
/// `$PATH`, then well-known install locations.
pub fn find_chrome_executable() -> Option<PathBuf> {
	if let Ok(raw) = env::var("PDFGRAB_CHROME") {
		let trimmed = raw.trim();
		if !trimmed.is_empty() {
			let candidate = PathBuf::from(trimmed);
			if candidate.exists() {
				return Some(candidate);
			}
		}
	}

	for name in chrome_executable_names() {
		if let Ok(path) = which::which(name) {
			return Some(path);
		}
	}

	for candidate in os_specific_chrome_paths() {
		if candidate.exists() {
			return Some(candidate);
		}
	}

	None
}

fn chrome_executable_names() -> &'static [&'static str] {
	#[cfg(target_os = "windows")]
	{
		&["chrome.exe", "chromium.exe", "msedge.exe"]
	}

	#[cfg(not(target_os = "windows"))]
	{
		&[
			"google-chrome-stable",
			"google-chrome",
			"chromium",
			"chromium-browser",
			"chrome",
		]
	}
}

fn os_specific_chrome_paths() -> Vec<PathBuf> {
	#[cfg(target_os = "macos")]
	{
		vec![
			PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
			PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
		]
	}

	#[cfg(target_os = "windows")]
	{
		vec![
			PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
			PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
		]
	}

	#[cfg(not(any(target_os = "macos", target_os = "windows")))]
	{
		vec![
			PathBuf::from("/usr/bin/google-chrome-stable"),
			PathBuf::from("/usr/bin/google-chrome"),
			PathBuf::from("/usr/bin/chromium"),
			PathBuf::from("/usr/bin/chromium-browser"),
			PathBuf::from("/snap/bin/chromium"),
		]
	}
}
