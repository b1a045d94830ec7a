//! Test doubles for the download flow.
//!
//! Follows trait-based dependency injection: [`MockPage`] implements
//! [`PageLike`] with configurable page state and records every operation as a
//! [`MockAction`], and [`MockSession`] implements [`SessionLike`] over a
//! shared page, so flow behavior and resource release can be asserted
//! without spawning a browser.
//!
//! # Example
//!
//! ```ignore
//! use pdfgrab::testing::{MockAction, MockPage};
//!
//! let page = MockPage::new();
//! page.set_visible_headings(&["Resultados 2023"]);
//! page.set_table_anchors(&[Some("a.pdf"), None]);
//!
//! // After running the flow...
//! assert_eq!(page.clicked_indices(), vec![0]);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{GrabError, Result};
use crate::page::{PageLike, SessionLike};

/// Action recorded by [`MockPage`] for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
	/// Navigation was performed.
	Goto { url: String },
	/// Visible headings were queried.
	QueryHeadings,
	/// The first table's anchors were enumerated.
	QueryAnchors,
	/// A table anchor was clicked.
	Click { index: usize },
	/// The session was closed.
	Close,
}

/// Mock page with configurable headings and table anchors.
#[derive(Default)]
pub struct MockPage {
	headings: Mutex<Vec<String>>,
	anchors: Mutex<Vec<Option<String>>>,
	actions: Mutex<Vec<MockAction>>,
	fail_goto: Mutex<bool>,
	fail_click_at: Mutex<Option<usize>>,
}

impl MockPage {
	/// Creates an empty mock page: no headings, no table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the headings reported as visible.
	pub fn set_visible_headings(&self, headings: &[&str]) {
		*self.headings.lock().unwrap() = headings.iter().map(|h| h.to_string()).collect();
	}

	/// Sets the anchors of the first table; `None` models a missing `href`.
	pub fn set_table_anchors(&self, anchors: &[Option<&str>]) {
		*self.anchors.lock().unwrap() = anchors.iter().map(|a| a.map(str::to_string)).collect();
	}

	/// Makes `goto` fail with a navigation error.
	pub fn fail_goto(&self) {
		*self.fail_goto.lock().unwrap() = true;
	}

	/// Makes the click on anchor `index` fail.
	pub fn fail_click_at(&self, index: usize) {
		*self.fail_click_at.lock().unwrap() = Some(index);
	}

	/// Returns all recorded actions.
	pub fn actions(&self) -> Vec<MockAction> {
		self.actions.lock().unwrap().clone()
	}

	/// Returns the anchor indices clicked, in order.
	pub fn clicked_indices(&self) -> Vec<usize> {
		self.actions()
			.into_iter()
			.filter_map(|action| match action {
				MockAction::Click { index } => Some(index),
				_ => None,
			})
			.collect()
	}

	/// Returns how often the session over this page was closed.
	pub fn close_count(&self) -> usize {
		self.actions().iter().filter(|a| **a == MockAction::Close).count()
	}

	/// Clears recorded actions.
	pub fn clear_actions(&self) {
		self.actions.lock().unwrap().clear();
	}

	fn record(&self, action: MockAction) {
		self.actions.lock().unwrap().push(action);
	}
}

#[async_trait]
impl PageLike for MockPage {
	async fn goto(&self, url: &str) -> Result<()> {
		self.record(MockAction::Goto { url: url.to_string() });
		if *self.fail_goto.lock().unwrap() {
			return Err(GrabError::Navigation {
				url: url.to_string(),
				source: anyhow::anyhow!("mock navigation failure"),
			});
		}
		Ok(())
	}

	async fn visible_headings(&self) -> Result<Vec<String>> {
		self.record(MockAction::QueryHeadings);
		Ok(self.headings.lock().unwrap().clone())
	}

	async fn table_anchor_hrefs(&self) -> Result<Vec<Option<String>>> {
		self.record(MockAction::QueryAnchors);
		Ok(self.anchors.lock().unwrap().clone())
	}

	async fn click_table_anchor(&self, index: usize) -> Result<()> {
		self.record(MockAction::Click { index });
		if *self.fail_click_at.lock().unwrap() == Some(index) {
			return Err(GrabError::Click {
				index,
				source: anyhow::anyhow!("mock click failure"),
			});
		}
		Ok(())
	}
}

/// Mock session over a shared [`MockPage`].
///
/// Close is recorded as [`MockAction::Close`] on the page, which outlives
/// the consumed session, so tests can assert the release happened exactly
/// once.
pub struct MockSession {
	page: Arc<MockPage>,
}

impl MockSession {
	/// Creates a session over a shared mock page.
	pub fn new(page: Arc<MockPage>) -> Self {
		Self { page }
	}
}

#[async_trait]
impl SessionLike for MockSession {
	fn page(&self) -> &dyn PageLike {
		self.page.as_ref()
	}

	async fn close(self: Box<Self>) -> Result<()> {
		self.page.record(MockAction::Close);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn mock_page_records_operations_in_order() {
		let page = MockPage::new();
		page.set_table_anchors(&[Some("a.pdf")]);

		page.goto("https://example.com").await.unwrap();
		page.visible_headings().await.unwrap();
		page.table_anchor_hrefs().await.unwrap();
		page.click_table_anchor(0).await.unwrap();

		assert_eq!(
			page.actions(),
			vec![
				MockAction::Goto {
					url: "https://example.com".to_string()
				},
				MockAction::QueryHeadings,
				MockAction::QueryAnchors,
				MockAction::Click { index: 0 },
			]
		);
	}

	#[tokio::test]
	async fn mock_page_click_failure_is_injected() {
		let page = MockPage::new();
		page.fail_click_at(1);

		page.click_table_anchor(0).await.unwrap();
		let err = page.click_table_anchor(1).await.unwrap_err();
		assert!(matches!(err, GrabError::Click { index: 1, .. }));
	}

	#[tokio::test]
	async fn mock_session_records_close_on_shared_page() {
		let page = Arc::new(MockPage::new());
		let session = MockSession::new(Arc::clone(&page));

		Box::new(session).close().await.unwrap();
		assert_eq!(page.close_count(), 1);
	}
}
