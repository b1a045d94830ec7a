//! Page and session abstractions for the download flow.
//!
//! The flow drives a browser through these traits rather than a concrete
//! automation client, so it can be exercised against
//! [`crate::testing::MockPage`] without spawning a browser.

use async_trait::async_trait;

use crate::error::Result;

/// Abstracts the page operations consumed by the download flow.
#[async_trait]
pub trait PageLike: Send + Sync {
	/// Navigates to `url`, suspending until the page's load signal.
	async fn goto(&self, url: &str) -> Result<()>;

	/// Returns the accessible names of heading elements currently visible.
	async fn visible_headings(&self) -> Result<Vec<String>>;

	/// Returns the `href` attribute of every anchor inside the page's first
	/// table, in document order. `None` marks an anchor without the
	/// attribute. A page without any table yields an empty list.
	async fn table_anchor_hrefs(&self) -> Result<Vec<Option<String>>>;

	/// Clicks the `index`-th anchor inside the first table, re-resolving the
	/// element against live page state.
	async fn click_table_anchor(&self, index: usize) -> Result<()>;
}

/// Abstracts session lifecycle around a [`PageLike`].
#[async_trait]
pub trait SessionLike: Send + Sync {
	/// Returns the session's active page.
	fn page(&self) -> &dyn PageLike;

	/// Closes the session and releases browser resources.
	async fn close(self: Box<Self>) -> Result<()>;
}
