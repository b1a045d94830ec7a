use thiserror::Error;

pub type Result<T> = std::result::Result<T, GrabError>;

#[derive(Debug, Error)]
pub enum GrabError {
	#[error("browser launch failed: {0}")]
	BrowserLaunch(String),

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error("navigation failed: {url}")]
	Navigation {
		url: String,
		#[source]
		source: anyhow::Error,
	},

	/// Precondition failure: the page did not show the expected report heading.
	#[error("expected heading not visible within {timeout_ms}ms: {heading:?}")]
	HeadingNotVisible { heading: String, timeout_ms: u64 },

	#[error("click failed on table link {index}")]
	Click {
		index: usize,
		#[source]
		source: anyhow::Error,
	},

	#[error("page operation failed: {0}")]
	Page(String),

	#[error(transparent)]
	Cdp(#[from] chromiumoxide::error::CdpError),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl GrabError {
	/// True when the failure is the heading precondition rather than an
	/// unclassified runtime fault.
	pub fn is_precondition(&self) -> bool {
		matches!(self, GrabError::HeadingNotVisible { .. })
	}
}
