//! Report-table PDF download flow.
//!
//! Drives a browser to a report page, asserts the expected heading is
//! visible, and clicks every link in the page's first table whose `href`
//! ends in `.pdf`, pausing after each click so the browser-native download
//! can start. Downloaded files land wherever the browser's download manager
//! puts them; this crate only drives the clicks.
//!
//! The flow ([`flow::run`]) is written against the [`page::PageLike`] seam.
//! [`session::BrowserSession`] is the CDP-backed implementation and
//! [`testing`] provides in-memory doubles for tests.

pub mod config;
pub mod error;
pub mod flow;
pub mod page;
pub mod session;
pub mod testing;

pub use config::GrabConfig;
pub use error::{GrabError, Result};
pub use flow::{ClickedLink, GrabReport, run, run_once, run_session};
pub use page::{PageLike, SessionLike};
pub use session::BrowserSession;
