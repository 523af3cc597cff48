//! Typed endpoint functions for the Twimbol backend.
//!
//! Every authenticated endpoint builds its request through [`Client::authorized`] and routes it
//! through [`Client::fetch_with_refresh`], so token attachment and the single refresh-retry
//! apply uniformly. Item payloads are surfaced as [`Value`]s; the backend's serializers vary
//! per post type and the front-ends read them loosely.
//!
//! [`Client::authorized`]: crate::client::Client::authorized
//! [`Client::fetch_with_refresh`]: crate::client::Client::fetch_with_refresh

pub mod auth;
pub mod comments;
pub mod creator;
pub mod feed;
pub mod moderation;
pub mod notifications;
pub mod profile;
pub mod search;

pub use auth::*;

// self
use crate::{_prelude::*, client::decode_json, transport::HttpResponse};

/// Django REST Framework pagination envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T = Value> {
	/// Total number of items across pages, when the backend reports it.
	#[serde(default)]
	pub count: Option<u64>,
	/// URL of the next page.
	#[serde(default)]
	pub next: Option<String>,
	/// URL of the previous page.
	#[serde(default)]
	pub previous: Option<String>,
	/// Items on this page.
	pub results: Vec<T>,
}
impl<T> Page<T> {
	/// Returns `true` when the backend advertises another page.
	pub fn has_next(&self) -> bool {
		self.next.is_some()
	}
}

/// Page selection for paginated listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageQuery {
	/// One-based page number.
	pub page: u32,
	/// Items per page; the backend default applies when unset.
	pub page_size: Option<u32>,
}
impl PageQuery {
	/// Selects `page` with the backend's default page size.
	pub fn page(page: u32) -> Self {
		Self { page, page_size: None }
	}

	/// Overrides the page size.
	pub fn with_page_size(mut self, page_size: u32) -> Self {
		self.page_size = Some(page_size);

		self
	}

	pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![("page", self.page.to_string())];

		if let Some(size) = self.page_size {
			pairs.push(("page_size", size.to_string()));
		}

		pairs
	}
}
impl Default for PageQuery {
	fn default() -> Self {
		Self::page(1)
	}
}

/// Decodes a JSON body, treating an empty body as `null`.
pub(crate) fn decode_value(response: &HttpResponse) -> Result<Value> {
	if response.body().iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	decode_json(response)
}
