//! Reels and posts listings.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	api::{Page, PageQuery},
	client::Client,
	transport::HttpTransport,
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists reels, newest first.
	pub async fn reels(&self, query: PageQuery) -> Result<Page> {
		let request = self.authorized(Method::GET, "/api/reels/").await?.with_query(query.pairs());

		self.send_json_with_refresh(request).await
	}

	/// Fetches one reel by its post identifier.
	pub async fn reel(&self, post_id: u64) -> Result<Value> {
		let request = self.authorized(Method::GET, &format!("/api/reels/{post_id}")).await?;

		self.send_json_with_refresh(request).await
	}

	/// Lists posts, newest first.
	pub async fn posts(&self, query: PageQuery) -> Result<Page> {
		let request = self.authorized(Method::GET, "/api/posts/").await?.with_query(query.pairs());

		self.send_json_with_refresh(request).await
	}

	/// Fetches one post by identifier.
	pub async fn post(&self, post_id: u64) -> Result<Value> {
		let request = self.authorized(Method::GET, &format!("/api/posts/{post_id}")).await?;

		self.send_json_with_refresh(request).await
	}
}
