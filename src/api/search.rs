//! Full-text search across posts and reels.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, client::Client, transport::HttpTransport};

#[derive(Deserialize)]
struct SearchResponse {
	results: Vec<Value>,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Searches posts and reels matching `query`, ranked by the backend.
	pub async fn search(&self, query: &str) -> Result<Vec<Value>> {
		let request = self
			.authorized(Method::GET, "/api/search")
			.await?
			.with_query([("query", query.to_owned())]);
		let SearchResponse { results } = self.send_json_with_refresh(request).await?;

		Ok(results)
	}
}
