//! Comments and likes on posts.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, api::decode_value, client::Client, transport::HttpTransport};

#[derive(Serialize)]
struct NewComment<'a> {
	post: u64,
	comment: &'a str,
}

#[derive(Serialize)]
struct CommentRef {
	comment_id: u64,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists comments on `post_id`; `page` is one-based.
	pub async fn comments(&self, post_id: u64, page: u32) -> Result<Value> {
		let request = self
			.authorized(Method::GET, &format!("/api/posts/{post_id}/comments/"))
			.await?
			.with_query([("page", page.to_string())]);

		self.send_json_with_refresh(request).await
	}

	/// Adds a comment to `post_id`.
	pub async fn post_comment(&self, post_id: u64, comment: &str) -> Result<Value> {
		let request = self
			.authorized(Method::POST, &format!("/api/posts/{post_id}/comments/"))
			.await?
			.with_json(&NewComment { post: post_id, comment })?;

		self.send_json_with_refresh(request).await
	}

	/// Deletes `comment_id` from `post_id`.
	pub async fn delete_comment(&self, post_id: u64, comment_id: u64) -> Result<()> {
		let request = self
			.authorized(Method::DELETE, &format!("/api/posts/{post_id}/comments/"))
			.await?
			.with_json(&CommentRef { comment_id })?;

		self.fetch_with_refresh(request).await?;

		Ok(())
	}

	/// Likes `post_id`.
	pub async fn like_post(&self, post_id: u64) -> Result<Value> {
		let request = self
			.authorized(Method::POST, &format!("/api/post_likes/{post_id}/"))
			.await?
			.with_json(&serde_json::json!({}))?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}

	/// Removes the like on `post_id`.
	pub async fn unlike_post(&self, post_id: u64) -> Result<()> {
		let request =
			self.authorized(Method::DELETE, &format!("/api/post_likes/{post_id}/")).await?;

		self.fetch_with_refresh(request).await?;

		Ok(())
	}
}
