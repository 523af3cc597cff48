//! Hiding, reporting, and blocking.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, api::decode_value, client::Client, transport::HttpTransport};

#[derive(Serialize)]
struct PostReport<'a> {
	reason: &'a str,
	description: &'a str,
}

#[derive(Serialize)]
struct BlockRequest {
	user_id: u64,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Hides `post_id` from the signed-in user's feeds.
	pub async fn hide_post(&self, post_id: u64) -> Result<Value> {
		let request =
			self.authorized(Method::POST, &format!("/api/post_hide/{post_id}/")).await?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}

	/// Reports `post_id` to the moderators with a reason and free-form description.
	pub async fn report_post(
		&self,
		post_id: u64,
		reason: &str,
		description: &str,
	) -> Result<Value> {
		let request = self
			.authorized(Method::POST, &format!("/api/post_report/{post_id}/"))
			.await?
			.with_json(&PostReport { reason, description })?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}

	/// Blocks `user_id`; their posts stop appearing for the signed-in user.
	pub async fn block_user(&self, user_id: u64) -> Result<Value> {
		let request = self
			.authorized(Method::POST, "/user/profile/block/")
			.await?
			.with_json(&BlockRequest { user_id })?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}
}
