//! Profile lookup, edits, and follows.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, api::decode_value, client::Client, transport::HttpTransport};

#[derive(Serialize)]
struct FollowRequest {
	user_id: u64,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Fetches the signed-in user's profile.
	///
	/// The endpoint answers with a one-element list; the element is returned on its own. It
	/// holds the profile fields (bio, avatar, creator flags) with the account under `user`; see
	/// [`Client::profile_user`] for the account alone.
	pub async fn profile(&self) -> Result<Value> {
		let request = self.authorized(Method::GET, "/user/api/profile/").await?;
		let payload: Value = self.send_json_with_refresh(request).await?;

		Ok(match payload {
			Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
			other => other,
		})
	}

	/// Applies a partial update to the profile of `user_id`.
	pub async fn update_profile(&self, user_id: u64, changes: &Value) -> Result<Value> {
		let path = format!("/user/api/update/{user_id}/");
		let request = self.authorized(Method::PATCH, &path).await?.with_json(changes)?;

		self.send_json_with_refresh(request).await
	}

	/// Follows (or, on the backend's toggle semantics, unfollows) `user_id`.
	pub async fn follow(&self, user_id: u64) -> Result<Value> {
		let request = self
			.authorized(Method::POST, "/user/profile/follow/")
			.await?
			.with_json(&FollowRequest { user_id })?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}

	/// Fetches the signed-in user's account record (`id`, `username`, names, e-mail).
	pub async fn profile_user(&self) -> Result<Value> {
		let mut profile = self.profile().await?;

		Ok(profile.get_mut("user").map(Value::take).unwrap_or(Value::Null))
	}
}
