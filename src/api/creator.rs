//! Creator applications.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, client::Client, transport::HttpTransport};

#[derive(Serialize)]
struct CreatorApplication {
	user: u64,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Submits a request for `user_id` to become a content creator.
	pub async fn apply_for_creator(&self, user_id: u64) -> Result<Value> {
		let request = self
			.authorized(Method::POST, "/user/api/creator-application/")
			.await?
			.with_json(&CreatorApplication { user: user_id })?;

		self.send_json_with_refresh(request).await
	}

	/// Returns the latest creator application of `user_id`, if one exists.
	pub async fn creator_application_status(&self, user_id: u64) -> Result<Option<Value>> {
		let path = format!("/user/api/creator-application/by-user/{user_id}/");
		let request = self.authorized(Method::GET, &path).await?;
		let applications: Vec<Value> = self.send_json_with_refresh(request).await?;

		Ok(applications.into_iter().next())
	}
}
