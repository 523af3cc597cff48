//! Notification inbox.

// crates.io
use http::Method;
// self
use crate::{_prelude::*, api::decode_value, client::Client, transport::HttpTransport};

const PREFERENCES_PATH: &str = "/api/notifications/preferences/";

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Lists the signed-in user's notifications.
	pub async fn notifications(&self) -> Result<Value> {
		let request = self.authorized(Method::GET, "/api/notifications/").await?;

		self.send_json_with_refresh(request).await
	}

	/// Marks one notification as read.
	pub async fn mark_notification_read(&self, notification_id: u64) -> Result<Value> {
		let path = format!("/api/notifications/{notification_id}/mark-read/");
		let request = self.authorized(Method::POST, &path).await?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}

	/// Marks every notification as read.
	pub async fn mark_all_notifications_read(&self) -> Result<Value> {
		let request = self.authorized(Method::POST, "/api/notifications/mark-all-read/").await?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}

	/// Reads the signed-in user's notification preferences.
	pub async fn notification_preferences(&self) -> Result<Value> {
		let request = self.authorized(Method::GET, PREFERENCES_PATH).await?;

		self.send_json_with_refresh(request).await
	}

	/// Applies a partial update to the notification preferences, e.g. `{"likes": false}`.
	pub async fn update_notification_preferences(&self, changes: &Value) -> Result<Value> {
		let request = self.authorized(Method::PATCH, PREFERENCES_PATH).await?.with_json(changes)?;

		decode_value(&self.fetch_with_refresh(request).await?)
	}
}
