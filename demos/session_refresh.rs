//! Demonstrates logging in, hitting an expired access token, and recovering through the
//! client's single refresh-and-retry, all against a local mock of the backend.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use twimbol_client::{
	api::PageQuery,
	client::Client,
	config::ClientConfig,
	store::{MemoryStore, SessionStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/user/login/");
			then.status(200)
				.json_body(json!({ "access": "demo-access-1", "refresh": "demo-refresh" }));
		})
		.await;
	let expired_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/reels/").header("authorization", "Bearer demo-access-1");
			then.status(401).json_body(json!({ "code": "token_not_valid" }));
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/token/refresh/")
				.json_body(json!({ "refresh": "demo-refresh" }));
			then.status(200).json_body(json!({ "access": "demo-access-2" }));
		})
		.await;
	let reels_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/reels/").header("authorization", "Bearer demo-access-2");
			then.status(200).json_body(json!({
				"count": 1,
				"next": null,
				"previous": null,
				"results": [{ "id": 1, "title": "Welcome reel" }]
			}));
		})
		.await;
	let config = ClientConfig::builder()
		.base_url(server.base_url())
		.allow_insecure_http(true)
		.build()?;
	let store = MemoryStore::default();
	let client = Client::new(config, Arc::new(store.clone()));

	client.login("demo", "demo-password").await?;

	let page = client.reels(PageQuery::default()).await?;

	println!(
		"Loaded {} reel(s) after {} refresh.",
		page.results.len(),
		client.refresh_metrics.successes()
	);
	println!("Stored access token: {:?}.", store.get("access").await?);

	login_mock.assert_async().await;
	expired_mock.assert_async().await;
	refresh_mock.assert_async().await;
	reels_mock.assert_async().await;

	Ok(())
}
