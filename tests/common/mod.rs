#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use twimbol_client::{
	client::Client,
	config::ClientConfig,
	store::{MemoryStore, SessionStore},
	transport::ReqwestTransport,
};

pub const REFRESH_PATH: &str = "/api/token/refresh/";

pub fn build_config(server: &MockServer, singleflight: bool) -> ClientConfig {
	ClientConfig::builder()
		.base_url(server.base_url())
		.allow_insecure_http(true)
		.singleflight_refresh(singleflight)
		.build()
		.expect("Mock server configuration should build successfully.")
}

pub fn build_client(server: &MockServer) -> (Client<ReqwestTransport>, MemoryStore) {
	build_client_with(build_config(server, false))
}

pub fn build_client_with(config: ClientConfig) -> (Client<ReqwestTransport>, MemoryStore) {
	let store = MemoryStore::default();
	let client = Client::new(config, Arc::new(store.clone()));

	(client, store)
}

pub async fn seed_tokens(store: &MemoryStore, access: Option<&str>, refresh: Option<&str>) {
	if let Some(access) = access {
		store.set("access", access.to_owned()).await.expect("Seeding the access token should succeed.");
	}
	if let Some(refresh) = refresh {
		store
			.set("refresh", refresh.to_owned())
			.await
			.expect("Seeding the refresh token should succeed.");
	}
}

pub async fn stored(store: &MemoryStore, key: &str) -> Option<String> {
	store.get(key).await.expect("Reading from the memory store should succeed.")
}
