//! Session context mediating every read and write of persisted token state.

// self
use crate::{_prelude::*, auth::TokenSecret, store::SessionStore};

/// Storage keys under which the access and refresh tokens live.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenKeys {
	/// Key holding the short-lived access token.
	pub access: String,
	/// Key holding the long-lived refresh token.
	pub refresh: String,
}
impl TokenKeys {
	/// Key names used by the mobile app.
	pub fn mobile() -> Self {
		Self { access: "access".into(), refresh: "refresh".into() }
	}

	/// Key names used by the browser front-end.
	pub fn web() -> Self {
		Self { access: "access_token".into(), refresh: "refresh_token".into() }
	}
}
impl Default for TokenKeys {
	fn default() -> Self {
		Self::mobile()
	}
}

/// Access/refresh pair issued at login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
	/// Short-lived access token.
	pub access: TokenSecret,
	/// Long-lived refresh token.
	pub refresh: TokenSecret,
}

/// Explicit session context shared by every request issued through a client.
///
/// All token state flows through this type so the single shared resource (the store) sits
/// behind one narrow interface. Cloning is cheap; clones observe the same store.
#[derive(Clone)]
pub struct Session {
	store: Arc<dyn SessionStore>,
	keys: TokenKeys,
}
impl Session {
	/// Builds a session over `store` using the provided key names.
	pub fn new(store: Arc<dyn SessionStore>, keys: TokenKeys) -> Self {
		Self { store, keys }
	}

	/// Key names used by this session.
	pub fn keys(&self) -> &TokenKeys {
		&self.keys
	}

	/// Underlying store handle.
	pub fn store(&self) -> &Arc<dyn SessionStore> {
		&self.store
	}

	/// Reads the current access token, if any.
	pub async fn access_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.store.get(&self.keys.access).await?.map(TokenSecret::new))
	}

	/// Reads the current refresh token, if any.
	pub async fn refresh_token(&self) -> Result<Option<TokenSecret>> {
		Ok(self.store.get(&self.keys.refresh).await?.map(TokenSecret::new))
	}

	/// Returns both tokens when both are present.
	pub async fn token_pair(&self) -> Result<Option<TokenPair>> {
		let access = self.access_token().await?;
		let refresh = self.refresh_token().await?;

		Ok(access.zip(refresh).map(|(access, refresh)| TokenPair { access, refresh }))
	}

	/// Persists both tokens, as done after a successful login.
	pub async fn store_pair(&self, pair: &TokenPair) -> Result<()> {
		self.store.set(&self.keys.access, pair.access.expose().to_owned()).await?;
		self.store.set(&self.keys.refresh, pair.refresh.expose().to_owned()).await?;

		Ok(())
	}

	/// Overwrites the access token in place; the refresh token is untouched.
	pub async fn replace_access(&self, access: &TokenSecret) -> Result<()> {
		Ok(self.store.set(&self.keys.access, access.expose().to_owned()).await?)
	}

	/// Deletes only the two token entries, leaving unrelated cached data in place.
	pub async fn forget_tokens(&self) -> Result<()> {
		self.store.remove(&self.keys.access).await?;
		self.store.remove(&self.keys.refresh).await?;

		Ok(())
	}

	/// Wipes all persisted session state, tokens and cached identity data alike.
	pub async fn clear(&self) -> Result<()> {
		Ok(self.store.clear().await?)
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session").field("keys", &self.keys).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::MemoryStore;

	fn session(store: &MemoryStore, keys: TokenKeys) -> Session {
		Session::new(Arc::new(store.clone()), keys)
	}

	#[tokio::test]
	async fn store_pair_then_replace_access_keeps_refresh() {
		let store = MemoryStore::default();
		let session = session(&store, TokenKeys::mobile());
		let pair =
			TokenPair { access: TokenSecret::new("access-1"), refresh: TokenSecret::new("refresh-1") };

		session.store_pair(&pair).await.expect("Storing the login pair should succeed.");
		session
			.replace_access(&TokenSecret::new("access-2"))
			.await
			.expect("Replacing the access token should succeed.");

		let current = session
			.token_pair()
			.await
			.expect("Reading the token pair should succeed.")
			.expect("Both tokens should be present.");

		assert_eq!(current.access.expose(), "access-2");
		assert_eq!(current.refresh.expose(), "refresh-1");
	}

	#[tokio::test]
	async fn web_keys_write_under_web_names() {
		let store = MemoryStore::default();
		let session = session(&store, TokenKeys::web());

		session
			.replace_access(&TokenSecret::new("web-access"))
			.await
			.expect("Replacing the access token should succeed.");

		assert_eq!(
			store.get("access_token").await.expect("Store read should succeed."),
			Some("web-access".into())
		);
		assert_eq!(store.get("access").await.expect("Store read should succeed."), None);
	}

	#[tokio::test]
	async fn forget_tokens_keeps_other_entries_while_clear_wipes_all() {
		let store = MemoryStore::default();
		let session = session(&store, TokenKeys::mobile());

		store.set("user", "{\"id\":7}".into()).await.expect("Seeding cached data should succeed.");
		session
			.store_pair(&TokenPair {
				access: TokenSecret::new("a"),
				refresh: TokenSecret::new("r"),
			})
			.await
			.expect("Storing the login pair should succeed.");
		session.forget_tokens().await.expect("Forgetting tokens should succeed.");

		assert_eq!(store.len(), 1);

		session.clear().await.expect("Clearing the session should succeed.");

		assert!(store.is_empty());
	}
}
