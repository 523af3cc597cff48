//! Client configuration and its validating builder.

// self
use crate::{_prelude::*, auth::TokenKeys, error::ConfigError};

/// Production backend serving the mobile and web front-ends.
pub const DEFAULT_BASE_URL: &str = "https://rafidabdullahsamiweb.pythonanywhere.com";
/// Token refresh endpoint path.
pub const DEFAULT_REFRESH_PATH: &str = "/api/token/refresh/";
/// Login (token obtain) endpoint path.
pub const DEFAULT_LOGIN_PATH: &str = "/user/login/";

/// Immutable client configuration consumed by [`Client`](crate::client::Client).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Backend origin every endpoint path is resolved against.
	pub base_url: Url,
	/// Path of the refresh endpoint.
	pub refresh_path: String,
	/// Path of the login endpoint.
	pub login_path: String,
	/// Storage key names for the token pair.
	pub token_keys: TokenKeys,
	/// Deadline applied to each network attempt when the call sets none.
	pub request_timeout: Option<Duration>,
	/// Serializes refreshes so concurrent 401s share one refresh call.
	pub singleflight_refresh: bool,
	/// Permits a plain-HTTP base URL (local development servers).
	pub allow_insecure_http: bool,
}
impl ClientConfig {
	/// Creates a new builder seeded with the production defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Parses and validates a JSON configuration document.
	pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
		let deserializer = &mut serde_json::Deserializer::from_str(raw);
		let config: Self = serde_path_to_error::deserialize(deserializer)
			.map_err(|e| ConfigError::Malformed { message: e.to_string() })?;

		config.validate()?;

		Ok(config)
	}

	/// Resolves `path` against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		Ok(self.base_url.join(path)?)
	}

	/// Absolute URL of the refresh endpoint.
	pub fn refresh_url(&self) -> Result<Url, ConfigError> {
		self.endpoint(&self.refresh_path)
	}

	/// Absolute URL of the login endpoint.
	pub fn login_url(&self) -> Result<Url, ConfigError> {
		self.endpoint(&self.login_path)
	}

	/// Validates invariants for the configuration.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::CannotBeABase { url: self.base_url.to_string() });
		}
		if self.base_url.scheme() != "https" && !self.allow_insecure_http {
			return Err(ConfigError::InsecureBaseUrl { url: self.base_url.to_string() });
		}

		validate_path("refresh", &self.refresh_path)?;
		validate_path("login", &self.login_path)?;

		if self.request_timeout.is_some_and(|timeout| !timeout.is_positive()) {
			return Err(ConfigError::NonPositiveTimeout);
		}
		if self.token_keys.access == self.token_keys.refresh {
			return Err(ConfigError::DuplicateTokenKey { key: self.token_keys.access.clone() });
		}

		Ok(())
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: Url::parse(DEFAULT_BASE_URL).expect("Default base URL should parse."),
			refresh_path: DEFAULT_REFRESH_PATH.into(),
			login_path: DEFAULT_LOGIN_PATH.into(),
			token_keys: TokenKeys::default(),
			request_timeout: None,
			singleflight_refresh: false,
			allow_insecure_http: false,
		}
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
	base_url: Option<String>,
	config: ClientConfig,
}
impl ClientConfigBuilder {
	/// Sets the backend origin.
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Overrides the refresh endpoint path.
	pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
		self.config.refresh_path = path.into();

		self
	}

	/// Overrides the login endpoint path.
	pub fn login_path(mut self, path: impl Into<String>) -> Self {
		self.config.login_path = path.into();

		self
	}

	/// Overrides the token storage keys.
	pub fn token_keys(mut self, keys: TokenKeys) -> Self {
		self.config.token_keys = keys;

		self
	}

	/// Sets the default per-attempt deadline.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.config.request_timeout = Some(timeout);

		self
	}

	/// Enables or disables singleflight refresh.
	pub fn singleflight_refresh(mut self, enabled: bool) -> Self {
		self.config.singleflight_refresh = enabled;

		self
	}

	/// Permits a plain-HTTP base URL.
	pub fn allow_insecure_http(mut self, allowed: bool) -> Self {
		self.config.allow_insecure_http = allowed;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		let mut config = self.config;

		if let Some(raw) = self.base_url {
			config.base_url = Url::parse(&raw)?;
		}

		config.validate()?;

		Ok(config)
	}
}

fn validate_path(endpoint: &'static str, path: &str) -> Result<(), ConfigError> {
	if path.trim().is_empty() { Err(ConfigError::EmptyEndpointPath { endpoint }) } else { Ok(()) }
}
