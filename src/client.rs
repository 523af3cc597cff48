//! Authenticated request client: header construction, refresh, and the refresh-retry wrapper.

pub mod fetch;
pub mod headers;
pub mod refresh;

pub use refresh::RefreshMetrics;

// self
use crate::{
	_prelude::*,
	auth::Session,
	config::ClientConfig,
	store::SessionStore,
	transport::{HttpResponse, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = Client<ReqwestTransport>;

/// Per-call knobs threaded through every network attempt of one logical call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallOptions {
	/// Deadline for each network attempt; falls back to [`ClientConfig::request_timeout`].
	pub timeout: Option<Duration>,
}
impl CallOptions {
	/// Sets the per-attempt deadline.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}
}

/// Issues backend calls on behalf of one session.
///
/// The client owns the transport, the [`Session`] (and through it the token store), and the
/// validated configuration, so endpoint functions only describe their request. Cloning is
/// cheap and clones share the session, metrics, and singleflight guard.
pub struct Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// HTTP transport used for every outbound call.
	pub transport: Arc<T>,
	/// Session context holding the token pair.
	pub session: Session,
	/// Endpoint and policy configuration.
	pub config: Arc<ClientConfig>,
	/// Shared counters for refresh outcomes.
	pub refresh_metrics: Arc<RefreshMetrics>,
	refresh_guard: Arc<AsyncMutex<()>>,
}
impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client over the caller-provided transport.
	///
	/// `config` is expected to come from [`ClientConfig::builder`] or
	/// [`ClientConfig::from_json`], both of which validate it.
	pub fn with_transport(
		config: ClientConfig,
		store: Arc<dyn SessionStore>,
		transport: impl Into<Arc<T>>,
	) -> Self {
		let session = Session::new(store, config.token_keys.clone());

		Self {
			transport: transport.into(),
			session,
			config: Arc::new(config),
			refresh_metrics: Default::default(),
			refresh_guard: Default::default(),
		}
	}

	/// Effective per-attempt deadline for `options`.
	pub(crate) fn timeout_for(&self, options: CallOptions) -> Option<Duration> {
		options.timeout.or(self.config.request_timeout)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestTransport> {
	/// Creates a client that provisions its own reqwest transport.
	pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> Self {
		Self::with_transport(config, store, ReqwestTransport::default())
	}
}
impl<T> Clone for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: Arc::clone(&self.transport),
			session: self.session.clone(),
			config: Arc::clone(&self.config),
			refresh_metrics: Arc::clone(&self.refresh_metrics),
			refresh_guard: Arc::clone(&self.refresh_guard),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("base_url", &self.config.base_url.as_str())
			.field("session", &self.session)
			.field("singleflight_refresh", &self.config.singleflight_refresh)
			.finish()
	}
}

/// Decodes a JSON response body into `R`, reporting the failing path on mismatch.
pub fn decode_json<R>(response: &HttpResponse) -> Result<R>
where
	R: DeserializeOwned,
{
	let deserializer = &mut serde_json::Deserializer::from_slice(response.body());

	serde_path_to_error::deserialize(deserializer)
		.map_err(|source| Error::Decode { source, status: Some(response.status().as_u16()) })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decode_json_reports_path_and_status() {
		let mut response = HttpResponse::new(br#"{"access":42}"#.to_vec());

		*response.status_mut() = http::StatusCode::OK;

		#[derive(Debug, Deserialize)]
		struct Access {
			#[allow(dead_code)]
			access: String,
		}

		let err = decode_json::<Access>(&response).expect_err("Numeric access should not decode.");

		match err {
			Error::Decode { source, status } => {
				assert_eq!(source.path().to_string(), "access");
				assert_eq!(status, Some(200));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn call_options_timeout_overrides_config() {
		let options = CallOptions::default().with_timeout(Duration::seconds(3));

		assert_eq!(options.timeout, Some(Duration::seconds(3)));
		assert_eq!(CallOptions::default().timeout, None);
	}
}
