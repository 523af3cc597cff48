//! Access-token refresh against the identity endpoint.
//!
//! [`Client::refresh_access_token`] trades the stored refresh token for a new access token and
//! overwrites the stored access token in place. A rejected refresh token is terminal: the whole
//! session is wiped before [`Error::SessionExpired`] is returned, and the call is never retried.

mod metrics;

pub use metrics::RefreshMetrics;

// crates.io
use http::HeaderValue;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::{CallOptions, Client, decode_json},
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::{HttpTransport, RequestDescriptor},
};

#[derive(Serialize)]
struct RefreshRequest<'a> {
	refresh: &'a str,
}

#[derive(Deserialize)]
struct RefreshResponse {
	access: TokenSecret,
}

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Mints a new access token from the stored refresh token.
	///
	/// # Errors
	///
	/// - [`Error::MissingRefreshToken`] when no refresh token is stored (no network call).
	/// - [`Error::SessionExpired`] when the endpoint answers with a non-success status; the
	///   session store has been cleared by the time this is returned.
	/// - [`Error::Transport`] / [`Error::Decode`] when the call itself fails or the success body
	///   is malformed; stored state is left untouched.
	pub async fn refresh_access_token(&self) -> Result<TokenSecret> {
		self.refresh_access_token_with(CallOptions::default()).await
	}

	/// Same as [`Client::refresh_access_token`] with explicit per-call options.
	pub async fn refresh_access_token_with(&self, options: CallOptions) -> Result<TokenSecret> {
		const KIND: CallKind = CallKind::Refresh;

		let span = CallSpan::new(KIND, "refresh_access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.refresh_once(&span, options)).await;

		match &result {
			Ok(_) => self.refresh_metrics.record_success(),
			Err(_) => self.refresh_metrics.record_failure(),
		}

		obs::record_result(KIND, &result);

		result
	}

	async fn refresh_once(&self, span: &CallSpan, options: CallOptions) -> Result<TokenSecret> {
		let refresh = self.session.refresh_token().await?.ok_or(Error::MissingRefreshToken)?;
		let request = RequestDescriptor::post(self.config.refresh_url()?)
			.with_json(&RefreshRequest { refresh: refresh.expose() })?;

		self.refresh_metrics.record_attempt();

		let response = self.execute(&request, options).await?;
		let status = response.status();

		if !status.is_success() {
			span.note("refresh token rejected; wiping session");
			self.session.clear().await?;

			return Err(Error::SessionExpired { status: status.as_u16() });
		}

		let RefreshResponse { access } = decode_json(&response)?;

		self.session.replace_access(&access).await?;

		Ok(access)
	}

	/// Recovers a usable access token after a 401 on a request that carried `stale`.
	///
	/// Without singleflight every caller refreshes independently. With singleflight, callers
	/// queue on one guard and a caller whose stale bearer has already been rotated by the
	/// previous holder reuses the stored token instead of calling the endpoint again. A request
	/// that carried no bearer always refreshes.
	pub(crate) async fn recover_access(
		&self,
		stale: Option<&HeaderValue>,
		options: CallOptions,
	) -> Result<TokenSecret> {
		if !self.config.singleflight_refresh {
			return self.refresh_access_token_with(options).await;
		}

		let _singleflight = self.refresh_guard.lock().await;

		if let Some(stale) = stale
			&& let Some(current) = self.session.access_token().await?
			&& stale.as_bytes() != current.bearer().as_bytes()
		{
			self.refresh_metrics.record_reuse();

			return Ok(current);
		}

		self.refresh_access_token_with(options).await
	}
}
