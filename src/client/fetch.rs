//! Request execution with transparent, single-shot token refresh.
//!
//! [`Client::fetch_with_refresh`] issues the request as given. On a 401 it refreshes the access
//! token once, swaps the `Authorization` header, and reissues the request exactly once. The
//! second response is final: a repeated 401 is reported as [`Error::RequestFailed`] and never
//! triggers another refresh, which bounds every logical call to one refresh and two primary
//! attempts.

// crates.io
use http::StatusCode;
// self
use crate::{
	_prelude::*,
	client::{CallOptions, Client, decode_json},
	obs::{self, CallKind, CallOutcome, CallSpan},
	transport::{HttpResponse, HttpTransport, RequestDescriptor, body_text, parse_retry_after},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Issues `request`, recovering once from an expired access token.
	pub async fn fetch_with_refresh(&self, request: RequestDescriptor) -> Result<HttpResponse> {
		self.fetch_with_refresh_with(request, CallOptions::default()).await
	}

	/// Same as [`Client::fetch_with_refresh`] with explicit per-call options.
	///
	/// # Errors
	///
	/// - [`Error::RefreshFailed`] wrapping the refresh routine's error when the 401 could not be
	///   recovered (see [`Error::requires_login`]).
	/// - [`Error::RequestFailed`] carrying the body text when the final response is not 2xx.
	/// - [`Error::Transport`] when either primary attempt fails below HTTP.
	pub async fn fetch_with_refresh_with(
		&self,
		mut request: RequestDescriptor,
		options: CallOptions,
	) -> Result<HttpResponse> {
		const KIND: CallKind = CallKind::Request;

		let span = CallSpan::new(KIND, "fetch_with_refresh");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async {
				let mut response = self.execute(&request, options).await?;

				if response.status() == StatusCode::UNAUTHORIZED {
					span.note("access token rejected; refreshing once");

					let stale = request.authorization().cloned();
					let access = self
						.recover_access(stale.as_ref(), options)
						.await
						.map_err(Error::refresh_failed)?;

					request.set_bearer(&access)?;
					response = self.execute(&request, options).await?;
				}

				ensure_success(response)
			})
			.await;

		obs::record_result(KIND, &result);

		result
	}

	/// Issues `request` once without any refresh handling.
	///
	/// Used for credential exchanges, where a 401 means bad credentials rather than an expired
	/// token.
	pub async fn fetch(&self, request: &RequestDescriptor) -> Result<HttpResponse> {
		ensure_success(self.execute(request, CallOptions::default()).await?)
	}

	/// [`Client::fetch`] followed by JSON decoding.
	pub async fn send_json<R>(&self, request: &RequestDescriptor) -> Result<R>
	where
		R: DeserializeOwned,
	{
		decode_json(&self.fetch(request).await?)
	}

	/// [`Client::fetch_with_refresh`] followed by JSON decoding.
	pub async fn send_json_with_refresh<R>(&self, request: RequestDescriptor) -> Result<R>
	where
		R: DeserializeOwned,
	{
		decode_json(&self.fetch_with_refresh(request).await?)
	}

	/// Performs one network attempt, whatever its status.
	pub(crate) async fn execute(
		&self,
		request: &RequestDescriptor,
		options: CallOptions,
	) -> Result<HttpResponse> {
		let http_request = request.to_http()?;

		Ok(self.transport.execute(http_request, self.timeout_for(options)).await?)
	}
}

/// Passes 2xx responses through and turns anything else into [`Error::RequestFailed`].
fn ensure_success(response: HttpResponse) -> Result<HttpResponse> {
	let status = response.status();

	if status.is_success() {
		return Ok(response);
	}

	Err(Error::RequestFailed {
		status: status.as_u16(),
		body: body_text(&response),
		retry_after: parse_retry_after(response.headers()),
	})
}
