//! Transport primitives for backend calls.
//!
//! The module exposes [`HttpTransport`], the client's only dependency on an HTTP stack, and
//! [`RequestDescriptor`], the cloneable description of a call that the refresh wrapper can
//! reissue after rotating the access token. Transports receive a fully built
//! [`HttpRequest`] plus an optional deadline and hand back the buffered [`HttpResponse`];
//! status interpretation stays with the client.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use http::{
	HeaderMap, HeaderName, HeaderValue, Method, Uri,
	header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
};
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	error::{ConfigError, TransportError},
};

/// Buffered request handed to an [`HttpTransport`].
pub type HttpRequest = http::Request<Vec<u8>>;
/// Buffered response returned by an [`HttpTransport`].
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing backend calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared by many
/// clients, and the returned future must be `Send` so calls can hop executors. A transport
/// reports only transport-level failures; every HTTP status, including 401 and 5xx, is a
/// successful [`HttpResponse`].
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes `request`, giving up with [`TransportError::Timeout`] once `timeout` elapses.
	fn execute(&self, request: HttpRequest, timeout: Option<Duration>) -> TransportFuture<'_>;
}

/// Ephemeral, cloneable description of one backend call.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Request headers.
	pub headers: HeaderMap,
	/// Optional request body.
	pub body: Option<Vec<u8>>,
}
impl RequestDescriptor {
	/// Creates a descriptor with no headers and no body.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: HeaderMap::new(), body: None }
	}

	/// Shorthand for a `GET` descriptor.
	pub fn get(url: Url) -> Self {
		Self::new(Method::GET, url)
	}

	/// Shorthand for a `POST` descriptor.
	pub fn post(url: Url) -> Self {
		Self::new(Method::POST, url)
	}

	/// Replaces the header set.
	pub fn with_headers(mut self, headers: HeaderMap) -> Self {
		self.headers = headers;

		self
	}

	/// Sets or replaces a single header.
	pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.headers.insert(name, value);

		self
	}

	/// Appends query pairs to the URL.
	pub fn with_query<'a, I>(mut self, pairs: I) -> Self
	where
		I: IntoIterator<Item = (&'a str, String)>,
	{
		{
			let mut query = self.url.query_pairs_mut();

			for (name, value) in pairs {
				query.append_pair(name, &value);
			}
		}

		self
	}

	/// Serializes `body` as JSON and marks the request as `application/json`.
	pub fn with_json<T>(mut self, body: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		let bytes = serde_json::to_vec(body).map_err(ConfigError::BodySerialize)?;

		self.body = Some(bytes);
		self.headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		Ok(self)
	}

	/// Substitutes `Authorization: Bearer <token>`, keeping every other header.
	pub fn set_bearer(&mut self, token: &TokenSecret) -> Result<(), ConfigError> {
		self.headers.insert(AUTHORIZATION, bearer_header(token)?);

		Ok(())
	}

	/// Current `Authorization` header, if any.
	pub fn authorization(&self) -> Option<&HeaderValue> {
		self.headers.get(AUTHORIZATION)
	}

	/// Builds the transport-level request for one attempt.
	pub fn to_http(&self) -> Result<HttpRequest, ConfigError> {
		let uri = Uri::try_from(self.url.as_str()).map_err(http::Error::from)?;
		let mut request = HttpRequest::new(self.body.clone().unwrap_or_default());

		*request.method_mut() = self.method.clone();
		*request.uri_mut() = uri;
		*request.headers_mut() = self.headers.clone();

		Ok(request)
	}
}

/// Formats `token` as a sensitive `Authorization` header value.
pub fn bearer_header(token: &TokenSecret) -> Result<HeaderValue, ConfigError> {
	let mut value = HeaderValue::from_str(&token.bearer())?;

	value.set_sensitive(true);

	Ok(value)
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: HttpRequest, timeout: Option<Duration>) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut request = reqwest::Request::try_from(request)?;

			*request.timeout_mut() = timeout.and_then(|value| value.try_into().ok());

			let response = client.execute(request).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Reads the body as text, replacing invalid UTF-8.
pub fn body_text(response: &HttpResponse) -> String {
	String::from_utf8_lossy(response.body()).into_owned()
}

/// Parses a `Retry-After` header given either as delta-seconds or as an HTTP date.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
