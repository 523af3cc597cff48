//! Header construction for outgoing calls.

// crates.io
use http::{
	HeaderMap, HeaderValue, Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	client::Client,
	transport::{HttpTransport, RequestDescriptor, bearer_header},
};

impl<T> Client<T>
where
	T: ?Sized + HttpTransport,
{
	/// Builds the default header set from the session's current access token.
	///
	/// Always carries `Content-Type: application/json`; adds `Authorization: Bearer <access>`
	/// only when an access token is stored. A missing token is not an error: the backend
	/// rejects the call and the refresh wrapper takes over.
	pub async fn build_auth_headers(&self) -> Result<HeaderMap> {
		let mut headers = json_headers();

		if let Some(access) = self.session.access_token().await? {
			headers.insert(AUTHORIZATION, bearer_header(&access)?);
		}

		Ok(headers)
	}

	/// Resolves `path` against the base URL and pre-populates the auth headers.
	pub async fn authorized(&self, method: Method, path: &str) -> Result<RequestDescriptor> {
		let url = self.config.endpoint(path)?;
		let headers = self.build_auth_headers().await?;

		Ok(RequestDescriptor::new(method, url).with_headers(headers))
	}

	/// Resolves `path` against the base URL with only the JSON content type set.
	pub fn unauthenticated(&self, method: Method, path: &str) -> Result<RequestDescriptor> {
		let url = self.config.endpoint(path)?;

		Ok(RequestDescriptor::new(method, url).with_headers(json_headers()))
	}
}

fn json_headers() -> HeaderMap {
	let mut headers = HeaderMap::new();

	headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

	headers
}
