//! Client-level error types shared across the session, transport, and endpoint layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// No refresh token is stored; the user must log in again.
	#[error("Refresh token not found. Please log in again.")]
	MissingRefreshToken,
	/// The refresh endpoint rejected the refresh token; the session has been wiped.
	#[error("Session expired. Please log in again.")]
	SessionExpired {
		/// HTTP status returned by the refresh endpoint.
		status: u16,
	},
	/// Refreshing the access token after a 401 failed.
	#[error("Failed to refresh token or retry request.")]
	RefreshFailed {
		/// Failure raised by the refresh routine.
		#[source]
		source: Box<Error>,
	},
	/// The (possibly retried) request returned a non-success status.
	#[error("Request failed with status {status}: {body}")]
	RequestFailed {
		/// HTTP status code of the final response.
		status: u16,
		/// Raw response body text.
		body: String,
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Response body could not be decoded into the expected shape.
	#[error("Response body could not be decoded.")]
	Decode {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// The backend rejected a submitted field.
	#[error("{message}")]
	Validation {
		/// Name of the rejected field.
		field: String,
		/// First message reported for the field.
		message: String,
	},
}
impl Error {
	/// Wraps a refresh-routine failure so callers can tell it apart from request failures.
	pub fn refresh_failed(cause: Error) -> Self {
		Self::RefreshFailed { source: Box::new(cause) }
	}

	/// Returns the refresh-routine failure when this error wraps one.
	pub fn refresh_cause(&self) -> Option<&Error> {
		match self {
			Self::RefreshFailed { source } => Some(source),
			_ => None,
		}
	}

	/// Returns `true` when the only way forward is a fresh login.
	///
	/// Covers [`Error::MissingRefreshToken`] and [`Error::SessionExpired`], whether raised
	/// directly by the refresh routine or wrapped inside [`Error::RefreshFailed`].
	pub fn requires_login(&self) -> bool {
		match self {
			Self::MissingRefreshToken | Self::SessionExpired { .. } => true,
			Self::RefreshFailed { source } => source.requires_login(),
			_ => false,
		}
	}

	/// Returns the HTTP status attached to the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::SessionExpired { status } | Self::RequestFailed { status, .. } => Some(*status),
			Self::Decode { status, .. } => *status,
			Self::RefreshFailed { source } => source.status(),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// A token or header value contains bytes that cannot appear in an HTTP header.
	#[error("Header value is invalid.")]
	InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
	/// Request body could not be serialized as JSON.
	#[error("Request body could not be serialized.")]
	BodySerialize(#[source] serde_json::Error),
	/// Configuration document could not be parsed.
	#[error("Configuration is malformed: {message}.")]
	Malformed {
		/// Path-aware parser message.
		message: String,
	},
	/// Base URL or endpoint path cannot be parsed.
	#[error("Endpoint URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot have paths joined onto it.
	#[error("Base URL `{url}` cannot be used as a base.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// Base URL must use HTTPS unless insecure HTTP is explicitly allowed.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Endpoint path is empty.
	#[error("The {endpoint} endpoint path must not be empty.")]
	EmptyEndpointPath {
		/// Which endpoint failed validation.
		endpoint: &'static str,
	},
	/// Timeout must be positive.
	#[error("The request timeout must be positive.")]
	NonPositiveTimeout,
	/// Access and refresh tokens would overwrite each other in storage.
	#[error("Access and refresh token keys must differ: `{key}`.")]
	DuplicateTokenKey {
		/// Key used for both tokens.
		key: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(source: url::ParseError) -> Self {
		Self::InvalidUrl { source }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, deadline).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the backend.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The call did not complete before its deadline.
	#[error("Request to the backend timed out.")]
	Timeout,
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the backend.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout } else { Self::network(e) }
	}
}
