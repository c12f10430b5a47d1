//! Crate-level error types shared across the widget, providers, and Graph clients.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Identity provider failure.
	#[error(transparent)]
	Provider(#[from] ProviderError),
	/// Profile or photo fetch failure.
	#[error(transparent)]
	Graph(#[from] GraphError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Failures reported by an [`AuthProvider`](crate::provider::AuthProvider).
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ProviderError {
	/// The interactive sign-in could not run (popup blocked, user agent error, ...).
	#[error("Provider login failed: {reason}.")]
	Login {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// The provider could not end the session.
	#[error("Provider logout failed: {reason}.")]
	Logout {
		/// Provider-supplied reason string.
		reason: String,
	},
	/// No access token could be acquired for a Graph call.
	#[error("Access token is unavailable: {reason}.")]
	TokenUnavailable {
		/// Provider-supplied reason string.
		reason: String,
	},
}

/// Failures raised while fetching or decoding the batched profile and photo.
#[derive(Debug, ThisError)]
pub enum GraphError {
	/// The `$batch` endpoint itself answered with a non-success status.
	#[error("Batch request failed with HTTP {status}: {message}.")]
	BatchStatus {
		/// HTTP status code.
		status: u16,
		/// Body preview or status reason.
		message: String,
	},
	/// The batch response did not include an entry for a sub-request.
	#[error("Batch response is missing the `{id}` entry.")]
	MissingResponse {
		/// Sub-request identifier.
		id: String,
	},
	/// A required sub-request answered with a non-success status.
	#[error("Batch entry `{id}` failed with HTTP {status}.")]
	EntryStatus {
		/// Sub-request identifier.
		id: String,
		/// HTTP status code of the sub-response.
		status: u16,
	},
	/// The batch request could not be encoded.
	#[error("Batch request could not be encoded.")]
	Encode(#[source] serde_json::Error),
	/// The batch envelope could not be parsed.
	#[error("Batch response is malformed.")]
	BatchParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The profile entry could not be parsed into user details.
	#[error("Profile payload is malformed.")]
	ProfileParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// The photo entry body is not valid base64.
	#[error("Photo payload is not valid base64.")]
	PhotoDecode(#[from] base64::DecodeError),
	/// The photo entry body is not a string.
	#[error("Photo payload for `{id}` is not a base64 string.")]
	PhotoBody {
		/// Sub-request identifier.
		id: String,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Graph base URL cannot be parsed.
	#[error("Graph endpoint is invalid.")]
	InvalidGraphEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Graph base URL does not use HTTPS and is not a loopback host.
	#[error("Graph endpoint `{url}` must use HTTPS.")]
	InsecureGraphEndpoint {
		/// Offending URL.
		url: String,
	},
	/// Graph base URL cannot carry a path (e.g. `data:` URLs).
	#[error("Graph endpoint `{url}` cannot be used as a base URL.")]
	CannotBeBase {
		/// Offending URL.
		url: String,
	},
	/// A UI string was configured as empty.
	#[error("The `{field}` label cannot be empty.")]
	EmptyLabel {
		/// Name of the empty label.
		field: &'static str,
	},
	/// Display mode string is not recognized.
	#[error("Unknown display mode `{value}`; expected avatar, name, or full.")]
	UnknownDisplayMode {
		/// Offending value.
		value: String,
	},
	/// Configuration document could not be parsed.
	#[error("Configuration is malformed.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Graph endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
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
		Self::network(e)
	}
}
