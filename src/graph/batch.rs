//! Wire types for Graph JSON batching.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;
// self
use crate::{_prelude::*, error::GraphError};

const DEFAULT_PHOTO_CONTENT_TYPE: &str = "image/jpeg";

/// A `$batch` request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
	/// Sub-requests executed by the batch endpoint.
	pub requests: Vec<BatchRequestItem>,
}
impl BatchRequest {
	/// Creates an empty batch.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a `GET` sub-request.
	pub fn get(mut self, id: impl Into<String>, url: impl Into<String>) -> Self {
		let item = BatchRequestItem { id: id.into(), method: "GET".into(), url: url.into() };

		self.requests.push(item);

		self
	}
}

/// A single batch sub-request; `url` is relative to the Graph root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequestItem {
	/// Caller-chosen id used to correlate the sub-response.
	pub id: String,
	/// HTTP method.
	pub method: String,
	/// Relative resource path.
	pub url: String,
}

/// A `$batch` response body.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
	/// Sub-responses in arbitrary order.
	pub responses: Vec<BatchResponseItem>,
}
impl BatchResponse {
	/// Builds a response from sub-responses.
	pub fn new(responses: impl IntoIterator<Item = BatchResponseItem>) -> Self {
		Self { responses: responses.into_iter().collect() }
	}

	/// Parses a raw `$batch` body.
	pub fn from_slice(body: &[u8]) -> Result<Self, GraphError> {
		let de = &mut serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(de).map_err(|source| GraphError::BatchParse { source })
	}

	/// Looks up the sub-response for `id`.
	pub fn get(&self, id: &str) -> Option<&BatchResponseItem> {
		self.responses.iter().find(|item| item.id == id)
	}

	/// Looks up the sub-response for `id`, failing when absent.
	pub fn require(&self, id: &str) -> Result<&BatchResponseItem, GraphError> {
		self.get(id).ok_or_else(|| GraphError::MissingResponse { id: id.to_owned() })
	}
}

/// A single batch sub-response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchResponseItem {
	/// Id of the originating sub-request.
	pub id: String,
	/// HTTP status of the sub-response.
	pub status: u16,
	/// Sub-response headers.
	#[serde(default)]
	pub headers: BTreeMap<String, String>,
	/// JSON body; binary payloads arrive as a base64 string.
	#[serde(default)]
	pub body: Value,
}
impl BatchResponseItem {
	/// Builds a JSON sub-response.
	pub fn json(id: impl Into<String>, status: u16, body: Value) -> Self {
		let headers = BTreeMap::from([("Content-Type".into(), "application/json".into())]);

		Self { id: id.into(), status, headers, body }
	}

	/// Builds a binary sub-response whose body is already base64 encoded.
	pub fn binary(
		id: impl Into<String>,
		status: u16,
		content_type: impl Into<String>,
		base64_body: impl Into<String>,
	) -> Self {
		let headers = BTreeMap::from([("Content-Type".into(), content_type.into())]);

		Self { id: id.into(), status, headers, body: Value::String(base64_body.into()) }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Case-insensitive header lookup.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// Deserializes the JSON body, reporting the failing field path.
	pub fn decode_json<T>(&self) -> Result<T, GraphError>
	where
		T: for<'de> Deserialize<'de>,
	{
		serde_path_to_error::deserialize(&self.body)
			.map_err(|source| GraphError::ProfileParse { source })
	}

	/// Renders a base64 body as a `data:` URL after checking it decodes.
	pub fn data_url(&self) -> Result<String, GraphError> {
		let Value::String(encoded) = &self.body else {
			return Err(GraphError::PhotoBody { id: self.id.clone() });
		};

		STANDARD.decode(encoded)?;

		let content_type = self
			.header("content-type")
			.map(|v| v.split(';').next().unwrap_or(v).trim())
			.filter(|v| v.starts_with("image/"))
			.unwrap_or(DEFAULT_PHOTO_CONTENT_TYPE);

		Ok(format!("data:{content_type};base64,{encoded}"))
	}
}
