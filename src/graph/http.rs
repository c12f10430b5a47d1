//! reqwest-backed [`GraphClient`].

// crates.io
use reqwest::header::{ACCEPT, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	config::LoginConfig,
	error::{ConfigError, GraphError, ProviderError, TransportError},
	graph::{BatchRequest, BatchResponse, GraphClient, GraphFuture},
};

const BODY_PREVIEW_LIMIT: usize = 256;

/// Boxed future returned by [`AccessTokenSource::access_token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ProviderError>> + 'a + Send>>;

/// Supplies bearer tokens for Graph calls; usually implemented by the identity provider.
pub trait AccessTokenSource
where
	Self: Send + Sync,
{
	/// Acquires a token valid for the Graph resource.
	fn access_token(&self) -> TokenFuture<'_>;
}

/// Token source that always returns the same token.
#[derive(Clone)]
pub struct StaticToken(String);
impl StaticToken {
	/// Wraps a pre-acquired token.
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}
}
impl AccessTokenSource for StaticToken {
	fn access_token(&self) -> TokenFuture<'_> {
		let token = self.0.clone();

		Box::pin(async move { Ok(token) })
	}
}
impl Debug for StaticToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("StaticToken(<redacted>)")
	}
}

/// Posts JSON batches to `{graph_base_url}$batch` with a bearer token.
#[derive(Clone)]
pub struct ReqwestGraphClient {
	client: ReqwestClient,
	batch_endpoint: Url,
	tokens: Arc<dyn AccessTokenSource>,
}
impl ReqwestGraphClient {
	/// Creates a client for the configured Graph root with a default reqwest client.
	pub fn new(config: &LoginConfig, tokens: Arc<dyn AccessTokenSource>) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Self::with_client(client, config, tokens)
	}

	/// Reuses a caller-provided reqwest client.
	pub fn with_client(
		client: ReqwestClient,
		config: &LoginConfig,
		tokens: Arc<dyn AccessTokenSource>,
	) -> Result<Self> {
		Ok(Self { client, batch_endpoint: config.batch_endpoint()?, tokens })
	}

	/// Resolved `$batch` endpoint.
	pub fn batch_endpoint(&self) -> &Url {
		&self.batch_endpoint
	}

	async fn send(&self, request: BatchRequest) -> Result<BatchResponse> {
		let token = self.tokens.access_token().await?;
		let body = serde_json::to_vec(&request).map_err(GraphError::Encode)?;
		let response = self
			.client
			.post(self.batch_endpoint.clone())
			.bearer_auth(token)
			.header(CONTENT_TYPE, "application/json")
			.header(ACCEPT, "application/json")
			.body(body)
			.send()
			.await
			.map_err(TransportError::from)?;
		let status = response.status();
		let bytes = response.bytes().await.map_err(TransportError::from)?;

		if !status.is_success() {
			return Err(GraphError::BatchStatus {
				status: status.as_u16(),
				message: preview(&bytes, status.canonical_reason()),
			}
			.into());
		}

		Ok(BatchResponse::from_slice(&bytes)?)
	}
}
impl GraphClient for ReqwestGraphClient {
	fn batch(&self, request: BatchRequest) -> GraphFuture<'_, BatchResponse> {
		Box::pin(self.send(request))
	}
}
impl Debug for ReqwestGraphClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ReqwestGraphClient").field("batch_endpoint", &self.batch_endpoint).finish()
	}
}

fn preview(body: &[u8], reason: Option<&str>) -> String {
	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() {
		return reason.unwrap_or("empty body").to_owned();
	}

	let mut buf = text.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	if text.chars().count() > BODY_PREVIEW_LIMIT {
		buf.push('…');
	}

	buf
}
