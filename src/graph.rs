//! Batched profile and photo fetching.
//!
//! The widget reaches Graph through [`GraphClient`], a transport-agnostic contract that executes a
//! JSON `$batch` request. [`fetch_profile_and_photo`] builds the two-entry batch (`/me` and
//! `/me/photo/$value`) and decodes the answer into a [`ProfileSnapshot`]; the reqwest-backed
//! [`ReqwestGraphClient`] ships behind the default `reqwest` feature and [`MockGraphClient`]
//! serves scripted responses for tests and demos.

pub mod batch;
#[cfg(feature = "reqwest")] pub mod http;
pub mod mock;

pub use batch::*;
#[cfg(feature = "reqwest")] pub use http::*;
pub use mock::*;

// self
use crate::{_prelude::*, error::GraphError, user::UserDetails};

/// Boxed future returned by [`GraphClient::batch`].
pub type GraphFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Executes Graph JSON batches.
pub trait GraphClient
where
	Self: Send + Sync,
{
	/// Sends every sub-request in `request` in a single round trip.
	fn batch(&self, request: BatchRequest) -> GraphFuture<'_, BatchResponse>;
}

/// Profile and avatar decoded from one batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileSnapshot {
	/// Signed-in user's profile.
	pub details: UserDetails,
	/// Avatar as a `data:` URL, when the user has a photo.
	pub image: Option<String>,
}

/// Batch id for the profile sub-request.
pub const PROFILE_REQUEST_ID: &str = "me";
/// Batch id for the photo sub-request.
pub const PHOTO_REQUEST_ID: &str = "photo";

/// Fetches the profile and photo of the signed-in user in one batch.
///
/// A failed photo entry is tolerated (most tenants return 404 for users without a picture); a
/// failed or malformed profile entry fails the whole fetch.
pub async fn fetch_profile_and_photo(client: &dyn GraphClient) -> Result<ProfileSnapshot> {
	let request = BatchRequest::new()
		.get(PROFILE_REQUEST_ID, "/me")
		.get(PHOTO_REQUEST_ID, "/me/photo/$value");
	let response = client.batch(request).await?;
	let profile = response.require(PROFILE_REQUEST_ID)?;

	if !profile.is_success() {
		return Err(GraphError::EntryStatus {
			id: PROFILE_REQUEST_ID.into(),
			status: profile.status,
		}
		.into());
	}

	let details = profile.decode_json::<UserDetails>()?;
	let image = match response.get(PHOTO_REQUEST_ID) {
		Some(photo) if photo.is_success() => Some(photo.data_url()?),
		_ => None,
	};

	Ok(ProfileSnapshot { details, image })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::{PHOTO_FIXTURE, graph_fixture};

	#[tokio::test]
	async fn fetch_decodes_profile_and_photo() {
		let graph = MockGraphClient::default();

		graph.push_response(graph_fixture());

		let snapshot = fetch_profile_and_photo(&graph)
			.await
			.expect("Fixture batch should decode into a snapshot.");

		assert_eq!(snapshot.details.display_name.as_deref(), Some("Megan Bowen"));
		assert_eq!(
			snapshot.image.as_deref(),
			Some(format!("data:image/png;base64,{PHOTO_FIXTURE}").as_str())
		);

		let requests = graph.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(requests[0].requests.len(), 2);
		assert_eq!(requests[0].requests[1].url, "/me/photo/$value");
	}

	#[tokio::test]
	async fn missing_photo_still_yields_profile() {
		let graph = MockGraphClient::default();
		let profile = serde_json::json!({ "displayName": "Alex Wilber" });

		graph.push_response(BatchResponse::new([
			BatchResponseItem::json(PROFILE_REQUEST_ID, 200, profile),
			BatchResponseItem::json(
				PHOTO_REQUEST_ID,
				404,
				serde_json::json!({ "error": { "code": "ImageNotFound" } }),
			),
		]));

		let snapshot = fetch_profile_and_photo(&graph)
			.await
			.expect("Missing photo should not fail the fetch.");

		assert_eq!(snapshot.details.display_name.as_deref(), Some("Alex Wilber"));
		assert!(snapshot.image.is_none());
	}

	#[tokio::test]
	async fn failed_profile_entry_fails_fetch() {
		let graph = MockGraphClient::default();

		graph.push_response(BatchResponse::new([BatchResponseItem::json(
			PROFILE_REQUEST_ID,
			401,
			serde_json::Value::Null,
		)]));

		let err = fetch_profile_and_photo(&graph)
			.await
			.expect_err("Unauthorized profile entry should fail the fetch.");

		assert!(matches!(err, Error::Graph(GraphError::EntryStatus { status: 401, .. })));
	}
}
