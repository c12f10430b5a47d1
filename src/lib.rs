//! Headless sign-in button and profile flyout: drive login, profile loading, and sign-out
//! against any identity provider while hosts observe (and veto) each lifecycle step.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod event;
pub mod graph;
pub mod obs;
pub mod provider;
pub mod user;
pub mod widget;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::LoginConfig,
		event::{LoginEvent, LoginEventKind},
		graph::{BatchResponse, BatchResponseItem, MockGraphClient},
		provider::{AuthProvider, MockProvider, ProviderState},
		widget::LoginWidget,
	};

	/// Profile payload returned by [`graph_fixture`] for the `me` entry.
	pub const PROFILE_FIXTURE: &str = r#"{
		"id": "48d31887-5fad-4d73-a9f5-3c356e68a038",
		"displayName": "Megan Bowen",
		"givenName": "Megan",
		"surname": "Bowen",
		"mail": "MeganB@contoso.example",
		"userPrincipalName": "meganb@contoso.example",
		"jobTitle": "Marketing Manager"
	}"#;
	/// Base64 body returned by [`graph_fixture`] for the `photo` entry.
	pub const PHOTO_FIXTURE: &str = "iVBORw0KGgo=";

	/// Builds a batch response holding the profile and photo fixtures.
	pub fn graph_fixture() -> BatchResponse {
		let profile = serde_json::from_str(PROFILE_FIXTURE)
			.expect("Profile fixture should be valid JSON.");

		BatchResponse::new([
			BatchResponseItem::json("me", 200, profile),
			BatchResponseItem::binary("photo", 200, "image/png", PHOTO_FIXTURE),
		])
	}

	/// Mock provider pre-loaded with [`graph_fixture`] that signs in successfully.
	pub fn signing_in_provider() -> Arc<MockProvider> {
		let graph = MockGraphClient::default();

		graph.push_response(graph_fixture());

		Arc::new(
			MockProvider::new(ProviderState::SignedOut, graph)
				.with_login_result(ProviderState::SignedIn),
		)
	}

	/// Builds a widget over `provider` with the default configuration.
	pub fn build_test_widget(provider: Arc<MockProvider>) -> LoginWidget {
		let provider: Arc<dyn AuthProvider> = provider;

		LoginWidget::new(provider, LoginConfig::default())
	}

	/// Subscribes a listener that records every event kind dispatched by `widget`.
	pub fn record_events(widget: &LoginWidget) -> Arc<Mutex<Vec<LoginEventKind>>> {
		let seen = <Arc<Mutex<Vec<LoginEventKind>>>>::default();
		let sink = Arc::clone(&seen);

		widget.events().subscribe(move |event: &mut LoginEvent| sink.lock().push(event.kind()));

		seen
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
