#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
// self
use graph_login::{
	config::LoginConfig,
	event::{LoginEvent, LoginEventKind},
	graph::{BatchResponse, BatchResponseItem, MockGraphClient},
	provider::{AuthProvider, MockProvider, ProviderState},
	widget::LoginWidget,
};

pub const PHOTO_BASE64: &str = "iVBORw0KGgo=";

pub fn profile_batch(display_name: &str) -> BatchResponse {
	let profile = serde_json::json!({
		"id": "87d349ed-44d7-43e1-9a83-5f2406dee5bd",
		"displayName": display_name,
		"mail": "AdeleV@contoso.example",
		"userPrincipalName": "adelev@contoso.example",
	});

	BatchResponse::new([
		BatchResponseItem::json("me", 200, profile),
		BatchResponseItem::binary("photo", 200, "image/png", PHOTO_BASE64),
	])
}

pub fn provider(initial: ProviderState, after_login: ProviderState) -> Arc<MockProvider> {
	let graph = MockGraphClient::default();

	graph.push_response(profile_batch("Adele Vance"));

	Arc::new(MockProvider::new(initial, graph).with_login_result(after_login))
}

pub fn widget(provider: &Arc<MockProvider>) -> LoginWidget {
	let provider: Arc<dyn AuthProvider> = provider.clone();

	LoginWidget::new(provider, LoginConfig::default())
}

pub fn record_events(widget: &LoginWidget) -> Arc<Mutex<Vec<LoginEventKind>>> {
	let seen = <Arc<Mutex<Vec<LoginEventKind>>>>::default();
	let sink = Arc::clone(&seen);

	widget.events().subscribe(move |event: &mut LoginEvent| sink.lock().push(event.kind()));

	seen
}
