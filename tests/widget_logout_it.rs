mod common;

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
// self
use graph_login::{
	error::{Error, ProviderError},
	event::{LoginEvent, LoginEventKind},
	graph::MockGraphClient,
	provider::{AuthProvider, MockProvider, ProviderState},
	widget::{LoadOutcome, LoginWidget, LogoutOutcome, WidgetPhase},
};

async fn signed_in_widget(provider: &Arc<MockProvider>) -> LoginWidget {
	let widget = common::widget(provider);

	assert_eq!(
		widget.load_state().await.expect("Initial profile load should succeed."),
		LoadOutcome::Loaded
	);
	assert!(widget.open_flyout());

	widget
}

#[tokio::test]
async fn logout_clears_details_and_closes_flyout_before_completion() {
	let provider = common::provider(ProviderState::SignedIn, ProviderState::SignedIn);
	let widget = Arc::new(signed_in_widget(&provider).await);
	let snapshots = <Arc<Mutex<Vec<(LoginEventKind, bool, bool, bool)>>>>::default();
	let sink = Arc::clone(&snapshots);
	let weak = Arc::downgrade(&widget);

	widget.events().subscribe(move |event: &mut LoginEvent| {
		if let Some(widget) = weak.upgrade() {
			sink.lock().push((
				event.kind(),
				widget.user_details().is_some(),
				widget.image().is_some(),
				widget.is_flyout_open(),
			));
		}
	});

	let outcome = widget.logout().await.expect("Sign-out should succeed.");

	assert_eq!(outcome, LogoutOutcome::Completed);
	assert_eq!(provider.logout_calls(), 1);
	assert_eq!(provider.state(), ProviderState::SignedOut);
	assert_eq!(
		*snapshots.lock(),
		vec![
			(LoginEventKind::LogoutInitiated, true, true, true),
			(LoginEventKind::FlyoutClosed, false, false, false),
			(LoginEventKind::LogoutCompleted, false, false, false),
		]
	);
	assert_eq!(widget.phase(), WidgetPhase::SignedOut);
}

#[tokio::test]
async fn suppressed_logout_initiated_keeps_session() {
	let provider = common::provider(ProviderState::SignedIn, ProviderState::SignedIn);
	let widget = signed_in_widget(&provider).await;
	let events = common::record_events(&widget);

	widget.events().subscribe(|event: &mut LoginEvent| {
		if event.kind() == LoginEventKind::LogoutInitiated {
			event.prevent_default();
		}
	});

	let outcome = widget.logout().await.expect("Vetoed sign-out should not error.");

	assert_eq!(outcome, LogoutOutcome::Cancelled);
	assert_eq!(provider.logout_calls(), 0);
	assert!(widget.user_details().is_some());
	assert!(widget.is_flyout_open());
	assert_eq!(*events.lock(), vec![LoginEventKind::LogoutInitiated]);
}

#[tokio::test]
async fn provider_logout_error_keeps_cache_and_skips_completion() {
	let graph = MockGraphClient::default();

	graph.push_response(common::profile_batch("Joni Sherman"));

	let provider = Arc::new(
		MockProvider::new(ProviderState::SignedIn, graph)
			.with_logout_error(ProviderError::Logout { reason: "network down".into() }),
	);
	let widget = signed_in_widget(&provider).await;
	let events = common::record_events(&widget);
	let err = widget.logout().await.expect_err("Provider logout error should be returned.");

	assert!(matches!(err, Error::Provider(ProviderError::Logout { .. })));
	assert_eq!(*events.lock(), vec![LoginEventKind::LogoutInitiated]);
	assert!(widget.user_details().is_some());
	assert_eq!(widget.phase(), WidgetPhase::FlyoutOpen);
}

#[tokio::test]
async fn logout_without_session_still_completes() {
	let provider = common::provider(ProviderState::SignedOut, ProviderState::SignedIn);
	let widget = common::widget(&provider);
	let events = common::record_events(&widget);
	let outcome = widget.logout().await.expect("Sign-out without a session should succeed.");

	assert_eq!(outcome, LogoutOutcome::Completed);
	assert_eq!(
		*events.lock(),
		vec![LoginEventKind::LogoutInitiated, LoginEventKind::LogoutCompleted]
	);
}
