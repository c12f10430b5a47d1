//! The login widget: a sign-in button that becomes a profile button with a sign-out flyout.
//!
//! [`LoginWidget`] is headless. It keeps [`WidgetState`], talks to an [`AuthProvider`], and
//! dispatches [`LoginEventKind`] notifications; hosts draw [`LoginWidget::view`] and forward
//! clicks, key presses, and provider state changes back in.
//!
//! Sign-in outcome is classified by reading the provider state after `login` resolves, not by
//! the call's return value alone: a provider that finishes without a session yields
//! [`LoginEventKind::LoginFailed`].

pub mod state;
pub mod view;

pub use state::*;
pub use view::*;

// self
use crate::{
	_prelude::*,
	config::LoginConfig,
	event::{EventDispatcher, LoginEventKind},
	graph,
	obs::{self, ActionKind, ActionOutcome, ActionSpan},
	provider::{AuthProvider, ProviderState},
	user::UserDetails,
};

/// Result of [`LoginWidget::login`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
	/// User details were already present; nothing happened.
	AlreadySignedIn,
	/// A listener vetoed `loginInitiated`; the provider was not called.
	Cancelled,
	/// The provider reported a session and the profile was loaded.
	Completed,
	/// The provider reported a session but the profile load failed; `loginCompleted` still
	/// fired. A later [`LoginWidget::click`] or [`LoginWidget::load_state`] retries the load.
	ProfileUnavailable,
	/// The provider finished without a session.
	Failed,
}

/// Result of [`LoginWidget::logout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogoutOutcome {
	/// A listener vetoed `logoutInitiated`; the provider was not called.
	Cancelled,
	/// The session ended and cached details were cleared.
	Completed,
}

/// Result of [`LoginWidget::load_state`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
	/// Profile and photo were fetched.
	Loaded,
	/// Details were already cached; no fetch was issued.
	Cached,
	/// The provider has no session; cached details were dropped.
	Cleared,
}

/// Result of [`LoginWidget::click`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
	/// Signed in: the flyout is now open.
	FlyoutOpened,
	/// Signed out: a sign-in ran.
	Login(LoginOutcome),
	/// The provider already had a session without cached details: the profile load was retried.
	Reloaded(LoadOutcome),
}

/// Keys the widget reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
	/// Activates the button.
	Enter,
	/// Activates the button.
	Space,
	/// Dismisses the flyout.
	Escape,
	/// Any other key.
	Other,
}

/// Result of [`LoginWidget::handle_key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
	/// The key had no effect.
	Ignored,
	/// Escape closed the flyout.
	FlyoutClosed,
	/// The key acted as a click.
	Clicked(ClickOutcome),
}

/// Headless login button and profile flyout.
pub struct LoginWidget {
	provider: Arc<dyn AuthProvider>,
	config: LoginConfig,
	state: RwLock<WidgetState>,
	events: EventDispatcher,
	load_guard: AsyncMutex<()>,
}
impl LoginWidget {
	/// Creates a signed-out widget over `provider`.
	///
	/// Call [`load_state`](Self::load_state) once after construction to pick up a session the
	/// provider restored on its own. `load_state` drops details injected through
	/// [`set_user_details`](Self::set_user_details) unless the provider is signed in, so inject
	/// them once the provider has settled.
	pub fn new(provider: Arc<dyn AuthProvider>, config: LoginConfig) -> Self {
		Self {
			provider,
			config,
			state: RwLock::new(WidgetState::default()),
			events: EventDispatcher::default(),
			load_guard: AsyncMutex::new(()),
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &LoginConfig {
		&self.config
	}

	/// Listener registry for lifecycle notifications.
	pub fn events(&self) -> &EventDispatcher {
		&self.events
	}

	/// Provider driving the widget.
	pub fn provider(&self) -> &Arc<dyn AuthProvider> {
		&self.provider
	}

	/// Snapshot of the cached state.
	pub fn state(&self) -> WidgetState {
		self.state.read().clone()
	}

	/// Current visual phase.
	pub fn phase(&self) -> WidgetPhase {
		self.state.read().phase()
	}

	/// Signed-in user's profile, if known.
	pub fn user_details(&self) -> Option<UserDetails> {
		self.state.read().user_details().cloned()
	}

	/// Cached avatar as a `data:` URL.
	pub fn image(&self) -> Option<String> {
		self.state.read().image().map(str::to_owned)
	}

	/// Whether the profile flyout is open.
	pub fn is_flyout_open(&self) -> bool {
		self.state.read().is_flyout_open()
	}

	/// Render-ready snapshot.
	pub fn view(&self) -> LoginView {
		LoginView::build(&self.state.read(), &self.config)
	}

	/// Overrides the user details, bypassing the provider.
	///
	/// Any cached avatar is dropped since it belonged to the previous details; supply a new one
	/// with [`set_image`](Self::set_image). Passing `None` signs the widget out visually and
	/// closes the flyout.
	pub fn set_user_details(&self, details: Option<UserDetails>) {
		let closed = {
			let mut state = self.state.write();

			match details {
				Some(details) => {
					state.set_user(details, None);

					false
				},
				None => state.clear_user(),
			}
		};

		if closed {
			self.events.dispatch(LoginEventKind::FlyoutClosed);
		}
	}

	/// Overrides the avatar. Returns `false` while no user details are set.
	pub fn set_image(&self, image: Option<String>) -> bool {
		self.state.write().set_image(image)
	}

	/// Signs in through the provider.
	///
	/// No-op when user details are present or a listener vetoes `loginInitiated`. Otherwise the
	/// provider's sign-in runs and the provider state read afterwards decides between
	/// `loginCompleted` (followed by a profile load) and `loginFailed`. A provider error also
	/// fires `loginFailed` before being returned. A failed profile load after `loginCompleted`
	/// is reported as [`LoginOutcome::ProfileUnavailable`], not as an error.
	pub async fn login(&self) -> Result<LoginOutcome> {
		let span = ActionSpan::new(ActionKind::Login, "login");

		span.instrument(self.login_inner()).await
	}

	async fn login_inner(&self) -> Result<LoginOutcome> {
		if self.has_user() {
			return Ok(LoginOutcome::AlreadySignedIn);
		}
		if !self.events.dispatch(LoginEventKind::LoginInitiated) {
			obs::record_action_outcome(ActionKind::Login, ActionOutcome::Cancelled);

			return Ok(LoginOutcome::Cancelled);
		}

		obs::record_action_outcome(ActionKind::Login, ActionOutcome::Attempt);

		let pending = PendingGuard::new(&self.state, PendingAction::SigningIn);
		let result = self.provider.login().await;

		drop(pending);

		if let Err(e) = result {
			#[cfg(feature = "tracing")]
			tracing::warn!(error = %e, "provider login failed");

			self.events.dispatch(LoginEventKind::LoginFailed);
			obs::record_action_outcome(ActionKind::Login, ActionOutcome::Failure);

			return Err(e.into());
		}

		let provider_state = self.provider.state();

		if provider_state != ProviderState::SignedIn {
			#[cfg(feature = "tracing")]
			tracing::info!(state = provider_state.as_str(), "login finished without a session");

			self.events.dispatch(LoginEventKind::LoginFailed);
			obs::record_action_outcome(ActionKind::Login, ActionOutcome::Failure);

			return Ok(LoginOutcome::Failed);
		}

		self.events.dispatch(LoginEventKind::LoginCompleted);
		obs::record_action_outcome(ActionKind::Login, ActionOutcome::Success);

		// The load failure is traced and counted inside `load_state`.
		match self.load_state().await {
			Ok(_) => Ok(LoginOutcome::Completed),
			Err(_) => Ok(LoginOutcome::ProfileUnavailable),
		}
	}

	/// Signs out through the provider.
	///
	/// No-op when a listener vetoes `logoutInitiated`. On success the cached details and image
	/// are cleared and the flyout closed before `logoutCompleted` fires. A provider error leaves
	/// the cache untouched and is returned without a completion event.
	pub async fn logout(&self) -> Result<LogoutOutcome> {
		let span = ActionSpan::new(ActionKind::Logout, "logout");

		span.instrument(self.logout_inner()).await
	}

	async fn logout_inner(&self) -> Result<LogoutOutcome> {
		if !self.events.dispatch(LoginEventKind::LogoutInitiated) {
			obs::record_action_outcome(ActionKind::Logout, ActionOutcome::Cancelled);

			return Ok(LogoutOutcome::Cancelled);
		}

		obs::record_action_outcome(ActionKind::Logout, ActionOutcome::Attempt);

		let pending = PendingGuard::new(&self.state, PendingAction::SigningOut);
		let result = self.provider.logout().await;

		drop(pending);

		if let Err(e) = result {
			#[cfg(feature = "tracing")]
			tracing::warn!(error = %e, "provider logout failed");

			obs::record_action_outcome(ActionKind::Logout, ActionOutcome::Failure);

			return Err(e.into());
		}

		self.clear_user();
		self.events.dispatch(LoginEventKind::LogoutCompleted);
		obs::record_action_outcome(ActionKind::Logout, ActionOutcome::Success);

		Ok(LogoutOutcome::Completed)
	}

	/// Synchronizes cached details with the provider session.
	///
	/// Signed in without cached details: fetches profile and photo in one batch and stores both
	/// together. Signed in with cached details: nothing changes. Any other provider state: the
	/// cache is dropped. Concurrent calls are serialized, so racing callers share one fetch.
	pub async fn load_state(&self) -> Result<LoadOutcome> {
		let span = ActionSpan::new(ActionKind::LoadState, "load_state");

		span.instrument(self.load_state_inner()).await
	}

	async fn load_state_inner(&self) -> Result<LoadOutcome> {
		let _guard = self.load_guard.lock().await;

		if self.provider.state() != ProviderState::SignedIn {
			self.clear_user();

			return Ok(LoadOutcome::Cleared);
		}
		if self.has_user() {
			return Ok(LoadOutcome::Cached);
		}

		obs::record_action_outcome(ActionKind::LoadState, ActionOutcome::Attempt);

		let graph = self.provider.graph();

		match graph::fetch_profile_and_photo(graph.as_ref()).await {
			Ok(snapshot) => {
				self.state.write().set_user(snapshot.details, snapshot.image);
				obs::record_action_outcome(ActionKind::LoadState, ActionOutcome::Success);

				Ok(LoadOutcome::Loaded)
			},
			Err(e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(error = %e, "profile load failed");

				obs::record_action_outcome(ActionKind::LoadState, ActionOutcome::Failure);

				Err(e)
			},
		}
	}

	/// Entry point for the provider's state-change notification.
	pub async fn on_provider_state_changed(&self) -> Result<LoadOutcome> {
		self.load_state().await
	}

	/// Routes a button click: opens the flyout when signed in, signs in otherwise.
	///
	/// When the provider already holds a session but no details are cached (an earlier profile
	/// load failed), the load is retried instead of running the interactive sign-in again.
	pub async fn click(&self) -> Result<ClickOutcome> {
		if self.has_user() {
			self.open_flyout();

			return Ok(ClickOutcome::FlyoutOpened);
		}
		if self.provider.state() == ProviderState::SignedIn {
			return Ok(ClickOutcome::Reloaded(self.load_state().await?));
		}

		Ok(ClickOutcome::Login(self.login().await?))
	}

	/// Routes a key press: Escape dismisses the flyout, Enter and Space click.
	pub async fn handle_key(&self, key: Key) -> Result<KeyOutcome> {
		match key {
			Key::Escape if self.close_flyout() => Ok(KeyOutcome::FlyoutClosed),
			Key::Enter | Key::Space => Ok(KeyOutcome::Clicked(self.click().await?)),
			_ => Ok(KeyOutcome::Ignored),
		}
	}

	/// Opens the flyout. Returns `false` without user details.
	pub fn open_flyout(&self) -> bool {
		let opened = self.state.write().open_flyout();

		if opened {
			self.events.dispatch(LoginEventKind::FlyoutOpened);
		}

		opened || self.is_flyout_open()
	}

	/// Closes the flyout. Returns `true` when it was open.
	pub fn close_flyout(&self) -> bool {
		let closed = self.state.write().close_flyout();

		if closed {
			self.events.dispatch(LoginEventKind::FlyoutClosed);
		}

		closed
	}

	/// Toggles the flyout. Returns whether it is open afterwards.
	pub fn toggle_flyout(&self) -> bool {
		if self.close_flyout() { false } else { self.open_flyout() }
	}

	fn has_user(&self) -> bool {
		self.state.read().user_details().is_some()
	}

	fn clear_user(&self) {
		let closed = self.state.write().clear_user();

		if closed {
			self.events.dispatch(LoginEventKind::FlyoutClosed);
		}
	}
}
impl Debug for LoginWidget {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LoginWidget")
			.field("config", &self.config)
			.field("state", &*self.state.read())
			.field("events", &self.events)
			.finish()
	}
}

/// Marks a provider call as in flight and clears the mark on drop, including when the host
/// drops the action's future before it resolves.
struct PendingGuard<'a> {
	state: &'a RwLock<WidgetState>,
}
impl<'a> PendingGuard<'a> {
	fn new(state: &'a RwLock<WidgetState>, action: PendingAction) -> Self {
		state.write().set_pending(Some(action));

		Self { state }
	}
}
impl Drop for PendingGuard<'_> {
	fn drop(&mut self) {
		self.state.write().set_pending(None);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{build_test_widget, record_events, signing_in_provider},
		event::LoginEvent,
	};

	#[tokio::test]
	async fn login_is_noop_with_cached_details() {
		let provider = signing_in_provider();
		let widget = build_test_widget(Arc::clone(&provider));
		let events = record_events(&widget);

		widget.set_user_details(Some(UserDetails::named("Johanna Lorenz")));

		let outcome = widget.login().await.expect("Login with cached details should not fail.");

		assert_eq!(outcome, LoginOutcome::AlreadySignedIn);
		assert_eq!(provider.login_calls(), 0);
		assert!(events.lock().is_empty());
	}

	#[tokio::test]
	async fn key_routing_follows_state() {
		let provider = signing_in_provider();
		let widget = build_test_widget(Arc::clone(&provider));

		assert_eq!(
			widget.handle_key(Key::Escape).await.expect("Escape should not fail."),
			KeyOutcome::Ignored
		);
		assert_eq!(
			widget.handle_key(Key::Enter).await.expect("Enter should sign in."),
			KeyOutcome::Clicked(ClickOutcome::Login(LoginOutcome::Completed))
		);
		assert_eq!(
			widget.handle_key(Key::Space).await.expect("Space should open the flyout."),
			KeyOutcome::Clicked(ClickOutcome::FlyoutOpened)
		);
		assert_eq!(
			widget.handle_key(Key::Escape).await.expect("Escape should close the flyout."),
			KeyOutcome::FlyoutClosed
		);
		assert_eq!(
			widget.handle_key(Key::Other).await.expect("Other keys should be ignored."),
			KeyOutcome::Ignored
		);
	}

	#[tokio::test]
	async fn toggle_and_override_keep_flyout_invariant() {
		let widget = build_test_widget(signing_in_provider());
		let events = record_events(&widget);

		assert!(!widget.toggle_flyout());

		widget.set_user_details(Some(UserDetails::named("Pradeep Gupta")));

		assert!(widget.toggle_flyout());
		assert_eq!(widget.phase(), WidgetPhase::FlyoutOpen);

		widget.set_user_details(None);

		assert!(!widget.is_flyout_open());
		assert_eq!(widget.phase(), WidgetPhase::SignedOut);
		assert_eq!(
			*events.lock(),
			vec![LoginEventKind::FlyoutOpened, LoginEventKind::FlyoutClosed]
		);
	}

	#[tokio::test]
	async fn listeners_may_reenter_the_widget() {
		let widget = Arc::new(build_test_widget(signing_in_provider()));
		let observed = <Arc<Mutex<Vec<WidgetPhase>>>>::default();
		let sink = Arc::clone(&observed);
		let weak = Arc::downgrade(&widget);

		widget.events().subscribe(move |_: &mut LoginEvent| {
			if let Some(widget) = weak.upgrade() {
				sink.lock().push(widget.phase());
			}
		});
		widget.login().await.expect("Login should complete.");

		assert_eq!(*observed.lock(), vec![WidgetPhase::SignedOut, WidgetPhase::SignedOut]);
	}
}
