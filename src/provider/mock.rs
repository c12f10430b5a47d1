//! Scripted [`AuthProvider`] for tests and demos.

// self
use crate::{
	_prelude::*,
	error::ProviderError,
	graph::{GraphClient, MockGraphClient, mock::yield_now},
	provider::{AuthProvider, ProviderFuture, ProviderState},
};

/// In-process provider whose sign-in outcome is configured up front.
///
/// `login` reports [`ProviderState::Loading`] while suspended, then settles on the configured
/// state (or fails with the configured error). `logout` always lands on
/// [`ProviderState::SignedOut`] unless a logout error is configured.
#[derive(Debug)]
pub struct MockProvider {
	state: RwLock<ProviderState>,
	login_result: Mutex<Result<ProviderState, ProviderError>>,
	logout_error: Mutex<Option<ProviderError>>,
	graph: MockGraphClient,
	login_calls: Mutex<usize>,
	logout_calls: Mutex<usize>,
}
impl MockProvider {
	/// Creates a provider in `state` that signs in successfully.
	pub fn new(state: ProviderState, graph: MockGraphClient) -> Self {
		Self {
			state: RwLock::new(state),
			login_result: Mutex::new(Ok(ProviderState::SignedIn)),
			logout_error: Mutex::new(None),
			graph,
			login_calls: Mutex::new(0),
			logout_calls: Mutex::new(0),
		}
	}

	/// Sets the state reached after `login` resolves.
	pub fn with_login_result(self, state: ProviderState) -> Self {
		*self.login_result.lock() = Ok(state);

		self
	}

	/// Makes `login` fail with `error`.
	pub fn with_login_error(self, error: ProviderError) -> Self {
		*self.login_result.lock() = Err(error);

		self
	}

	/// Makes `logout` fail with `error`.
	pub fn with_logout_error(self, error: ProviderError) -> Self {
		*self.logout_error.lock() = Some(error);

		self
	}

	/// Forces the session state, as an external session change would.
	pub fn set_state(&self, state: ProviderState) {
		*self.state.write() = state;
	}

	/// Scripted Graph client shared with the widget.
	pub fn graph_client(&self) -> &MockGraphClient {
		&self.graph
	}

	/// Number of `login` calls so far.
	pub fn login_calls(&self) -> usize {
		*self.login_calls.lock()
	}

	/// Number of `logout` calls so far.
	pub fn logout_calls(&self) -> usize {
		*self.logout_calls.lock()
	}
}
impl AuthProvider for MockProvider {
	fn state(&self) -> ProviderState {
		*self.state.read()
	}

	fn login(&self) -> ProviderFuture<'_, ()> {
		Box::pin(async move {
			*self.login_calls.lock() += 1;

			let previous = self.state();

			self.set_state(ProviderState::Loading);

			yield_now().await;

			let result = self.login_result.lock().clone();

			match result {
				Ok(state) => {
					self.set_state(state);

					Ok(())
				},
				Err(e) => {
					self.set_state(previous);

					Err(e)
				},
			}
		})
	}

	fn logout(&self) -> ProviderFuture<'_, ()> {
		Box::pin(async move {
			*self.logout_calls.lock() += 1;

			yield_now().await;

			if let Some(e) = self.logout_error.lock().clone() {
				return Err(e);
			}

			self.set_state(ProviderState::SignedOut);

			Ok(())
		})
	}

	fn graph(&self) -> Arc<dyn GraphClient> {
		Arc::new(self.graph.clone())
	}
}
