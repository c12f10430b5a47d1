//! Identity provider contract consumed by the login widget.
//!
//! The widget never mutates [`ProviderState`]; it only asks the provider to sign in or out and
//! reads the resulting state afterwards. Profile data is fetched through the provider's
//! [`GraphClient`] so token acquisition stays with the provider.

pub mod mock;

pub use mock::*;

// self
use crate::{_prelude::*, error::ProviderError, graph::GraphClient};

/// Boxed future returned by [`AuthProvider`] operations.
pub type ProviderFuture<'a, T> =
	Pin<Box<dyn Future<Output = Result<T, ProviderError>> + 'a + Send>>;

/// Session state reported by an identity provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderState {
	/// The provider is still restoring or negotiating a session.
	#[default]
	Loading,
	/// No user is signed in.
	SignedOut,
	/// A user session is active.
	SignedIn,
}
impl ProviderState {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ProviderState::Loading => "loading",
			ProviderState::SignedOut => "signed_out",
			ProviderState::SignedIn => "signed_in",
		}
	}
}
impl Display for ProviderState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Identity provider capabilities required by the widget.
///
/// `login` and `logout` resolve once the provider's interactive step finishes; success of the
/// call does not imply a session, callers read [`state`](AuthProvider::state) afterwards.
pub trait AuthProvider
where
	Self: Send + Sync,
{
	/// Current session state.
	fn state(&self) -> ProviderState;

	/// Runs the provider's interactive sign-in.
	fn login(&self) -> ProviderFuture<'_, ()>;

	/// Ends the current session.
	fn logout(&self) -> ProviderFuture<'_, ()>;

	/// Graph client authorized for the signed-in user.
	fn graph(&self) -> Arc<dyn GraphClient>;
}
