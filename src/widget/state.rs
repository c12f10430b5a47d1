//! Widget state holder and the phases derived from it.

// self
use crate::{_prelude::*, user::UserDetails};

/// Provider call currently in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PendingAction {
	/// Waiting on the provider's sign-in.
	SigningIn,
	/// Waiting on the provider's sign-out.
	SigningOut,
}

/// Visual phase of the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetPhase {
	/// No user details; the button offers sign-in.
	SignedOut,
	/// Sign-in is in flight.
	SigningIn,
	/// User details are shown on the button.
	SignedIn,
	/// The profile flyout is open.
	FlyoutOpen,
	/// Sign-out is in flight.
	SigningOut,
}
impl WidgetPhase {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			WidgetPhase::SignedOut => "signed_out",
			WidgetPhase::SigningIn => "signing_in",
			WidgetPhase::SignedIn => "signed_in",
			WidgetPhase::FlyoutOpen => "flyout_open",
			WidgetPhase::SigningOut => "signing_out",
		}
	}
}
impl Display for WidgetPhase {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Snapshot of everything the widget caches.
///
/// Invariant: `flyout_open` implies `user_details.is_some()`. Fields are private so the
/// invariant can only change through the methods below.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WidgetState {
	user_details: Option<UserDetails>,
	image: Option<String>,
	flyout_open: bool,
	pending: Option<PendingAction>,
}
impl WidgetState {
	/// Signed-in user's profile, if known.
	pub fn user_details(&self) -> Option<&UserDetails> {
		self.user_details.as_ref()
	}

	/// Cached avatar as a `data:` URL.
	pub fn image(&self) -> Option<&str> {
		self.image.as_deref()
	}

	/// Whether the profile flyout is open.
	pub fn is_flyout_open(&self) -> bool {
		self.flyout_open
	}

	/// Provider call in flight, if any.
	pub fn pending(&self) -> Option<PendingAction> {
		self.pending
	}

	/// Derives the visual phase; in-flight calls take precedence.
	pub fn phase(&self) -> WidgetPhase {
		match (self.pending, self.flyout_open, self.user_details.is_some()) {
			(Some(PendingAction::SigningIn), ..) => WidgetPhase::SigningIn,
			(Some(PendingAction::SigningOut), ..) => WidgetPhase::SigningOut,
			(None, true, _) => WidgetPhase::FlyoutOpen,
			(None, false, true) => WidgetPhase::SignedIn,
			(None, false, false) => WidgetPhase::SignedOut,
		}
	}

	pub(crate) fn set_pending(&mut self, pending: Option<PendingAction>) {
		self.pending = pending;
	}

	/// Stores profile and photo together.
	pub(crate) fn set_user(&mut self, details: UserDetails, image: Option<String>) {
		self.user_details = Some(details);
		self.image = image;
	}

	/// Replaces the avatar; refused while no user is known.
	pub(crate) fn set_image(&mut self, image: Option<String>) -> bool {
		if self.user_details.is_none() {
			return false;
		}

		self.image = image;

		true
	}

	/// Drops profile and photo, closing the flyout. Returns whether the flyout was open.
	pub(crate) fn clear_user(&mut self) -> bool {
		let was_open = self.flyout_open;

		self.user_details = None;
		self.image = None;
		self.flyout_open = false;

		was_open
	}

	/// Opens the flyout. Returns `true` only on a closed-to-open transition.
	pub(crate) fn open_flyout(&mut self) -> bool {
		if self.flyout_open || self.user_details.is_none() {
			return false;
		}

		self.flyout_open = true;

		true
	}

	/// Closes the flyout. Returns `true` only on an open-to-closed transition.
	pub(crate) fn close_flyout(&mut self) -> bool {
		std::mem::replace(&mut self.flyout_open, false)
	}
}
