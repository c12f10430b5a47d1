//! Render-ready snapshot of the widget.
//!
//! A rendering layer draws [`LoginView`] without touching widget internals: the button is either
//! a sign-in label or a person, and the flyout is present only while open.

// self
use crate::{
	_prelude::*,
	config::{DisplayMode, LoginConfig},
	user::UserDetails,
	widget::{WidgetPhase, WidgetState},
};

/// Avatar content for a person.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Avatar {
	/// Photo as a `data:` URL.
	Image(String),
	/// Initials fallback when no photo is cached.
	Initials(String),
}

/// A person as drawn on the button or in the flyout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersonView {
	/// Label shown next to the avatar, when the display mode includes it.
	pub name: Option<String>,
	/// Avatar, when the display mode includes it.
	pub avatar: Option<Avatar>,
}
impl PersonView {
	fn new(details: &UserDetails, image: Option<&str>, mode: DisplayMode) -> Self {
		let name = mode.shows_name().then(|| details.label().map(str::to_owned)).flatten();
		let avatar = mode
			.shows_avatar()
			.then(|| match image {
				Some(url) => Some(Avatar::Image(url.to_owned())),
				None => details.initials().map(Avatar::Initials),
			})
			.flatten();

		Self { name, avatar }
	}
}

/// Button content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ButtonView {
	/// Signed out: a sign-in label, disabled while a sign-in is in flight.
	SignIn {
		/// Configured sign-in label.
		label: String,
		/// Whether a sign-in is in flight.
		busy: bool,
	},
	/// Signed in: the user per the configured display mode.
	Person(PersonView),
}

/// Flyout content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlyoutView {
	/// Full person card (avatar and name).
	pub person: PersonView,
	/// Mail or sign-in name.
	pub email: Option<String>,
	/// Configured sign-out label.
	pub sign_out_label: String,
	/// Whether a sign-out is in flight.
	pub busy: bool,
}

/// Render-ready widget snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginView {
	/// Current phase.
	pub phase: WidgetPhase,
	/// Button content.
	pub button: ButtonView,
	/// Flyout content while open.
	pub flyout: Option<FlyoutView>,
}
impl LoginView {
	/// Builds the view for `state` under `config`.
	pub fn build(state: &WidgetState, config: &LoginConfig) -> Self {
		let phase = state.phase();
		let button = match state.user_details() {
			Some(details) =>
				ButtonView::Person(PersonView::new(details, state.image(), config.display_mode)),
			None => ButtonView::SignIn {
				label: config.strings.sign_in.clone(),
				busy: phase == WidgetPhase::SigningIn,
			},
		};
		let flyout = state.user_details().filter(|_| state.is_flyout_open()).map(|details| {
			FlyoutView {
				person: PersonView::new(details, state.image(), DisplayMode::AvatarAndName),
				email: details.email().map(str::to_owned),
				sign_out_label: config.strings.sign_out.clone(),
				busy: phase == WidgetPhase::SigningOut,
			}
		});

		Self { phase, button, flyout }
	}
}
