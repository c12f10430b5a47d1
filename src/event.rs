//! Lifecycle notifications emitted by the login widget.
//!
//! Hosts subscribe listeners through [`EventDispatcher::subscribe`]. Listeners receive a mutable
//! [`LoginEvent`] and may call [`LoginEvent::prevent_default`] on the cancelable
//! `*Initiated` kinds to veto the pending sign-in or sign-out.

// self
use crate::_prelude::*;

type Listener = Arc<dyn Fn(&mut LoginEvent) + Send + Sync>;

/// Notifications dispatched by [`LoginWidget`](crate::widget::LoginWidget).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoginEventKind {
	/// A sign-in is about to start; cancelable.
	LoginInitiated,
	/// The provider reported a signed-in session after the sign-in call.
	LoginCompleted,
	/// The provider did not reach a signed-in session.
	LoginFailed,
	/// A sign-out is about to start; cancelable.
	LogoutInitiated,
	/// The session ended and cached details were cleared.
	LogoutCompleted,
	/// The profile flyout opened.
	FlyoutOpened,
	/// The profile flyout closed.
	FlyoutClosed,
}
impl LoginEventKind {
	/// Returns the DOM-style event name.
	pub const fn as_str(self) -> &'static str {
		match self {
			LoginEventKind::LoginInitiated => "loginInitiated",
			LoginEventKind::LoginCompleted => "loginCompleted",
			LoginEventKind::LoginFailed => "loginFailed",
			LoginEventKind::LogoutInitiated => "logoutInitiated",
			LoginEventKind::LogoutCompleted => "logoutCompleted",
			LoginEventKind::FlyoutOpened => "flyoutOpened",
			LoginEventKind::FlyoutClosed => "flyoutClosed",
		}
	}

	/// Returns `true` when listeners may veto the action.
	pub const fn is_cancelable(self) -> bool {
		matches!(self, LoginEventKind::LoginInitiated | LoginEventKind::LogoutInitiated)
	}
}
impl Display for LoginEventKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A single dispatched notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginEvent {
	kind: LoginEventKind,
	default_prevented: bool,
}
impl LoginEvent {
	/// Creates a fresh event of `kind`.
	pub fn new(kind: LoginEventKind) -> Self {
		Self { kind, default_prevented: false }
	}

	/// Event kind.
	pub fn kind(&self) -> LoginEventKind {
		self.kind
	}

	/// Whether listeners may veto this event.
	pub fn is_cancelable(&self) -> bool {
		self.kind.is_cancelable()
	}

	/// Vetoes the pending action. Ignored for non-cancelable kinds.
	pub fn prevent_default(&mut self) {
		if self.is_cancelable() {
			self.default_prevented = true;
		}
	}

	/// Whether a listener vetoed the action.
	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}
}

/// Handle returned by [`EventDispatcher::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Ordered listener registry.
#[derive(Default)]
pub struct EventDispatcher {
	listeners: RwLock<Vec<(ListenerId, Listener)>>,
	next_id: Mutex<u64>,
}
impl EventDispatcher {
	/// Registers `listener`; it runs after every previously registered listener.
	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: 'static + Fn(&mut LoginEvent) + Send + Sync,
	{
		let id = {
			let mut next = self.next_id.lock();

			*next += 1;

			ListenerId(*next)
		};

		self.listeners.write().push((id, Arc::new(listener)));

		id
	}

	/// Removes a listener. Returns `false` when the id is unknown.
	pub fn unsubscribe(&self, id: ListenerId) -> bool {
		let mut listeners = self.listeners.write();
		let before = listeners.len();

		listeners.retain(|(existing, _)| *existing != id);

		listeners.len() != before
	}

	/// Number of registered listeners.
	pub fn len(&self) -> usize {
		self.listeners.read().len()
	}

	/// Returns `true` when no listener is registered.
	pub fn is_empty(&self) -> bool {
		self.listeners.read().is_empty()
	}

	/// Dispatches `kind` to every listener in registration order.
	///
	/// Returns `false` when a listener vetoed a cancelable event. Listeners are snapshotted
	/// before dispatch, so a listener may subscribe or unsubscribe without deadlocking.
	pub fn dispatch(&self, kind: LoginEventKind) -> bool {
		let snapshot = self.listeners.read().iter().map(|(_, l)| Arc::clone(l)).collect::<Vec<_>>();
		let mut event = LoginEvent::new(kind);

		for listener in snapshot {
			listener(&mut event);
		}

		#[cfg(feature = "tracing")]
		tracing::debug!(event = kind.as_str(), prevented = event.default_prevented(), "dispatched");

		!event.default_prevented()
	}
}
impl Debug for EventDispatcher {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("EventDispatcher").field("listeners", &self.len()).finish()
	}
}
