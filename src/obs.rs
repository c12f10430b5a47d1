//! Optional observability helpers for widget actions.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `graph_login.action` with the `action` and
//!   `stage` (call site) fields.
//! - Enable `metrics` to increment the `graph_login_action_total` counter for every
//!   attempt/success/failure/cancellation, labeled by `action` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Widget actions observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
	/// Interactive sign-in.
	Login,
	/// Sign-out.
	Logout,
	/// Profile and photo load.
	LoadState,
}
impl ActionKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ActionKind::Login => "login",
			ActionKind::Logout => "logout",
			ActionKind::LoadState => "load_state",
		}
	}
}
impl Display for ActionKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionOutcome {
	/// Entry to a widget action.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure reported to the host.
	Failure,
	/// A listener vetoed the action.
	Cancelled,
}
impl ActionOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ActionOutcome::Attempt => "attempt",
			ActionOutcome::Success => "success",
			ActionOutcome::Failure => "failure",
			ActionOutcome::Cancelled => "cancelled",
		}
	}
}
impl Display for ActionOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_match_metric_and_span_fields() {
		let kinds = [ActionKind::Login, ActionKind::Logout, ActionKind::LoadState]
			.map(ActionKind::as_str);
		let outcomes = [
			ActionOutcome::Attempt,
			ActionOutcome::Success,
			ActionOutcome::Failure,
			ActionOutcome::Cancelled,
		]
		.map(|outcome| outcome.to_string());

		assert_eq!(kinds, ["login", "logout", "load_state"]);
		assert_eq!(outcomes, ["attempt", "success", "failure", "cancelled"]);
	}
}
