//! Signed-in user profile model.

// self
use crate::_prelude::*;

/// Profile of the signed-in user, shaped like the Graph `/me` resource.
///
/// Every field is optional because hosts may inject partial details and directories
/// frequently omit mail or job title.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
	/// Directory object identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// Full display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Given (first) name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	/// Family name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub surname: Option<String>,
	/// Primary SMTP address.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mail: Option<String>,
	/// Sign-in name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub user_principal_name: Option<String>,
	/// Job title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub job_title: Option<String>,
}
impl UserDetails {
	/// Creates details carrying only a display name.
	pub fn named(display_name: impl Into<String>) -> Self {
		Self { display_name: Some(display_name.into()), ..Default::default() }
	}

	/// Sets the primary mail address.
	pub fn with_mail(mut self, mail: impl Into<String>) -> Self {
		self.mail = Some(mail.into());

		self
	}

	/// Sets the given name and surname.
	pub fn with_names(mut self, given_name: impl Into<String>, surname: impl Into<String>) -> Self {
		self.given_name = Some(given_name.into());
		self.surname = Some(surname.into());

		self
	}

	/// Returns the best available label: display name, then mail, then sign-in name.
	pub fn label(&self) -> Option<&str> {
		non_blank(self.display_name.as_deref()).or_else(|| self.email())
	}

	/// Returns the mail address, falling back to the sign-in name.
	pub fn email(&self) -> Option<&str> {
		non_blank(self.mail.as_deref()).or_else(|| non_blank(self.user_principal_name.as_deref()))
	}

	/// Computes up to two uppercase initials for the avatar fallback.
	///
	/// Given name and surname win when both are present; otherwise the first two words of the
	/// display name are used.
	pub fn initials(&self) -> Option<String> {
		let mut initials = String::new();

		if let (Some(given), Some(surname)) =
			(non_blank(self.given_name.as_deref()), non_blank(self.surname.as_deref()))
		{
			push_initial(&mut initials, given);
			push_initial(&mut initials, surname);
		} else if let Some(name) = non_blank(self.display_name.as_deref()) {
			name.split_whitespace().take(2).for_each(|word| push_initial(&mut initials, word));
		}

		if initials.is_empty() { None } else { Some(initials) }
	}
}

fn non_blank(value: Option<&str>) -> Option<&str> {
	value.map(str::trim).filter(|v| !v.is_empty())
}

fn push_initial(buf: &mut String, word: &str) {
	if let Some(ch) = word.chars().find(|c| c.is_alphanumeric()) {
		buf.extend(ch.to_uppercase());
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn deserializes_graph_profile() {
		let details: UserDetails = serde_json::from_str(
			r#"{"displayName":"Adele Vance","mail":null,"userPrincipalName":"adelev@contoso.example","@odata.context":"ignored"}"#,
		)
		.expect("Graph profile fixture should deserialize.");

		assert_eq!(details.display_name.as_deref(), Some("Adele Vance"));
		assert_eq!(details.email(), Some("adelev@contoso.example"));
		assert!(details.mail.is_none());
	}

	#[test]
	fn initials_prefer_given_name_and_surname() {
		let details = UserDetails::named("Bowen, Megan").with_names("megan", "Bowen");

		assert_eq!(details.initials().as_deref(), Some("MB"));
	}

	#[test]
	fn initials_fall_back_to_display_name_words() {
		assert_eq!(UserDetails::named("Lee Gu Jr").initials().as_deref(), Some("LG"));
		assert_eq!(UserDetails::named("Cher").initials().as_deref(), Some("C"));
		assert_eq!(UserDetails::named("   ").initials(), None);
	}

	#[test]
	fn label_falls_back_to_email() {
		let details =
			UserDetails { mail: Some("alex@contoso.example".into()), ..Default::default() };

		assert_eq!(details.label(), Some("alex@contoso.example"));
		assert_eq!(UserDetails::default().label(), None);
	}
}
