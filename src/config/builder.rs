// self
use crate::{
	_prelude::*,
	config::{DisplayMode, LoginConfig, LoginStrings, default_graph_base_url, normalize_base_url},
	error::ConfigError,
};

/// Builder for [`LoginConfig`] values.
#[derive(Debug)]
pub struct LoginConfigBuilder {
	/// How the signed-in button presents the user.
	pub display_mode: DisplayMode,
	/// User-facing labels.
	pub strings: LoginStrings,
	/// Raw Graph root; parsed during [`build`](Self::build).
	pub graph_base_url: Option<String>,
}
impl LoginConfigBuilder {
	/// Overrides the display mode.
	pub fn display_mode(mut self, mode: DisplayMode) -> Self {
		self.display_mode = mode;

		self
	}

	/// Overrides the signed-out button label.
	pub fn sign_in_label(mut self, label: impl Into<String>) -> Self {
		self.strings.sign_in = label.into();

		self
	}

	/// Overrides the flyout sign-out label.
	pub fn sign_out_label(mut self, label: impl Into<String>) -> Self {
		self.strings.sign_out = label.into();

		self
	}

	/// Sets the Graph API root.
	pub fn graph_base_url(mut self, url: impl Into<String>) -> Self {
		self.graph_base_url = Some(url.into());

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<LoginConfig, ConfigError> {
		let graph_base_url = match self.graph_base_url {
			Some(raw) => Url::parse(&raw)
				.map_err(|source| ConfigError::InvalidGraphEndpoint { source })?,
			None => default_graph_base_url(),
		};
		let config = LoginConfig {
			display_mode: self.display_mode,
			strings: self.strings,
			graph_base_url: normalize_base_url(graph_base_url)?,
		};

		config.validate()?;

		Ok(config)
	}
}
impl Default for LoginConfigBuilder {
	fn default() -> Self {
		Self {
			display_mode: DisplayMode::default(),
			strings: LoginStrings::default(),
			graph_base_url: None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_appends_trailing_slash() {
		let config = LoginConfig::builder()
			.graph_base_url("https://graph.microsoft.com/beta")
			.build()
			.expect("Beta endpoint should be accepted.");

		assert_eq!(config.graph_base_url.as_str(), "https://graph.microsoft.com/beta/");
		assert_eq!(
			config.batch_endpoint().expect("Batch endpoint should resolve.").as_str(),
			"https://graph.microsoft.com/beta/$batch"
		);
	}

	#[test]
	fn builder_rejects_empty_labels_and_bad_urls() {
		let err = LoginConfig::builder()
			.sign_out_label("  ")
			.build()
			.expect_err("Blank sign-out label should be rejected.");

		assert!(matches!(err, ConfigError::EmptyLabel { field: "sign_out" }));

		let err = LoginConfig::builder()
			.graph_base_url("not a url")
			.build()
			.expect_err("Unparseable endpoint should be rejected.");

		assert!(matches!(err, ConfigError::InvalidGraphEndpoint { .. }));

		let err = LoginConfig::builder()
			.graph_base_url("data:text/plain,hello")
			.build()
			.expect_err("Non-base URL should be rejected.");

		assert!(matches!(err, ConfigError::CannotBeBase { .. }));
	}
}
