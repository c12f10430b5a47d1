//! Widget configuration: display mode, UI labels, and the Graph endpoint.
//!
//! [`LoginConfig`] can be assembled in code through [`LoginConfigBuilder`] or deserialized from a
//! JSON document with [`LoginConfig::from_json`]. Both paths run the same validation: labels must
//! be non-empty and the Graph base URL must use HTTPS (loopback hosts are accepted so local mocks
//! keep working).

/// Builder API for assembling validated configurations.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Default Graph API root used when no endpoint is configured.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0/";

/// How the signed-in button presents the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
	/// Avatar image (or initials) only.
	Avatar,
	/// Display name only.
	Name,
	/// Avatar followed by the display name.
	#[default]
	#[serde(rename = "full", alias = "avatarAndName")]
	AvatarAndName,
}
impl DisplayMode {
	/// Returns the stable string form accepted by [`FromStr`].
	pub const fn as_str(self) -> &'static str {
		match self {
			DisplayMode::Avatar => "avatar",
			DisplayMode::Name => "name",
			DisplayMode::AvatarAndName => "full",
		}
	}

	/// Returns `true` when the avatar is part of the button.
	pub const fn shows_avatar(self) -> bool {
		matches!(self, DisplayMode::Avatar | DisplayMode::AvatarAndName)
	}

	/// Returns `true` when the display name is part of the button.
	pub const fn shows_name(self) -> bool {
		matches!(self, DisplayMode::Name | DisplayMode::AvatarAndName)
	}
}
impl Display for DisplayMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for DisplayMode {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"avatar" => Ok(DisplayMode::Avatar),
			"name" => Ok(DisplayMode::Name),
			"full" | "avatarandname" => Ok(DisplayMode::AvatarAndName),
			_ => Err(ConfigError::UnknownDisplayMode { value: s.to_owned() }),
		}
	}
}

/// User-facing labels rendered by the widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginStrings {
	/// Button label while signed out.
	pub sign_in: String,
	/// Flyout action label while signed in.
	pub sign_out: String,
}
impl Default for LoginStrings {
	fn default() -> Self {
		Self { sign_in: "Sign In".into(), sign_out: "Sign Out".into() }
	}
}

/// Validated widget configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginConfig {
	/// How the signed-in button presents the user.
	#[serde(default)]
	pub display_mode: DisplayMode,
	/// User-facing labels.
	#[serde(default)]
	pub strings: LoginStrings,
	/// Graph API root; sub-requests and `$batch` resolve against it.
	#[serde(default = "default_graph_base_url")]
	pub graph_base_url: Url,
}
impl LoginConfig {
	/// Returns a builder seeded with defaults.
	pub fn builder() -> LoginConfigBuilder {
		LoginConfigBuilder::default()
	}

	/// Parses and validates a JSON configuration document.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(json);
		let mut config: LoginConfig = serde_path_to_error::deserialize(de)
			.map_err(|source| ConfigError::Parse { source })?;

		config.graph_base_url = normalize_base_url(config.graph_base_url)?;
		config.validate()?;

		Ok(config)
	}

	/// Resolves the `$batch` endpoint under the Graph root.
	pub fn batch_endpoint(&self) -> Result<Url, ConfigError> {
		self.graph_base_url
			.join("$batch")
			.map_err(|source| ConfigError::InvalidGraphEndpoint { source })
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if self.strings.sign_in.trim().is_empty() {
			return Err(ConfigError::EmptyLabel { field: "sign_in" });
		}
		if self.strings.sign_out.trim().is_empty() {
			return Err(ConfigError::EmptyLabel { field: "sign_out" });
		}

		validate_graph_endpoint(&self.graph_base_url)
	}
}
impl Default for LoginConfig {
	fn default() -> Self {
		Self {
			display_mode: DisplayMode::default(),
			strings: LoginStrings::default(),
			graph_base_url: default_graph_base_url(),
		}
	}
}

fn default_graph_base_url() -> Url {
	Url::parse(DEFAULT_GRAPH_BASE_URL).expect("Default Graph base URL is a valid literal.")
}

/// Ensures the base ends with `/` so relative joins append instead of replacing the last
/// segment.
fn normalize_base_url(mut url: Url) -> Result<Url, ConfigError> {
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeBase { url: url.to_string() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	Ok(url)
}

fn validate_graph_endpoint(url: &Url) -> Result<(), ConfigError> {
	let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));

	if url.scheme() == "https" || (url.scheme() == "http" && loopback) {
		Ok(())
	} else {
		Err(ConfigError::InsecureGraphEndpoint { url: url.to_string() })
	}
}
