//! Walks the widget through sign-in, the profile flyout, and sign-out against the scripted
//! provider, printing each lifecycle event and the rendered view.
//!
//! Pass `--veto` to watch a listener cancel the sign-out.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
use serde_json::json;
// self
use graph_login::{
	config::{DisplayMode, LoginConfig},
	event::LoginEventKind,
	graph::{BatchResponse, BatchResponseItem, MockGraphClient},
	provider::{AuthProvider, MockProvider, ProviderState},
	widget::LoginWidget,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let veto = env::args().any(|arg| arg == "--veto");
	let graph = MockGraphClient::default();

	graph.push_response(BatchResponse::new([
		BatchResponseItem::json(
			"me",
			200,
			json!({ "displayName": "Megan Bowen", "mail": "MeganB@contoso.example" }),
		),
		BatchResponseItem::json("photo", 404, json!({ "error": { "code": "ImageNotFound" } })),
	]));

	let provider: Arc<dyn AuthProvider> =
		Arc::new(MockProvider::new(ProviderState::SignedOut, graph));
	let config = LoginConfig::builder().display_mode(DisplayMode::AvatarAndName).build()?;
	let widget = LoginWidget::new(provider, config);

	widget.events().subscribe(move |event| {
		println!("event: {}", event.kind());

		if veto && event.kind() == LoginEventKind::LogoutInitiated {
			event.prevent_default();
		}
	});

	println!("{:#?}", widget.view());
	println!("click -> {:?}", widget.click().await?);
	println!("click -> {:?}", widget.click().await?);
	println!("{}", serde_json::to_string_pretty(&widget.view())?);
	println!("logout -> {:?}", widget.logout().await?);
	println!("{:#?}", widget.view());

	Ok(())
}
