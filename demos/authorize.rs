//! Builds the App.net authorization URLs for the server-side and client-side flows.

// crates.io
use color_eyre::Result;
// self
use appnet_client::{
	auth::{ClientCredentials, ClientId, Scopes},
	client::{ReqwestApiClient, ResponseType},
};

fn main() -> Result<()> {
	color_eyre::install()?;

	let credentials = ClientCredentials::new(ClientId::new("demo-client")?, "demo-secret");
	let client = ReqwestApiClient::new(credentials)?
		.with_redirect_uri("https://app.example.com/oauth/callback")
		.with_scopes(Scopes::new(["basic", "stream", "write_post"])?);

	println!(
		"Server-side flow: {}.",
		client.authorization_url(ResponseType::client_side(false), false)
	);
	println!(
		"Client-side flow in the App Store view: {}.",
		client.authorization_url(ResponseType::client_side(true), true)
	);

	Ok(())
}
