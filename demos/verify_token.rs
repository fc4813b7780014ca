//! Exchanges a client-credentials grant against a mock App.net server, stores the returned
//! token, and verifies it with and without delegate credentials.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use appnet_client::{
	auth::{ClientCredentials, ClientId},
	client::{AccessTokenResponse, ReqwestApiClient, TokenGrant},
	endpoint::ApiEndpoints,
	http::ReqwestHttpClient,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-app-token\"}");
		})
		.await;
	let verify_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/stream/0/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"data\":{\"app\":{\"client_id\":\"demo-client\"},\"scopes\":[]},\"meta\":{\"code\":200}}",
			);
		})
		.await;
	let endpoints = ApiEndpoints::builder()
		.api_base(Url::parse(&server.url("/"))?)
		.oauth_base(Url::parse(&server.url("/oauth/"))?)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let credentials = ClientCredentials::new(ClientId::new("demo-client")?, "demo-secret");
	let mut client = ReqwestApiClient::with_http_client(endpoints, credentials, http_client);
	let token: AccessTokenResponse =
		client.exchange_token(TokenGrant::ClientCredentials).await?.json()?;

	client.set_access_token(token.access_token);

	let bearer = client.verify_token(false).await?;
	let delegate = client.verify_token(true).await?;

	println!("Bearer verification: {}.", bearer.text());
	println!("Delegate verification: {}.", delegate.text());

	token_mock.assert_async().await;
	verify_mock.assert_calls_async(2).await;

	Ok(())
}
