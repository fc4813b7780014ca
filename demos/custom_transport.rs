//! Plugs a hand-written transport into the client instead of reqwest.
//!
//! 1. Implement [`ApiHttpClient`] and pick a transport error type.
//! 2. Hand the transport to [`ApiClient::with_http_client`].
//! 3. Transport failures come back as [`Error::Transport`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use appnet_client::{
	auth::{ClientCredentials, ClientId},
	client::ApiClient,
	endpoint::ApiEndpoints,
	error::Error,
	http::{ApiHttpClient, HttpClientError, HttpFuture, HttpRequest, HttpResponse},
};

#[derive(Debug)]
enum OfflineError {
	NoRoute { host: String },
}
impl Display for OfflineError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::NoRoute { host } => write!(f, "No route to {host}."),
		}
	}
}
impl StdError for OfflineError {}

/// Serves canned configuration while online and fails every call while offline.
struct CannedHttpClient {
	online: bool,
}
impl ApiHttpClient for CannedHttpClient {
	type TransportError = OfflineError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let online = self.online;
		let host = request.uri().host().unwrap_or_default().to_owned();

		Box::pin(async move {
			if !online {
				return Err(HttpClientError::Reqwest(Box::new(OfflineError::NoRoute { host })));
			}

			Ok(HttpResponse::new(
				b"{\"data\":{\"post\":{\"text_max_length\":256}},\"meta\":{\"code\":200}}".to_vec(),
			))
		})
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let endpoints = ApiEndpoints::production()?;
	let credentials = ClientCredentials::new(ClientId::new("demo-client")?, "demo-secret");
	let online: ApiClient<CannedHttpClient> = ApiClient::with_http_client(
		endpoints.clone(),
		credentials.clone(),
		Arc::new(CannedHttpClient { online: true }),
	);
	let config = online.fetch_config().await?;

	println!("Post length limit: {}.", config["data"]["post"]["text_max_length"]);

	let offline: ApiClient<CannedHttpClient> = ApiClient::with_http_client(
		endpoints,
		credentials,
		Arc::new(CannedHttpClient { online: false }),
	);

	match offline.fetch_config().await {
		Err(Error::Transport(err)) => println!("Offline transport failed as expected: {err}."),
		other => println!("Unexpected outcome: {other:?}."),
	}

	Ok(())
}
