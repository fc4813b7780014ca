#![cfg(feature = "reqwest")]

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
// self
use appnet_client::{
	auth::{ClientCredentials, ClientId, Scopes},
	client::{AccessTokenResponse, ReqwestApiClient, TokenGrant},
	endpoint::ApiEndpoints,
	error::{Error, TransportError},
	http::{FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, ReqwestHttpClient},
	reqwest::Client,
	url::Url,
};

const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";
const REDIRECT_URI: &str = "https://app.example.com/callback";

// httpmock serves self-signed certificates.
fn http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

fn build_client(server: &MockServer) -> ReqwestApiClient {
	build_client_with(server, http_client())
}

fn build_client_with(server: &MockServer, http_client: ReqwestHttpClient) -> ReqwestApiClient {
	let endpoints = ApiEndpoints::builder()
		.api_base(Url::parse(&server.url("/")).expect("Mock API base should parse successfully."))
		.oauth_base(
			Url::parse(&server.url("/oauth/")).expect("Mock OAuth base should parse successfully."),
		)
		.build()
		.expect("Mock endpoints should resolve successfully.");
	let credentials = ClientCredentials::new(
		ClientId::new(CLIENT_ID).expect("Client identifier fixture should be valid."),
		CLIENT_SECRET,
	);

	ReqwestApiClient::with_http_client(endpoints, credentials, http_client)
		.with_redirect_uri(REDIRECT_URI)
		.with_scopes(Scopes::new(["basic", "stream"]).expect("Scope fixture should be valid."))
}

#[tokio::test]
async fn verify_token_sends_stored_bearer_token() {
	let server = MockServer::start_async().await;
	let client = build_client(&server).with_access_token("user-token");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/stream/0/token")
				.header("authorization", "Bearer user-token")
				.header("content-type", JSON_CONTENT_TYPE);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":{\"user\":{\"username\":\"dalton\"}},\"meta\":{\"code\":200}}");
		})
		.await;
	let response = client.verify_token(false).await.expect("Bearer verification should succeed.");
	let body: serde_json::Value = response.json().expect("Verification body should decode.");

	assert_eq!(response.status().as_u16(), 200);
	assert_eq!(body["data"]["user"]["username"], "dalton");

	mock.assert_async().await;
}

#[tokio::test]
async fn delegate_verification_uses_basic_credentials() {
	let server = MockServer::start_async().await;
	let client = build_client(&server).with_access_token("user-token");
	// base64("client-it:secret-it")
	let basic = "Basic Y2xpZW50LWl0OnNlY3JldC1pdA==";
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/stream/0/token")
				.header("authorization", basic)
				.header("identity-delegate-token", "True");
			then.status(200).header("content-type", "application/json").body("{\"data\":{}}");
		})
		.await;

	client.verify_token(true).await.expect("Delegate verification should succeed.");

	mock.assert_async().await;
}

#[tokio::test]
async fn process_text_posts_form_body() {
	let server = MockServer::start_async().await;
	let client = build_client(&server).with_access_token("user-token");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/stream/0/text/process")
				.header("authorization", "Bearer user-token")
				.header("content-type", FORM_CONTENT_TYPE)
				.body("text=hello+%40dalton");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":{\"text\":\"hello @dalton\"}}");
		})
		.await;
	let response =
		client.process_text("hello @dalton").await.expect("Text processing should succeed.");

	assert!(response.text().contains("hello @dalton"));

	mock.assert_async().await;
}

#[tokio::test]
async fn fetch_config_decodes_json_object() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/stream/0/config").header("content-type", JSON_CONTENT_TYPE);
			then.status(200).header("content-type", "application/json").body(
				"{\"data\":{\"post\":{\"text_max_length\":256}},\"meta\":{\"code\":200}}",
			);
		})
		.await;
	let config = client.fetch_config().await.expect("Configuration fetch should succeed.");

	assert_eq!(config["data"]["post"]["text_max_length"], 256);

	mock.assert_async().await;
}

#[tokio::test]
async fn fetch_config_reports_malformed_json() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/stream/0/config");
			then.status(200).header("content-type", "application/json").body("{\"data\":");
		})
		.await;
	let err = client.fetch_config().await.expect_err("Truncated JSON should fail to decode.");

	assert!(matches!(err, Error::Decode { status: 200, .. }));

	mock.assert_async().await;
}

#[tokio::test]
async fn client_credentials_exchange_leaves_token_to_caller() {
	let server = MockServer::start_async().await;
	let mut client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/access_token")
				.header("content-type", FORM_CONTENT_TYPE)
				.body("client_id=client-it&client_secret=secret-it&grant_type=client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"app-token\"}");
		})
		.await;
	let response = client
		.exchange_token(TokenGrant::ClientCredentials)
		.await
		.expect("Client credentials exchange should succeed.");

	assert!(client.access_token().is_none(), "Exchange must not store the token implicitly.");

	let token: AccessTokenResponse = response.json().expect("Token payload should decode.");

	client.set_access_token(token.access_token);

	assert_eq!(client.access_token().map(|token| token.expose()), Some("app-token"));

	mock.assert_async().await;
}

#[tokio::test]
async fn authorization_code_exchange_sends_code_and_redirect() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/access_token").body(
				"client_id=client-it&client_secret=secret-it&grant_type=authorization_code\
				 &redirect_uri=https%3A%2F%2Fapp.example.com%2Fcallback&code=code-123",
			);
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"user-token\",\"username\":\"dalton\"}");
		})
		.await;
	let token: AccessTokenResponse = client
		.exchange_token(TokenGrant::authorization_code("code-123"))
		.await
		.expect("Authorization code exchange should succeed.")
		.json()
		.expect("Token payload should decode.");

	assert_eq!(token.access_token.expose(), "user-token");
	assert_eq!(token.username.as_deref(), Some("dalton"));

	mock.assert_async().await;
}

#[tokio::test]
async fn non_success_status_surfaces_envelope_message() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/stream/0/token");
			then.status(401).header("content-type", "application/json").body(
				"{\"meta\":{\"code\":401,\"error_message\":\"Call requires authentication: This resource requires authentication and no token was provided.\"}}",
			);
		})
		.await;
	let err = client.verify_token(false).await.expect_err("Unauthenticated calls should fail.");

	match err {
		Error::Status { status, message, .. } => {
			assert_eq!(status, 401);
			assert!(message.starts_with("Call requires authentication"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn generic_verbs_reach_arbitrary_paths() {
	let server = MockServer::start_async().await;
	let client = build_client(&server).with_access_token("user-token");
	let url = client.endpoints.api_url("stream/0/posts/1").expect("Post URL should resolve.");
	let put = server
		.mock_async(|when, then| {
			when.method(PUT).path("/stream/0/posts/1").body("text=edited");
			then.status(200).body("{}");
		})
		.await;
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/stream/0/posts/1").body("machine_only=1");
			then.status(200).body("{}");
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE)
				.path("/stream/0/posts/1")
				.header("authorization", "Bearer user-token")
				.header("content-type", JSON_CONTENT_TYPE);
			then.status(204);
		})
		.await;

	client
		.put(&url, Some(FORM_CONTENT_TYPE), &[("text", "edited")])
		.await
		.expect("PUT should succeed.");
	client
		.patch(&url, Some(FORM_CONTENT_TYPE), &[("machine_only", "1")])
		.await
		.expect("PATCH should succeed.");

	let response = client.delete(&url).await.expect("DELETE should succeed.");

	assert_eq!(response.status().as_u16(), 204);

	put.assert_async().await;
	patch.assert_async().await;
	delete.assert_async().await;
}

#[tokio::test]
async fn slow_responses_fail_once_the_timeout_elapses() {
	assert_eq!(ReqwestHttpClient::default().timeout(), None, "No timeout applies by default.");

	let server = MockServer::start_async().await;
	let transport = http_client().with_timeout(Duration::from_millis(100));

	assert_eq!(transport.timeout(), Some(Duration::from_millis(100)));

	let client = build_client_with(&server, transport);

	server
		.mock_async(|when, then| {
			when.method(GET).path("/stream/0/config");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":{}}")
				.delay(Duration::from_secs(2));
		})
		.await;

	let err = client.fetch_config().await.expect_err("Slow responses should time out.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
}
