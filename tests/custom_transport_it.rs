// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{Arc, Mutex},
};
// self
use appnet_client::{
	auth::{ClientCredentials, ClientId},
	client::{ApiClient, TokenGrant},
	endpoint::ApiEndpoints,
	error::{Error, TransportError},
	http::{
		ApiHttpClient, HttpClientError, HttpFuture, HttpRequest, HttpResponse, Method, StatusCode,
		header,
	},
};

#[derive(Debug)]
enum FakeTransportError {
	Unreachable,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Unreachable => write!(f, "Transport unreachable."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Debug)]
struct RecordedRequest {
	method: Method,
	uri: String,
	authorization: Option<String>,
	delegate: Option<String>,
	body: Vec<u8>,
}

#[derive(Default)]
struct RecordingHttpClient {
	requests: Mutex<Vec<RecordedRequest>>,
	unreachable: bool,
}
impl RecordingHttpClient {
	fn unreachable() -> Self {
		Self { unreachable: true, ..Default::default() }
	}

	fn recorded(&self) -> Vec<RecordedRequest> {
		self.requests.lock().expect("Request log lock should not be poisoned.").clone()
	}
}
impl ApiHttpClient for RecordingHttpClient {
	type TransportError = FakeTransportError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let header_value = |name: &str| {
			request.headers().get(name).and_then(|value| value.to_str().ok()).map(str::to_owned)
		};
		let recorded = RecordedRequest {
			method: request.method().clone(),
			uri: request.uri().to_string(),
			authorization: header_value(header::AUTHORIZATION.as_str()),
			delegate: header_value("identity-delegate-token"),
			body: request.body().clone(),
		};

		self.requests.lock().expect("Request log lock should not be poisoned.").push(recorded);

		let unreachable = self.unreachable;

		Box::pin(async move {
			if unreachable {
				return Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Unreachable)));
			}

			let mut response = HttpResponse::new(b"{\"data\":{}}".to_vec());

			*response.status_mut() = StatusCode::OK;

			Ok(response)
		})
	}
}

fn build_client(transport: Arc<RecordingHttpClient>) -> ApiClient<RecordingHttpClient> {
	let endpoints = ApiEndpoints::production().expect("Production endpoints should resolve.");
	let credentials = ClientCredentials::new(
		ClientId::new("abc").expect("Client identifier fixture should be valid."),
		"xyz",
	);

	ApiClient::with_http_client(endpoints, credentials, transport).with_access_token("tok")
}

#[tokio::test]
async fn delegate_verification_never_sends_bearer_token() {
	let transport = Arc::new(RecordingHttpClient::default());
	let client = build_client(transport.clone());

	client.verify_token(true).await.expect("Delegate verification should succeed.");

	let requests = transport.recorded();

	assert_eq!(requests.len(), 1);
	assert_eq!(requests[0].method, Method::GET);
	assert_eq!(requests[0].uri, "https://alpha-api.app.net/stream/0/token");
	// base64("abc:xyz")
	assert_eq!(requests[0].authorization.as_deref(), Some("Basic YWJjOnh5eg=="));
	assert_eq!(requests[0].delegate.as_deref(), Some("True"));
}

#[tokio::test]
async fn plain_verification_sends_stored_bearer_token() {
	let transport = Arc::new(RecordingHttpClient::default());
	let client = build_client(transport.clone());

	client.verify_token(false).await.expect("Bearer verification should succeed.");

	let requests = transport.recorded();

	assert_eq!(requests[0].authorization.as_deref(), Some("Bearer tok"));
	assert_eq!(requests[0].delegate, None);
}

#[tokio::test]
async fn cleared_token_drops_authorization_header() {
	let transport = Arc::new(RecordingHttpClient::default());
	let mut client = build_client(transport.clone());

	client.clear_access_token();
	client.fetch_config().await.expect("Configuration fetch should succeed.");

	let requests = transport.recorded();

	assert_eq!(requests[0].uri, "https://alpha-api.app.net/stream/0/config");
	assert_eq!(requests[0].authorization, None);
}

#[tokio::test]
async fn transport_failures_surface_as_network_errors() {
	let transport = Arc::new(RecordingHttpClient::unreachable());
	let client = build_client(transport.clone());
	let err = client
		.exchange_token(TokenGrant::ClientCredentials)
		.await
		.expect_err("Unreachable transports should fail the exchange.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert!(err.status().is_none());

	let requests = transport.recorded();

	assert_eq!(requests[0].uri, "https://account.app.net/oauth/access_token");
	assert_eq!(
		requests[0].body.as_slice(),
		b"client_id=abc&client_secret=xyz&grant_type=client_credentials"
	);
}
