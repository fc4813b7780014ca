//! Transport primitives for App.net API calls.
//!
//! The module exposes [`ApiHttpClient`], the client's only dependency on an HTTP stack, plus
//! [`ApiResponse`], the successful response handed back to callers. Requests and responses use
//! the `http`-based [`HttpRequest`] / [`HttpResponse`] types re-exported by the `oauth2` crate so
//! custom transports and test doubles can be written without pulling in `reqwest`.

pub use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{HeaderMap, Method, StatusCode, header},
};

// std
#[cfg(feature = "reqwest")] use std::time::Duration;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// `Content-Type` sent with form-encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// `Content-Type` the API expects on JSON-oriented requests.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Abstraction over HTTP transports capable of executing App.net API requests.
///
/// The client holds its transport behind an `Arc` and calls [`execute`](Self::execute) once per
/// operation. Implementations must be `Send + Sync + 'static` so a single transport can be shared
/// across clients, and the returned future must be `Send` so callers can hop executors.
/// Implementations return every response they receive, successful or not; status handling
/// belongs to the client.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Dispatches `request` and resolves with the raw response.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient {
	client: ReqwestClient,
	timeout: Option<Duration>,
}
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self { client, timeout: None }
	}

	/// Fails every request that has not completed once `timeout` elapses.
	///
	/// No timeout applies unless the caller opts in here or through a custom
	/// [`ReqwestClient`].
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Per-request timeout, if one was set.
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.client
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.client.clone();
		let timeout = self.timeout;

		Box::pin(async move {
			let mut request: ReqwestRequest = request.try_into().map_err(Box::new)?;

			if let Some(timeout) = timeout {
				*request.timeout_mut() = Some(timeout);
			}

			let response = client.execute(request).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Successful (2xx) API response returned to callers.
#[derive(Debug)]
pub struct ApiResponse(HttpResponse);
impl ApiResponse {
	/// HTTP status code.
	pub fn status(&self) -> StatusCode {
		self.0.status()
	}

	/// Response headers.
	pub fn headers(&self) -> &HeaderMap {
		self.0.headers()
	}

	/// Returns a header value when it is present and valid UTF-8.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.0.headers().get(name).and_then(|value| value.to_str().ok())
	}

	/// Raw response body.
	pub fn body(&self) -> &[u8] {
		self.0.body()
	}

	/// Response body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> String {
		String::from_utf8_lossy(self.0.body()).into_owned()
	}

	/// Decodes the body as JSON, reporting the path of any field that fails to parse.
	pub fn json<T>(&self) -> Result<T>
	where
		T: serde::de::DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(self.0.body());

		serde_path_to_error::deserialize(&mut de)
			.map_err(|source| Error::Decode { source, status: self.0.status().as_u16() })
	}

	/// Returns the underlying `http` response.
	pub fn into_inner(self) -> HttpResponse {
		self.0
	}
}

/// Encodes `form` as an `application/x-www-form-urlencoded` body, keeping pair order.
pub fn encode_form<'a, I>(form: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	url::form_urlencoded::Serializer::new(String::new()).extend_pairs(form).finish()
}

/// Classifies a raw response, passing 2xx through and turning everything else into
/// [`Error::Status`].
pub(crate) fn check_status(response: HttpResponse) -> Result<ApiResponse> {
	let status = response.status();

	if status.is_success() {
		return Ok(ApiResponse(response));
	}

	let body = String::from_utf8_lossy(response.body()).into_owned();
	let message = envelope_error_message(response.body())
		.or_else(|| status.canonical_reason().map(str::to_owned))
		.unwrap_or_else(|| "Unexpected status".into());

	Err(Error::Status { status: status.as_u16(), message, body })
}

/// Converts an [`HttpClientError`] emitted by a transport into a client error.
pub(crate) fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		other => TransportError::Other { message: format!("{other:?}") }.into(),
	}
}

// App.net wraps failures as `{"meta": {"code": 401, "error_message": "..."}}`.
fn envelope_error_message(body: &[u8]) -> Option<String> {
	#[derive(Deserialize)]
	struct Envelope {
		meta: Meta,
	}
	#[derive(Deserialize)]
	struct Meta {
		error_message: Option<String>,
	}

	serde_json::from_slice::<Envelope>(body).ok()?.meta.error_message
}
