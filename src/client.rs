//! The App.net API client and its single request primitive.
//!
//! [`ApiClient`] holds the application credentials, the optional bearer token, the redirect
//! URI, and the requested scopes. Every network operation funnels through
//! [`ApiClient::request`], which attaches `Authorization: Bearer <token>` whenever a token is
//! stored and `Content-Type` whenever one is given, then hands the request to the injected
//! [`ApiHttpClient`]. Delegate token verification is the only call that swaps the bearer header
//! for HTTP Basic credentials.

mod authorize;
mod stream;
mod token;

pub use authorize::*;
pub use token::*;

// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, ClientId, Scopes, TokenSecret},
	endpoint::ApiEndpoints,
	error::ConfigError,
	http::{
		self, ApiHttpClient, ApiResponse, HttpRequest, JSON_CONTENT_TYPE, Method, header,
	},
	obs::{self, ApiOperation},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestHttpClient>;

/// Form parameters sent with a request, encoded in the given order.
pub type FormParams<'a> = &'a [(&'a str, &'a str)];

/// Client for the App.net data API and OAuth endpoints.
///
/// The bearer token is the only state that changes after construction. It is never updated
/// implicitly: after a successful [`exchange_token`](Self::exchange_token) the caller decodes
/// the response and stores the token with [`set_access_token`](Self::set_access_token). The
/// client performs no internal locking, so callers sharing one instance across tasks must
/// serialize mutations themselves.
pub struct ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP transport used for every outbound request.
	pub http_client: Arc<C>,
	/// Resolved endpoint set.
	pub endpoints: ApiEndpoints,
	/// Redirect URI registered for the application.
	pub redirect_uri: String,
	/// Scopes requested during authorization.
	pub scopes: Scopes,
	credentials: ClientCredentials,
	access_token: Option<TokenSecret>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(
		endpoints: ApiEndpoints,
		credentials: ClientCredentials,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			endpoints,
			redirect_uri: String::new(),
			scopes: Scopes::default(),
			credentials,
			access_token: None,
		}
	}

	/// Sets the redirect URI used by authorization URLs and code exchanges.
	pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
		self.redirect_uri = redirect_uri.into();

		self
	}

	/// Sets the scopes requested during authorization.
	pub fn with_scopes(mut self, scopes: Scopes) -> Self {
		self.scopes = scopes;

		self
	}

	/// Stores a bearer token up front, for callers that already hold one.
	pub fn with_access_token(mut self, token: impl Into<TokenSecret>) -> Self {
		self.set_access_token(token);

		self
	}

	/// Stores the bearer token attached to subsequent requests.
	///
	/// An empty token clears the stored one.
	pub fn set_access_token(&mut self, token: impl Into<TokenSecret>) {
		let token = token.into();

		self.access_token = if token.is_empty() { None } else { Some(token) };
	}

	/// Removes and returns the stored bearer token.
	pub fn clear_access_token(&mut self) -> Option<TokenSecret> {
		self.access_token.take()
	}

	/// Currently stored bearer token.
	pub fn access_token(&self) -> Option<&TokenSecret> {
		self.access_token.as_ref()
	}

	/// Application credentials.
	pub fn credentials(&self) -> &ClientCredentials {
		&self.credentials
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &ClientId {
		&self.credentials.client_id
	}

	/// Sends a request, attaching the stored bearer token and the given `Content-Type`.
	///
	/// Non-2xx responses surface as [`Error::Status`]; transport failures as
	/// [`Error::Transport`].
	pub async fn request(
		&self,
		method: Method,
		url: &Url,
		content_type: Option<&str>,
		form: Option<FormParams<'_>>,
	) -> Result<ApiResponse> {
		obs::observe(ApiOperation::Request, "request", self.send(method, url, content_type, form))
			.await
	}

	/// Issues a `GET`.
	pub async fn get(&self, url: &Url, content_type: Option<&str>) -> Result<ApiResponse> {
		obs::observe(ApiOperation::Request, "get", self.send(Method::GET, url, content_type, None))
			.await
	}

	/// Issues a `POST` with a form-encoded body.
	pub async fn post(
		&self,
		url: &Url,
		content_type: Option<&str>,
		form: FormParams<'_>,
	) -> Result<ApiResponse> {
		obs::observe(
			ApiOperation::Request,
			"post",
			self.send(Method::POST, url, content_type, Some(form)),
		)
		.await
	}

	/// Issues a `PUT` with a form-encoded body.
	pub async fn put(
		&self,
		url: &Url,
		content_type: Option<&str>,
		form: FormParams<'_>,
	) -> Result<ApiResponse> {
		obs::observe(
			ApiOperation::Request,
			"put",
			self.send(Method::PUT, url, content_type, Some(form)),
		)
		.await
	}

	/// Issues a `PATCH` with a form-encoded body.
	pub async fn patch(
		&self,
		url: &Url,
		content_type: Option<&str>,
		form: FormParams<'_>,
	) -> Result<ApiResponse> {
		obs::observe(
			ApiOperation::Request,
			"patch",
			self.send(Method::PATCH, url, content_type, Some(form)),
		)
		.await
	}

	/// Issues a `DELETE` declaring a JSON content type.
	pub async fn delete(&self, url: &Url) -> Result<ApiResponse> {
		obs::observe(
			ApiOperation::Request,
			"delete",
			self.send(Method::DELETE, url, Some(JSON_CONTENT_TYPE), None),
		)
		.await
	}

	pub(crate) async fn send(
		&self,
		method: Method,
		url: &Url,
		content_type: Option<&str>,
		form: Option<FormParams<'_>>,
	) -> Result<ApiResponse> {
		let authorization =
			self.access_token.as_ref().map(|token| format!("Bearer {}", token.expose()));
		let request =
			build_request(method, url, content_type, form, authorization.as_deref(), &[])?;

		self.dispatch(request).await
	}

	pub(crate) async fn dispatch(&self, request: HttpRequest) -> Result<ApiResponse> {
		let response =
			self.http_client.execute(request).await.map_err(http::map_transport_error)?;

		http::check_status(response)
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestHttpClient> {
	/// Creates a client for the production endpoints backed by a default reqwest transport.
	pub fn new(credentials: ClientCredentials) -> Result<Self> {
		let endpoints = ApiEndpoints::production().map_err(ConfigError::from)?;

		Ok(Self::with_http_client(endpoints, credentials, ReqwestHttpClient::default()))
	}
}
impl<C> Clone for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			endpoints: self.endpoints.clone(),
			redirect_uri: self.redirect_uri.clone(),
			scopes: self.scopes.clone(),
			credentials: self.credentials.clone(),
			access_token: self.access_token.clone(),
		}
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("endpoints", &self.endpoints)
			.field("client_id", &self.credentials.client_id)
			.field("redirect_uri", &self.redirect_uri)
			.field("scopes", &self.scopes)
			.field("access_token_set", &self.access_token.is_some())
			.finish()
	}
}

pub(crate) fn build_request(
	method: Method,
	url: &Url,
	content_type: Option<&str>,
	form: Option<FormParams<'_>>,
	authorization: Option<&str>,
	extra_headers: &[(&'static str, &str)],
) -> Result<HttpRequest> {
	let mut builder = oauth2::http::Request::builder().method(method).uri(url.as_str());

	if let Some(value) = authorization {
		builder = builder.header(header::AUTHORIZATION, value);
	}
	if let Some(value) = content_type {
		builder = builder.header(header::CONTENT_TYPE, value);
	}

	for (name, value) in extra_headers {
		builder = builder.header(*name, *value);
	}

	let body = form.map(|pairs| http::encode_form(pairs.iter().copied())).unwrap_or_default();

	builder.body(body.into_bytes()).map_err(|e| ConfigError::from(e).into())
}
