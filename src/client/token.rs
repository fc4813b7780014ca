// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	client::{ApiClient, build_request},
	http::{ApiHttpClient, ApiResponse, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, Method},
	obs::{self, ApiOperation},
};

const DELEGATE_HEADER: &str = "Identity-Delegate-Token";

/// OAuth 2.0 grant types the token endpoint accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant, completing the server-side flow.
	AuthorizationCode,
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
}
impl GrantType {
	/// Returns the RFC 6749 identifier for the grant type.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::ClientCredentials => "client_credentials",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Grant presented to the token endpoint.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum TokenGrant {
	/// App-level token issued to the application itself.
	#[default]
	ClientCredentials,
	/// User token obtained from the code delivered to the redirect URI.
	AuthorizationCode {
		/// Code received on the redirect.
		code: String,
	},
}
impl TokenGrant {
	/// Wraps an authorization code received on the redirect URI.
	pub fn authorization_code(code: impl Into<String>) -> Self {
		Self::AuthorizationCode { code: code.into() }
	}

	/// Grant type sent as `grant_type`.
	pub fn grant_type(&self) -> GrantType {
		match self {
			Self::ClientCredentials => GrantType::ClientCredentials,
			Self::AuthorizationCode { .. } => GrantType::AuthorizationCode,
		}
	}
}
impl Debug for TokenGrant {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ClientCredentials => f.write_str("ClientCredentials"),
			Self::AuthorizationCode { .. } =>
				f.debug_struct("AuthorizationCode").field("code", &"<redacted>").finish(),
		}
	}
}

/// Successful token endpoint payload.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessTokenResponse {
	/// Issued bearer token.
	pub access_token: TokenSecret,
	/// Username of the authorizing user; absent for app tokens.
	#[serde(default)]
	pub username: Option<String>,
	/// Token metadata object, when the service includes one.
	#[serde(default)]
	pub token: Option<serde_json::Value>,
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Exchanges a grant for an access token and returns the raw token endpoint response.
	///
	/// Credentials travel as form fields alongside `grant_type`; the authorization-code grant
	/// also sends `redirect_uri` and `code`. The stored token is left untouched: decode the
	/// response with [`ApiResponse::json`] into an [`AccessTokenResponse`] and call
	/// [`set_access_token`](Self::set_access_token).
	pub async fn exchange_token(&self, grant: TokenGrant) -> Result<ApiResponse> {
		obs::observe(ApiOperation::ExchangeToken, "exchange_token", async move {
			let credentials = self.credentials();
			let client_id: &str = &credentials.client_id;
			let mut form = vec![
				("client_id", client_id),
				("client_secret", credentials.client_secret.expose()),
				("grant_type", grant.grant_type().as_str()),
			];

			if let TokenGrant::AuthorizationCode { code } = &grant {
				form.push(("redirect_uri", self.redirect_uri.as_str()));
				form.push(("code", code.as_str()));
			}

			self.send(
				Method::POST,
				self.endpoints.access_token(),
				Some(FORM_CONTENT_TYPE),
				Some(form.as_slice()),
			)
			.await
		})
		.await
	}

	/// Asks the API to describe a token and returns the raw response.
	///
	/// With `delegate` set, the request authenticates with the application's HTTP Basic
	/// credentials plus `Identity-Delegate-Token: True` and never carries the stored bearer
	/// token. Otherwise the stored bearer token is inspected.
	pub async fn verify_token(&self, delegate: bool) -> Result<ApiResponse> {
		obs::observe(ApiOperation::VerifyToken, "verify_token", async move {
			if !delegate {
				return self
					.send(Method::GET, self.endpoints.token(), Some(JSON_CONTENT_TYPE), None)
					.await;
			}

			let authorization = self.credentials().basic_authorization();
			let request = build_request(
				Method::GET,
				self.endpoints.token(),
				None,
				None,
				Some(authorization.as_str()),
				&[(DELEGATE_HEADER, "True")],
			)?;

			self.dispatch(request).await
		})
		.await
	}
}
