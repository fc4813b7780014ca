//! Endpoint configuration for the App.net data API and OAuth root.
//!
//! [`ApiEndpoints`] resolves every URL the client talks to from two base URIs. The defaults
//! point at the production service and must stay bit-exact to interoperate with it; the
//! [`ApiEndpointsBuilder`] exists so callers (and tests) can aim the client elsewhere.

/// Builder API for resolving endpoint sets.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Root of the App.net data API.
pub const DEFAULT_API_BASE: &str = "https://alpha-api.app.net/";
/// Root of the App.net OAuth endpoints.
pub const DEFAULT_OAUTH_BASE: &str = "https://account.app.net/oauth/";

pub(crate) const AUTHENTICATE_PATH: &str = "authenticate";
pub(crate) const ACCESS_TOKEN_PATH: &str = "access_token";
pub(crate) const TOKEN_PATH: &str = "stream/0/token";
pub(crate) const TEXT_PROCESS_PATH: &str = "stream/0/text/process";
pub(crate) const CONFIG_PATH: &str = "stream/0/config";

/// Resolved endpoint set consumed by the client.
///
/// Values only come out of [`ApiEndpointsBuilder::build`], so every base has passed validation.
/// Deserialization reads the two bases and resolves them the same way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EndpointBases")]
pub struct ApiEndpoints {
	api_base: Url,
	oauth_base: Url,
	authenticate: Url,
	access_token: Url,
	token: Url,
	text_process: Url,
	config: Url,
}
impl ApiEndpoints {
	/// Creates a new builder seeded with the production bases.
	pub fn builder() -> ApiEndpointsBuilder {
		ApiEndpointsBuilder::new()
	}

	/// Resolves the production endpoint set.
	pub fn production() -> Result<Self, EndpointError> {
		ApiEndpointsBuilder::new().build()
	}

	/// Resolves an arbitrary path (for example `stream/0/posts`) against the data API root.
	pub fn api_url(&self, path: &str) -> Result<Url, EndpointError> {
		join(&self.api_base, path)
	}

	/// Data API root (always ends with `/`).
	pub fn api_base(&self) -> &Url {
		&self.api_base
	}

	/// OAuth root (always ends with `/`).
	pub fn oauth_base(&self) -> &Url {
		&self.oauth_base
	}

	/// Authorization page end-users are redirected to.
	pub fn authenticate(&self) -> &Url {
		&self.authenticate
	}

	/// Token endpoint used for grant exchanges.
	pub fn access_token(&self) -> &Url {
		&self.access_token
	}

	/// Token inspection endpoint.
	pub fn token(&self) -> &Url {
		&self.token
	}

	/// Text processing endpoint.
	pub fn text_process(&self) -> &Url {
		&self.text_process
	}

	/// Service configuration endpoint.
	pub fn config(&self) -> &Url {
		&self.config
	}
}
impl TryFrom<EndpointBases> for ApiEndpoints {
	type Error = EndpointError;

	fn try_from(value: EndpointBases) -> Result<Self, Self::Error> {
		Self::resolve(value.api_base, value.oauth_base)
	}
}

// Serialized form of `ApiEndpoints`; derived URLs are recomputed on load.
#[derive(Deserialize)]
struct EndpointBases {
	api_base: Url,
	oauth_base: Url,
}

pub(crate) fn join(base: &Url, path: &str) -> Result<Url, EndpointError> {
	base.join(path).map_err(|source| EndpointError::InvalidUrl { path: path.to_owned(), source })
}
