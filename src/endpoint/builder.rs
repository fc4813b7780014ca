// crates.io
use url::Host;
// self
use crate::{
	_prelude::*,
	endpoint::{
		ACCESS_TOKEN_PATH, AUTHENTICATE_PATH, ApiEndpoints, CONFIG_PATH, DEFAULT_API_BASE,
		DEFAULT_OAUTH_BASE, TEXT_PROCESS_PATH, TOKEN_PATH,
	},
};

/// Errors raised while resolving endpoint sets.
#[derive(Debug, ThisError)]
pub enum EndpointError {
	/// Base URIs must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} base must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which base failed validation.
		endpoint: &'static str,
		/// Base URL that failed validation.
		url: String,
	},
	/// A relative path could not be resolved against its base.
	#[error("Path `{path}` cannot be resolved against the configured base.")]
	InvalidUrl {
		/// Path that failed to resolve.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

/// Builder for [`ApiEndpoints`] values.
#[derive(Clone, Debug, Default)]
pub struct ApiEndpointsBuilder {
	/// Data API root override.
	pub api_base: Option<Url>,
	/// OAuth root override.
	pub oauth_base: Option<Url>,
}
impl ApiEndpointsBuilder {
	/// Creates a builder that falls back to the production bases.
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the data API root.
	pub fn api_base(mut self, url: Url) -> Self {
		self.api_base = Some(url);

		self
	}

	/// Overrides the OAuth root.
	pub fn oauth_base(mut self, url: Url) -> Self {
		self.oauth_base = Some(url);

		self
	}

	/// Consumes the builder, validates both bases, and resolves every endpoint.
	pub fn build(self) -> Result<ApiEndpoints, EndpointError> {
		let api_base = match self.api_base {
			Some(url) => url,
			None => parse_default(DEFAULT_API_BASE)?,
		};
		let oauth_base = match self.oauth_base {
			Some(url) => url,
			None => parse_default(DEFAULT_OAUTH_BASE)?,
		};

		ApiEndpoints::resolve(api_base, oauth_base)
	}
}

impl ApiEndpoints {
	pub(super) fn resolve(api_base: Url, oauth_base: Url) -> Result<Self, EndpointError> {
		let api_base = normalize_base("api", api_base)?;
		let oauth_base = normalize_base("oauth", oauth_base)?;

		Ok(Self {
			authenticate: super::join(&oauth_base, AUTHENTICATE_PATH)?,
			access_token: super::join(&oauth_base, ACCESS_TOKEN_PATH)?,
			token: super::join(&api_base, TOKEN_PATH)?,
			text_process: super::join(&api_base, TEXT_PROCESS_PATH)?,
			config: super::join(&api_base, CONFIG_PATH)?,
			api_base,
			oauth_base,
		})
	}
}

fn parse_default(raw: &str) -> Result<Url, EndpointError> {
	Url::parse(raw).map_err(|source| EndpointError::InvalidUrl { path: raw.to_owned(), source })
}

fn normalize_base(name: &'static str, mut url: Url) -> Result<Url, EndpointError> {
	if url.scheme() != "https" && !is_loopback_http(&url) {
		return Err(EndpointError::InsecureEndpoint { endpoint: name, url: url.to_string() });
	}
	// `Url::join` replaces the last segment unless the base ends with a slash.
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

fn is_loopback_http(url: &Url) -> bool {
	if url.scheme() != "http" {
		return false;
	}

	match url.host() {
		Some(Host::Domain(domain)) => domain == "localhost",
		Some(Host::Ipv4(ip)) => ip.is_loopback(),
		Some(Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	}
}
