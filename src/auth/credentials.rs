//! Application credentials and the HTTP Basic header derived from them.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::{ClientId, TokenSecret},
};

/// Application-level credentials issued by App.net.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientCredentials {
	/// OAuth client identifier.
	pub client_id: ClientId,
	/// OAuth client secret.
	pub client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Pairs a client identifier with its secret.
	pub fn new(client_id: ClientId, client_secret: impl Into<TokenSecret>) -> Self {
		Self { client_id, client_secret: client_secret.into() }
	}

	/// Returns the `Authorization` header value for HTTP Basic authentication.
	///
	/// The value is `Basic ` followed by the standard (padded) base64 encoding of
	/// `client_id:client_secret`.
	pub fn basic_authorization(&self) -> String {
		let raw = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", STANDARD.encode(raw))
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}
