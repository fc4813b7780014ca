// self
use crate::{_prelude::*, client::ApiClient, http::ApiHttpClient};

/// `response_type` requested from the authorization page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
	/// Server-side flow: the redirect carries an authorization code.
	#[default]
	Code,
	/// Client-side flow: the redirect fragment carries the access token directly.
	Token,
}
impl ResponseType {
	/// Picks the client-side (`token`) or server-side (`code`) flow.
	pub fn client_side(client_side: bool) -> Self {
		if client_side { Self::Token } else { Self::Code }
	}

	/// Returns the wire value of the `response_type` parameter.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResponseType::Code => "code",
			ResponseType::Token => "token",
		}
	}
}
impl Display for ResponseType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Builds the URL end-users visit to authorize the application.
	///
	/// The query carries `client_id`, `redirect_uri`, `scope` (comma-joined), and
	/// `response_type`, in that order, followed by `adnview=appstore` when
	/// `app_store_view` is set. Performs no I/O.
	pub fn authorization_url(&self, response_type: ResponseType, app_store_view: bool) -> Url {
		let mut url = self.endpoints.authenticate().clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("client_id", self.client_id());
		pairs.append_pair("redirect_uri", &self.redirect_uri);
		pairs.append_pair("scope", &self.scopes.comma_joined());
		pairs.append_pair("response_type", response_type.as_str());

		if app_store_view {
			pairs.append_pair("adnview", "appstore");
		}

		drop(pairs);

		url
	}
}
