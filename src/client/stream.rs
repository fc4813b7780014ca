// self
use crate::{
	_prelude::*,
	client::ApiClient,
	http::{ApiHttpClient, ApiResponse, FORM_CONTENT_TYPE, JSON_CONTENT_TYPE, Method},
	obs::{self, ApiOperation},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Submits `text` to the text processing endpoint and returns the raw response.
	///
	/// The text travels as the `text` form field; the stored bearer token authenticates the
	/// call.
	pub async fn process_text(&self, text: &str) -> Result<ApiResponse> {
		obs::observe(ApiOperation::ProcessText, "process_text", async move {
			let form = [("text", text)];

			self.send(
				Method::POST,
				self.endpoints.text_process(),
				Some(FORM_CONTENT_TYPE),
				Some(&form[..]),
			)
			.await
		})
		.await
	}

	/// Fetches the service configuration object as a generic JSON value.
	pub async fn fetch_config(&self) -> Result<serde_json::Value> {
		obs::observe(ApiOperation::FetchConfig, "fetch_config", async move {
			let response = self
				.send(Method::GET, self.endpoints.config(), Some(JSON_CONTENT_TYPE), None)
				.await?;

			response.json()
		})
		.await
	}
}
