use serde::Deserialize;

use crate::ApiConfig;
use crate::Credentials;
use crate::ProviderError;
use crate::ProviderResult;
use crate::SolangConfig;

/// Source of rendered answer bodies (HTML).
pub trait AnswerSource {
	fn answer_body(&self, answer_id: u64) -> ProviderResult<String>;
}

impl<S: AnswerSource + ?Sized> AnswerSource for &S {
	fn answer_body(&self, answer_id: u64) -> ProviderResult<String> {
		(**self).answer_body(answer_id)
	}
}

impl<S: AnswerSource + ?Sized> AnswerSource for Box<S> {
	fn answer_body(&self, answer_id: u64) -> ProviderResult<String> {
		(**self).answer_body(answer_id)
	}
}

/// Shape of the `/answers/{ids}` response wrapper. Errors are reported in the
/// same object rather than through the HTTP status alone.
#[derive(Debug, Deserialize)]
pub(crate) struct AnswersResponse {
	#[serde(default)]
	pub items: Vec<AnswerItem>,
	pub quota_remaining: Option<u64>,
	pub quota_max: Option<u64>,
	pub error_id: Option<i64>,
	pub error_name: Option<String>,
	pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerItem {
	pub body: Option<String>,
}

/// Blocking client for the Stack Exchange answers API.
#[derive(Debug, Clone)]
pub struct StackExchangeClient {
	http: reqwest::blocking::Client,
	base_url: String,
	version: String,
	site: String,
	credentials: Option<Credentials>,
}

impl StackExchangeClient {
	pub fn new(api: &ApiConfig, credentials: Option<Credentials>) -> ProviderResult<Self> {
		let http = reqwest::blocking::Client::builder()
			.user_agent(concat!("solang/", env!("CARGO_PKG_VERSION")))
			.build()?;

		Ok(Self {
			http,
			base_url: api.base_url.trim_end_matches('/').to_string(),
			version: api.version.clone(),
			site: api.site.clone(),
			credentials,
		})
	}

	pub fn from_config(config: &SolangConfig) -> ProviderResult<Self> {
		Self::new(&config.api, config.credentials())
	}

	/// Endpoint for a single answer, without query parameters.
	pub fn answer_url(&self, answer_id: u64) -> String {
		format!("{}/{}/answers/{answer_id}", self.base_url, self.version)
	}
}

impl AnswerSource for StackExchangeClient {
	fn answer_body(&self, answer_id: u64) -> ProviderResult<String> {
		let Some(credentials) = &self.credentials else {
			return Err(ProviderError::MissingCredentials(answer_id));
		};

		tracing::info!("Downloading answer {answer_id}");
		let response = self
			.http
			.get(self.answer_url(answer_id))
			.query(&[
				("site", self.site.as_str()),
				("filter", "withbody"),
				("key", credentials.key.as_str()),
				("access_token", credentials.access_token.as_str()),
			])
			.send()?;

		// The status is not checked so the API's own error message survives.
		let data: AnswersResponse = response.json()?;
		body_from_response(answer_id, data)
	}
}

pub(crate) fn body_from_response(answer_id: u64, data: AnswersResponse) -> ProviderResult<String> {
	if data.error_id.is_some() || data.error_message.is_some() {
		return Err(ProviderError::Api {
			id: data.error_id.unwrap_or_default(),
			name: data.error_name.unwrap_or_default(),
			message: data.error_message.unwrap_or_default(),
		});
	}

	let quota = |value: Option<u64>| value.map_or_else(|| "?".to_string(), |n| n.to_string());
	tracing::info!(
		"Request quota: {}/{} left",
		quota(data.quota_remaining),
		quota(data.quota_max)
	);

	let item = data
		.items
		.into_iter()
		.next()
		.ok_or(ProviderError::AnswerNotFound(answer_id))?;

	item.body.ok_or_else(|| {
		ProviderError::Decode(format!(
			"answer {answer_id} has no body, was the `withbody` filter applied?"
		))
	})
}
