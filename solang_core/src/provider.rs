use std::collections::HashMap;

use crate::AnswerCache;
use crate::AnswerSource;
use crate::ProviderError;
use crate::ProviderResult;
use crate::SolangConfig;
use crate::StackExchangeClient;
use crate::extract::extract_code_snippets;

/// Resolves the `snippet_index`th code snippet (0-based) of an answer.
///
/// When the index is out of range implementations must return
/// [`ProviderError::SnippetOutOfRange`] so the engine can report how many
/// snippets the answer actually has.
pub trait SnippetProvider {
	fn fetch(&self, answer_id: u64, snippet_index: usize) -> ProviderResult<String>;
}

impl<P: SnippetProvider + ?Sized> SnippetProvider for &P {
	fn fetch(&self, answer_id: u64, snippet_index: usize) -> ProviderResult<String> {
		(**self).fetch(answer_id, snippet_index)
	}
}

impl<P: SnippetProvider + ?Sized> SnippetProvider for Box<P> {
	fn fetch(&self, answer_id: u64, snippet_index: usize) -> ProviderResult<String> {
		(**self).fetch(answer_id, snippet_index)
	}
}

fn select(snippets: &[String], snippet_index: usize) -> ProviderResult<String> {
	snippets
		.get(snippet_index)
		.cloned()
		.ok_or(ProviderError::SnippetOutOfRange {
			index: snippet_index,
			count: snippets.len(),
		})
}

/// Snippets held in memory, keyed by answer id.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
	answers: HashMap<u64, Vec<String>>,
}

impl MemoryProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register the snippets of an answer, replacing any previous ones.
	#[must_use]
	pub fn with_answer<I, S>(mut self, answer_id: u64, snippets: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.insert(answer_id, snippets);
		self
	}

	pub fn insert<I, S>(&mut self, answer_id: u64, snippets: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.answers
			.insert(answer_id, snippets.into_iter().map(Into::into).collect());
	}
}

impl SnippetProvider for MemoryProvider {
	fn fetch(&self, answer_id: u64, snippet_index: usize) -> ProviderResult<String> {
		let snippets = self
			.answers
			.get(&answer_id)
			.ok_or(ProviderError::AnswerNotFound(answer_id))?;

		select(snippets, snippet_index)
	}
}

/// Extracts snippets from the rendered HTML body of answers. Every `<code>`
/// element counts as one snippet, in document order.
#[derive(Debug, Clone)]
pub struct HtmlSnippetProvider<S> {
	source: S,
}

impl<S: AnswerSource> HtmlSnippetProvider<S> {
	pub fn new(source: S) -> Self {
		Self { source }
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	pub fn into_inner(self) -> S {
		self.source
	}
}

impl<S: AnswerSource> SnippetProvider for HtmlSnippetProvider<S> {
	fn fetch(&self, answer_id: u64, snippet_index: usize) -> ProviderResult<String> {
		let body = self.source.answer_body(answer_id)?;
		let snippets = extract_code_snippets(&body);
		tracing::debug!(
			answer_id,
			count = snippets.len(),
			"extracted code snippets"
		);

		select(&snippets, snippet_index)
	}
}

/// Build the Stack Overflow backed provider described by `config`, caching
/// answer bodies on disk unless the cache is disabled.
pub fn provider_from_config(config: &SolangConfig) -> ProviderResult<Box<dyn SnippetProvider>> {
	let client = StackExchangeClient::from_config(config)?;

	if config.cache.enabled {
		let cache = AnswerCache::new(config.cache.dir.clone(), client);
		Ok(Box::new(HtmlSnippetProvider::new(cache)))
	} else {
		Ok(Box::new(HtmlSnippetProvider::new(client)))
	}
}
