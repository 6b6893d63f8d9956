use std::cell::RefCell;
use std::collections::HashMap;

use crate::AnswerSource;
use crate::MemoryProvider;
use crate::ProviderError;
use crate::ProviderResult;
use crate::SnippetProvider;

pub(crate) const ANSWER_HTML: &str = "<p>Use a loop:</p>\n<pre><code>for i in range(10):\n    \
                                      print(i)\n</code></pre>\n<p>or call <code>print</code> \
                                      directly, e.g. <code>print(a &lt; b)</code>.</p>\n";

pub(crate) fn animal_provider() -> MemoryProvider {
	MemoryProvider::new()
		.with_answer(1, ["cat"])
		.with_answer(2, ["dog"])
		.with_answer(3, ["foobaz", "second", "third"])
}

/// Records every fetch before delegating to an inner provider.
pub(crate) struct RecordingProvider<P> {
	pub inner: P,
	pub calls: RefCell<Vec<(u64, usize)>>,
}

impl<P> RecordingProvider<P> {
	pub fn new(inner: P) -> Self {
		Self {
			inner,
			calls: RefCell::new(vec![]),
		}
	}
}

impl<P: SnippetProvider> SnippetProvider for RecordingProvider<P> {
	fn fetch(&self, answer_id: u64, snippet_index: usize) -> ProviderResult<String> {
		self.calls.borrow_mut().push((answer_id, snippet_index));
		self.inner.fetch(answer_id, snippet_index)
	}
}

/// Answer bodies held in memory, counting how often each is requested.
#[derive(Default)]
pub(crate) struct StaticAnswers {
	pub bodies: HashMap<u64, String>,
	pub requests: RefCell<usize>,
}

impl StaticAnswers {
	pub fn with(answer_id: u64, body: &str) -> Self {
		let mut answers = Self::default();
		answers.bodies.insert(answer_id, body.to_string());
		answers
	}
}

impl AnswerSource for StaticAnswers {
	fn answer_body(&self, answer_id: u64) -> ProviderResult<String> {
		*self.requests.borrow_mut() += 1;
		self.bodies
			.get(&answer_id)
			.cloned()
			.ok_or(ProviderError::AnswerNotFound(answer_id))
	}
}
