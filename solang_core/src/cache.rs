use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::AnswerSource;
use crate::ProviderResult;

/// Wraps an [`AnswerSource`] with a directory of cached answer bodies, one
/// `a<answer id>.html` file per answer.
///
/// A non-empty cached file is served without touching the inner source.
/// Failing to write the cache is logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct AnswerCache<S> {
	dir: PathBuf,
	inner: S,
}

impl<S: AnswerSource> AnswerCache<S> {
	pub fn new(dir: impl Into<PathBuf>, inner: S) -> Self {
		Self {
			dir: dir.into(),
			inner,
		}
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn inner(&self) -> &S {
		&self.inner
	}

	/// Path of the cache file for `answer_id`.
	pub fn path_for(&self, answer_id: u64) -> PathBuf {
		cache_path(&self.dir, answer_id)
	}

	/// The cached body of `answer_id`, if present and non-empty.
	pub fn cached(&self, answer_id: u64) -> Option<String> {
		std::fs::read_to_string(self.path_for(answer_id))
			.ok()
			.filter(|body| !body.is_empty())
	}
}

impl<S: AnswerSource> AnswerSource for AnswerCache<S> {
	fn answer_body(&self, answer_id: u64) -> ProviderResult<String> {
		if let Some(body) = self.cached(answer_id) {
			tracing::debug!(answer_id, "answer cache hit");
			return Ok(body);
		}

		tracing::debug!(answer_id, "answer cache miss");
		let body = self.inner.answer_body(answer_id)?;
		save(&self.dir, answer_id, &body);

		Ok(body)
	}
}

pub(crate) fn cache_path(dir: &Path, answer_id: u64) -> PathBuf {
	dir.join(format!("a{answer_id}.html"))
}

pub(crate) fn save(dir: &Path, answer_id: u64, body: &str) {
	let path = cache_path(dir, answer_id);

	if let Err(error) = std::fs::create_dir_all(dir) {
		tracing::warn!("Unable to create cache directory {}: {error}", dir.display());
		return;
	}

	let temp_path = path.with_extension(format!(
		"html.tmp-{}-{}",
		std::process::id(),
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |duration| duration.as_nanos())
	));

	if let Err(error) = std::fs::write(&temp_path, body) {
		tracing::warn!("Unable to write to {}: {error}", path.display());
		return;
	}

	if let Err(error) = std::fs::rename(&temp_path, &path) {
		tracing::warn!("Unable to write to {}: {error}", path.display());
		let _ = std::fs::remove_file(temp_path);
	}
}
