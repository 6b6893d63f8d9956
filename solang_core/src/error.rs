use miette::Diagnostic;
use miette::SourceSpan;
use thiserror::Error;

/// The single fatal error produced while compiling a program. It remembers
/// the 1-indexed line that caused it and the byte span of that line in the
/// source so the CLI can render a labelled excerpt.
#[derive(Debug, Diagnostic, Error)]
#[error("On line {line}: {kind}")]
#[diagnostic(code(solang::parse_error))]
pub struct ParseError {
	/// 1-indexed line number of the offending statement.
	pub line: usize,
	#[diagnostic_source]
	pub kind: ParseErrorKind,
	#[label("this statement")]
	pub span: SourceSpan,
}

impl ParseError {
	pub fn new(line: usize, kind: ParseErrorKind, span: impl Into<SourceSpan>) -> Self {
		Self {
			line,
			kind,
			span: span.into(),
		}
	}
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
	#[error("Unrecognized expression")]
	#[diagnostic(
		code(solang::unrecognized_expression),
		help("statements are either `<answer id> <n> [snippet]` or `/pattern/replacement`")
	)]
	UnrecognizedExpression,

	#[error("Expected replacement in the form of '/pattern/repl', got {line}")]
	#[diagnostic(code(solang::malformed_replacement))]
	MalformedReplacement { line: String },

	#[error("Attempted replacement before answer declaration")]
	#[diagnostic(
		code(solang::replacement_before_answer),
		help("declare an answer with `<answer id> <n> [snippet]` before rewriting it")
	)]
	ReplacementBeforeAnswer,

	#[error("Invalid answer id `{0}`")]
	#[diagnostic(code(solang::invalid_answer_id))]
	InvalidAnswerId(String),

	#[error("Invalid snippet index `{0}`, expected a non-negative integer")]
	#[diagnostic(code(solang::invalid_snippet_index))]
	InvalidSnippetIndex(String),

	#[error("Invalid pattern `{pattern}`: {reason}")]
	#[diagnostic(code(solang::invalid_pattern))]
	InvalidPattern { pattern: String, reason: String },

	#[error("Invalid replacement `{replacement}`: {reason}")]
	#[diagnostic(
		code(solang::invalid_replacement),
		help("use `\\1` or `\\g<name>` for groups and `\\\\` for a literal backslash")
	)]
	InvalidReplacement { replacement: String, reason: String },

	#[error("Tried to get snippet {index} (0-based) when there are only {count} snippets")]
	#[diagnostic(code(solang::snippet_out_of_range))]
	SnippetOutOfRange { index: usize, count: usize },

	#[error(transparent)]
	#[diagnostic(transparent)]
	Provider(ProviderError),
}

impl From<ProviderError> for ParseErrorKind {
	fn from(error: ProviderError) -> Self {
		match error {
			ProviderError::SnippetOutOfRange { index, count } => {
				Self::SnippetOutOfRange { index, count }
			}
			other => Self::Provider(other),
		}
	}
}

/// Failures raised while resolving an answer snippet.
#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ProviderError {
	#[error("Tried to get snippet {index} (0-based) when there are only {count} snippets")]
	#[diagnostic(code(solang::snippet_out_of_range))]
	SnippetOutOfRange { index: usize, count: usize },

	#[error("answer {0} was not found")]
	#[diagnostic(
		code(solang::answer_not_found),
		help("check that the answer id exists and has not been deleted")
	)]
	AnswerNotFound(u64),

	#[error("answer {0} is not cached and no API credentials are configured")]
	#[diagnostic(
		code(solang::missing_credentials),
		help("set SOLANG_KEY and SOLANG_TOKEN, or add `key` and `access_token` to [api] in solang.toml")
	)]
	MissingCredentials(u64),

	#[error("API reported error {id} ({name}): {message}")]
	#[diagnostic(code(solang::api_error))]
	Api {
		id: i64,
		name: String,
		message: String,
	},

	#[error(transparent)]
	#[diagnostic(code(solang::http_error))]
	Http(#[from] reqwest::Error),

	#[error(transparent)]
	#[diagnostic(code(solang::io_error))]
	Io(#[from] std::io::Error),

	#[error("unexpected API response: {0}")]
	#[diagnostic(code(solang::decode_error))]
	Decode(String),
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SolangError {
	#[error(transparent)]
	#[diagnostic(code(solang::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(solang::config_parse),
		help("check that the file is valid TOML with [api] and/or [cache] sections")
	)]
	ConfigParse { path: String, reason: String },

	#[error(transparent)]
	#[diagnostic(transparent)]
	Parse(#[from] ParseError),

	#[error(transparent)]
	#[diagnostic(transparent)]
	Provider(#[from] ProviderError),
}

pub type SolangResult<T> = Result<T, SolangError>;
pub type ProviderResult<T> = Result<T, ProviderError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
