use std::borrow::Cow;

use crate::ParseErrorKind;

/// One interpreted line of a solang program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
	/// `<answer id> <n> [snippet index]` — replace the current block with a
	/// freshly fetched snippet.
	AnswerRef { answer_id: u64, snippet_index: usize },
	/// `/pattern/replacement` — rewrite the current block in place.
	Rewrite {
		pattern: String,
		replacement: String,
	},
}

/// A non-empty line of the source after comments and surrounding whitespace
/// have been removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine<'a> {
	/// 1-indexed line number in the source.
	pub number: usize,
	/// Byte offset of the raw line within the source.
	pub offset: usize,
	/// Byte length of the raw line, without its line terminator.
	pub len: usize,
	/// Interpretable text of the line.
	pub text: Cow<'a, str>,
}

/// Split `source` into the lines that carry a statement. Lines that are empty
/// once comments and whitespace are stripped are skipped, but still count
/// towards line numbering.
pub fn logical_lines(source: &str) -> impl Iterator<Item = LogicalLine<'_>> {
	let mut offset = 0;

	source
		.split('\n')
		.enumerate()
		.filter_map(move |(index, raw)| {
			let start = offset;
			offset += raw.len() + 1;

			let raw = raw.strip_suffix('\r').unwrap_or(raw);
			let text = trim_cow(strip_comment(raw));

			if text.is_empty() {
				return None;
			}

			Some(LogicalLine {
				number: index + 1,
				offset: start,
				len: raw.len(),
				text,
			})
		})
}

/// Remove everything from the first unescaped `#` to the end of the line.
/// An escaped `\#` becomes a literal `#`.
pub fn strip_comment(line: &str) -> Cow<'_, str> {
	if !line.contains("\\#") {
		return match line.find('#') {
			Some(index) => Cow::Borrowed(&line[..index]),
			None => Cow::Borrowed(line),
		};
	}

	let mut text = String::with_capacity(line.len());
	let mut chars = line.chars().peekable();

	while let Some(ch) = chars.next() {
		match ch {
			'\\' if chars.peek() == Some(&'#') => {
				text.push('#');
				chars.next();
			}
			'#' => break,
			_ => text.push(ch),
		}
	}

	Cow::Owned(text)
}

fn trim_cow(text: Cow<'_, str>) -> Cow<'_, str> {
	match text {
		Cow::Borrowed(text) => Cow::Borrowed(text.trim()),
		Cow::Owned(text) => {
			let trimmed = text.trim();
			if trimmed.len() == text.len() {
				Cow::Owned(text)
			} else {
				Cow::Owned(trimmed.to_string())
			}
		}
	}
}

/// Classify a stripped, non-empty line.
///
/// A line whose first two space-separated tokens are both made of decimal
/// digits is an answer reference; the optional third token is the snippet
/// index. The second token only has to look numeric, its value is unused.
/// Lines starting with `/` are rewrites. Everything else is rejected.
pub fn parse_statement(line: &str) -> Result<Statement, ParseErrorKind> {
	let tokens: Vec<&str> = line.split(' ').collect();

	if tokens.iter().take(2).all(|token| is_digits(token)) {
		return parse_answer_ref(&tokens);
	}

	if let Some(rest) = line.strip_prefix('/') {
		let mut parts = rest.split('/');
		let pattern = parts.next().unwrap_or_default();
		let Some(replacement) = parts.next() else {
			return Err(ParseErrorKind::MalformedReplacement {
				line: line.to_string(),
			});
		};

		return Ok(Statement::Rewrite {
			pattern: pattern.to_string(),
			replacement: replacement.to_string(),
		});
	}

	Err(ParseErrorKind::UnrecognizedExpression)
}

fn parse_answer_ref(tokens: &[&str]) -> Result<Statement, ParseErrorKind> {
	let id = tokens[0];
	let answer_id = id
		.parse::<u64>()
		.map_err(|_| ParseErrorKind::InvalidAnswerId(id.to_string()))?;

	let snippet_index = match tokens.get(2) {
		Some(index) => index
			.parse::<usize>()
			.map_err(|_| ParseErrorKind::InvalidSnippetIndex((*index).to_string()))?,
		None => 0,
	};

	Ok(Statement::AnswerRef {
		answer_id,
		snippet_index,
	})
}

fn is_digits(token: &str) -> bool {
	!token.is_empty() && token.bytes().all(|byte| byte.is_ascii_digit())
}
