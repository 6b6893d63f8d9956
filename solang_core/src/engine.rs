use regex::Regex;

use crate::LogicalLine;
use crate::ParseError;
use crate::ParseErrorKind;
use crate::SnippetProvider;
use crate::Statement;
use crate::logical_lines;
use crate::parse_statement;

/// Placed between consecutive blocks in the compiled output.
pub const BLOCK_SEPARATOR: &str = "\n\n\n";

/// The block currently being built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockState {
	/// No answer has been declared since the last flush.
	#[default]
	Empty,
	/// Text of the most recent answer, with every rewrite since applied.
	Active(String),
}

/// Interprets a program line by line, fetching snippets from `P`.
///
/// Each engine compiles a single program: the current block and the
/// flushed output live on the instance and are consumed by
/// [`Engine::finish`].
#[derive(Debug)]
pub struct Engine<P> {
	provider: P,
	state: BlockState,
	blocks: Vec<String>,
}

impl<P: SnippetProvider> Engine<P> {
	pub fn new(provider: P) -> Self {
		Self {
			provider,
			state: BlockState::Empty,
			blocks: vec![],
		}
	}

	pub fn state(&self) -> &BlockState {
		&self.state
	}

	/// Text of the current block, if any.
	pub fn current_block(&self) -> Option<&str> {
		match &self.state {
			BlockState::Empty => None,
			BlockState::Active(text) => Some(text),
		}
	}

	/// Blocks flushed so far, in source order.
	pub fn blocks(&self) -> &[String] {
		&self.blocks
	}

	/// Compile a whole program and return the assembled output.
	pub fn compile(mut self, source: &str) -> Result<String, ParseError> {
		for line in logical_lines(source) {
			self.interpret_line(&line)?;
		}

		Ok(self.finish())
	}

	/// Parse and execute one logical line, attaching its line number and span
	/// to any error.
	pub fn interpret_line(&mut self, line: &LogicalLine<'_>) -> Result<(), ParseError> {
		parse_statement(&line.text)
			.and_then(|statement| {
				tracing::debug!(line = line.number, ?statement, "interpreting statement");
				self.execute(statement)
			})
			.map_err(|kind| ParseError::new(line.number, kind, (line.offset, line.len)))
	}

	/// Apply a statement to the current block.
	pub fn execute(&mut self, statement: Statement) -> Result<(), ParseErrorKind> {
		match statement {
			Statement::AnswerRef {
				answer_id,
				snippet_index,
			} => {
				self.flush();
				let text = self.provider.fetch(answer_id, snippet_index)?;
				self.state = BlockState::Active(text);
			}
			Statement::Rewrite {
				pattern,
				replacement,
			} => {
				let BlockState::Active(text) = &self.state else {
					return Err(ParseErrorKind::ReplacementBeforeAnswer);
				};

				let rewritten = rewrite(text, &pattern, &replacement)?;
				self.state = BlockState::Active(rewritten);
			}
		}

		Ok(())
	}

	/// Move the current block into the output. Does nothing when there is no
	/// current block.
	pub fn flush(&mut self) {
		if let BlockState::Active(text) = std::mem::take(&mut self.state) {
			tracing::debug!(block = self.blocks.len(), "flushing block");
			self.blocks.push(text);
		}
	}

	/// Flush the last block and join every block with [`BLOCK_SEPARATOR`].
	pub fn finish(mut self) -> String {
		self.flush();
		self.blocks.join(BLOCK_SEPARATOR)
	}
}

/// Replace every non-overlapping match of `pattern` in `text`, leftmost
/// first. See [`expand_template`] for the replacement syntax.
pub fn rewrite(text: &str, pattern: &str, replacement: &str) -> Result<String, ParseErrorKind> {
	let regex = Regex::new(pattern).map_err(|e| ParseErrorKind::InvalidPattern {
		pattern: pattern.to_string(),
		reason: e.to_string(),
	})?;
	let template = expand_template(replacement, &regex)?;

	Ok(regex.replace_all(text, template.as_str()).into_owned())
}

/// Convert a rewrite replacement into `regex` expansion syntax.
///
/// In a replacement `$` is an ordinary character. Backslash introduces the
/// special forms:
///
/// - `\1` to `\99` and `\g<1>` refer to numbered groups, `\g<0>` to the
///   whole match and `\g<name>` to a named group.
/// - `\0` and three digit octal escapes such as `\101` produce a byte.
/// - `\n`, `\t`, `\r`, `\f`, `\v`, `\a`, `\b` and `\\` are decoded.
/// - Any other ASCII letter after a backslash is an error. Other characters
///   keep the backslash.
pub fn expand_template(replacement: &str, regex: &Regex) -> Result<String, ParseErrorKind> {
	let invalid = |reason: String| ParseErrorKind::InvalidReplacement {
		replacement: replacement.to_string(),
		reason,
	};
	let group_count = regex.captures_len();
	let mut template = String::with_capacity(replacement.len());
	let mut chars = replacement.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch != '\\' {
			push_literal(&mut template, ch);
			continue;
		}

		let Some(escape) = chars.next() else {
			return Err(invalid("bad escape (end of replacement)".to_string()));
		};

		match escape {
			'0' => {
				let mut digits = String::from(escape);
				while digits.len() < 3 {
					let Some(digit) = chars.next_if(|c| c.is_digit(8)) else {
						break;
					};
					digits.push(digit);
				}
				push_literal(&mut template, octal_char(&digits).map_err(invalid)?);
			}
			'1'..='9' => {
				let mut digits = String::from(escape);
				if let Some(second) = chars.next_if(char::is_ascii_digit) {
					digits.push(second);
					if escape.is_digit(8) && second.is_digit(8) {
						if let Some(third) = chars.next_if(|c| c.is_digit(8)) {
							digits.push(third);
							push_literal(&mut template, octal_char(&digits).map_err(invalid)?);
							continue;
						}
					}
				}

				let index: usize = digits
					.parse()
					.map_err(|_| invalid(format!("invalid group reference {digits}")))?;
				if index >= group_count {
					return Err(invalid(format!("invalid group reference {index}")));
				}
				template.push_str(&format!("${{{index}}}"));
			}
			'g' => {
				if chars.next_if_eq(&'<').is_none() {
					return Err(invalid("missing < after \\g".to_string()));
				}

				let mut name = String::new();
				let mut terminated = false;
				for c in chars.by_ref() {
					if c == '>' {
						terminated = true;
						break;
					}
					name.push(c);
				}

				if !terminated {
					return Err(invalid("missing >, unterminated name".to_string()));
				}
				if name.is_empty() {
					return Err(invalid("missing group name".to_string()));
				}

				if name.chars().all(|c| c.is_ascii_digit()) {
					let index: usize = name
						.parse()
						.map_err(|_| invalid(format!("invalid group reference {name}")))?;
					if index >= group_count {
						return Err(invalid(format!("invalid group reference {index}")));
					}
					template.push_str(&format!("${{{index}}}"));
				} else if regex.capture_names().flatten().any(|known| known == name) {
					template.push_str(&format!("${{{name}}}"));
				} else {
					return Err(invalid(format!("unknown group name '{name}'")));
				}
			}
			'\\' => template.push('\\'),
			'a' => template.push('\x07'),
			'b' => template.push('\x08'),
			'f' => template.push('\x0c'),
			'n' => template.push('\n'),
			'r' => template.push('\r'),
			't' => template.push('\t'),
			'v' => template.push('\x0b'),
			other if other.is_ascii_alphabetic() => {
				return Err(invalid(format!("bad escape \\{other}")));
			}
			other => {
				template.push('\\');
				push_literal(&mut template, other);
			}
		}
	}

	Ok(template)
}

fn push_literal(template: &mut String, ch: char) {
	if ch == '$' {
		template.push_str("$$");
	} else {
		template.push(ch);
	}
}

fn octal_char(digits: &str) -> Result<char, String> {
	u8::from_str_radix(digits, 8)
		.map(char::from)
		.map_err(|_| format!("octal escape value \\{digits} outside of range 0-0o377"))
}

/// Compile `source` against `provider`.
pub fn compile<P: SnippetProvider>(source: &str, provider: P) -> Result<String, ParseError> {
	Engine::new(provider).compile(source)
}
