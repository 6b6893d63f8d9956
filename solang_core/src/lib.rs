//! `solang_core` is the core library for solang, a tiny language whose
//! programs are assembled entirely out of code snippets from Stack Overflow
//! answers.
//!
//! ## Language
//!
//! A program is read line by line. Everything after an unescaped `#` is a
//! comment (`\#` is a literal `#`) and blank lines are ignored.
//!
//! ```text
//! # take the first snippet of answer 12345 and rename `foo` to `bar`
//! 12345 0
//! /foo/bar
//!
//! # append the third snippet of answer 67890
//! 67890 0 2
//! ```
//!
//! - `<answer id> <n> [snippet]` starts a new block holding the given
//!   snippet (0-based, defaults to `0`) of the answer. The second number is
//!   required but unused.
//! - `/pattern/replacement` rewrites every match of the regular expression
//!   `pattern` in the current block.
//!
//! Blocks are emitted in source order, separated by two blank lines.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source text
//!   → logical_lines (comment stripping, line numbers)
//!   → parse_statement (answer reference | rewrite)
//!   → Engine (current block, flushing, output assembly)
//!        ↑
//!   SnippetProvider ← HtmlSnippetProvider ← AnswerCache ← StackExchangeClient
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use solang_core::MemoryProvider;
//! use solang_core::compile;
//!
//! let provider = MemoryProvider::new()
//! 	.with_answer(1, ["cat"])
//! 	.with_answer(2, ["dog"]);
//!
//! let output = compile("1 0\n/a/b\n#comment\n2 0", &provider).unwrap();
//! assert_eq!(output, "cbt\n\n\ndog");
//! ```

pub use cache::*;
pub use client::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use extract::*;
pub use provider::*;
pub use statement::*;

mod cache;
mod client;
mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod extract;
mod provider;
mod statement;

#[cfg(test)]
mod __fixtures;
