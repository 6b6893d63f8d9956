use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use miette::NamedSource;
use solang_core::ParseError;
use solang_core::SolangConfig;
use solang_core::SolangResult;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Compile programs written entirely out of Stack Overflow answers.",
	long_about = "solang compiles a program made of Stack Overflow answer references and \
	              regex rewrites into a single source file.\n\nEach line is one of:\n  <answer \
	              id> <n> [snippet]   start a block with the given code snippet (0-based)\n  \
	              /pattern/replacement      rewrite every match in the current block\n\nText \
	              after `#` is a comment. Answers are cached in `.so_cache/` and downloaded \
	              with the credentials in SOLANG_KEY and SOLANG_TOKEN."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct SolangCli {
	/// Program to compile.
	pub input: PathBuf,

	/// Where to write the compiled program. Use `-` for standard output.
	#[arg(value_parser = parse_output_target)]
	pub output: OutputTarget,

	/// Config file to use instead of discovering `solang.toml`.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Directory holding cached answers.
	#[arg(long)]
	pub cache_dir: Option<PathBuf>,

	/// Always download answers instead of reading or writing the cache.
	#[arg(long, default_value_t = false)]
	pub no_cache: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Print the full error detail when compilation fails.
	#[arg(long, default_value_t = false)]
	pub debug: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

/// Destination of the compiled program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
	Stdout,
	File(PathBuf),
}

fn parse_output_target(value: &str) -> Result<OutputTarget, String> {
	match value {
		"" => Err("output path must not be empty".to_string()),
		"-" => Ok(OutputTarget::Stdout),
		path => Ok(OutputTarget::File(PathBuf::from(path))),
	}
}

impl SolangCli {
	/// Load the config from `--config` or the working directory, then apply
	/// environment and command line overrides.
	pub fn resolve_config(&self, root: &Path) -> SolangResult<SolangConfig> {
		let mut config = match &self.config {
			Some(path) => SolangConfig::load_from_path(path)?,
			None => SolangConfig::load(root)?.unwrap_or_default(),
		};

		config.apply_env();

		if let Some(dir) = &self.cache_dir {
			config.cache.dir.clone_from(dir);
		}

		if self.no_cache {
			config.cache.enabled = false;
		}

		Ok(config)
	}
}

/// A compile failure together with the program it came from, so the
/// offending line can be shown.
#[derive(Debug)]
pub struct CompileError {
	pub path: PathBuf,
	pub program: String,
	pub error: ParseError,
}

impl CompileError {
	pub fn new(path: impl Into<PathBuf>, program: impl Into<String>, error: ParseError) -> Self {
		Self {
			path: path.into(),
			program: program.into(),
			error,
		}
	}

	/// Convert into a report that renders the offending line of the program.
	pub fn into_report(self) -> miette::Report {
		let name = self.path.display().to_string();
		miette::Report::new(self.error).with_source_code(NamedSource::new(name, self.program))
	}
}

impl fmt::Display for CompileError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.error, f)
	}
}

impl std::error::Error for CompileError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(&self.error)
	}
}
