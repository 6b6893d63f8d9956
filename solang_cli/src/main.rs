use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use solang_cli::CompileError;
use solang_cli::OutputTarget;
use solang_cli::SolangCli;
use solang_core::SolangError;
use solang_core::compile;
use solang_core::provider_from_config;
use tracing_subscriber::EnvFilter;

fn main() {
	let args = SolangCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	if let Err(e) = run(&args) {
		report_error(e, args.debug, use_color);
		process::exit(1);
	}
}

fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "info" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn run(args: &SolangCli) -> Result<(), Box<dyn std::error::Error>> {
	let program = std::fs::read_to_string(&args.input)
		.map_err(|e| format!("cannot read '{}': {e}", args.input.display()))?;
	tracing::debug!(input = %args.input.display(), "compiling");

	let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	let config = args.resolve_config(&root)?;
	let provider = provider_from_config(&config).map_err(SolangError::from)?;

	let output = match compile(&program, &provider) {
		Ok(output) => output,
		Err(error) => return Err(Box::new(CompileError::new(&args.input, program, error))),
	};

	match &args.output {
		OutputTarget::Stdout => println!("{output}"),
		OutputTarget::File(path) => {
			println!("[-] Writing {}", path.display());
			std::fs::write(path, format!("{output}\n"))
				.map_err(|e| format!("cannot write '{}': {e}", path.display()))?;
		}
	}

	Ok(())
}

fn report_error(e: Box<dyn std::error::Error>, debug: bool, use_color: bool) {
	let e = match e.downcast::<CompileError>() {
		Ok(compile_error) => {
			print_error(&compile_error, use_color);
			if debug {
				let detail = format!("{:#?}", compile_error.error);
				eprintln!("{:?}", compile_error.into_report());
				eprintln!("{detail}");
			}
			return;
		}
		Err(e) => e,
	};

	// Try to render through miette for rich diagnostics with help text
	// and error codes.
	match e.downcast::<SolangError>() {
		Ok(solang_err) => {
			let report: miette::Report = (*solang_err).into();
			eprintln!("{report:?}");
		}
		Err(e) => {
			print_error(&e, use_color);
			if debug {
				eprintln!("{e:#?}");
			}
		}
	}
}

fn print_error(e: &dyn std::fmt::Display, use_color: bool) {
	if use_color {
		eprintln!("{} {e}", "error:".red());
	} else {
		eprintln!("error: {e}");
	}
}
