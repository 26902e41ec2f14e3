use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;
use std::process;

use clap::Parser;
use p2_cli::P2Cli;
use p2_core::FilterRegistry;
use p2_core::OsHost;
use p2_core::P2Error;
use p2_core::P2Result;
use p2_core::Renderer;
use p2_core::assemble;
use p2_core::resolve;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `P2_LOG=debug`.
const LOG_ENV: &str = "P2_LOG";

fn main() {
	let args = match P2Cli::try_parse() {
		Ok(args) => args,
		Err(e) => {
			// `--help` and `--version` are reported as errors by clap but
			// are successful runs.
			let code = i32::from(e.use_stderr());
			let _ = e.print();
			process::exit(code);
		}
	};

	let use_color = std::env::var_os("NO_COLOR").is_none();

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

	init_logging(use_color);

	if let Err(e) = run(&args) {
		tracing::debug!(stage = %e.stage(), "run failed");
		let report: miette::Report = e.into();
		eprintln!("{report:?}");
		process::exit(1);
	}
}

fn init_logging(use_color: bool) {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.with_ansi(use_color)
		.try_init()
		.ok();
}

fn run(args: &P2Cli) -> P2Result<()> {
	let filters = FilterRegistry::builtin()
		.select(args.enable_filters.as_deref(), args.enable_noop_filters)?;

	let resolution = resolve(args.format.as_deref(), args.input.as_deref(), args.use_env_key)?;

	let template_name = args.template.display().to_string();
	let source = std::fs::read_to_string(&args.template).map_err(|e| {
		P2Error::ReadTemplate {
			path: template_name.clone(),
			reason: e.to_string(),
		}
	})?;
	let renderer = Renderer::new(&template_name, &source, &filters, args.autoescape)?;

	let context = assemble(&resolution, &OsHost)?;

	if args.debug {
		eprintln!("{context}");
	}

	// The output file is truncated here, before rendering starts.
	let (mut sink, sink_name) = open_output(args.output.as_deref())?;
	let rendered = renderer.render(&context, &resolution.source.to_string())?;

	sink.write_all(rendered.as_bytes())
		.and_then(|()| sink.flush())
		.map_err(|e| {
			P2Error::WriteOutput {
				path: sink_name,
				reason: e.to_string(),
			}
		})
}

fn open_output(path: Option<&Path>) -> P2Result<(Box<dyn Write>, String)> {
	let Some(path) = path.filter(|path| !path.as_os_str().is_empty()) else {
		return Ok((Box::new(io::stdout().lock()), "standard output".to_string()));
	};

	let name = format!("`{}`", path.display());
	let file = File::create(path).map_err(|e| {
		P2Error::WriteOutput {
			path: name.clone(),
			reason: e.to_string(),
		}
	})?;

	Ok((Box::new(io::BufWriter::new(file)), name))
}
