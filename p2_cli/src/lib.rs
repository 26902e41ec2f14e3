use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
	name = "p2",
	author,
	version,
	about = "Render jinja-style templates from environment variables, env files, JSON or YAML.",
	long_about = "p2 renders a template against a data context and writes the result to a file or \
	              standard output, so build and deployment steps can expand templates without a \
	              scripting runtime.\n\nWith no `--input` and no `--format` the whole process \
	              environment is the context:\n  NAME=World p2 -t greeting.tmpl\n\nData can also \
	              come from a file, standard input or a single environment variable:\n  p2 -t \
	              app.conf.tmpl -i values.yaml\n  echo '{\"name\":\"World\"}' | p2 -t \
	              greeting.tmpl -f json\n  p2 -t app.conf.tmpl -f env --use-env-key -i APP_SETTINGS"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct P2Cli {
	/// Template file to process.
	#[arg(long, short)]
	pub template: PathBuf,

	/// Input data path. Leave blank to read standard input (with `--format`)
	/// or the process environment (without `--format`). With
	/// `--use-env-key` this is the name of an environment variable instead.
	#[arg(long, short)]
	pub input: Option<String>,

	/// Output file. Leave blank for standard output.
	#[arg(long, short)]
	pub output: Option<PathBuf>,

	/// Input data format: env, envkey, json, yml or yaml. Inferred from the
	/// `--input` file extension when omitted.
	#[arg(long, short)]
	pub format: Option<String>,

	/// Treat `--input` as the name of an environment variable whose value is
	/// the input data.
	#[arg(long, default_value_t = false)]
	pub use_env_key: bool,

	/// Comma separated list of filesystem filters to enable (`write_file`,
	/// `make_dirs`).
	#[arg(long, value_name = "FILTERS")]
	pub enable_filters: Option<String>,

	/// Register every filesystem filter as a no-op that returns its input.
	/// Takes precedence over `--enable-filters`.
	#[arg(long, default_value_t = false)]
	pub enable_noop_filters: bool,

	/// Enable HTML autoescaping (disabled by default).
	#[arg(long, default_value_t = false)]
	pub autoescape: bool,

	/// Print the assembled data context to stderr before rendering.
	#[arg(long, short, default_value_t = false)]
	pub debug: bool,
}
