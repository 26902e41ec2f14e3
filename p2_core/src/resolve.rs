use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::P2Error;
use crate::P2Result;

/// Syntax of the input payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
	/// `KEY=VALUE` lines, or the process environment itself.
	Env,
	Json,
	Yaml,
}

impl fmt::Display for DataFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Env => "env",
			Self::Json => "json",
			Self::Yaml => "yaml",
		};
		f.write_str(name)
	}
}

/// Where the input bytes come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DataSource {
	/// Every variable of the running process.
	ProcessEnvironment,
	/// The value of a single environment variable.
	EnvironmentKey(String),
	Stdin,
	File(PathBuf),
}

impl fmt::Display for DataSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ProcessEnvironment => f.write_str("the process environment"),
			Self::EnvironmentKey(key) => write!(f, "environment variable `{key}`"),
			Self::Stdin => f.write_str("standard input"),
			Self::File(path) => write!(f, "`{}`", path.display()),
		}
	}
}

/// The outcome of resolving the command line signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
	pub format: DataFormat,
	pub source: DataSource,
}

impl Resolution {
	pub fn new(format: DataFormat, source: DataSource) -> Self {
		Self { format, source }
	}
}

/// Names accepted by `--format`. `envkey` reads the env format from a named
/// environment variable.
const FORMAT_NAMES: [(&str, FormatName); 5] = [
	("env", FormatName::Env),
	("envkey", FormatName::EnvKey),
	("json", FormatName::Json),
	("yml", FormatName::Yaml),
	("yaml", FormatName::Yaml),
];

/// File extensions used to infer the format of `--input` paths.
const EXTENSION_FORMATS: [(&str, DataFormat); 4] = [
	("json", DataFormat::Json),
	("yaml", DataFormat::Yaml),
	("yml", DataFormat::Yaml),
	("env", DataFormat::Env),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatName {
	Env,
	EnvKey,
	Json,
	Yaml,
}

impl FormatName {
	fn lookup(name: &str) -> P2Result<Self> {
		let normalized = name.trim().to_ascii_lowercase();
		FORMAT_NAMES
			.iter()
			.find(|(candidate, _)| *candidate == normalized)
			.map(|(_, format)| *format)
			.ok_or_else(|| P2Error::UnsupportedFormat(name.to_string()))
	}

	fn data_format(self) -> DataFormat {
		match self {
			Self::Env | Self::EnvKey => DataFormat::Env,
			Self::Json => DataFormat::Json,
			Self::Yaml => DataFormat::Yaml,
		}
	}
}

/// Infer the data format from the extension of `path`. Everything after the
/// last `.` of the file name counts, so a bare `.env` file is env input.
pub fn format_from_extension(path: &str) -> P2Result<DataFormat> {
	let extension = Path::new(path)
		.file_name()
		.and_then(|name| name.to_str())
		.and_then(|name| name.rsplit_once('.'))
		.map_or("", |(_, extension)| extension)
		.to_ascii_lowercase();

	EXTENSION_FORMATS
		.iter()
		.find(|(candidate, _)| *candidate == extension)
		.map(|(_, format)| *format)
		.ok_or_else(|| P2Error::UnrecognizedExtension(path.to_string()))
}

/// Decide which format to parse and which source to read from.
///
/// Empty strings are treated the same as absent values:
///
/// | `format` | `input` | result                                   |
/// |----------|---------|------------------------------------------|
/// | absent   | absent  | env format from the process environment  |
/// | absent   | set     | format from the file extension, file     |
/// | set      | absent  | named format, standard input             |
/// | set      | set     | named format, file                       |
///
/// When `use_env_key` is set (or the format is `envkey`) the input is the
/// name of an environment variable holding the payload instead of a path.
pub fn resolve(
	format: Option<&str>,
	input: Option<&str>,
	use_env_key: bool,
) -> P2Result<Resolution> {
	let format = format.filter(|value| !value.is_empty());
	let input = input.filter(|value| !value.is_empty());

	let (name, mut resolution) = match (format, input) {
		(None, None) => {
			(
				None,
				Resolution::new(DataFormat::Env, DataSource::ProcessEnvironment),
			)
		}
		(None, Some(path)) => {
			(
				None,
				Resolution::new(
					format_from_extension(path)?,
					DataSource::File(PathBuf::from(path)),
				),
			)
		}
		(Some(format), None) => {
			let name = FormatName::lookup(format)?;
			(
				Some(name),
				Resolution::new(name.data_format(), DataSource::Stdin),
			)
		}
		(Some(format), Some(path)) => {
			let name = FormatName::lookup(format)?;
			(
				Some(name),
				Resolution::new(name.data_format(), DataSource::File(PathBuf::from(path))),
			)
		}
	};

	if use_env_key || name == Some(FormatName::EnvKey) {
		let Some(key) = input else {
			return Err(P2Error::EnvKeyWithoutInput);
		};
		resolution.source = DataSource::EnvironmentKey(key.to_string());
	}

	tracing::debug!(
		format = %resolution.format,
		source = %resolution.source,
		"resolved input"
	);

	Ok(resolution)
}
