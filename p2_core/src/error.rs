use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::DataFormat;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum P2Error {
	#[error("unsupported input format: `{0}`")]
	#[diagnostic(
		code(p2::configuration::unsupported_format),
		help("supported formats: env, envkey, json, yml, yaml")
	)]
	UnsupportedFormat(String),

	#[error("unrecognized file extension for input `{0}`")]
	#[diagnostic(
		code(p2::configuration::unrecognized_extension),
		help(
			"supported extensions: .env, .json, .yaml, .yml. If the file is in a supported \
			 format, pass it explicitly with `--format`"
		)
	)]
	UnrecognizedExtension(String),

	#[error("reading from an environment key is incompatible with reading from standard input")]
	#[diagnostic(
		code(p2::configuration::env_key_without_input),
		help("pass the name of the environment variable to read with `--input`")
	)]
	EnvKeyWithoutInput,

	#[error("this version of p2 does not support the `{0}` filter")]
	#[diagnostic(
		code(p2::configuration::unsupported_filter),
		help("supported filters: make_dirs, write_file")
	)]
	UnsupportedFilter(String),

	#[error("could not read template file `{path}`: {reason}")]
	#[diagnostic(code(p2::io::template))]
	ReadTemplate { path: String, reason: String },

	#[error("could not read data from {input}: {reason}")]
	#[diagnostic(code(p2::io::input))]
	ReadInput { input: String, reason: String },

	#[error("could not write output to {path}: {reason}")]
	#[diagnostic(code(p2::io::output))]
	WriteOutput { path: String, reason: String },

	#[error("{reason}: {line}")]
	#[diagnostic(
		code(p2::parse::env),
		help("quote values containing spaces, e.g. KEY=\"hello world\"")
	)]
	EnvParse { line: String, reason: EnvParseReason },

	#[error("could not decode {format} input: {reason}")]
	#[diagnostic(code(p2::decode::syntax))]
	Decode { format: DataFormat, reason: String },

	#[error("{format} input must be a mapping at the top level, found {found}")]
	#[diagnostic(
		code(p2::decode::not_a_mapping),
		help("wrap the data in an object so the template can look values up by name")
	)]
	NotAMapping {
		format: DataFormat,
		found: &'static str,
	},

	#[error("could not compile template `{template}`: {reason}")]
	#[diagnostic(code(p2::render::syntax))]
	TemplateSyntax { template: String, reason: String },

	#[error("could not render template `{template}` with data from {data}: {reason}")]
	#[diagnostic(code(p2::render::evaluation))]
	TemplateRender {
		template: String,
		data: String,
		reason: String,
	},
}

impl P2Error {
	/// The pipeline stage that produced this error.
	pub fn stage(&self) -> ErrorStage {
		match self {
			Self::UnsupportedFormat(_)
			| Self::UnrecognizedExtension(_)
			| Self::EnvKeyWithoutInput
			| Self::UnsupportedFilter(_) => ErrorStage::Configuration,
			Self::ReadTemplate { .. } | Self::ReadInput { .. } | Self::WriteOutput { .. } => {
				ErrorStage::Io
			}
			Self::EnvParse { .. } => ErrorStage::Parse,
			Self::Decode { .. } | Self::NotAMapping { .. } => ErrorStage::Decode,
			Self::TemplateSyntax { .. } | Self::TemplateRender { .. } => ErrorStage::Render,
		}
	}
}

/// Why a line of `KEY=VALUE` input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EnvParseReason {
	#[error("could not find an equals sign to split on")]
	MissingSeparator,
	#[error("empty variable name")]
	EmptyKey,
	#[error("value does not contain a word")]
	EmptyValue,
	#[error("improperly escaped environment variable, arrays are not supported")]
	MultipleWords,
	#[error("{0}")]
	Unquote(String),
}

/// Stage of the pipeline an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStage {
	Configuration,
	Io,
	Parse,
	Decode,
	Render,
}

impl fmt::Display for ErrorStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Configuration => "configuration",
			Self::Io => "io",
			Self::Parse => "parse",
			Self::Decode => "decode",
			Self::Render => "render",
		};
		f.write_str(name)
	}
}

pub type P2Result<T> = Result<T, P2Error>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
