//! Raw access to the data sources. Nothing here parses the payload.

use std::io;
use std::io::Read;

use crate::DataSource;
use crate::P2Error;
use crate::P2Result;

/// Access to the process environment and standard input.
///
/// The binary uses [`OsHost`]; tests substitute their own environment and
/// stdin contents.
pub trait HostEnv {
	/// Every environment entry in raw `KEY=VALUE` form.
	fn entries(&self) -> Vec<String>;

	/// The value of a single environment variable, if set.
	fn var(&self, key: &str) -> Option<String>;

	/// Read standard input until the end of the stream.
	fn read_stdin(&self) -> io::Result<Vec<u8>>;
}

/// The real operating system environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsHost;

impl HostEnv for OsHost {
	fn entries(&self) -> Vec<String> {
		std::env::vars_os()
			.map(|(key, value)| format!("{}={}", key.to_string_lossy(), value.to_string_lossy()))
			.collect()
	}

	fn var(&self, key: &str) -> Option<String> {
		if key.is_empty() || key.contains(['=', '\0']) {
			return None;
		}

		std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
	}

	fn read_stdin(&self) -> io::Result<Vec<u8>> {
		let mut buffer = Vec::new();
		io::stdin().lock().read_to_end(&mut buffer)?;
		Ok(buffer)
	}
}

/// Unparsed input as produced by [`read_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
	/// `KEY=VALUE` entries taken directly from the process environment.
	Entries(Vec<String>),
	/// Bytes read from a file, standard input or an environment variable.
	Bytes(Vec<u8>),
}

/// Read the raw payload for `source`.
///
/// An unset environment variable is empty input rather than an error.
pub fn read_raw(source: &DataSource, host: &impl HostEnv) -> P2Result<RawInput> {
	let bytes = match source {
		DataSource::ProcessEnvironment => return Ok(RawInput::Entries(host.entries())),
		DataSource::EnvironmentKey(key) => {
			host.var(key).map(String::into_bytes).unwrap_or_else(|| {
				tracing::debug!(key, "environment variable is unset, using empty input");
				Vec::new()
			})
		}
		DataSource::Stdin => {
			host.read_stdin().map_err(|e| {
				P2Error::ReadInput {
					input: source.to_string(),
					reason: e.to_string(),
				}
			})?
		}
		DataSource::File(path) => {
			std::fs::read(path).map_err(|e| {
				P2Error::ReadInput {
					input: source.to_string(),
					reason: e.to_string(),
				}
			})?
		}
	};

	tracing::debug!(%source, bytes = bytes.len(), "read input");

	Ok(RawInput::Bytes(bytes))
}
