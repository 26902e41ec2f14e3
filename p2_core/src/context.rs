use std::fmt;

use derive_more::Deref;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::DataFormat;
use crate::HostEnv;
use crate::P2Result;
use crate::RawInput;
use crate::Resolution;
use crate::parse_env_buffer;
use crate::parse_env_entries;
use crate::parse_structured;
use crate::read_raw;

/// The variables exposed to a template, keyed by name.
///
/// Keys are unique and kept in sorted order. A context is built once by
/// [`assemble`] and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Deref, Serialize)]
#[serde(transparent)]
pub struct InputContext(Map<String, Value>);

impl InputContext {
	pub(crate) fn insert(&mut self, key: String, value: Value) {
		self.0.insert(key, value);
	}

	pub fn into_inner(self) -> Map<String, Value> {
		self.0
	}
}

impl From<Map<String, Value>> for InputContext {
	fn from(map: Map<String, Value>) -> Self {
		Self(map)
	}
}

/// Pretty printed JSON, as shown by `--debug`.
impl fmt::Display for InputContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let json = serde_json::to_string_pretty(&self.0).map_err(|_| fmt::Error)?;
		f.write_str(&json)
	}
}

/// Read and parse the input described by `resolution`.
pub fn assemble(resolution: &Resolution, host: &impl HostEnv) -> P2Result<InputContext> {
	let raw = read_raw(&resolution.source, host)?;

	let context = match (resolution.format, raw) {
		// The process environment is always `KEY=VALUE` pairs, whatever the
		// requested format.
		(_, RawInput::Entries(entries)) => parse_env_entries(entries.as_slice())?,
		(DataFormat::Env, RawInput::Bytes(bytes)) => parse_env_buffer(&bytes)?,
		(format, RawInput::Bytes(bytes)) => parse_structured(&bytes, format)?,
	};

	tracing::debug!(
		keys = context.len(),
		source = %resolution.source,
		"assembled input context"
	);

	Ok(context)
}
