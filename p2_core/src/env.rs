use serde_json::Value;

use crate::DataFormat;
use crate::EnvParseReason;
use crate::InputContext;
use crate::P2Error;
use crate::P2Result;

/// Parse raw process environment entries.
///
/// Each entry is split on its first `=`. Values are stored exactly as they
/// appear: the shell has already expanded them before the process started.
pub fn parse_env_entries<S: AsRef<str>>(entries: &[S]) -> P2Result<InputContext> {
	let mut context = InputContext::default();

	for entry in entries {
		let entry = entry.as_ref();
		let (key, value) = split_entry(entry)?;
		context.insert(key.to_string(), Value::String(value.to_string()));
	}

	Ok(context)
}

/// Parse `KEY=VALUE` lines from a file, standard input or an environment
/// variable.
///
/// Values follow POSIX shell quoting rules, so `KEY="hello world"` yields a
/// single value containing a space. A value that splits into anything other
/// than exactly one shell word is rejected. Blank lines and `#` comments are
/// skipped, and leading indentation is ignored.
pub fn parse_env_buffer(bytes: &[u8]) -> P2Result<InputContext> {
	let text = std::str::from_utf8(bytes).map_err(|e| {
		P2Error::Decode {
			format: DataFormat::Env,
			reason: e.to_string(),
		}
	})?;
	let mut context = InputContext::default();

	for line in text.lines() {
		let line = line.trim_start();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}

		let (key, raw_value) = split_entry(line)?;
		let value = unquote(line, raw_value)?;
		context.insert(key.to_string(), Value::String(value));
	}

	tracing::debug!(keys = context.len(), "parsed env input");

	Ok(context)
}

fn split_entry(entry: &str) -> P2Result<(&str, &str)> {
	let Some((key, value)) = entry.split_once('=') else {
		return Err(env_error(entry, EnvParseReason::MissingSeparator));
	};

	if key.is_empty() {
		return Err(env_error(entry, EnvParseReason::EmptyKey));
	}

	Ok((key, value))
}

/// In a shell script the value continues the `KEY=` word, so a leading `#`
/// is part of the value rather than a comment. A placeholder character keeps
/// that true while the value is split on its own.
fn unquote(line: &str, raw_value: &str) -> P2Result<String> {
	let raw_value = raw_value.trim_start();
	if raw_value.is_empty() {
		return Err(env_error(line, EnvParseReason::EmptyValue));
	}

	let mut words = shell_words::split(&format!("{VALUE_PLACEHOLDER}{raw_value}"))
		.map_err(|e| env_error(line, EnvParseReason::Unquote(e.to_string())))?;

	match words.len() {
		0 => Err(env_error(line, EnvParseReason::EmptyValue)),
		1 => {
			let word = words.remove(0);
			Ok(word
				.strip_prefix(VALUE_PLACEHOLDER)
				.unwrap_or(word.as_str())
				.to_string())
		}
		_ => Err(env_error(line, EnvParseReason::MultipleWords)),
	}
}

const VALUE_PLACEHOLDER: char = '_';

fn env_error(line: &str, reason: EnvParseReason) -> P2Error {
	P2Error::EnvParse {
		line: line.to_string(),
		reason,
	}
}
