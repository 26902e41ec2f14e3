use std::io;

use crate::HostEnv;

/// A host with a fixed environment and stdin payload.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeHost {
	entries: Vec<String>,
	stdin: Option<Vec<u8>>,
}

impl FakeHost {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn with_entry(mut self, entry: impl Into<String>) -> Self {
		self.entries.push(entry.into());
		self
	}

	pub(crate) fn with_var(self, key: &str, value: &str) -> Self {
		self.with_entry(format!("{key}={value}"))
	}

	pub(crate) fn with_stdin(mut self, content: impl Into<Vec<u8>>) -> Self {
		self.stdin = Some(content.into());
		self
	}
}

impl HostEnv for FakeHost {
	fn entries(&self) -> Vec<String> {
		self.entries.clone()
	}

	fn var(&self, key: &str) -> Option<String> {
		self.entries.iter().find_map(|entry| {
			let (name, value) = entry.split_once('=')?;
			(name == key).then(|| value.to_string())
		})
	}

	fn read_stdin(&self) -> io::Result<Vec<u8>> {
		self.stdin
			.clone()
			.ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "stdin is closed"))
	}
}

pub(crate) fn json_resolution() -> crate::Resolution {
	crate::Resolution::new(crate::DataFormat::Json, crate::DataSource::Stdin)
}

pub(crate) fn env_stdin_resolution() -> crate::Resolution {
	crate::Resolution::new(crate::DataFormat::Env, crate::DataSource::Stdin)
}
