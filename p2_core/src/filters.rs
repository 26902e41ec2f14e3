//! Optional filters that touch the filesystem from inside a template.
//!
//! They are off unless named with `--enable-filters`. With
//! `--enable-noop-filters` every one of them is registered as a stand-in that
//! returns its input untouched, so templates can be checked without the side
//! effect.

use std::collections::BTreeMap;

use minijinja::Environment;
use minijinja::Error;
use minijinja::ErrorKind;

use crate::P2Error;
use crate::P2Result;

/// Shared signature of every gated filter: the piped value plus an optional
/// argument.
pub type FilterFn = fn(String, Option<String>) -> Result<String, Error>;

/// The real implementation of a filter and its inert stand-in.
#[derive(Debug, Clone, Copy)]
pub struct FilterSpec {
	pub real: FilterFn,
	pub noop: FilterFn,
}

/// Whether a filter was registered for real or as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
	Real,
	Noop,
}

/// A filter chosen by [`FilterRegistry::select`], ready to be added to an
/// environment.
#[derive(Debug, Clone, Copy)]
pub struct SelectedFilter {
	pub name: &'static str,
	pub mode: FilterMode,
	func: FilterFn,
}

impl SelectedFilter {
	pub fn register(&self, env: &mut Environment<'_>) {
		tracing::debug!(name = self.name, mode = ?self.mode, "registering filter");
		env.add_filter(self.name, self.func);
	}
}

/// Table of gated filters keyed by name.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
	filters: BTreeMap<&'static str, FilterSpec>,
}

impl Default for FilterRegistry {
	fn default() -> Self {
		Self::builtin()
	}
}

impl FilterRegistry {
	/// The filters shipped with p2.
	pub fn builtin() -> Self {
		let mut filters = BTreeMap::new();
		filters.insert(
			"write_file",
			FilterSpec {
				real: write_file,
				noop: passthrough,
			},
		);
		filters.insert(
			"make_dirs",
			FilterSpec {
				real: make_dirs,
				noop: passthrough,
			},
		);

		Self { filters }
	}

	pub fn names(&self) -> Vec<&'static str> {
		self.filters.keys().copied().collect()
	}

	pub fn get(&self, name: &str) -> Option<&FilterSpec> {
		self.filters.get(name)
	}

	/// Decide which filters to register.
	///
	/// `force_noop` registers the stand-in for every filter and ignores
	/// `enabled`. Otherwise each comma separated name in `enabled` is
	/// registered for real, and an unknown name is an error.
	pub fn select(&self, enabled: Option<&str>, force_noop: bool) -> P2Result<Vec<SelectedFilter>> {
		if force_noop {
			return Ok(self
				.filters
				.iter()
				.map(|(name, spec)| {
					SelectedFilter {
						name: *name,
						mode: FilterMode::Noop,
						func: spec.noop,
					}
				})
				.collect());
		}

		let mut selected = Vec::new();
		let names = enabled
			.unwrap_or_default()
			.split(',')
			.map(str::trim)
			.filter(|name| !name.is_empty());

		for requested in names {
			let Some((name, spec)) = self.filters.get_key_value(requested) else {
				return Err(P2Error::UnsupportedFilter(requested.to_string()));
			};

			selected.push(SelectedFilter {
				name: *name,
				mode: FilterMode::Real,
				func: spec.real,
			});
		}

		Ok(selected)
	}
}

/// `{{ content | write_file("path") }}` writes `content` to `path` and
/// returns it unchanged.
fn write_file(value: String, path: Option<String>) -> Result<String, Error> {
	let Some(path) = path else {
		return Err(Error::new(
			ErrorKind::MissingArgument,
			"write_file requires a destination path",
		));
	};

	std::fs::write(&path, &value).map_err(|e| {
		Error::new(
			ErrorKind::InvalidOperation,
			format!("could not write file `{path}`"),
		)
		.with_source(e)
	})?;

	Ok(value)
}

/// `{{ "some/dir" | make_dirs }}` creates the directory and its parents.
fn make_dirs(value: String, _argument: Option<String>) -> Result<String, Error> {
	std::fs::create_dir_all(&value).map_err(|e| {
		Error::new(
			ErrorKind::InvalidOperation,
			format!("could not create directory `{value}`"),
		)
		.with_source(e)
	})?;

	Ok(value)
}

fn passthrough(value: String, _argument: Option<String>) -> Result<String, Error> {
	Ok(value)
}
