//! `p2_core` is the engine behind the `p2` command. It turns a handful of
//! command line signals into a data context and renders a
//! [`minijinja`](https://docs.rs/minijinja) template with it.
//!
//! ## Processing Pipeline
//!
//! ```text
//! --format / --input / --use-env-key
//!   → Resolver (picks one DataFormat and one DataSource)
//!   → Raw reader (file, stdin, one environment variable, or the whole environment)
//!   → Parser (KEY=VALUE lines with shell quoting, JSON, or YAML)
//!   → Assembler (returns the InputContext)
//!   → Renderer (template + context + gated filters)
//! ```
//!
//! ## Modules
//!
//! - [`filters`] — Filesystem filters that are only registered when enabled,
//!   plus their no-op stand-ins.
//! - [`reader`] — Host environment access and raw input reading.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use p2_core::FilterRegistry;
//! use p2_core::OsHost;
//! use p2_core::Renderer;
//! use p2_core::assemble;
//! use p2_core::resolve;
//!
//! let resolution = resolve(Some("json"), Some("data.json"), false).unwrap();
//! let context = assemble(&resolution, &OsHost).unwrap();
//! let filters = FilterRegistry::builtin().select(None, false).unwrap();
//! let renderer = Renderer::new("greeting", "Hello {{ name }}!", &filters, false).unwrap();
//! println!("{}", renderer.render(&context, "data.json").unwrap());
//! ```

pub use context::*;
pub use env::*;
pub use error::*;
pub use filters::*;
pub use reader::*;
pub use render::*;
pub use resolve::*;
pub use structured::*;

mod context;
mod env;
#[allow(unused_assignments)]
mod error;
pub mod filters;
pub mod reader;
mod render;
mod resolve;
mod structured;

#[cfg(test)]
mod __fixtures;
