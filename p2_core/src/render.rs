use minijinja::AutoEscape;
use minijinja::Environment;

use crate::InputContext;
use crate::P2Error;
use crate::P2Result;
use crate::SelectedFilter;

/// A compiled template together with the environment it renders in.
pub struct Renderer<'source> {
	env: Environment<'source>,
	name: String,
}

impl<'source> Renderer<'source> {
	/// Compile `source` under `name`, registering the selected filters.
	///
	/// Autoescaping is HTML escaping when `autoescape` is set and disabled
	/// otherwise. Trailing newlines in the template are preserved.
	pub fn new(
		name: &'source str,
		source: &'source str,
		filters: &[SelectedFilter],
		autoescape: bool,
	) -> P2Result<Self> {
		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_auto_escape_callback(move |_| {
			if autoescape {
				AutoEscape::Html
			} else {
				AutoEscape::None
			}
		});

		for filter in filters {
			filter.register(&mut env);
		}

		env.add_template(name, source)
			.map_err(|e| {
				P2Error::TemplateSyntax {
					template: name.to_string(),
					reason: e.to_string(),
				}
			})?;

		Ok(Self {
			env,
			name: name.to_string(),
		})
	}

	/// Render the template against `context`. `data` describes where the
	/// context came from and is only used in error messages.
	pub fn render(&self, context: &InputContext, data: &str) -> P2Result<String> {
		let render_error = |e: minijinja::Error| {
			P2Error::TemplateRender {
				template: self.name.clone(),
				data: data.to_string(),
				reason: e.to_string(),
			}
		};

		let template = self.env.get_template(&self.name).map_err(render_error)?;
		template.render(context).map_err(render_error)
	}
}
