use log::error;
use minijinja::{Environment, Error as JinjaError, Value};
use once_cell::sync::Lazy;

const INDEX_TEMPLATE: &str = include_str!("index.html");

/// Template environment with the built-in pages loaded
static TEMPLATE_ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    if let Err(e) = env.add_template("index.html", INDEX_TEMPLATE) {
        error!("Failed to load index.html: {}", e);
    }
    env
});

/// Render a built-in page
///
/// `.html` templates are auto-escaped.
pub fn render_template(name: &str, ctx: Value) -> Result<String, JinjaError> {
    TEMPLATE_ENV.get_template(name)?.render(ctx)
}
