pub mod template_renderer;

pub use template_renderer::render_template;
