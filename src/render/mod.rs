pub mod canvas_transform;
pub mod draw_command;
pub mod field_renderer;

pub use canvas_transform::CanvasTransform;
pub use draw_command::DrawCommand;
pub use field_renderer::render_field;
