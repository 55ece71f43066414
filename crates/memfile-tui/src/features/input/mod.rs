//! Form field slice: editable buffers and their rendering.

mod render;
mod text_buffer;

pub use render::{Field, render_field};
pub use text_buffer::{CursorMove, TextBuffer};
