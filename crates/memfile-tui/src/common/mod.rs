//! Shared helpers for the form's render and update paths.

pub mod text;

pub use text::{sanitize_paste, truncate_with_ellipsis};
