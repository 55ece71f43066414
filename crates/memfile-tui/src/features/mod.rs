//! Feature slices for the form (state/update/render per slice).

pub mod input;
pub mod sidebar;
pub mod status;
pub mod viewer;
