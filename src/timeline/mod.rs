//! Gantt-style timeline layout for campaign events.

mod timeline_layout;
mod timeline_render;

pub use timeline_layout::*;
pub use timeline_render::*;
