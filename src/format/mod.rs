mod text;
mod time;

pub(crate) use text::{format_idea_line, wrap_to_width};
pub(crate) use time::format_display_time;
