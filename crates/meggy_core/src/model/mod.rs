mod task;
mod time_value;

pub use task::{DUE_MARKER, END_MARKER, START_MARKER, Task, TaskKind};
pub use time_value::{NOT_FOUND, TimeValue, template_count, template_patterns};
