use super::TimeValue;
use crate::error::MeggyError;
use std::fmt;

pub const DUE_MARKER: &str = "/by ";
pub const START_MARKER: &str = "/from ";
pub const END_MARKER: &str = "/to ";

const DONE_MARK: char = 'X';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Todo,
    Deadline { due: TimeValue },
    Event { start: TimeValue, end: TimeValue },
}

impl TaskKind {
    pub fn label(&self) -> char {
        match self {
            Self::Todo => 'T',
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }

    /// Command word that recreates a task of this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Deadline { .. } => "deadline",
            Self::Event { .. } => "event",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    pub description: String,
    pub done: bool,
    pub kind: TaskKind,
}

impl Task {
    fn new(description: &str, kind: TaskKind) -> Result<Self, MeggyError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(MeggyError::EmptyArgument);
        }

        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    pub fn todo(args: &str) -> Result<Self, MeggyError> {
        Self::new(args, TaskKind::Todo)
    }

    /// `<description> /by <time>`; without the marker the due time is absent.
    pub fn deadline(args: &str) -> Result<Self, MeggyError> {
        let (description, due) = match args.find(DUE_MARKER) {
            Some(at) => (
                &args[..at],
                TimeValue::of(Some(&args[at + DUE_MARKER.len()..])),
            ),
            None => (args, TimeValue::Absent),
        };
        Self::new(description, TaskKind::Deadline { due })
    }

    /// `<description> /from <time> /to <time>`, markers in either order.
    pub fn event(args: &str) -> Result<Self, MeggyError> {
        let start_at = args.find(START_MARKER);
        let end_at = args.find(END_MARKER);

        let description_end = match (start_at, end_at) {
            (Some(start), Some(end)) => start.min(end),
            (Some(at), None) | (None, Some(at)) => at,
            (None, None) => args.len(),
        };
        let start = segment(args, start_at, START_MARKER, end_at);
        let end = segment(args, end_at, END_MARKER, start_at);

        Self::new(
            &args[..description_end],
            TaskKind::Event {
                start: TimeValue::of(start),
                end: TimeValue::of(end),
            },
        )
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// The command line that would add this task again. Absent times leave
    /// out their marker, and markers are placed so that replaying the line
    /// splits it exactly where the original input was split.
    pub fn encode(&self) -> String {
        let mut line = format!("{} {}", self.kind.keyword(), self.description);
        match &self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { due } => append_time(&mut line, DUE_MARKER, due, &[DUE_MARKER]),
            TaskKind::Event { start, end } => {
                let markers = [START_MARKER, END_MARKER];
                let start_text = start.encode();
                // A start containing `/to ` only parses from after the end time;
                // an empty end time is kept away from the end of the line.
                let end_first = start_text.contains(END_MARKER)
                    || matches!(end, TimeValue::Custom(raw) if raw.is_empty());
                if end_first {
                    append_time(&mut line, END_MARKER, end, &markers);
                    append_time(&mut line, START_MARKER, start, &markers);
                } else {
                    append_time(&mut line, START_MARKER, start, &markers);
                    append_time(&mut line, END_MARKER, end, &markers);
                }
            }
        }
        line
    }
}

// Text ending in a bare marker word would turn into a marker if a space were
// added, so the next marker is written directly after it.
fn append_time(line: &mut String, marker: &str, value: &TimeValue, markers: &[&str]) {
    if matches!(value, TimeValue::Absent) {
        return;
    }
    if !markers.iter().any(|word| line.ends_with(word.trim_end())) {
        line.push(' ');
    }
    line.push_str(marker);
    line.push_str(&value.encode());
}

// Text after `marker`, stopped by the other marker when that one comes later.
fn segment<'a>(
    args: &'a str,
    at: Option<usize>,
    marker: &str,
    other: Option<usize>,
) -> Option<&'a str> {
    let from = at? + marker.len();
    let until = match other {
        Some(other) if other >= from => other,
        _ => args.len(),
    };
    Some(&args[from..until])
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description && self.kind == other.kind
    }
}

impl Eq for Task {}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { DONE_MARK } else { ' ' };
        write!(f, "[{}][{mark}] {}", self.kind.label(), self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { due } => write!(f, " (by: {due})"),
            TaskKind::Event { start, end } => write!(f, " (from: {start} to: {end})"),
        }
    }
}
