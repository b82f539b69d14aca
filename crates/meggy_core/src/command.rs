use crate::error::MeggyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Bye,
    List,
    Mark,
    Unmark,
    Todo,
    Deadline,
    Event,
    Delete,
    Find,
}

/// Keyword to command table consulted by every parsed line.
pub const COMMANDS: [(&str, Command); 9] = [
    ("bye", Command::Bye),
    ("list", Command::List),
    ("mark", Command::Mark),
    ("unmark", Command::Unmark),
    ("todo", Command::Todo),
    ("deadline", Command::Deadline),
    ("event", Command::Event),
    ("delete", Command::Delete),
    ("find", Command::Find),
];

impl Command {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|(name, _)| *name == keyword)
            .map(|(_, command)| *command)
    }

    pub fn keyword(self) -> &'static str {
        COMMANDS
            .iter()
            .find(|(_, command)| *command == self)
            .map(|(name, _)| *name)
            .unwrap_or_default()
    }

    pub fn usage(self) -> &'static str {
        match self {
            Self::Bye => "bye",
            Self::List => "list",
            Self::Mark => "mark <task number>",
            Self::Unmark => "unmark <task number>",
            Self::Todo => "todo <description>",
            Self::Deadline => "deadline <description> /by <time>",
            Self::Event => "event <description> /from <time> /to <time>",
            Self::Delete => "delete <task number>",
            Self::Find => "find <text>",
        }
    }

    /// Whether the command creates a task and may appear in the data file.
    pub fn creates_task(self) -> bool {
        matches!(self, Self::Todo | Self::Deadline | Self::Event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub keyword: String,
    pub command: Option<Command>,
    pub remainder: String,
}

/// Splits a raw line into its lower-cased keyword and the rest. Whitespace
/// runs count as one space. For an unknown keyword the remainder is the
/// whole normalised line.
pub fn tokenize(line: &str) -> ParsedLine {
    let collapsed = line.split_whitespace().collect::<Vec<_>>().join(" ");
    let (head, rest) = collapsed
        .split_once(' ')
        .unwrap_or((collapsed.as_str(), ""));
    let keyword = head.to_lowercase();
    let command = Command::from_keyword(&keyword);
    let remainder = match command {
        Some(_) => rest.trim().to_string(),
        None => collapsed.clone(),
    };

    ParsedLine {
        keyword,
        command,
        remainder,
    }
}

pub fn first_word(args: &str) -> &str {
    args.split_whitespace().next().unwrap_or("")
}

/// Reads a 1-based task number and returns it 0-based. Range checks belong
/// to the task list.
pub fn parse_index(args: &str) -> Result<i64, MeggyError> {
    let token = first_word(args);
    if token.is_empty() {
        return Err(MeggyError::EmptyArgument);
    }

    let number: i32 = token
        .parse()
        .map_err(|_| MeggyError::not_a_number(token))?;
    Ok(i64::from(number) - 1)
}
