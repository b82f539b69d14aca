use crate::command::{Command, first_word, parse_index, tokenize};
use crate::error::MeggyError;
use crate::messages;
use crate::model::Task;
use crate::storage::LineStore;
use crate::task_list::TaskList;

/// Where the engine keeps its snapshot between sessions.
pub trait TaskStore {
    fn load(&self) -> TaskList;

    fn save(&self, tasks: &[Task]) -> Result<(), MeggyError>;
}

impl TaskStore for LineStore {
    fn load(&self) -> TaskList {
        LineStore::load(self)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), MeggyError> {
        LineStore::save(self, tasks)
    }
}

/// Response to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Set once the user said goodbye.
    pub exit: bool,
}

impl Reply {
    fn text<M: Into<String>>(text: M) -> Self {
        Self {
            text: text.into(),
            exit: false,
        }
    }
}

/// The task agent: owns the list and its backing store.
pub struct Meggy {
    tasks: TaskList,
    store: Box<dyn TaskStore>,
}

impl Meggy {
    /// Starts from whatever the store already holds.
    pub fn new(store: Box<dyn TaskStore>) -> Self {
        let tasks = store.load();
        Self { tasks, store }
    }

    pub fn with_line_store(store: LineStore) -> Self {
        Self::new(Box::new(store))
    }

    pub fn greeting(&self) -> &'static str {
        messages::GREETING
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Answers one line. Failures become the response text.
    pub fn submit(&mut self, line: &str) -> String {
        self.reply(line).text
    }

    pub fn reply(&mut self, line: &str) -> Reply {
        let parsed = tokenize(line);
        tracing::debug!(keyword = %parsed.keyword, "dispatching command");

        let Some(command) = parsed.command else {
            let err = MeggyError::unknown_command(first_word(&parsed.remainder));
            return Reply::text(err.to_string());
        };

        let args = parsed.remainder.as_str();
        let result = match command {
            Command::Bye => {
                return Reply {
                    text: messages::FAREWELL.to_string(),
                    exit: true,
                };
            }
            Command::List => Ok(self.list()),
            Command::Mark => self.mark(args, true),
            Command::Unmark => self.mark(args, false),
            Command::Todo | Command::Deadline | Command::Event => self.add(command, args),
            Command::Delete => self.delete(args),
            Command::Find => self.find(args),
        };

        match result {
            Ok(text) => Reply::text(text),
            Err(err) if matches!(command, Command::Mark | Command::Unmark | Command::Delete) => {
                Reply::text(format!("{err}\n{}", messages::usage_hint(command)))
            }
            Err(err) => Reply::text(err.to_string()),
        }
    }

    pub fn list(&self) -> String {
        if self.tasks.is_empty() {
            return messages::EMPTY_LIST.to_string();
        }
        format!("{}\n{}", messages::LISTING, self.tasks.to_string().trim_end())
    }

    pub fn mark(&mut self, args: &str, done: bool) -> Result<String, MeggyError> {
        let task = self.tasks.get_checked_mut(parse_index(args)?)?;
        task.set_done(done);

        let notice = if done {
            messages::MARKED
        } else {
            messages::UNMARKED
        };
        Ok(format!("{notice}\n{}{task}", messages::TASK_INDENT))
    }

    /// Appends a new task and saves. A failed save keeps the task in memory.
    pub fn add(&mut self, command: Command, args: &str) -> Result<String, MeggyError> {
        let task = match command {
            Command::Todo => Task::todo(args)?,
            Command::Deadline => Task::deadline(args)?,
            Command::Event => Task::event(args)?,
            other => return Err(MeggyError::unknown_command(other.keyword())),
        };

        let rendered = task.to_string();
        self.tasks.push(task);
        self.store.save(self.tasks.as_slice()).inspect_err(|err| {
            tracing::warn!(error = %err, "task added but not saved");
        })?;

        Ok(self.changed_report(messages::ADDED, &rendered))
    }

    /// Removes a task. A failed save is reported but the removal stands.
    pub fn delete(&mut self, args: &str) -> Result<String, MeggyError> {
        let removed = self.tasks.remove_checked(parse_index(args)?)?;

        let report = self.changed_report(messages::DELETED, &removed.to_string());
        match self.store.save(self.tasks.as_slice()) {
            Ok(()) => Ok(report),
            Err(err) => {
                tracing::warn!(error = %err, "task deleted but not saved");
                Ok(format!("{err}\n{report}"))
            }
        }
    }

    pub fn find(&self, needle: &str) -> Result<String, MeggyError> {
        if needle.is_empty() {
            return Err(MeggyError::EmptyArgument);
        }

        let matches = self.tasks.find(needle);
        if matches.is_empty() {
            return Ok(messages::NOTHING_FOUND.to_string());
        }
        Ok(format!("{}\n{}", messages::FOUND, matches.to_string().trim_end()))
    }

    fn changed_report(&self, notice: &str, rendered: &str) -> String {
        format!(
            "{notice}\n{}{rendered}\n{}",
            messages::TASK_INDENT,
            messages::task_count(self.tasks.len())
        )
    }
}
