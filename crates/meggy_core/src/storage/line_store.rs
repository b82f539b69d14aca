use crate::command::{Command, tokenize};
use crate::error::MeggyError;
use crate::model::Task;
use crate::task_list::TaskList;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DATA_ENV_VAR: &str = "MEGGY_DATA_PATH";
const DATA_FILE_NAME: &str = "tasks.txt";

/// Picks the data file: environment first, then the configured path, then
/// the per-user default.
pub fn data_path(configured: Option<&Path>) -> Result<PathBuf, MeggyError> {
    if let Ok(path) = std::env::var(DATA_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = configured {
        return Ok(path.to_path_buf());
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| MeggyError::config("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("meggy").join(DATA_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| MeggyError::config("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("meggy")
            .join(DATA_FILE_NAME))
    }
}

/// Reads a task from one data-file line, if the line is a task command.
pub fn decode_line(line: &str) -> Option<Task> {
    let parsed = tokenize(line);
    let command = parsed.command.filter(|command| command.creates_task())?;
    let result = match command {
        Command::Todo => Task::todo(&parsed.remainder),
        Command::Deadline => Task::deadline(&parsed.remainder),
        _ => Task::event(&parsed.remainder),
    };

    match result {
        Ok(task) => Some(task),
        Err(err) => {
            tracing::debug!(line, error = %err, "skipping unreadable task line");
            None
        }
    }
}

/// One command per line, each recreating a task when replayed.
#[derive(Debug, Clone)]
pub struct LineStore {
    path: PathBuf,
}

impl LineStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Missing or unreadable files give an empty list; bad lines are skipped.
    pub fn load(&self) -> TaskList {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %err, "cannot open data file");
                }
                return TaskList::new();
            }
        };

        let mut tasks = TaskList::new();
        let mut skipped = 0usize;
        for line in BufReader::new(file).lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), error = %err, "stopped reading data file");
                    break;
                }
            };
            match decode_line(&line) {
                Some(task) => tasks.push(task),
                None => skipped += 1,
            }
        }

        tracing::info!(
            path = %self.path.display(),
            loaded = tasks.len(),
            skipped,
            "loaded task list"
        );
        tasks
    }

    /// Rewrites the whole file from `tasks`.
    pub fn save(&self, tasks: &[Task]) -> Result<(), MeggyError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        for task in tasks {
            writeln!(writer, "{}", task.encode())?;
        }
        writer.flush()?;
        drop(writer);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)?;
        }

        tracing::info!(path = %self.path.display(), saved = tasks.len(), "saved task list");
        Ok(())
    }
}
