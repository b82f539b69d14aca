use crate::error::MeggyError;
use crate::model::Task;
use std::fmt;

/// Ordered tasks; a task is addressed only by its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Shifts every later task one place to the left.
    pub fn remove(&mut self, index: usize) -> Option<Task> {
        (index < self.tasks.len()).then(|| self.tasks.remove(index))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn check_index(&self, index: i64) -> Result<usize, MeggyError> {
        usize::try_from(index)
            .ok()
            .filter(|index| *index < self.tasks.len())
            .ok_or(MeggyError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
    }

    pub fn get_checked_mut(&mut self, index: i64) -> Result<&mut Task, MeggyError> {
        let index = self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }

    pub fn remove_checked(&mut self, index: i64) -> Result<Task, MeggyError> {
        let index = self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Tasks whose description contains `needle`, case-sensitive, in order.
    pub fn find(&self, needle: &str) -> TaskList {
        self.tasks
            .iter()
            .filter(|task| task.description.contains(needle))
            .cloned()
            .collect()
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, task) in self.tasks.iter().enumerate() {
            writeln!(f, "{}.{task}", position + 1)?;
        }
        Ok(())
    }
}
