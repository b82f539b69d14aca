//! Fixed response texts.

use crate::command::{COMMANDS, Command};

pub const GREETING: &str = "Hello! I'm Meggy.\nWhat can I do for you?";
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";
pub const TASK_INDENT: &str = "  ";
pub const ADDED: &str = "Got it. I've added this task:";
pub const DELETED: &str = "Noted. I've removed this task:";
pub const MARKED: &str = "Nice! I've marked this task as done:";
pub const UNMARKED: &str = "OK, I've marked this task as not done yet:";
pub const LISTING: &str = "Here are the tasks in your list:";
pub const EMPTY_LIST: &str = "Your list is empty.";
pub const FOUND: &str = "Here are the matching tasks in your list:";
pub const NOTHING_FOUND: &str = "No task matches that.";
pub const END_OF_INPUT: &str = "WARNING: reached end of input without 'bye'.";

pub fn task_count(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {count} {noun} in the list.")
}

pub fn usage_hint(command: Command) -> String {
    format!("Usage: {}", command.usage())
}

/// One usage line per command, in table order.
pub fn command_help() -> String {
    let mut help = String::from("Commands:");
    for (_, command) in COMMANDS {
        help.push_str("\n  ");
        help.push_str(command.usage());
    }
    help
}
