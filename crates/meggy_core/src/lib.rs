pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod messages;
pub mod model;
pub mod storage;
pub mod task_list;

pub use engine::{Meggy, Reply, TaskStore};
pub use error::MeggyError;
