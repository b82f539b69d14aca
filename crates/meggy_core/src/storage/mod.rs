pub mod line_store;

pub use line_store::{DATA_ENV_VAR, LineStore, data_path, decode_line};
