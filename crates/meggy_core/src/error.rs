use thiserror::Error;

/// Why a data-file write did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageFailure {
    #[error("an I/O error occurred ({0})")]
    Io(String),
    #[error("access to the data file was denied ({0})")]
    NoAccess(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeggyError {
    #[error("The command is missing its argument.")]
    EmptyArgument,
    #[error("'{0}' is not a valid task number.")]
    NotANumber(String),
    #[error("Task number {} is out of range: the list has {} task(s).", .index + 1, .len)]
    IndexOutOfRange { index: i64, len: usize },
    #[error("I don't know what '{0}' means.")]
    UnknownCommand(String),
    #[error("Failed to write the data file: {0}.")]
    StorageWrite(StorageFailure),
    #[error("Configuration problem: {0}")]
    Config(String),
}

impl MeggyError {
    pub fn not_a_number<M: Into<String>>(token: M) -> Self {
        Self::NotANumber(token.into())
    }

    pub fn unknown_command<M: Into<String>>(keyword: M) -> Self {
        Self::UnknownCommand(keyword.into())
    }

    pub fn io<M: Into<String>>(detail: M) -> Self {
        Self::StorageWrite(StorageFailure::Io(detail.into()))
    }

    pub fn no_access<M: Into<String>>(detail: M) -> Self {
        Self::StorageWrite(StorageFailure::NoAccess(detail.into()))
    }

    pub fn config<M: Into<String>>(detail: M) -> Self {
        Self::Config(detail.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyArgument => "empty_argument",
            Self::NotANumber(_) => "not_a_number",
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::UnknownCommand(_) => "unknown_command",
            Self::StorageWrite(StorageFailure::Io(_)) => "storage_io",
            Self::StorageWrite(StorageFailure::NoAccess(_)) => "storage_no_access",
            Self::Config(_) => "config",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<std::io::Error> for MeggyError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::no_access(err.to_string()),
            _ => Self::io(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MeggyError, StorageFailure};

    #[test]
    fn codes_distinguish_storage_sub_kinds() {
        assert_eq!(MeggyError::io("disk full").code(), "storage_io");
        assert_eq!(MeggyError::no_access("read-only").code(), "storage_no_access");
    }

    #[test]
    fn storage_messages_name_the_failure() {
        assert_eq!(
            MeggyError::io("disk full").to_string(),
            "Failed to write the data file: an I/O error occurred (disk full)."
        );
        assert_eq!(
            MeggyError::no_access("read-only").to_string(),
            "Failed to write the data file: access to the data file was denied (read-only)."
        );
    }

    #[test]
    fn permission_denied_maps_to_no_access() {
        let err: MeggyError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(
            err,
            MeggyError::StorageWrite(StorageFailure::NoAccess("nope".into()))
        );
    }

    #[test]
    fn out_of_range_message_uses_display_index() {
        let err = MeggyError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(
            err.message(),
            "Task number 5 is out of range: the list has 2 task(s)."
        );
    }
}
