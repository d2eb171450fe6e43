use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown flag: `{}`", _0)]
    UnknownFlag(String),

    #[error("Invalid value `{}` for `--{}`: expected {}", .value, .flag, .expected)]
    FlagType {
        flag: String,
        value: String,
        expected: &'static str,
    },

    #[error("Value for `--{}` must be a positive integer (got {})", .flag, .value)]
    ConstraintViolation { flag: String, value: i64 },

    #[error("Invalid choice `{}` for `--{}` (choose from: {})", .value, .flag, .choices.join(", "))]
    InvalidChoice {
        flag: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("Flag `--{}` expects a value", _0)]
    MissingValue(String),

    #[error("Unterminated quote in input: `{}`", _0)]
    UnterminatedQuote(String),

    #[error("Flag `{}` is not present in this argument bundle", _0)]
    MissingFlag(String),

    #[error("Found a non-unique flag name in schema: `{}`", _0)]
    NonUniqueFlag(String),

    #[error("Default `{}` for `--{}` is not one of its declared choices", .value, .flag)]
    DefaultOutsideChoices { flag: String, value: String },

    #[error("Default for `--{}` does not satisfy its own constraint", _0)]
    DefaultOutsideConstraint(String),

    #[error("Found a non-unique command name in menu `{}`: `{}`", _0, _1)]
    DuplicateCommand(String, String),

    #[error("Found a non-unique menu path: `{}`", _0)]
    DuplicateMenu(String),

    #[error("No menu is registered at `{}`", _0)]
    UnknownMenu(String),

    #[error("Command `{}` failed: {}", .command, .message)]
    Handler { command: String, message: String },

    #[error("Unknown export format: `{}`", _0)]
    UnknownExportFormat(String),

    #[error("No column named `{}` in table", _0)]
    UnknownColumn(String),

    #[error("CSV export error: {}", _0)]
    Csv(#[from] csv::Error),

    #[error("JSON export error: {}", _0)]
    Json(#[from] serde_json::Error),

    #[error("STDIO error: {}", _0)]
    Stdio(std::io::Error),

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },
}

impl Error {
    pub fn io_error(file_description: &str, path: &str, original: std::io::Error) -> Self {
        Self::Io {
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }

    pub fn yaml_error(
        action: &str,
        file_description: &str,
        path: &str,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action: action.to_string(),
            file_description: file_description.to_string(),
            path: path.to_string(),
            original,
        }
    }
}
