//! Session-wide configuration and routine (batch script) loading.
//!
//! A [`SessionConfig`] is built once at startup and passed explicitly into
//! the dispatcher; nothing in the core reads ambient global state.

use std::fs::File;
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::UnknownFlagPolicy;

/// Default directory for exported tables.
pub const DEFAULT_EXPORT_DIR: &str = "~/.coinshell/exports";

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Warn-and-continue for interactive use, abort for strict batch use.
    pub unknown_flags: UnknownFlagPolicy,
    /// Whether commands that produce figures should render them.
    pub display_figures: bool,
    pub export_dir: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            unknown_flags: UnknownFlagPolicy::Warn,
            display_figures: true,
            export_dir: DEFAULT_EXPORT_DIR.to_string(),
        }
    }
}

/// Loads a routine file: a YAML list of command strings used to pre-seed the
/// session queue for batch execution.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a YAML list of
/// strings.
pub fn load_routine(path: &str) -> Result<Vec<String>> {
    let expanded = shellexpand::tilde(path).to_string();
    if !Path::new(&expanded).exists() {
        return Err(Error::io_error(
            "routine",
            &expanded,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        ));
    }

    let reader = File::open(&expanded).map_err(|e| Error::io_error("routine", &expanded, e))?;

    let commands: serde_yaml::Result<Vec<String>> = serde_yaml::from_reader(reader);
    let commands =
        commands.map_err(|e| Error::yaml_error("reading", "routine", &expanded, e))?;

    Ok(commands
        .into_iter()
        .map(|command| command.trim().to_string())
        .filter(|command| !command.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_interactive_and_forgiving() {
        let config = SessionConfig::default();
        assert_eq!(config.unknown_flags, UnknownFlagPolicy::Warn);
        assert!(config.display_figures);
        assert_eq!(config.export_dir, DEFAULT_EXPORT_DIR);
    }

    #[test]
    fn test_load_routine_parses_yaml_list() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "- /crypto/defi/\n- \"tvl -l 5\"\n- \"  \"\n- quit\n"
        )
        .unwrap();

        let commands = load_routine(file.path().to_str().unwrap()).unwrap();
        assert_eq!(commands, vec!["/crypto/defi/", "tvl -l 5", "quit"]);
    }

    #[test]
    fn test_load_routine_missing_file() {
        let result = load_routine("/this/path/does/not/exist.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_routine_rejects_malformed_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not: a: list: [").unwrap();

        let result = load_routine(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }
}
