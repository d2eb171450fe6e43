//! Command-line argument parsing and validation.
//!
//! Defines the flags of the `coinshell` binary and the translation into a
//! [`SessionConfig`] handed to the dispatcher.

use clap::Parser;
use coinshell_core::session::DEFAULT_EXPORT_DIR;
use coinshell_core::{SessionConfig, UnknownFlagPolicy};

/// Command-line arguments for the coinshell terminal.
#[derive(Parser, Debug)]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to a routine file: a YAML list of command strings executed
    /// before any interactive input.
    #[arg(long, short = 'r')]
    pub routine: Option<String>,

    /// Directory that exported tables are written into.
    ///
    /// If not provided, defaults to `~/.coinshell/exports`.
    #[arg(long, short = 'e')]
    pub export_dir: Option<String>,

    /// Abort a command on unknown flags instead of warning and continuing.
    ///
    /// The forgiving default suits interactive use; strict mode suits
    /// routines, where a typo should not silently change the result.
    #[arg(long, action)]
    pub strict: bool,

    /// Suppress figure rendering for commands that produce figures.
    #[arg(long, action)]
    pub no_figures: bool,

    /// Commands to queue before interactive input, e.g.
    /// `coinshell /crypto/defi/ "tvl -l 5" quit`.
    #[arg(trailing_var_arg = true)]
    pub commands: Vec<String>,
}

impl Args {
    /// Builds the session configuration these arguments describe.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            unknown_flags: if self.strict {
                UnknownFlagPolicy::Strict
            } else {
                UnknownFlagPolicy::Warn
            },
            display_figures: !self.no_figures,
            export_dir: self
                .export_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_EXPORT_DIR.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["coinshell"]);

        assert!(args.routine.is_none());
        assert!(args.export_dir.is_none());
        assert!(!args.strict);
        assert!(!args.no_figures);
        assert!(args.commands.is_empty());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "coinshell",
            "-r",
            "morning.yml",
            "-e",
            "/tmp/exports",
        ]);

        assert_eq!(args.routine, Some("morning.yml".to_string()));
        assert_eq!(args.export_dir, Some("/tmp/exports".to_string()));
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "coinshell",
            "--routine",
            "morning.yml",
            "--export-dir",
            "/tmp/exports",
            "--strict",
            "--no-figures",
        ]);

        assert_eq!(args.routine, Some("morning.yml".to_string()));
        assert_eq!(args.export_dir, Some("/tmp/exports".to_string()));
        assert!(args.strict);
        assert!(args.no_figures);
    }

    #[test]
    fn test_trailing_commands_are_collected_in_order() {
        let args = Args::parse_from(["coinshell", "/crypto/defi/", "tvl -l 5", "quit"]);
        assert_eq!(args.commands, vec!["/crypto/defi/", "tvl -l 5", "quit"]);
    }

    #[test]
    fn test_session_config_defaults() {
        let config = Args::parse_from(["coinshell"]).session_config();
        assert_eq!(config.unknown_flags, UnknownFlagPolicy::Warn);
        assert!(config.display_figures);
        assert_eq!(config.export_dir, DEFAULT_EXPORT_DIR);
    }

    #[test]
    fn test_session_config_reflects_flags() {
        let config = Args::parse_from([
            "coinshell",
            "--strict",
            "--no-figures",
            "-e",
            "/tmp/exports",
        ])
        .session_config();

        assert_eq!(config.unknown_flags, UnknownFlagPolicy::Strict);
        assert!(!config.display_figures);
        assert_eq!(config.export_dir, "/tmp/exports");
    }
}
