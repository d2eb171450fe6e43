//! Command bindings and dispatch outcomes.

use std::fmt::{Display, Formatter};

use crate::error::{Error, Result};
use crate::export::ExportPolicy;
use crate::schema::{ArgumentBundle, ArgumentSchema};
use crate::table::Table;

/// A data-fetch handler. Handlers are opaque collaborators: the dispatch core
/// never looks inside, it only validates the arguments it hands them and
/// isolates their failures.
pub type Handler = Box<dyn Fn(&ArgumentBundle) -> Result<HandlerOutput>>;

/// What a handler is allowed to produce: a table to render/export, and
/// command strings pushed onto the front of the session queue.
#[derive(Debug, Default)]
pub struct HandlerOutput {
    /// `None` for purely chaining commands; `Some` empty table means
    /// "no data" and is surfaced as a message, never an error.
    pub table: Option<Table>,
    pub queued: Vec<String>,
}

impl HandlerOutput {
    pub fn table(table: Table) -> Self {
        Self {
            table: Some(table),
            queued: Vec::new(),
        }
    }

    /// No table at all; the command exists for its queued follow-ups.
    pub fn silent() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_queued<I, S>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queued = commands.into_iter().map(Into::into).collect();
        self
    }
}

/// Binds a command name to its argument schema and handler.
pub struct CommandSpec {
    pub name: String,
    pub description: String,
    pub schema: ArgumentSchema,
    pub export: Option<ExportPolicy>,
    handler: Handler,
}

impl CommandSpec {
    pub fn new(
        name: &str,
        description: &str,
        schema: ArgumentSchema,
        export: Option<ExportPolicy>,
        handler: Handler,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            schema,
            export,
            handler,
        }
    }

    /// Invokes the handler, wrapping any failure so the caller knows which
    /// command produced it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Handler`] carrying the command name and the
    /// handler's error message.
    pub fn invoke(&self, bundle: &ArgumentBundle) -> Result<HandlerOutput> {
        (self.handler)(bundle).map_err(|e| Error::Handler {
            command: self.name.clone(),
            message: e.to_string(),
        })
    }
}

impl Display for CommandSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.name, self.description)
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("export", &self.export)
            .finish_non_exhaustive()
    }
}

/// The caller-visible result of executing one queued or typed line.
///
/// Everything except `Quit` is recoverable: the session continues with the
/// next command.
#[derive(Debug)]
pub enum CommandOutcome {
    Success,
    CommandNotFound(String),
    ValidationFailed(Error),
    HandlerFailure { command: String, message: String },
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_wraps_handler_errors_with_the_command_name() {
        let spec = CommandSpec::new(
            "tvl",
            "Total value locked",
            ArgumentSchema::new(),
            None,
            Box::new(|_| Err(Error::UnknownColumn("tvl".to_string()))),
        );

        let result = spec.invoke(&ArgumentBundle::default());
        match result {
            Err(Error::Handler { command, message }) => {
                assert_eq!(command, "tvl");
                assert!(message.contains("tvl"));
            }
            other => panic!("expected Handler error, got {other:?}"),
        }
    }

    #[test]
    fn test_silent_output_carries_only_queued_commands() {
        let output = HandlerOutput::silent().with_queued(["defi", "tvl -l 5"]);
        assert!(output.table.is_none());
        assert_eq!(output.queued, vec!["defi", "tvl -l 5"]);
    }
}
