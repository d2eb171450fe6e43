//! The dispatch loop: one line in, one [`CommandOutcome`] out.
//!
//! Single-threaded and cooperative. The dispatcher owns the command queue
//! and the active-menu reference; both are mutated only inside
//! [`Dispatcher::execute_next`]. Validation failures never reach a handler,
//! and handler failures never take down the session — the only terminal
//! outcome is an explicit quit (or end of input).

use log::debug;

use crate::command::CommandOutcome;
use crate::completion::CompletionIndex;
use crate::error::{Error, Result};
use crate::export::{self, ExportFormat, ExportPolicy, EXPORT_FLAG};
use crate::menu::{Menu, MenuTree};
use crate::queue::CommandQueue;
use crate::schema::ArgumentBundle;
use crate::session::SessionConfig;
use crate::table::Table;

/// One blocking line of user input. `None` means end of input and is
/// treated like a quit.
pub trait InputSource {
    /// # Errors
    ///
    /// Returns an error if reading from the underlying source fails.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// The caller-visible layer: tables, figures and one-line diagnostics.
pub trait Presenter {
    /// # Errors
    ///
    /// Returns an error if writing the table to the output fails.
    fn render_table(&mut self, command: &str, table: &Table) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if writing the figure to the output fails.
    fn render_figure(&mut self, command: &str, table: &Table) -> Result<()>;

    fn info(&mut self, message: &str);

    fn warn(&mut self, message: &str);
}

/// Presenter that swallows all output. Useful for sessions that only
/// export, and for tests that assert on outcomes alone.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_table(&mut self, _command: &str, _table: &Table) -> Result<()> {
        Ok(())
    }

    fn render_figure(&mut self, _command: &str, _table: &Table) -> Result<()> {
        Ok(())
    }

    fn info(&mut self, _message: &str) {}

    fn warn(&mut self, _message: &str) {}
}

/// Observable dispatcher states. Transitions are driven solely by queue
/// emptiness; `Terminated` is reached only through quit or end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    AwaitingInput,
    Draining,
    Terminated,
}

pub struct Dispatcher<P: Presenter> {
    tree: MenuTree,
    active: String,
    queue: CommandQueue,
    config: SessionConfig,
    presenter: P,
    completion: CompletionIndex,
    state: DispatcherState,
}

impl<P: Presenter> Dispatcher<P> {
    /// # Errors
    ///
    /// Returns [`Error::UnknownMenu`] if `start` is not a registered path.
    pub fn new(
        tree: MenuTree,
        start: &str,
        config: SessionConfig,
        presenter: P,
    ) -> Result<Self> {
        if tree.get(start).is_none() {
            return Err(Error::UnknownMenu(start.to_string()));
        }

        let mut dispatcher = Self {
            tree,
            active: start.to_string(),
            queue: CommandQueue::new(),
            config,
            presenter,
            completion: CompletionIndex::default(),
            state: DispatcherState::AwaitingInput,
        };
        dispatcher.rebuild_completion();
        Ok(dispatcher)
    }

    /// Appends commands to the back of the queue, e.g. from a routine file
    /// or trailing CLI arguments.
    pub fn seed<I, S>(&mut self, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queue.push_back_all(commands);
        if !self.queue.is_empty() && self.state == DispatcherState::AwaitingInput {
            self.state = DispatcherState::Draining;
        }
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn active_menu(&self) -> &str {
        &self.active
    }

    pub fn completion(&self) -> &CompletionIndex {
        &self.completion
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Drains the front of the queue or, if it is empty, blocks for one line
    /// of interactive input. Every recoverable failure is reported through
    /// the presenter and returned as an outcome; the session continues.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input source itself fails.
    pub fn execute_next(&mut self, input: &mut dyn InputSource) -> Result<CommandOutcome> {
        if self.state == DispatcherState::Terminated {
            return Ok(CommandOutcome::Quit);
        }

        let line = match self.queue.pop_front() {
            Some(line) => line,
            None => {
                self.state = DispatcherState::AwaitingInput;
                let prompt = format!("{}> ", self.active);
                match input.read_line(&prompt)? {
                    Some(line) => line,
                    None => {
                        self.state = DispatcherState::Terminated;
                        return Ok(CommandOutcome::Quit);
                    }
                }
            }
        };

        let outcome = self.process_line(&line);

        self.state = if matches!(outcome, CommandOutcome::Quit) {
            DispatcherState::Terminated
        } else if self.queue.is_empty() {
            DispatcherState::AwaitingInput
        } else {
            DispatcherState::Draining
        };

        Ok(outcome)
    }

    /// Runs until quit or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if the input source fails.
    pub fn run(&mut self, input: &mut dyn InputSource) -> Result<()> {
        loop {
            if matches!(self.execute_next(input)?, CommandOutcome::Quit) {
                return Ok(());
            }
        }
    }

    fn process_line(&mut self, line: &str) -> CommandOutcome {
        debug!("processing line: `{line}`");

        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                self.presenter.warn(&e.to_string());
                return CommandOutcome::ValidationFailed(e);
            }
        };

        let Some((first, rest)) = tokens.split_first() else {
            // Empty line is a no-op.
            return CommandOutcome::Success;
        };

        match first.as_str() {
            "quit" | "exit" => return CommandOutcome::Quit,
            "help" | "h" | "?" => {
                self.print_help();
                return CommandOutcome::Success;
            }
            ".." | "q" => {
                self.navigate_up();
                return CommandOutcome::Success;
            }
            _ => {}
        }

        if first.starts_with('/') {
            return self.enter_menu(&normalize_path(first));
        }

        if let Some(child) = self.tree.submenu(&self.active, first) {
            return self.enter_menu(&child);
        }

        self.dispatch_command(first, rest)
    }

    fn dispatch_command(&mut self, name: &str, rest: &[String]) -> CommandOutcome {
        let Some(menu) = self.tree.get(&self.active) else {
            self.presenter
                .warn(&format!("no menu is registered at `{}`", self.active));
            return CommandOutcome::CommandNotFound(name.to_string());
        };

        let Some(spec) = menu.resolve(name) else {
            self.presenter
                .warn(&format!("`{name}` is not a recognized command or menu"));
            return CommandOutcome::CommandNotFound(name.to_string());
        };

        let validated = match spec.schema.validate(rest, self.config.unknown_flags) {
            Ok(validated) => validated,
            Err(e) => {
                self.presenter.warn(&format!("{name}: {e}"));
                return CommandOutcome::ValidationFailed(e);
            }
        };

        if !validated.ignored.is_empty() {
            self.presenter.warn(&format!(
                "{name}: ignoring unrecognized arguments: {}",
                validated.ignored.join(" ")
            ));
        }

        let policy = spec.export;
        let output = match spec.invoke(&validated.bundle) {
            Ok(output) => output,
            Err(Error::Handler { command, message }) => {
                self.presenter.warn(&format!("{command}: {message}"));
                return CommandOutcome::HandlerFailure { command, message };
            }
            Err(e) => {
                let message = e.to_string();
                self.presenter.warn(&format!("{name}: {message}"));
                return CommandOutcome::HandlerFailure {
                    command: name.to_string(),
                    message,
                };
            }
        };

        if !output.queued.is_empty() {
            debug!("`{name}` queued {} follow-up command(s)", output.queued.len());
            self.queue.push_front_all(output.queued);
        }

        if let Some(table) = output.table {
            if table.is_empty() {
                self.presenter.info(&format!("{name}: no data returned"));
            } else if let Err(e) = self.present(name, policy, &table, &validated.bundle) {
                let message = e.to_string();
                self.presenter.warn(&format!("{name}: {message}"));
                return CommandOutcome::HandlerFailure {
                    command: name.to_string(),
                    message,
                };
            }
        }

        CommandOutcome::Success
    }

    fn present(
        &mut self,
        name: &str,
        policy: Option<ExportPolicy>,
        table: &Table,
        bundle: &ArgumentBundle,
    ) -> Result<()> {
        self.presenter.render_table(name, table)?;

        if policy == Some(ExportPolicy::RawAndFigures) && self.config.display_figures {
            self.presenter.render_figure(name, table)?;
        }

        if policy.is_some() {
            let format: ExportFormat = bundle.text(EXPORT_FLAG)?.parse()?;
            if let Some(path) =
                export::export_table(table, &self.config.export_dir, name, format)?
            {
                self.presenter
                    .info(&format!("Saved {name} data to {}", path.display()));
            }
        }

        Ok(())
    }

    fn enter_menu(&mut self, path: &str) -> CommandOutcome {
        if self.tree.get(path).is_none() {
            self.presenter
                .warn(&format!("`{path}` is not a recognized command or menu"));
            return CommandOutcome::CommandNotFound(path.to_string());
        }

        self.active = path.to_string();
        self.rebuild_completion();
        debug!("entered menu `{path}`");
        CommandOutcome::Success
    }

    fn navigate_up(&mut self) {
        let parent = self.tree.get(&self.active).and_then(Menu::parent_path);
        match parent {
            Some(parent) => {
                self.active = parent;
                self.rebuild_completion();
            }
            None => self.presenter.info("Already at the top-level menu"),
        }
    }

    fn print_help(&mut self) {
        let help = self
            .tree
            .get(&self.active)
            .map(|menu| menu.help().to_string())
            .unwrap_or_default();
        self.presenter.info(&help);
    }

    fn rebuild_completion(&mut self) {
        let submenus = self.tree.submenu_names(&self.active);
        if let Some(menu) = self.tree.get(&self.active) {
            self.completion = CompletionIndex::rebuild(menu, &submenus);
        }
    }
}

/// Splits a line on whitespace; a double-quoted span is one token, allowing
/// flag values that contain spaces.
///
/// # Errors
///
/// Returns [`Error::UnterminatedQuote`] for an unbalanced quote.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ch if ch.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            ch => current.push(ch),
        }
    }

    if in_quotes {
        return Err(Error::UnterminatedQuote(line.to_string()));
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Absolute menu paths always end with a slash, but users may omit it.
fn normalize_path(token: &str) -> String {
    if token.ends_with('/') {
        token.to_string()
    } else {
        format!("{token}/")
    }
}
