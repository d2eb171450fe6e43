use std::process::ExitCode;

use clap::Parser;
use log::debug;

use coinshell_cli::cli_args::Args;
use coinshell_cli::menus;
use coinshell_cli::prompt::{self, StdinSource};
use coinshell_cli::render::TerminalPresenter;
use coinshell_core::{session, CommandOutcome, Dispatcher, Presenter, Result};

fn execute() -> Result<()> {
    let args = Args::parse();
    let config = args.session_config();
    debug!("Export directory: `{}`", config.export_dir);

    let tree = menus::build_tree()?;
    let mut dispatcher = Dispatcher::new(tree, "/", config, TerminalPresenter)?;

    if let Some(routine) = &args.routine {
        let commands = session::load_routine(routine)?;
        debug!("Routine `{routine}` queued {} command(s)", commands.len());
        dispatcher.seed(commands);
    }
    dispatcher.seed(args.commands.clone());

    let mut input = StdinSource;
    loop {
        match dispatcher.execute_next(&mut input)? {
            CommandOutcome::Quit => return Ok(()),
            CommandOutcome::CommandNotFound(token) => {
                if let Some(hint) = prompt::suggest(&token, dispatcher.completion()) {
                    dispatcher.presenter_mut().info(&hint);
                }
            }
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
