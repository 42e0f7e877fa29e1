//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::cli::session::Session;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load()?.with_data_file(cli.file.as_deref());
    debug!("settings: {:?}", settings);

    match &cli.command {
        None => run_session(ServiceContainer::new(settings)),
        Some(Commands::Config { command }) => config_command(command, &settings),
        Some(Commands::Completion { shell }) => completion(*shell),
    }
}

/// Run the interactive menu on stdin/stdout.
#[instrument(skip(container))]
fn run_session(container: ServiceContainer) -> CliResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::start(
        container.store.clone(),
        container.settings.data_file.clone(),
        container.settings.check_unsaved_on_exit,
        stdin.lock(),
        stdout.lock(),
    )?;
    session.run()?;
    Ok(())
}

fn config_command(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    let mut stdout = io::stdout();
    let result = match command {
        ConfigCommands::Show => output::info(&mut stdout, &settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&mut stdout, &path.display()),
            None => return Err(CliError::Usage("no home directory for config".into())),
        },
        ConfigCommands::Template => output::info(&mut stdout, &Settings::template()),
    };
    result.map_err(|e| crate::infrastructure::InfraError::io("stdout", e).into())
}

fn completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
