use anyhow::Result;

use padel_dashboard::cli::Command;
use padel_dashboard::{
    handle_completions, handle_dashboard, handle_login, handle_serve, handle_setup, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(port),
        Command::Setup { demo } => handle_setup(demo),
        Command::Login {
            email,
            password,
            url,
        } => handle_login(&email, &password, url.as_deref()),
        Command::Dashboard {
            url,
            token,
            tab,
            search,
            player,
            interactive,
        } => handle_dashboard(url.as_deref(), token, tab, search, player, interactive),
        Command::Completions { shell } => handle_completions(shell),
    }
}
