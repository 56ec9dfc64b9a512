use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::view::Tab;

#[derive(Parser, Debug)]
#[command(author, version, about = "Padel tournament dashboard: REST backend and terminal client")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Create the database schema
    Setup {
        /// Also load the demo players, matches and tournaments
        #[arg(long)]
        demo: bool,
    },
    /// Log in and print a session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// API base URL (defaults to API_URL or http://localhost:3000)
        #[arg(long)]
        url: Option<String>,
    },
    /// Show the dashboard in the terminal
    Dashboard {
        /// API base URL (defaults to API_URL or http://localhost:3000)
        #[arg(long)]
        url: Option<String>,
        /// Session token from `login`
        #[arg(long, env = "DASHBOARD_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Initial tab: jugadores, partidos or torneos
        #[arg(long, value_parser = parse_tab)]
        tab: Option<Tab>,
        /// Initial player search
        #[arg(long)]
        search: Option<String>,
        /// Open the detail of the first player matching this name
        #[arg(long)]
        player: Option<String>,
        /// Keep reading searches and commands from stdin
        #[arg(short, long)]
        interactive: bool,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_tab(value: &str) -> Result<Tab, String> {
    value.parse()
}
