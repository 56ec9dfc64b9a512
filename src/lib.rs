pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod database;
pub mod debounce;
pub mod documents;
pub mod services;
pub mod view;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::client::{ApiClient, Session};
use crate::config::settings::{AppConfig, ClientSettings};
use crate::services::server::ServerService;
use crate::services::terminal::{DashboardOptions, TerminalDashboard};
use crate::view::Tab;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: Option<u16>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut config = AppConfig::from_env();
        if let Some(port) = port {
            config.server.port = port;
        }
        let service = ServerService::new(config);
        service.run().await
    })
}

pub fn handle_setup(demo: bool) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::create_pool(&config.database)?;
    let mut conn = database::get_connection(&pool)?;

    database::setup::apply_schema(&mut conn)?;
    if demo {
        database::setup::load_demo_data(&mut conn)?;
    }
    log::info!("Database ready at {}", config.database.path);
    Ok(())
}

pub fn handle_login(email: &str, password: &str, url: Option<&str>) -> Result<()> {
    let settings = client_settings(url);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = ApiClient::new(&settings)?;
        let session = client
            .login(email, password)
            .await
            .with_context(|| format!("Login against {} failed", client.base_url()))?;

        log::info!("Logged in as {}", session.user.nombre);
        println!("{}", session.token);
        Ok(())
    })
}

pub fn handle_dashboard(
    url: Option<&str>,
    token: Option<String>,
    tab: Option<Tab>,
    search: Option<String>,
    player: Option<String>,
    interactive: bool,
) -> Result<()> {
    let settings = client_settings(url);
    let options = DashboardOptions {
        tab,
        search,
        player,
        interactive,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        TerminalDashboard::new(settings, Session::with_token(token))
            .run(options)
            .await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn client_settings(url: Option<&str>) -> ClientSettings {
    let mut settings = AppConfig::from_env().client;
    if let Some(url) = url {
        settings.base_url = url.trim_end_matches('/').to_string();
    }
    settings
}
