use anyhow::{bail, Context, Result};
use chrono::Local;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::{ApiClient, ClientError, DashboardData, DashboardFetcher, Route, Session};
use crate::config::settings::ClientSettings;
use crate::debounce::Debouncer;
use crate::view::{filter_players, render_dashboard, DashboardView, Tab};

#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub tab: Option<Tab>,
    pub search: Option<String>,
    pub player: Option<String>,
    pub interactive: bool,
}

/// One line typed into the interactive dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Search(String),
    Tab(Tab),
    Open(usize),
    Close,
    Quit,
    Invalid(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(command) = line.trim().strip_prefix(':') else {
            return Input::Search(line.to_string());
        };

        let (name, argument) = command
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((command, ""));

        match name {
            "tab" => argument
                .parse()
                .map(Input::Tab)
                .unwrap_or_else(Input::Invalid),
            "open" => match argument.parse::<usize>() {
                Ok(position) if position > 0 => Input::Open(position),
                _ => Input::Invalid(format!("Número de jugador inválido: {argument}")),
            },
            "close" => Input::Close,
            "quit" | "q" => Input::Quit,
            other => Input::Invalid(format!("Comando desconocido: :{other}")),
        }
    }
}

pub struct TerminalDashboard {
    settings: ClientSettings,
    session: Session,
}

impl TerminalDashboard {
    pub fn new(settings: ClientSettings, session: Session) -> Self {
        Self { settings, session }
    }

    pub async fn run(mut self, options: DashboardOptions) -> Result<()> {
        if self.session.landing() == Route::Login {
            return Err(ClientError::NotAuthenticated.into());
        }
        self.identify().await?;

        let fetcher = DashboardFetcher::for_session(&self.session, &self.settings)?;
        let Some(data) = self.load(&fetcher).await? else {
            info!("Dashboard load cancelled");
            return Ok(());
        };

        let mut view = DashboardView::new();
        view.load(data);
        apply_options(&mut view, &options);
        self.draw(&view);

        if options.interactive {
            self.interact(view).await?;
        }
        Ok(())
    }

    async fn identify(&mut self) -> Result<()> {
        let mut client = ApiClient::new(&self.settings)?;
        if let Some(token) = &self.session.token {
            client = client.with_token(token.clone());
        }

        let user = client
            .verify_token()
            .await
            .context("La sesión no es válida, inicie sesión nuevamente")?;
        self.session.user_name = Some(user.nombre);
        Ok(())
    }

    /// `None` when interrupted with Ctrl-C; the in-flight requests are dropped.
    async fn load(&self, fetcher: &DashboardFetcher) -> Result<Option<DashboardData>> {
        let handle = fetcher.spawn();

        tokio::select! {
            data = handle.finish() => match data {
                Some(data) => Ok(Some(data)),
                None => bail!("La carga del dashboard fue interrumpida"),
            },
            _ = tokio::signal::ctrl_c() => Ok(None),
        }
    }

    async fn interact(&self, mut view: DashboardView) -> Result<()> {
        let (mut debouncer, mut settled) = Debouncer::from_millis(self.settings.debounce_ms);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("No se pudo leer la entrada")? else {
                        break;
                    };
                    match Input::parse(&line) {
                        Input::Search(term) => {
                            view.set_search_term(term);
                            debouncer.push(());
                            continue;
                        }
                        Input::Tab(tab) => view.select_tab(tab),
                        Input::Open(position) => {
                            if !view.select_visible(position - 1) {
                                warn!("No hay jugador en la posición {position}");
                                continue;
                            }
                        }
                        Input::Close => view.close_modal(),
                        Input::Quit => break,
                        Input::Invalid(message) => {
                            warn!("{message}");
                            continue;
                        }
                    }
                    self.draw(&view);
                }
                Some(()) = settled.recv() => {
                    view.apply_filter();
                    self.draw(&view);
                }
            }
        }

        if debouncer.is_pending() {
            debouncer.cancel();
            view.apply_filter();
            self.draw(&view);
        }
        Ok(())
    }

    fn draw(&self, view: &DashboardView) {
        let today = Local::now().date_naive();
        println!("{}\n", render_dashboard(view, self.session.greeting_name(), today));
    }
}

fn apply_options(view: &mut DashboardView, options: &DashboardOptions) {
    if let Some(tab) = options.tab {
        view.select_tab(tab);
    }
    if let Some(term) = &options.search {
        view.set_search_term(term.clone());
        view.apply_filter();
    }
    if let Some(name) = &options.player {
        let found = view
            .ready()
            .and_then(|ready| filter_players(&ready.data.players, name).into_iter().next());
        match found {
            Some(player) => view.select_player(player),
            None => warn!("No se encontró el jugador {name}"),
        }
    }
}
