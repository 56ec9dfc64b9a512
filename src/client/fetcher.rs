use log::warn;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::api::{ApiClient, ClientError};
use super::session::Session;
use crate::api::envelope::Envelope;
use crate::config::settings::ClientSettings;
use crate::database::{Match, Player, Stats, Tournament};

const STATS_PATH: &str = "/api/dashboard/stats";
const PLAYERS_PATH: &str = "/api/dashboard/jugadores";
const MATCHES_PATH: &str = "/api/dashboard/partidos";
const TOURNAMENTS_PATH: &str = "/api/dashboard/torneos";

/// Everything the dashboard shows. A slice whose request failed stays empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub stats: Option<Stats>,
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    pub tournaments: Vec<Tournament>,
}

#[derive(Debug, Clone)]
pub struct DashboardFetcher {
    client: Arc<ApiClient>,
}

impl DashboardFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Only an authenticated session may load the dashboard.
    pub fn for_session(session: &Session, settings: &ClientSettings) -> Result<Self, ClientError> {
        let token = session.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(Self::new(ApiClient::new(settings)?.with_token(token)))
    }

    /// Issues the four dashboard requests at once and applies whatever
    /// came back valid.
    pub async fn fetch(&self) -> DashboardData {
        let (stats, players, matches, tournaments) = tokio::join!(
            self.client.get::<Stats>(STATS_PATH),
            self.client.get::<Vec<Player>>(PLAYERS_PATH),
            self.client.get::<Vec<Match>>(MATCHES_PATH),
            self.client.get::<Vec<Tournament>>(TOURNAMENTS_PATH),
        );

        DashboardData {
            stats: accept(STATS_PATH, stats),
            players: accept(PLAYERS_PATH, players).unwrap_or_default(),
            matches: accept(MATCHES_PATH, matches).unwrap_or_default(),
            tournaments: accept(TOURNAMENTS_PATH, tournaments).unwrap_or_default(),
        }
    }

    /// Starts a load in the background.
    pub fn spawn(&self) -> LoadHandle {
        let fetcher = self.clone();
        LoadHandle {
            task: Some(tokio::spawn(async move { fetcher.fetch().await })),
        }
    }
}

fn accept<T: DeserializeOwned>(path: &str, result: Result<Envelope<T>, ClientError>) -> Option<T> {
    match result {
        Ok(envelope) if envelope.success => envelope.data,
        Ok(envelope) => {
            warn!(
                "{path} failed: {}",
                envelope.message.as_deref().unwrap_or("sin mensaje")
            );
            None
        }
        Err(e) => {
            warn!("{path} failed: {e}");
            None
        }
    }
}

/// In-flight dashboard load. Dropping it aborts the load.
pub struct LoadHandle {
    task: Option<JoinHandle<DashboardData>>,
}

impl LoadHandle {
    /// The loaded data, or `None` if the load was cancelled.
    ///
    /// The task stays owned by the handle while awaited, so dropping this
    /// future mid-flight still aborts the load.
    pub async fn finish(mut self) -> Option<DashboardData> {
        let task = self.task.as_mut()?;
        let result = task.await;
        self.task = None;
        result.ok()
    }

    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
