use anyhow::{Context, Result};

use crate::database::{self, matches, players, tournaments, DbPool, Match, Player, Stats, Tournament};

/// Read-only compositions behind the dashboard routes.
#[derive(Clone)]
pub struct DashboardService {
    pool: DbPool,
}

impl DashboardService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Three independent counts; they may reflect different instants.
    pub fn stats(&self) -> Result<Stats> {
        let mut conn = database::get_connection(&self.pool).context("Error al obtener estadísticas")?;

        let total_jugadores = players::count(&mut conn).context("Error al obtener estadísticas")?;
        let total_partidos = matches::count(&mut conn).context("Error al obtener estadísticas")?;
        let total_torneos = tournaments::count(&mut conn).context("Error al obtener estadísticas")?;

        Ok(Stats {
            total_jugadores,
            total_partidos,
            total_torneos,
        })
    }

    pub fn recent_players(&self, limit: usize) -> Result<Vec<Player>> {
        let mut conn = database::get_connection(&self.pool).context("Error al obtener jugadores")?;
        players::list_recent(&mut conn, limit).context("Error al obtener jugadores")
    }

    pub fn recent_matches(&self, limit: usize) -> Result<Vec<Match>> {
        let mut conn = database::get_connection(&self.pool).context("Error al obtener partidos")?;
        matches::list_recent(&mut conn, limit).context("Error al obtener partidos")
    }

    pub fn tournaments(&self, limit: usize) -> Result<Vec<Tournament>> {
        let mut conn = database::get_connection(&self.pool).context("Error al obtener torneos")?;
        tournaments::list_recent(&mut conn, limit).context("Error al obtener torneos")
    }

    pub fn matches_won_by_player(&self, name: &str) -> Result<Vec<Match>> {
        let mut conn = database::get_connection(&self.pool)
            .context("Error al consultar partidos ganados")?;
        matches::won_by_player(&mut conn, name).context("Error al consultar partidos ganados")
    }

    /// `None` is a normal outcome, not an error.
    pub fn player_by_name(&self, name: &str) -> Result<Option<Player>> {
        let mut conn = database::get_connection(&self.pool).context("Error al buscar jugador")?;
        players::find_one_by_name(&mut conn, name).context("Error al buscar jugador")
    }
}
