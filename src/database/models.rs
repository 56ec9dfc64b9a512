use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// Records keep the column names of the store on the wire.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "IdJugador")]
    pub id: i64,
    #[serde(rename = "Nombre")]
    pub first_name: String,
    #[serde(rename = "Apellido")]
    pub last_name: String,
    #[serde(rename = "FechaNacimiento", default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "Gmail", default)]
    pub email: Option<String>,
    #[serde(rename = "Telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "Ranking")]
    pub ranking: u32,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "IdPartido")]
    pub id: i64,
    #[serde(rename = "ParejaUno")]
    pub pair_one: String,
    #[serde(rename = "ParejaDos")]
    pub pair_two: String,
    #[serde(rename = "Cancha", default)]
    pub court: Option<String>,
    #[serde(rename = "Torneo", default)]
    pub tournament: Option<String>,
    #[serde(rename = "Estado", default)]
    pub status: Option<String>,
    #[serde(rename = "Fase", default)]
    pub phase: Option<String>,
    #[serde(rename = "Zona", default)]
    pub zone: Option<String>,
    #[serde(rename = "HoraInicio", default)]
    pub start_time: Option<String>,
    #[serde(rename = "HoraFin", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Fecha", default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Ganador", default)]
    pub winner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(rename = "IdTorneo")]
    pub id: i64,
    #[serde(rename = "Nombre")]
    pub name: String,
    #[serde(rename = "Estado")]
    pub status: String,
    #[serde(rename = "MaxParejas")]
    pub max_pairs: u32,
    #[serde(rename = "Reglamento", default)]
    pub rules: Option<String>,
}

/// Dashboard counters. Each total is read independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_jugadores: i64,
    pub total_partidos: i64,
    pub total_torneos: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "idUsuario")]
    pub id: i64,
    pub nombre: String,
    pub email: String,
}

// Not serialized: carries the password material.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
    pub salt: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub expires_at: NaiveDateTime,
}
