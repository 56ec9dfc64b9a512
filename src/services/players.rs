use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::models::ConnectivityReport;
use crate::database::{self, players, DbPool, Player};
use crate::documents::{DocumentPlayer, DocumentStore, NewDocumentPlayer};

/// Player lookups over the relational store plus the document collection.
#[derive(Clone)]
pub struct PlayerService {
    pool: DbPool,
    documents: Arc<DocumentStore>,
}

impl PlayerService {
    pub fn new(pool: DbPool, documents: Arc<DocumentStore>) -> Self {
        Self { pool, documents }
    }

    pub fn find_by_name(&self, name: &str) -> Result<Vec<Player>> {
        let mut conn = database::get_connection(&self.pool).context("Error al buscar jugadores")?;
        players::find_by_name(&mut conn, name).context("Error al buscar jugadores")
    }

    pub fn list_all(&self) -> Result<Vec<Player>> {
        let mut conn = database::get_connection(&self.pool)
            .context("Error al obtener todos los jugadores")?;
        players::find_by_name(&mut conn, "").context("Error al obtener todos los jugadores")
    }

    pub fn test_connectivity(&self) -> Result<ConnectivityReport> {
        let probe = database::check_connectivity(&self.pool).context("Error en test de servicio")?;

        Ok(ConnectivityReport {
            message: "Servicio de jugadores funcionando correctamente".to_string(),
            database_connection: "OK".to_string(),
            test_query: probe,
        })
    }

    pub fn list_document_players(&self) -> Result<Vec<DocumentPlayer>> {
        self.documents
            .list()
            .context("Error al obtener jugadores de la base documental")
    }

    pub fn create_document_player(&self, new: NewDocumentPlayer) -> Result<DocumentPlayer> {
        self.documents
            .create(new)
            .context("Error al guardar jugador en la base documental")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_support::demo_pool;
    use crate::documents::DocumentError;

    fn service() -> (tempfile::TempDir, tempfile::TempDir, PlayerService) {
        let (db_dir, pool) = demo_pool();
        let doc_dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(doc_dir.path().join("jugadores.jsonl")).unwrap();
        (db_dir, doc_dir, PlayerService::new(pool, Arc::new(store)))
    }

    #[test]
    fn test_list_all_matches_empty_search() {
        let (_db, _docs, service) = service();

        assert_eq!(service.list_all().unwrap(), service.find_by_name("").unwrap());
    }

    #[test]
    fn test_connectivity_report() {
        let (_db, _docs, service) = service();

        let report = service.test_connectivity().unwrap();
        assert_eq!(report.database_connection, "OK");
        assert_eq!(report.test_query.test, 1);
    }

    #[test]
    fn test_document_validation_error_keeps_its_type() {
        let (_db, _docs, service) = service();

        let err = service.create_document_player(NewDocumentPlayer::default()).unwrap_err();

        assert!(err.downcast_ref::<DocumentError>().is_some());
        assert!(format!("{err:#}").starts_with("Error al guardar jugador"));
    }

    #[test]
    fn test_document_players_are_independent_of_relational_players() {
        let (_db, _docs, service) = service();

        service
            .create_document_player(NewDocumentPlayer {
                first_name: "Zoe".into(),
                last_name: "Ramos".into(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(service.list_document_players().unwrap().len(), 1);
        assert!(service.find_by_name("Zoe").unwrap().is_empty());
    }
}
