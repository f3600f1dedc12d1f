//! Repository trait for agenda documents.
//!
//! The repository stands in for the remote document store: it hands out
//! un-annotated agendas and never computes live flags itself.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::models::{Agenda, AgendaId, AgendaInfo};

/// A stored agenda together with its repository metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaRecord {
    pub id: AgendaId,
    pub checksum: String,
    pub agenda: Agenda,
}

impl AgendaRecord {
    pub fn info(&self) -> AgendaInfo {
        AgendaInfo {
            agenda_id: self.id,
            day: self.agenda.day.clone(),
            event_count: self.agenda.events.len(),
            checksum: self.checksum.clone(),
            published_at: self.agenda.published_at,
        }
    }
}

#[async_trait]
pub trait AgendaRepository: Send + Sync {
    /// Whether the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store an agenda, returning the existing entry if identical content is already stored.
    async fn store_agenda(&self, agenda: &Agenda) -> RepositoryResult<AgendaInfo>;

    /// The most recently published agenda, if any.
    async fn latest_agenda(&self) -> RepositoryResult<Option<AgendaRecord>>;

    async fn get_agenda(&self, id: AgendaId) -> RepositoryResult<AgendaRecord>;

    async fn list_agendas(&self) -> RepositoryResult<Vec<AgendaInfo>>;
}
