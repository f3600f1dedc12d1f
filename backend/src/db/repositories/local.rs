//! In-memory agenda repository.
//!
//! Used for local development, tests, and as the store behind file-seeded
//! deployments where agenda JSON documents are loaded at startup.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::checksum::{agenda_checksum, strip_annotations};
use crate::db::repository::{
    AgendaRecord, AgendaRepository, ErrorContext, RepositoryError, RepositoryResult,
};
use crate::models::{Agenda, AgendaId, AgendaInfo};

/// Agendas kept before the oldest stored ones are evicted.
pub const DEFAULT_MAX_AGENDAS: usize = 366;

struct LocalData {
    /// Insertion order, oldest first.
    records: VecDeque<AgendaRecord>,
    by_checksum: HashMap<String, AgendaId>,
    next_id: i64,
    max_agendas: usize,
}

/// Thread-safe in-memory repository.
///
/// Holds at most `max_agendas` documents; storing past the limit evicts the
/// oldest stored agenda.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::with_max_agendas(DEFAULT_MAX_AGENDAS)
    }
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty repository bounded to `max_agendas` documents (at least one).
    pub fn with_max_agendas(max_agendas: usize) -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                records: VecDeque::new(),
                by_checksum: HashMap::new(),
                next_id: 0,
                max_agendas: max_agendas.max(1),
            })),
        }
    }

    /// Create a repository seeded from a JSON file or a directory of `*.json` files.
    ///
    /// Each file holds either one agenda object or an array of agendas. Files in a
    /// directory are loaded in file-name order.
    pub fn from_path<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        Self::new().seeded_from(path)
    }

    /// Load `path` into this repository and return it.
    pub fn seeded_from<P: AsRef<Path>>(self, path: P) -> RepositoryResult<Self> {
        let loaded = self.load_path(path.as_ref())?;
        info!(path = %path.as_ref().display(), agendas = loaded, "Seeded local repository");
        Ok(self)
    }

    /// Load agendas from a file or directory, returning how many documents were read.
    pub fn load_path(&self, path: &Path) -> RepositoryResult<usize> {
        if !path.exists() {
            return Err(RepositoryError::configuration_with_context(
                format!("Agenda path does not exist: {}", path.display()),
                ErrorContext::new("load_path").with_entity("agenda"),
            ));
        }

        let files = if path.is_dir() {
            let mut files: Vec<PathBuf> = fs::read_dir(path)
                .map_err(|e| io_error("read_dir", path, e))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect();
            files.sort();
            files
        } else {
            vec![path.to_path_buf()]
        };

        let mut loaded = 0;
        for file in files {
            let content = fs::read_to_string(&file).map_err(|e| io_error("read_file", &file, e))?;
            for agenda in parse_agenda_documents(&content).map_err(|e| {
                e.with_operation(format!("load_path:{}", file.display()))
            })? {
                self.insert(&agenda)?;
                loaded += 1;
            }
        }
        Ok(loaded)
    }

    /// Number of stored agendas.
    pub fn len(&self) -> usize {
        self.data.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_agendas(&self) -> usize {
        self.data.read().max_agendas
    }

    fn insert(&self, agenda: &Agenda) -> RepositoryResult<AgendaInfo> {
        let checksum = agenda_checksum(agenda).map_err(|e| {
            RepositoryError::internal_with_context(
                e.to_string(),
                ErrorContext::new("store_agenda").with_entity("agenda"),
            )
        })?;

        let mut data = self.data.write();
        if let Some(id) = data.by_checksum.get(&checksum).copied() {
            if let Some(existing) = data.records.iter().find(|r| r.id == id) {
                debug!(agenda_id = %existing.id, "Agenda already stored, skipping");
                return Ok(existing.info());
            }
        }

        while data.records.len() >= data.max_agendas {
            let Some(evicted) = data.records.pop_front() else {
                break;
            };
            data.by_checksum.remove(&evicted.checksum);
            debug!(agenda_id = %evicted.id, day = %evicted.agenda.day, "Evicted oldest agenda");
        }

        data.next_id += 1;
        let record = AgendaRecord {
            id: AgendaId::new(data.next_id),
            checksum,
            agenda: strip_annotations(agenda),
        };
        let info = record.info();
        data.by_checksum.insert(record.checksum.clone(), record.id);
        data.records.push_back(record);
        debug!(agenda_id = %info.agenda_id, day = %info.day, events = info.event_count, "Stored agenda");
        Ok(info)
    }
}

fn io_error(operation: &str, path: &Path, err: std::io::Error) -> RepositoryError {
    RepositoryError::configuration_with_context(
        err.to_string(),
        ErrorContext::new(operation).with_entity_id(path.display()),
    )
}

/// Parse one agenda object or an array of them.
pub fn parse_agenda_documents(content: &str) -> RepositoryResult<Vec<Agenda>> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let agendas = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(value)?],
        _ => {
            return Err(RepositoryError::validation(
                "Agenda document must be a JSON object or array",
            ))
        }
    };
    Ok(agendas)
}

#[async_trait]
impl AgendaRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn store_agenda(&self, agenda: &Agenda) -> RepositoryResult<AgendaInfo> {
        self.insert(agenda)
    }

    async fn latest_agenda(&self) -> RepositoryResult<Option<AgendaRecord>> {
        let data = self.data.read();
        Ok(data
            .records
            .iter()
            .max_by_key(|r| (r.agenda.published_at, r.id))
            .cloned())
    }

    async fn get_agenda(&self, id: AgendaId) -> RepositoryResult<AgendaRecord> {
        self.data
            .read()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Agenda {} not found", id),
                    ErrorContext::new("get_agenda")
                        .with_entity("agenda")
                        .with_entity_id(id),
                )
            })
    }

    async fn list_agendas(&self) -> RepositoryResult<Vec<AgendaInfo>> {
        Ok(self.data.read().records.iter().map(AgendaRecord::info).collect())
    }
}
