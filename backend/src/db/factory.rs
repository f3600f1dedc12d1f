//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repositories::{LocalRepository, DEFAULT_MAX_AGENDAS};
use super::repository::{AgendaRepository, RepositoryError, RepositoryResult};
use crate::config::RepositorySettings;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Empty in-memory repository
    Local,
    /// In-memory repository seeded from agenda JSON files
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local", "file").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

/// Repository factory for creating repository instances.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `path` - Agenda file or directory (required for File)
    pub fn create(
        repo_type: RepositoryType,
        path: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn AgendaRepository>> {
        Self::create_bounded(repo_type, path, DEFAULT_MAX_AGENDAS)
    }

    /// Like [`create`](Self::create), keeping at most `max_agendas` documents.
    pub fn create_bounded(
        repo_type: RepositoryType,
        path: Option<&Path>,
        max_agendas: usize,
    ) -> RepositoryResult<Arc<dyn AgendaRepository>> {
        let repo = LocalRepository::with_max_agendas(max_agendas);
        match repo_type {
            RepositoryType::Local => Ok(Arc::new(repo)),
            RepositoryType::File => {
                let path = path.ok_or_else(|| {
                    RepositoryError::configuration("File repository requires an agenda path")
                })?;
                Ok(Arc::new(repo.seeded_from(path)?))
            }
        }
    }

    /// Create repository from the `[repository]` configuration section.
    pub fn from_settings(
        settings: &RepositorySettings,
    ) -> RepositoryResult<Arc<dyn AgendaRepository>> {
        let repo_type = settings
            .repository_type()
            .map_err(RepositoryError::configuration)?;
        Self::create_bounded(repo_type, settings.path.as_deref(), settings.max_agendas)
    }
}
