//! Agenda document storage.
//!
//! This module stands in for the remote document store that publishes one
//! agenda per day. It is accessed through the [`AgendaRepository`] trait so the
//! service layer does not care where documents come from.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP API / callers                                     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  services::agenda - fetch latest, annotate, filter      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  AgendaRepository trait                                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │  LocalRepository (in-memory, file-seeded)    │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod checksum;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use checksum::{agenda_checksum, calculate_checksum};
pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
pub use repository::{
    AgendaRecord, AgendaRepository, ErrorContext, RepositoryError, RepositoryResult,
};
