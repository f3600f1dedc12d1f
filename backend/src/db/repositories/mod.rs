//! Repository implementations module.
//!
//! - `local`: In-memory implementation, optionally seeded from JSON files
pub mod local;

pub use local::{parse_agenda_documents, LocalRepository, DEFAULT_MAX_AGENDAS};
