//! Data Transfer Objects for the HTTP API.
//!
//! Agenda views are served as [`crate::services::LiveAgendaView`] directly;
//! this module only holds request parameters and small response envelopes.

use serde::{Deserialize, Serialize};

pub use crate::models::AgendaInfo;
pub use crate::services::LiveAgendaView;
use crate::services::EventFilter;

/// Query parameters for agenda endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgendaQuery {
    /// Category to show (normalized); omitted or `all` shows every category
    #[serde(default)]
    pub category: Option<String>,
    /// Show only live events
    #[serde(default)]
    pub live_only: Option<bool>,
}

impl AgendaQuery {
    pub fn to_filter(&self) -> EventFilter {
        let mut filter = EventFilter::default().live_only(self.live_only.unwrap_or(false));
        if let Some(category) = &self.category {
            filter = filter.category(category.clone());
        }
        filter
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository status
    pub repository: String,
}

/// Agenda list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaListResponse {
    pub agendas: Vec<AgendaInfo>,
    pub total: usize,
}

/// Category list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_to_filter_defaults() {
        let filter = AgendaQuery::default().to_filter();
        assert_eq!(filter, EventFilter::default());
    }

    #[test]
    fn test_query_to_filter() {
        let query = AgendaQuery {
            category: Some("Fútbol".to_string()),
            live_only: Some(true),
        };
        let filter = query.to_filter();
        assert_eq!(filter.category, "Fútbol");
        assert!(filter.live_only);
    }
}
