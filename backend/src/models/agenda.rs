//! Agenda documents as stored in the remote document store.
//!
//! Field names on the wire follow the store (`dia`, `eventos`, `hora`, ...);
//! the English names are accepted as aliases on input.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A playable stream associated with an event's channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamLink {
    #[serde(rename = "canal", alias = "channel", default)]
    pub channel: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub m3u8: Vec<String>,
}

/// A single scheduled broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Event {
    /// Start time of day, `HH:MM`, local wall-clock.
    #[serde(rename = "hora", alias = "time", default)]
    pub time: String,
    #[serde(rename = "titulo", alias = "title", default)]
    pub title: String,
    #[serde(rename = "categoria", alias = "category", default)]
    pub category: String,
    #[serde(rename = "enlaces", alias = "links", default)]
    pub links: Vec<StreamLink>,
    /// Computed by the annotator; never read from input.
    #[serde(rename = "isLive", default, skip_deserializing)]
    pub is_live: bool,
    /// Inferred absolute start, only set by the date-rollover policy.
    #[serde(
        rename = "fechaReal",
        default,
        skip_deserializing,
        skip_serializing_if = "Option::is_none"
    )]
    pub starts_at: Option<NaiveDateTime>,
}

impl Event {
    pub fn new(
        time: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            title: title.into(),
            category: category.into(),
            ..Default::default()
        }
    }
}

/// One day's agenda.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Agenda {
    /// Free-form label such as `"Agenda - Viernes 27 de Junio de 2025"`.
    #[serde(rename = "dia", alias = "day", default)]
    pub day: String,
    #[serde(rename = "eventos", alias = "events", default)]
    pub events: Vec<Event>,
    /// Publication timestamp used to pick the latest document.
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Agenda {
    pub fn new(day: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            day: day.into(),
            events,
            published_at: None,
        }
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Identifier assigned by a repository to a stored agenda.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgendaId(pub i64);

impl AgendaId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AgendaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lightweight listing entry for a stored agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaInfo {
    pub agenda_id: AgendaId,
    pub day: String,
    pub event_count: usize,
    pub checksum: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}
