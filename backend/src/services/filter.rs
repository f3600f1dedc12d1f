//! Category and live-only filtering of annotated events.

use serde::{Deserialize, Serialize};

use super::categories::{normalize_category, ALL_CATEGORIES};
use crate::models::Event;

/// Presentation filter applied after annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Category to keep, compared after normalization. `"all"` keeps everything.
    #[serde(default = "default_category")]
    pub category: String,
    /// Keep only events flagged live.
    #[serde(default)]
    pub live_only: bool,
}

fn default_category() -> String {
    ALL_CATEGORIES.to_string()
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            category: default_category(),
            live_only: false,
        }
    }
}

impl EventFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn live_only(mut self, live_only: bool) -> Self {
        self.live_only = live_only;
        self
    }

    pub fn matches(&self, event: &Event) -> bool {
        if self.live_only && !event.is_live {
            return false;
        }
        let wanted = normalize_category(&self.category);
        wanted.is_empty()
            || wanted == ALL_CATEGORIES
            || normalize_category(&event.category) == wanted
    }

    /// Events passing the filter, in their original order.
    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

/// Number of events flagged live.
pub fn live_count(events: &[Event]) -> usize {
    events.iter().filter(|e| e.is_live).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: &str, is_live: bool) -> Event {
        Event {
            is_live,
            ..Event::new("10:00", format!("{} match", category), category)
        }
    }

    fn sample() -> Vec<Event> {
        vec![
            event("Fútbol", true),
            event("Baloncesto", true),
            event("futbol", false),
            event("Tenis", false),
        ]
    }

    #[test]
    fn test_default_keeps_everything() {
        assert_eq!(EventFilter::default().apply(&sample()).len(), 4);
    }

    #[test]
    fn test_category_filter_is_normalized() {
        let filtered = EventFilter::default().category(" FUTBOL ").apply(&sample());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| normalize_category(&e.category) == "futbol"));
    }

    #[test]
    fn test_live_only() {
        let filtered = EventFilter::default().live_only(true).apply(&sample());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|e| e.is_live));
    }

    #[test]
    fn test_category_and_live_only() {
        let filtered = EventFilter::default()
            .category("futbol")
            .live_only(true)
            .apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].category, "Fútbol");
    }

    #[test]
    fn test_unknown_category_yields_nothing() {
        assert!(EventFilter::default().category("golf").apply(&sample()).is_empty());
    }

    #[test]
    fn test_live_count() {
        assert_eq!(live_count(&sample()), 2);
        assert_eq!(live_count(&[]), 0);
    }
}
