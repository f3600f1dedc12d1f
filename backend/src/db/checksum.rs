//! Checksum calculation for agenda deduplication.

use sha2::{Digest, Sha256};

use crate::models::{Agenda, Event};

/// Calculate SHA-256 checksum of a string.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Agenda with computed fields cleared, as it should be stored.
pub fn strip_annotations(agenda: &Agenda) -> Agenda {
    Agenda {
        events: agenda
            .events
            .iter()
            .map(|e| Event {
                is_live: false,
                starts_at: None,
                ..e.clone()
            })
            .collect(),
        ..agenda.clone()
    }
}

/// Checksum of an agenda's stored content.
///
/// Live flags and inferred start times are ignored, so an annotated copy hashes
/// the same as the original document.
pub fn agenda_checksum(agenda: &Agenda) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_string(&strip_annotations(agenda))?;
    Ok(calculate_checksum(&canonical))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = r#"{"test": "data"}"#;
        let checksum1 = calculate_checksum(content);
        let checksum2 = calculate_checksum(content);
        assert_eq!(checksum1, checksum2);
        assert_eq!(checksum1.len(), 64);
    }

    #[test]
    fn test_different_content_different_checksum() {
        let a = Agenda::new("Lunes 3", vec![Event::new("10:00", "A", "futbol")]);
        let b = Agenda::new("Lunes 3", vec![Event::new("10:30", "A", "futbol")]);
        assert_ne!(agenda_checksum(&a).unwrap(), agenda_checksum(&b).unwrap());
    }

    #[test]
    fn test_annotations_do_not_change_checksum() {
        let plain = Agenda::new("Lunes 3", vec![Event::new("10:00", "A", "futbol")]);
        let mut annotated = plain.clone();
        annotated.events[0].is_live = true;
        assert_eq!(
            agenda_checksum(&plain).unwrap(),
            agenda_checksum(&annotated).unwrap()
        );
    }
}
