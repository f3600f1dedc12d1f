//! # Agenda Live
//!
//! Live-slot annotation for daily broadcast agendas.
//!
//! An agenda is one day's list of scheduled events (sports broadcasts, TV
//! channels), each with an `HH:MM` start time and no end time. This crate
//! decides which events should currently be shown as live, enumerates the
//! agenda's categories for filtering, and serves the result over HTTP.
//!
//! ## Architecture
//!
//! - [`models`]: Agenda documents and time-of-day parsing
//! - [`services`]: Live annotation, categories, filtering, and the agenda service
//! - [`db`]: Repository trait and the in-memory / file-seeded store
//! - [`config`]: TOML and environment configuration
//! - `http`: Axum-based HTTP server (feature `http-server`)
//!
//! ## Example
//!
//! ```
//! use agenda_live::models::{Agenda, Event};
//! use agenda_live::services::{LiveAnnotator, LivePolicy};
//! use chrono::NaiveDate;
//!
//! let agenda = Agenda::new(
//!     "Agenda - Viernes 27 de Junio de 2025",
//!     vec![
//!         Event::new("10:00", "Tenis", "tenis"),
//!         Event::new("12:00", "F1", "motor"),
//!         Event::new("14:00", "Fútbol", "futbol"),
//!     ],
//! );
//! let now = NaiveDate::from_ymd_opt(2025, 6, 27)
//!     .unwrap()
//!     .and_hms_opt(13, 0, 0)
//!     .unwrap();
//!
//! let annotation = LiveAnnotator::new(LivePolicy::UpToCurrentSlot)
//!     .annotate(&agenda, now)
//!     .unwrap();
//! let live: Vec<bool> = annotation.agenda.events.iter().map(|e| e.is_live).collect();
//! assert_eq!(live, vec![true, true, false]);
//! ```

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
