//! Live-slot annotation for agenda events.
//!
//! Agenda documents carry start times only, no durations or end times, so
//! "live" has to be inferred from where the current time falls in the list.
//! Two heuristics are supported and kept separate:
//!
//! - [`LivePolicy::UpToCurrentSlot`]: find the last event whose time of day has
//!   already been reached; it and everything before it are live. When no event
//!   has been reached yet every event is flagged live.
//! - [`LivePolicy::DateRollover`]: place every event on a calendar date taken
//!   from the agenda's day label, moving to the next day whenever a time is
//!   earlier than its predecessor, and flag events whose start is not after now.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::models::{
    extract_day_of_month, resolve_day_in_month, Agenda, Event, TimeOfDay, TimeParseError,
};

/// Which heuristic decides liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivePolicy {
    /// Everything up to and including the most recently started slot.
    #[default]
    UpToCurrentSlot,
    /// Per-event comparison of inferred start date-times against now.
    DateRollover,
}

impl FromStr for LivePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "up_to_current_slot" | "current_slot" | "a" => Ok(Self::UpToCurrentSlot),
            "date_rollover" | "rollover" | "b" => Ok(Self::DateRollover),
            _ => Err(format!("Unknown live policy: {}", s)),
        }
    }
}

impl std::fmt::Display for LivePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpToCurrentSlot => write!(f, "up_to_current_slot"),
            Self::DateRollover => write!(f, "date_rollover"),
        }
    }
}

/// Non-fatal data-quality findings reported alongside an annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationIssue {
    /// The event's time failed strict parsing and was read leniently.
    UnparseableTime {
        index: usize,
        raw: String,
        reason: String,
    },
    /// The day label has no day-of-month number; the agenda was passed through.
    UnrecognizedDayLabel { label: String },
    /// The day number could not be placed on the calendar; the agenda was passed through.
    DayOutOfRange { day: i64 },
}

/// Fatal annotation failures (strict mode only).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotateError {
    #[error("event {index} has unparseable time '{raw}': {source}")]
    UnparseableTime {
        index: usize,
        raw: String,
        #[source]
        source: TimeParseError,
    },
}

/// Result of annotating one agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    pub agenda: Agenda,
    /// `false` when the agenda was passed through without live flags.
    pub annotated: bool,
    pub issues: Vec<AnnotationIssue>,
}

impl Annotation {
    pub fn live_count(&self) -> usize {
        self.agenda.events.iter().filter(|e| e.is_live).count()
    }
}

/// Annotates agendas with live flags according to a [`LivePolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveAnnotator {
    policy: LivePolicy,
    strict_times: bool,
}

impl LiveAnnotator {
    pub fn new(policy: LivePolicy) -> Self {
        Self {
            policy,
            strict_times: false,
        }
    }

    /// Reject unparseable event times instead of reading them leniently.
    pub fn with_strict_times(mut self, strict: bool) -> Self {
        self.strict_times = strict;
        self
    }

    pub fn policy(&self) -> LivePolicy {
        self.policy
    }

    pub fn strict_times(&self) -> bool {
        self.strict_times
    }

    /// Annotate a copy of `agenda` as seen at `now` (local wall-clock).
    pub fn annotate(&self, agenda: &Agenda, now: NaiveDateTime) -> Result<Annotation, AnnotateError> {
        let (times, mut issues) = self.read_times(&agenda.events)?;

        let annotation = match self.policy {
            LivePolicy::UpToCurrentSlot => {
                let flags = live_up_to_current_slot(&times, TimeOfDay::from_naive_time(now.time()));
                Annotation {
                    agenda: with_flags(agenda, &flags, None),
                    annotated: true,
                    issues,
                }
            }
            LivePolicy::DateRollover => {
                let Some(day) = extract_day_of_month(&agenda.day) else {
                    warn!(label = %agenda.day, "Unrecognized day label, agenda left unannotated");
                    issues.push(AnnotationIssue::UnrecognizedDayLabel {
                        label: agenda.day.clone(),
                    });
                    return Ok(pass_through(agenda, issues));
                };

                let Some(starts) = infer_start_times(day, &times, now) else {
                    warn!(day, label = %agenda.day, "Day number outside the calendar, agenda left unannotated");
                    issues.push(AnnotationIssue::DayOutOfRange { day });
                    return Ok(pass_through(agenda, issues));
                };

                let flags: Vec<bool> = starts.iter().map(|start| *start <= now).collect();
                Annotation {
                    agenda: with_flags(agenda, &flags, Some(&starts)),
                    annotated: true,
                    issues,
                }
            }
        };

        debug!(
            policy = %self.policy,
            events = annotation.agenda.events.len(),
            live = annotation.live_count(),
            issues = annotation.issues.len(),
            "Annotated agenda"
        );

        Ok(annotation)
    }

    fn read_times(
        &self,
        events: &[Event],
    ) -> Result<(Vec<TimeOfDay>, Vec<AnnotationIssue>), AnnotateError> {
        let mut issues = Vec::new();
        let mut times = Vec::with_capacity(events.len());

        for (index, event) in events.iter().enumerate() {
            match event.time.parse::<TimeOfDay>() {
                Ok(time) => times.push(time),
                Err(source) if self.strict_times => {
                    return Err(AnnotateError::UnparseableTime {
                        index,
                        raw: event.time.clone(),
                        source,
                    });
                }
                Err(reason) => {
                    debug!(index, raw = %event.time, %reason, "Reading event time leniently");
                    issues.push(AnnotationIssue::UnparseableTime {
                        index,
                        raw: event.time.clone(),
                        reason: reason.to_string(),
                    });
                    times.push(TimeOfDay::parse_lenient(&event.time));
                }
            }
        }

        Ok((times, issues))
    }
}

fn pass_through(agenda: &Agenda, issues: Vec<AnnotationIssue>) -> Annotation {
    Annotation {
        agenda: agenda.clone(),
        annotated: false,
        issues,
    }
}

fn with_flags(agenda: &Agenda, flags: &[bool], starts: Option<&[NaiveDateTime]>) -> Agenda {
    let events = agenda
        .events
        .iter()
        .enumerate()
        .map(|(i, event)| Event {
            is_live: flags[i],
            starts_at: starts.map(|s| s[i]),
            ..event.clone()
        })
        .collect();

    Agenda {
        events,
        ..agenda.clone()
    }
}

/// Live flags under [`LivePolicy::UpToCurrentSlot`].
///
/// The last index whose time is `<= now` splits the list: that index and
/// everything before it are live. If no such index exists every entry is live.
pub fn live_up_to_current_slot(times: &[TimeOfDay], now: TimeOfDay) -> Vec<bool> {
    match times.iter().rposition(|t| *t <= now) {
        Some(current) => (0..times.len()).map(|i| i <= current).collect(),
        None => vec![true; times.len()],
    }
}

/// Annotate bare events under [`LivePolicy::UpToCurrentSlot`], reading times leniently.
pub fn annotate_events(events: &[Event], now: NaiveDateTime) -> Vec<Event> {
    let times: Vec<TimeOfDay> = events
        .iter()
        .map(|e| {
            e.time
                .parse()
                .unwrap_or_else(|_| TimeOfDay::parse_lenient(&e.time))
        })
        .collect();
    let flags = live_up_to_current_slot(&times, TimeOfDay::from_naive_time(now.time()));

    events
        .iter()
        .zip(flags)
        .map(|(event, is_live)| Event {
            is_live,
            starts_at: None,
            ..event.clone()
        })
        .collect()
}

/// Infer each event's start date-time for [`LivePolicy::DateRollover`].
///
/// The first event falls on `day_of_month` of `now`'s month and year. Whenever a
/// time is earlier than the one before it, that event and all following ones
/// move one day later. Returns `None` if the day cannot be placed on the calendar.
///
/// The label carries no month, so an agenda still shown after midnight on the
/// 1st (say "Lunes 30" read on July 1st) resolves to the 30th of the new month
/// and none of its events are live until then.
pub fn infer_start_times(
    day_of_month: i64,
    times: &[TimeOfDay],
    now: NaiveDateTime,
) -> Option<Vec<NaiveDateTime>> {
    let mut base = resolve_day_in_month(now.year(), now.month(), day_of_month)?;
    let mut previous: Option<TimeOfDay> = None;
    let mut starts = Vec::with_capacity(times.len());

    for time in times {
        if previous.is_some_and(|prev| *time < prev) {
            base = base.succ_opt()?;
        }
        starts.push(base.and_time(time.to_naive_time()));
        previous = Some(*time);
    }

    Some(starts)
}
