//! Service layer for live annotation and presentation helpers.
//!
//! The annotation itself ([`live`]) is pure and synchronous; [`agenda`]
//! wires it to a repository and a clock.

pub mod agenda;
pub mod categories;
pub mod clock;
pub mod filter;
pub mod live;

pub use agenda::{AgendaService, LiveAgendaView, ServiceError, ServiceResult};
pub use categories::{enumerate_categories, normalize_category, ALL_CATEGORIES};
pub use clock::{Clock, ClockZone, FixedClock, SystemClock};
pub use filter::{live_count, EventFilter};
pub use live::{
    annotate_events, infer_start_times, live_up_to_current_slot, AnnotateError, Annotation,
    AnnotationIssue, LiveAnnotator, LivePolicy,
};
