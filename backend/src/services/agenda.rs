//! Agenda service: fetch, annotate and filter.
//!
//! Orchestrates the repository, the live annotator and the clock into the
//! views served to presentation clients.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use super::categories::enumerate_categories;
use super::clock::Clock;
use super::filter::{live_count, EventFilter};
use super::live::{AnnotateError, Annotation, AnnotationIssue, LiveAnnotator, LivePolicy};
use crate::db::repository::{AgendaRecord, AgendaRepository, RepositoryError};
use crate::models::{Agenda, AgendaId, Event};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("No agenda available")]
    NoAgenda,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Annotate(#[from] AnnotateError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Annotated, filtered agenda ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveAgendaView {
    pub agenda_id: AgendaId,
    pub day: String,
    pub policy: LivePolicy,
    /// `false` when the agenda could not be annotated and is passed through.
    pub annotated: bool,
    /// Wall-clock reading the flags were computed against.
    pub evaluated_at: NaiveDateTime,
    /// Events before filtering.
    pub total_events: usize,
    /// Live events before filtering.
    pub live_count: usize,
    /// Categories of the whole agenda, `"all"` first.
    pub categories: Vec<String>,
    pub filter: EventFilter,
    pub events: Vec<Event>,
    pub issues: Vec<AnnotationIssue>,
}

#[derive(Clone)]
pub struct AgendaService {
    repository: Arc<dyn AgendaRepository>,
    annotator: LiveAnnotator,
    clock: Arc<dyn Clock>,
}

impl AgendaService {
    pub fn new(
        repository: Arc<dyn AgendaRepository>,
        annotator: LiveAnnotator,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            annotator,
            clock,
        }
    }

    pub fn repository(&self) -> &Arc<dyn AgendaRepository> {
        &self.repository
    }

    /// Latest agenda, annotated now and filtered.
    pub async fn live_agenda(&self, filter: &EventFilter) -> ServiceResult<LiveAgendaView> {
        let record = self.latest_record().await?;
        self.view(record, filter)
    }

    /// A specific stored agenda, annotated now and filtered.
    pub async fn annotated_agenda(
        &self,
        id: AgendaId,
        filter: &EventFilter,
    ) -> ServiceResult<LiveAgendaView> {
        let record = self.repository.get_agenda(id).await?;
        self.view(record, filter)
    }

    /// Category list of the latest agenda.
    pub async fn categories(&self) -> ServiceResult<Vec<String>> {
        let record = self.latest_record().await?;
        Ok(enumerate_categories(&record.agenda.events))
    }

    /// Annotate several agendas against a single clock reading.
    pub fn annotate_all(&self, agendas: &[Agenda]) -> ServiceResult<Vec<Annotation>> {
        let now = self.clock.now();
        agendas
            .iter()
            .map(|agenda| self.annotator.annotate(agenda, now).map_err(ServiceError::from))
            .collect()
    }

    async fn latest_record(&self) -> ServiceResult<AgendaRecord> {
        self.repository
            .latest_agenda()
            .await?
            .ok_or(ServiceError::NoAgenda)
    }

    fn view(&self, record: AgendaRecord, filter: &EventFilter) -> ServiceResult<LiveAgendaView> {
        let now = self.clock.now();
        let annotation = self.annotator.annotate(&record.agenda, now)?;
        let events = &annotation.agenda.events;

        let view = LiveAgendaView {
            agenda_id: record.id,
            day: annotation.agenda.day.clone(),
            policy: self.annotator.policy(),
            annotated: annotation.annotated,
            evaluated_at: now,
            total_events: events.len(),
            live_count: live_count(events),
            categories: enumerate_categories(events),
            filter: filter.clone(),
            events: filter.apply(events),
            issues: annotation.issues,
        };

        if view.issues.is_empty() {
            debug!(agenda_id = %view.agenda_id, live = view.live_count, shown = view.events.len(), "Built agenda view");
        } else {
            info!(
                agenda_id = %view.agenda_id,
                issues = view.issues.len(),
                annotated = view.annotated,
                "Agenda view built with data-quality issues"
            );
        }

        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::services::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock(hour: u32, minute: u32) -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            NaiveDate::from_ymd_opt(2025, 6, 27)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        ))
    }

    fn sample_agenda() -> Agenda {
        Agenda::new(
            "Agenda - Viernes 27 de Junio de 2025",
            vec![
                Event::new("10:00", "Tenis: Final", "Tenis"),
                Event::new("12:00", "Fórmula 1: Libres", "Fórmula 1"),
                Event::new("14:00", "Real Madrid - Barcelona", "Fútbol"),
                Event::new("21:00", "Atlético - Sevilla", " futbol "),
            ],
        )
    }

    async fn service(policy: LivePolicy, hour: u32) -> AgendaService {
        let repo = Arc::new(LocalRepository::new());
        repo.store_agenda(&sample_agenda()).await.unwrap();
        AgendaService::new(repo, LiveAnnotator::new(policy), clock(hour, 0))
    }

    #[tokio::test]
    async fn test_live_agenda_view() {
        let service = service(LivePolicy::UpToCurrentSlot, 13).await;
        let view = service.live_agenda(&EventFilter::default()).await.unwrap();

        assert_eq!(view.agenda_id, AgendaId::new(1));
        assert!(view.annotated);
        assert_eq!(view.total_events, 4);
        assert_eq!(view.live_count, 2);
        assert_eq!(view.categories, vec!["all", "formula 1", "futbol", "tenis"]);
        assert_eq!(view.events.len(), 4);
    }

    #[tokio::test]
    async fn test_filter_does_not_shrink_categories() {
        let service = service(LivePolicy::UpToCurrentSlot, 13).await;
        let filter = EventFilter::default().category("futbol");
        let view = service.live_agenda(&filter).await.unwrap();

        assert_eq!(view.events.len(), 2);
        assert_eq!(view.categories.len(), 4);
        assert_eq!(view.live_count, 2);
    }

    #[tokio::test]
    async fn test_live_only_filter() {
        let service = service(LivePolicy::UpToCurrentSlot, 13).await;
        let view = service
            .live_agenda(&EventFilter::default().live_only(true))
            .await
            .unwrap();
        assert_eq!(view.events.len(), 2);
        assert!(view.events.iter().all(|e| e.is_live));
    }

    #[tokio::test]
    async fn test_date_rollover_policy() {
        let service = service(LivePolicy::DateRollover, 13).await;
        let view = service.live_agenda(&EventFilter::default()).await.unwrap();
        assert_eq!(view.policy, LivePolicy::DateRollover);
        assert_eq!(view.live_count, 2);
        assert!(view.events.iter().all(|e| e.starts_at.is_some()));
    }

    #[tokio::test]
    async fn test_no_agenda() {
        let service = AgendaService::new(
            Arc::new(LocalRepository::new()),
            LiveAnnotator::default(),
            clock(12, 0),
        );
        assert!(matches!(
            service.live_agenda(&EventFilter::default()).await,
            Err(ServiceError::NoAgenda)
        ));
        assert!(matches!(service.categories().await, Err(ServiceError::NoAgenda)));
    }

    #[tokio::test]
    async fn test_unknown_agenda_id() {
        let service = service(LivePolicy::UpToCurrentSlot, 13).await;
        let err = service
            .annotated_agenda(AgendaId::new(99), &EventFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Repository(ref e) if e.is_not_found()));
    }

    #[tokio::test]
    async fn test_annotate_all_uses_one_reading() {
        let service = service(LivePolicy::UpToCurrentSlot, 13).await;
        let annotations = service
            .annotate_all(&[sample_agenda(), Agenda::new("Sabado 28", vec![])])
            .unwrap();
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].live_count(), 2);
        assert!(annotations[1].agenda.events.is_empty());
    }

    #[tokio::test]
    async fn test_strict_times_surfaces_error() {
        let repo = Arc::new(LocalRepository::new());
        repo.store_agenda(&Agenda::new("Lunes 3", vec![Event::new("noon", "x", "y")]))
            .await
            .unwrap();
        let service = AgendaService::new(
            repo,
            LiveAnnotator::default().with_strict_times(true),
            clock(12, 0),
        );
        assert!(matches!(
            service.live_agenda(&EventFilter::default()).await,
            Err(ServiceError::Annotate(_))
        ));
    }
}
