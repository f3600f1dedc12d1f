//! File seeding and concurrent access for the local repository.

mod support;

use std::fs;
use std::sync::Arc;

use agenda_live::db::{AgendaRepository, LocalRepository, RepositoryError};
use agenda_live::models::{Agenda, Event};

#[test]
fn test_load_single_file() {
    let repo = LocalRepository::from_path(support::data_path("agenda_2025-06-27.json")).unwrap();
    assert_eq!(repo.len(), 1);
}

#[test]
fn test_load_directory_ignores_non_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("a.json"),
        r#"[{"dia": "Lunes 30", "eventos": []}, {"dia": "Martes 1", "eventos": []}]"#,
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not an agenda").unwrap();

    let repo = LocalRepository::from_path(dir.path()).unwrap();
    assert_eq!(repo.len(), 2);
}

#[test]
fn test_load_invalid_json_is_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.json");
    fs::write(&file, "{ \"dia\": ").unwrap();

    match LocalRepository::from_path(&file) {
        Err(RepositoryError::ValidationError { context, .. }) => {
            assert!(context.operation.unwrap().contains("broken.json"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("broken file should not load"),
    }
}

#[test]
fn test_load_missing_path_is_configuration_error() {
    let result = LocalRepository::from_path("/definitely/not/here");
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[tokio::test]
async fn test_reloading_same_file_deduplicates() {
    let repo = LocalRepository::new();
    let path = support::data_path("agenda_2025-06-27.json");
    repo.load_path(&path).unwrap();
    repo.load_path(&path).unwrap();
    assert_eq!(repo.list_agendas().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_stores() {
    let repo = Arc::new(LocalRepository::new());
    let mut handles = Vec::new();
    for i in 0..16 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            let agenda = Agenda::new(
                format!("Dia {}", i),
                vec![Event::new("10:00", format!("Event {}", i), "futbol")],
            );
            repo.store_agenda(&agenda).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let mut ids: Vec<i64> = repo
        .list_agendas()
        .await
        .unwrap()
        .iter()
        .map(|info| info.agenda_id.value())
        .collect();
    ids.sort();
    assert_eq!(ids, (1..=16).collect::<Vec<_>>());
}
