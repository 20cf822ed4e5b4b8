//! Hierarchy cache integration tests.
//!
//! Tests verify:
//! - The cache is unusable before the first load and typed about it
//! - Dataset ownership is preserved through the cache
//! - Reloads fully replace the snapshot; failed reloads keep it
//! - Created datasets show up after a reload

use std::sync::atomic::Ordering;

use micrograph_client::ClientError;

use super::test_utils::{connected_client, lower, raise, seeded_repository};

#[tokio::test]
async fn test_load_returns_project_names() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;

    let projects = client.load_project_hierarchy().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[&1], "Retina screen");
    assert_eq!(projects[&2], "Cortex atlas");
}

#[tokio::test]
async fn test_accessors_before_load_are_unknown_project() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    assert!(matches!(
        client.datasets(1),
        Err(ClientError::UnknownProject { project_id: 1 })
    ));
    assert!(matches!(
        client.project_info(1),
        Err(ClientError::UnknownProject { project_id: 1 })
    ));
}

#[tokio::test]
async fn test_datasets_belong_to_their_project() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();

    let datasets = client.datasets(1).unwrap();
    assert_eq!(datasets.len(), 2);
    for dataset in datasets.values() {
        assert_eq!(dataset.project_id, 1);
    }
    assert_eq!(datasets[&10].name, "plate-01");
    assert_eq!(datasets[&11].description, "second plate");

    let datasets = client.datasets(2).unwrap();
    assert_eq!(datasets.len(), 1);
    assert_eq!(datasets[&20].project_id, 2);
}

#[tokio::test]
async fn test_unknown_project_after_load() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();

    assert!(matches!(
        client.datasets(99),
        Err(ClientError::UnknownProject { project_id: 99 })
    ));
}

#[tokio::test]
async fn test_project_info_served_from_cache() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();

    let listings_after_load = repository.counters.project_listings.load(Ordering::SeqCst);

    let info = client.project_info(2).unwrap();
    assert_eq!(info.name, "Cortex atlas");
    assert_eq!(info.description, "two-photon stacks");

    // No extra round trip for the info accessor.
    assert_eq!(
        repository.counters.project_listings.load(Ordering::SeqCst),
        listings_after_load
    );
}

#[tokio::test]
async fn test_reload_fully_replaces_the_snapshot() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();
    assert!(client.datasets(2).is_ok());

    // Project 2 disappears server-side; a reload must drop it here too.
    repository.remove_project(2);
    let projects = client.load_project_hierarchy().await.unwrap();

    assert_eq!(projects.len(), 1);
    assert!(matches!(
        client.datasets(2),
        Err(ClientError::UnknownProject { project_id: 2 })
    ));
    assert!(client.datasets(1).is_ok());
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_snapshot() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();

    raise(&repository.flags.fail_listings);
    let result = client.load_project_hierarchy().await;
    assert!(matches!(result, Err(ClientError::FetchFailed { .. })));

    // The earlier snapshot still answers.
    let datasets = client.datasets(1).unwrap();
    assert_eq!(datasets.len(), 2);
    assert_eq!(client.project_info(1).unwrap().name, "Retina screen");

    lower(&repository.flags.fail_listings);
}

#[tokio::test]
async fn test_failed_first_load_stays_unloaded() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;

    raise(&repository.flags.fail_listings);
    let result = client.load_project_hierarchy().await;
    assert!(matches!(result, Err(ClientError::FetchFailed { .. })));

    assert!(matches!(
        client.datasets(1),
        Err(ClientError::UnknownProject { .. })
    ));
}

#[tokio::test]
async fn test_invalidate_requires_a_fresh_load() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();
    assert!(client.datasets(1).is_ok());

    client.invalidate_hierarchy();

    assert!(matches!(
        client.datasets(1),
        Err(ClientError::UnknownProject { .. })
    ));
}

#[tokio::test]
async fn test_created_dataset_appears_after_reload() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();

    let dataset_id = client
        .create_dataset(1, "plate-03", "third plate")
        .await
        .unwrap();

    // The cache is a snapshot; the new dataset is visible after a reload.
    assert!(!client.datasets(1).unwrap().contains_key(&dataset_id));

    client.load_project_hierarchy().await.unwrap();
    let datasets = client.datasets(1).unwrap();
    assert!(datasets.contains_key(&dataset_id));
    assert_eq!(datasets[&dataset_id].name, "plate-03");
    assert_eq!(datasets[&dataset_id].project_id, 1);
}

#[tokio::test]
async fn test_created_project_appears_after_reload() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;
    client.load_project_hierarchy().await.unwrap();

    let project_id = client
        .create_project("Liver screen", "phase contrast")
        .await
        .unwrap();

    let projects = client.load_project_hierarchy().await.unwrap();
    assert_eq!(projects[&project_id], "Liver screen");
    assert!(client.datasets(project_id).unwrap().is_empty());
}
