//! Session lifecycle integration tests.
//!
//! Tests verify:
//! - Connect/disconnect bracket exactly one remote session
//! - Typed errors for missing or duplicate sessions
//! - Connect failure leaves no partial session behind
//! - Read operations never disconnect the session

use std::sync::atomic::Ordering;

use micrograph_client::{ClientError, RepositoryClient};

use super::test_utils::{connected_client, lower, raise, seeded_repository, test_config};

#[tokio::test]
async fn test_connect_establishes_one_session() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    assert!(client.is_connected());
    assert_eq!(client.session_id(), Some("session-alice"));
    assert_eq!(repository.counters.connects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disconnect_releases_the_session() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;

    client.disconnect().await.unwrap();

    assert!(!client.is_connected());
    assert_eq!(client.session_id(), None);
    assert_eq!(repository.counters.disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disconnect_without_session_is_not_connected() {
    let repository = seeded_repository();
    let mut client = RepositoryClient::new(repository, test_config()).unwrap();

    let result = client.disconnect().await;
    assert!(matches!(result, Err(ClientError::NotConnected)));
}

#[tokio::test]
async fn test_double_disconnect_is_not_connected() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;

    client.disconnect().await.unwrap();
    let result = client.disconnect().await;

    assert!(matches!(result, Err(ClientError::NotConnected)));
    assert_eq!(repository.counters.disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_connect_twice_is_already_connected() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;

    let result = client.connect().await;

    assert!(matches!(result, Err(ClientError::AlreadyConnected)));
    assert_eq!(repository.counters.connects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_connect_failure_leaves_no_partial_session() {
    let repository = seeded_repository();
    raise(&repository.flags.fail_connect);

    let mut client = RepositoryClient::new(repository.clone(), test_config()).unwrap();
    let result = client.connect().await;

    assert!(matches!(
        result,
        Err(ClientError::ServiceUnavailable { .. })
    ));
    assert!(!client.is_connected());
    assert_eq!(client.session_id(), None);

    // A later retry succeeds once the service recovers.
    lower(&repository.flags.fail_connect);
    client.connect().await.unwrap();
    assert!(client.is_connected());
}

#[tokio::test]
async fn test_operations_before_connect_are_not_connected() {
    let repository = seeded_repository();
    let mut client = RepositoryClient::new(repository, test_config()).unwrap();

    assert!(matches!(
        client.load_project_hierarchy().await,
        Err(ClientError::NotConnected)
    ));
    assert!(matches!(
        client.images(10).await,
        Err(ClientError::NotConnected)
    ));
    assert!(matches!(
        client.annotate_dataset(10, "tag", "batch1").await,
        Err(ClientError::NotConnected)
    ));
}

#[tokio::test]
async fn test_reads_never_disconnect_the_session() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;

    client.load_project_hierarchy().await.unwrap();
    client.images(10).await.unwrap();
    client.image_info(10, 100).await.unwrap();
    client.map_annotations(
        micrograph_client::AnnotationTarget::Dataset(10),
    )
    .await
    .unwrap();
    client.file_annotations(100).await.unwrap();

    assert!(client.is_connected());
    assert_eq!(repository.counters.disconnects.load(Ordering::SeqCst), 0);

    // The session is still usable after all those reads.
    client.images(10).await.unwrap();
    client.disconnect().await.unwrap();
    assert_eq!(repository.counters.disconnects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disconnect_failure_still_drops_local_session() {
    let repository = seeded_repository();
    let mut client = connected_client(&repository).await;

    raise(&repository.flags.fail_disconnect);
    let result = client.disconnect().await;

    assert!(matches!(
        result,
        Err(ClientError::ServiceUnavailable { .. })
    ));
    assert!(!client.is_connected());
}
