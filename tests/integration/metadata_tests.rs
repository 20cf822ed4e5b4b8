//! Metadata query integration tests.
//!
//! Tests verify:
//! - Image listings and per-image summaries
//! - Missing images are a typed NotFound, never an empty record
//! - A failed listing is distinguishable from an empty dataset
//! - Channel name formatting
//! - Download link construction

use micrograph_client::remote::FileAttachment;
use micrograph_client::ClientError;

use super::test_utils::{connected_client, image_record, raise, seeded_repository};

#[tokio::test]
async fn test_images_lists_a_dataset() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    let images = client.images(10).await.unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(images[&100], "well_A1");
    assert_eq!(images[&101], "well_A2");
}

#[tokio::test]
async fn test_images_of_empty_dataset_is_empty_not_error() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    // Dataset 11 exists but holds no images.
    let images = client.images(11).await.unwrap();
    assert!(images.is_empty());
}

#[tokio::test]
async fn test_failed_listing_is_an_error_not_empty() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    raise(&repository.flags.fail_listings);
    let result = client.images(10).await;

    assert!(matches!(result, Err(ClientError::FetchFailed { .. })));
}

#[tokio::test]
async fn test_image_info_summary() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    let info = client.image_info(10, 100).await.unwrap();

    assert_eq!(info.id, 100);
    assert_eq!(info.name, "well_A1");
    assert_eq!(info.description, "well_A1 acquisition");
    assert_eq!(info.dimension_summary(), "512 x 256 x 5");
    assert_eq!(info.timepoints, 3);
    assert_eq!(info.channel_names, vec!["DAPI", "GFP", "RFP"]);
    assert_eq!(info.channel_summary(), "DAPI, GFP, RFP");
}

#[tokio::test]
async fn test_image_info_missing_image_is_not_found() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    let result = client.image_info(10, 999).await;

    assert!(matches!(
        result,
        Err(ClientError::NotFound {
            what: "image",
            id: 999
        })
    ));
}

#[tokio::test]
async fn test_image_info_without_channel_metadata() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    // Image 101 has no channel records on the service.
    let info = client.image_info(10, 101).await.unwrap();
    assert!(info.channel_names.is_empty());
    assert_eq!(info.channel_summary(), "");
}

#[tokio::test]
async fn test_file_annotations() {
    let repository = seeded_repository().with_file_annotation(
        100,
        FileAttachment {
            id: 501,
            file_name: "metadata.csv".to_string(),
            size: 2048,
        },
    );
    let client = connected_client(&repository).await;

    let attachments = client.file_annotations(100).await.unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0].file_name, "metadata.csv");

    // No attachments is an empty list, not an error.
    assert!(client.file_annotations(101).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_image_download_link() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    let link = client.image_download_link(10, 100).await.unwrap();
    assert_eq!(
        link,
        "images.example.org/webgateway/archived_files/download/100/"
    );
}

#[tokio::test]
async fn test_image_download_link_requires_a_format() {
    let mut unformatted = image_record(102, "snapshot");
    unformatted.format = None;
    let repository = seeded_repository().with_image(10, unformatted);
    let client = connected_client(&repository).await;

    let result = client.image_download_link(10, 102).await;

    assert!(matches!(
        result,
        Err(ClientError::DownloadUnavailable { image_id: 102 })
    ));
}

#[tokio::test]
async fn test_annotation_download_link() {
    let repository = seeded_repository();
    let client = connected_client(&repository).await;

    assert_eq!(
        client.annotation_download_link(501),
        "images.example.org/webclient/annotation/501"
    );
}
