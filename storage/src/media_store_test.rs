//! Unit tests for FilesystemMediaStore.

use dinebot_core::MediaUploader;

use crate::media_store::FilesystemMediaStore;

#[tokio::test]
async fn test_upload_returns_file_url() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilesystemMediaStore::new(dir.path());

    let uploaded = store
        .upload("photos/receipt.jpg", b"not really a jpeg")
        .await
        .expect("Upload errored")
        .expect("Upload reported failure");

    assert!(uploaded.download_url.starts_with("file://"));
    assert!(uploaded.download_url.ends_with(".jpg"));
}

#[tokio::test]
async fn test_unwritable_root_reports_failure_not_error() {
    // A root that collides with an existing file cannot be created as a directory.
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    std::fs::write(&blocker, b"file, not dir").unwrap();
    let store = FilesystemMediaStore::new(&blocker);

    let result = store.upload("a.png", b"bytes").await.expect("Upload errored");
    assert!(result.is_none());
}
