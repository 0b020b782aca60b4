//! Unit tests for the TaskDispatcher and FeedbackSink adapters.

use dinebot_core::{FeedbackSink, FeedbackSubmission, TaskDispatcher};

use crate::feedback_repo::FeedbackRepository;
use crate::service_request_repo::ServiceRequestRepository;
use crate::sqlite_pool::SqlitePoolManager;

async fn pool(dir: &tempfile::TempDir) -> SqlitePoolManager {
    let db_path = dir.path().join("test.db");
    SqlitePoolManager::new(db_path.to_str().unwrap())
        .await
        .expect("Failed to create pool")
}

#[tokio::test]
async fn test_task_dispatch_creates_open_request() {
    let dir = tempfile::tempdir().unwrap();
    let repo = ServiceRequestRepository::new(pool(&dir).await)
        .await
        .expect("Failed to create repository");

    repo.submit("t7", "2x Pizza. Notes: extra spicy")
        .await
        .expect("Dispatch failed");

    let requests = repo.list_for_table("t7").await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].description, "2x Pizza. Notes: extra spicy");
    assert_eq!(requests[0].status, "open");
}

#[tokio::test]
async fn test_feedback_sink_persists_submission() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FeedbackRepository::new(pool(&dir).await)
        .await
        .expect("Failed to create repository");

    let submission = FeedbackSubmission {
        target: "Trattoria Rossi".to_string(),
        rating: 4,
        comment: Some("lovely".to_string()),
        image_url: None,
    };
    repo.submit("b1", &submission, "t7").await.expect("Sink failed");

    let saved = repo.list_for_business("b1").await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].rating, 4);
    assert_eq!(saved[0].comment.as_deref(), Some("lovely"));
    assert_eq!(saved[0].table_id, "t7");
}
