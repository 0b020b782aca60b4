//! Unit tests for OrderHistoryRepository.

use dinebot_core::SessionKey;

use crate::order_repo::OrderHistoryRepository;
use crate::sqlite_pool::SqlitePoolManager;

async fn repo(dir: &tempfile::TempDir) -> OrderHistoryRepository {
    let db_path = dir.path().join("test.db");
    let pool = SqlitePoolManager::new(db_path.to_str().unwrap())
        .await
        .expect("Failed to create pool");
    OrderHistoryRepository::new(pool)
        .await
        .expect("Failed to create repository")
}

#[tokio::test]
async fn test_append_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo(&dir).await;
    let key = SessionKey::new("b1", "t1");

    let items = vec!["2x Pizza".to_string(), "1x Coke".to_string()];
    let record = repo.append(&key, &items).await.unwrap();
    assert_eq!(record.item_lines(), items);

    let listed = repo.list(&key).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, record.id);
    assert_eq!(listed[0].item_lines(), items);
}

#[tokio::test]
async fn test_list_is_scoped_to_session() {
    let dir = tempfile::tempdir().unwrap();
    let repo = repo(&dir).await;
    let table_one = SessionKey::new("b1", "t1");
    let table_two = SessionKey::new("b1", "t2");

    repo.append(&table_one, &["1x Tea".to_string()]).await.unwrap();

    assert_eq!(repo.list(&table_one).await.unwrap().len(), 1);
    assert!(repo.list(&table_two).await.unwrap().is_empty());
}
