mod common;

use shortkey::domain::entities::{MappingState, NewMapping};
use shortkey::domain::repositories::MappingRepository;

#[tokio::test]
async fn test_insert_mapping() {
    let repo = common::create_test_repository().await;

    let mapping = repo
        .insert(NewMapping {
            key: "ABCDE".to_string(),
            secret_key: "ABCDE_12345678".to_string(),
            target_url: "https://example.com".to_string(),
        })
        .await
        .unwrap();

    assert!(mapping.id > 0);
    assert_eq!(mapping.key, "ABCDE");
    assert_eq!(mapping.secret_key, "ABCDE_12345678");
    assert_eq!(mapping.target_url, "https://example.com");
    assert_eq!(mapping.state, MappingState::Active);
    assert_eq!(mapping.clicks, 0);
}

#[tokio::test]
async fn test_find_active_by_key_and_secret() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;

    let by_key = repo.find_active_by_key("ABCDE").await.unwrap().unwrap();
    let by_secret = repo
        .find_active_by_secret("ABCDE_12345678")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(by_key.id, by_secret.id);
    assert!(repo.find_active_by_key("ZZZZZ").await.unwrap().is_none());
    assert!(repo.find_active_by_secret("ABCDE").await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_is_case_sensitive() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;

    assert!(repo.find_active_by_key("abcde").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_key_is_conflict() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;

    let result = repo
        .insert(NewMapping {
            key: "ABCDE".to_string(),
            secret_key: "ABCDE_87654321".to_string(),
            target_url: "https://other.com".to_string(),
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_error_info().details["column"], "short_key");
}

#[tokio::test]
async fn test_duplicate_secret_key_is_conflict() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "ABCDE", "SHARED_SECRET", "https://example.com").await;

    let result = repo
        .insert(NewMapping {
            key: "FGHIJ".to_string(),
            secret_key: "SHARED_SECRET".to_string(),
            target_url: "https://other.com".to_string(),
        })
        .await;

    assert!(result.unwrap_err().is_conflict());
}

#[tokio::test]
async fn test_existence_checks_include_inactive() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;
    repo.deactivate("ABCDE_12345678").await.unwrap();

    assert!(repo.key_exists("ABCDE").await.unwrap());
    assert!(repo.secret_key_exists("ABCDE_12345678").await.unwrap());
    assert!(!repo.key_exists("FGHIJ").await.unwrap());
}

#[tokio::test]
async fn test_increment_clicks() {
    let repo = common::create_test_repository().await;
    let mapping =
        common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;

    let first = repo.increment_clicks(mapping.id).await.unwrap().unwrap();
    let second = repo.increment_clicks(mapping.id).await.unwrap().unwrap();

    assert_eq!(first.clicks, 1);
    assert_eq!(second.clicks, 2);
    assert!(repo.increment_clicks(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_increments_are_not_lost() {
    let repo = common::create_test_repository().await;
    let mapping =
        common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks(mapping.id).await })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let reloaded = repo.find_active_by_key("ABCDE").await.unwrap().unwrap();
    assert_eq!(reloaded.clicks, 50);
}

#[tokio::test]
async fn test_deactivate_hides_mapping() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;

    let deactivated = repo.deactivate("ABCDE_12345678").await.unwrap().unwrap();

    assert_eq!(deactivated.state, MappingState::Inactive);
    assert!(repo.find_active_by_key("ABCDE").await.unwrap().is_none());
    assert!(
        repo.find_active_by_secret("ABCDE_12345678")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_deactivate_twice_returns_none() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;

    assert!(repo.deactivate("ABCDE_12345678").await.unwrap().is_some());
    assert!(repo.deactivate("ABCDE_12345678").await.unwrap().is_none());
    assert!(repo.deactivate("UNKNOWN").await.unwrap().is_none());
}

#[tokio::test]
async fn test_deactivate_keeps_clicks() {
    let repo = common::create_test_repository().await;
    let mapping =
        common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;
    repo.increment_clicks(mapping.id).await.unwrap();

    let deactivated = repo.deactivate("ABCDE_12345678").await.unwrap().unwrap();

    assert_eq!(deactivated.clicks, 1);
}

#[tokio::test]
async fn test_increment_after_deactivate_is_ignored() {
    let repo = common::create_test_repository().await;
    let mapping =
        common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;
    repo.increment_clicks(mapping.id).await.unwrap();
    repo.deactivate("ABCDE_12345678").await.unwrap();

    assert!(repo.increment_clicks(mapping.id).await.unwrap().is_none());

    let clicks: i64 = sqlx::query_scalar("SELECT clicks FROM mappings WHERE id = ?1")
        .bind(mapping.id)
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(clicks, 1);
}

#[tokio::test]
async fn test_count() {
    let repo = common::create_test_repository().await;
    common::insert_mapping(&repo, "AAAAA", "AAAAA_11111111", "https://a.com").await;
    common::insert_mapping(&repo, "BBBBB", "BBBBB_22222222", "https://b.com").await;
    common::insert_mapping(&repo, "CCCCC", "CCCCC_33333333", "https://c.com").await;
    repo.deactivate("BBBBB_22222222").await.unwrap();

    assert_eq!(repo.count(false).await.unwrap(), 3);
    assert_eq!(repo.count(true).await.unwrap(), 2);
}

#[tokio::test]
async fn test_ping() {
    let repo = common::create_test_repository().await;

    assert!(repo.ping().await.is_ok());
}

#[tokio::test]
async fn test_same_target_gets_separate_rows() {
    let repo = common::create_test_repository().await;
    let first =
        common::insert_mapping(&repo, "AAAAA", "AAAAA_11111111", "https://example.com").await;
    let second =
        common::insert_mapping(&repo, "BBBBB", "BBBBB_22222222", "https://example.com").await;

    assert_ne!(first.id, second.id);
    assert_eq!(repo.count(true).await.unwrap(), 2);
}
