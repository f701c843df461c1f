mod common;

use std::collections::HashSet;
use std::sync::Arc;

use shortkey::application::services::{KeyPolicy, MappingService};
use shortkey::infrastructure::persistence::SqliteMappingRepository;
use shortkey::utils::key_generator::KEY_ALPHABET;

async fn create_service() -> MappingService<SqliteMappingRepository> {
    let repo = common::create_test_repository().await;
    MappingService::new(repo, KeyPolicy::default())
}

#[tokio::test]
async fn test_create_and_lookup_round_trip() {
    let service = create_service().await;

    let created = service.create("https://example.com/a?b=c").await.unwrap();

    assert_eq!(created.key.len(), 5);
    assert!(created.key.bytes().all(|b| KEY_ALPHABET.contains(&b)));
    assert!(created.secret_key.starts_with(&format!("{}_", created.key)));
    assert_eq!(created.secret_key.len(), 5 + 1 + 8);
    assert_eq!(created.clicks, 0);
    assert!(created.is_active());

    let by_key = service.find_by_key(&created.key).await.unwrap().unwrap();
    let by_secret = service
        .find_by_secret(&created.secret_key)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(by_key, created);
    assert_eq!(by_secret, created);
}

#[tokio::test]
async fn test_full_lifecycle() {
    let service = create_service().await;
    let created = service.create("https://example.com").await.unwrap();

    for expected in 1..=3 {
        let resolved = service.resolve(&created.key).await.unwrap().unwrap();
        assert_eq!(resolved.clicks, expected);
        assert_eq!(resolved.target_url, "https://example.com");
    }

    let info = service
        .find_by_secret(&created.secret_key)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(info.clicks, 3);

    let deactivated = service.deactivate(&created.secret_key).await.unwrap();
    assert!(deactivated.is_some());

    assert!(service.resolve(&created.key).await.unwrap().is_none());
    assert!(service.find_by_key(&created.key).await.unwrap().is_none());
    assert!(
        service
            .find_by_secret(&created.secret_key)
            .await
            .unwrap()
            .is_none()
    );
    assert!(service.deactivate(&created.secret_key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stale_mapping_is_not_counted_after_deactivate() {
    let service = create_service().await;
    let created = service.create("https://example.com").await.unwrap();
    let found = service.find_by_key(&created.key).await.unwrap().unwrap();

    service.deactivate(&created.secret_key).await.unwrap();

    let err = service.increment_clicks(&found).await.unwrap_err();
    assert_eq!(err.to_error_info().code, "not_found");
    assert!(service.resolve(&created.key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_invalid_url_creates_nothing() {
    let service = create_service().await;

    for input in ["", "not a url", "ftp://example.com/file", "https://", " https://a.com"] {
        let err = service.create(input).await.unwrap_err();
        assert_eq!(err.to_error_info().code, "validation_error", "input: {input:?}");
    }

    assert_eq!(service.count(false).await.unwrap(), 0);
}

#[tokio::test]
async fn test_keys_are_unique_across_many_creates() {
    let repo = common::create_test_repository().await;
    let service = MappingService::new(
        repo,
        KeyPolicy {
            key_length: 2,
            secret_suffix_length: 2,
            max_attempts: None,
        },
    );

    let mut keys = HashSet::new();
    let mut secrets = HashSet::new();

    for i in 0..200 {
        let mapping = service
            .create(&format!("https://example.com/{i}"))
            .await
            .unwrap();
        assert!(keys.insert(mapping.key));
        assert!(secrets.insert(mapping.secret_key));
    }

    assert_eq!(service.count(true).await.unwrap(), 200);
}

#[tokio::test]
async fn test_deactivated_keys_are_never_reissued() {
    let repo = common::create_test_repository().await;
    let service = MappingService::new(
        repo,
        KeyPolicy {
            key_length: 1,
            secret_suffix_length: 4,
            max_attempts: None,
        },
    );

    let first = service.create("https://example.com/first").await.unwrap();
    service.deactivate(&first.secret_key).await.unwrap();

    for i in 0..(KEY_ALPHABET.len() - 1) {
        let mapping = service
            .create(&format!("https://example.com/{i}"))
            .await
            .unwrap();
        assert_ne!(mapping.key, first.key);
    }
}

#[tokio::test]
async fn test_exhausted_keyspace_fails_with_cap() {
    let repo = common::create_test_repository().await;

    for letter in KEY_ALPHABET {
        let key = (*letter as char).to_string();
        common::insert_mapping(&repo, &key, &format!("{key}_FULL"), "https://example.com").await;
    }

    let service = MappingService::new(
        repo,
        KeyPolicy {
            key_length: 1,
            secret_suffix_length: 4,
            max_attempts: Some(50),
        },
    );

    let err = service.create("https://example.com").await.unwrap_err();
    assert_eq!(err.to_error_info().code, "internal_error");
    assert_eq!(service.count(false).await.unwrap(), KEY_ALPHABET.len() as i64);
}

#[tokio::test]
async fn test_concurrent_resolves_count_every_click() {
    let service = Arc::new(create_service().await);
    let created = service.create("https://example.com").await.unwrap();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let service = service.clone();
            let key = created.key.clone();
            tokio::spawn(async move { service.resolve(&key).await })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap().unwrap().is_some());
    }

    let info = service
        .find_by_secret(&created.secret_key)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(info.clicks, 50);
}

#[tokio::test]
async fn test_health_check() {
    let service = create_service().await;

    assert!(service.health_check().await.is_ok());
}
