mod common;

#[tokio::test]
async fn test_health_check() {
    let (state, repo) = common::create_test_state().await;
    common::insert_mapping(&repo, "ABCDE", "ABCDE_12345678", "https://example.com").await;
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(
        json["checks"]["database"]["message"],
        "Connected, active mappings: 1"
    );
}

#[tokio::test]
async fn test_health_check_database_down() {
    let (state, repo) = common::create_test_state().await;
    repo.pool().close().await;
    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}

#[tokio::test]
async fn test_index_page() {
    let (state, _repo) = common::create_test_state().await;
    let server = common::create_test_server(state);

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("POST /url"));
}
