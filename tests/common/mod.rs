#![allow(dead_code)]

use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use serde_json::{Value, json};
use shortkey::application::services::KeyPolicy;
use shortkey::domain::entities::{Mapping, NewMapping};
use shortkey::domain::repositories::MappingRepository;
use shortkey::infrastructure::persistence::SqliteMappingRepository;
use shortkey::state::AppState;
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "http://s.test";

pub async fn create_test_repository() -> Arc<SqliteMappingRepository> {
    Arc::new(SqliteMappingRepository::in_memory().await.unwrap())
}

pub async fn insert_mapping(
    repo: &SqliteMappingRepository,
    key: &str,
    secret_key: &str,
    url: &str,
) -> Mapping {
    repo.insert(NewMapping {
        key: key.to_string(),
        secret_key: secret_key.to_string(),
        target_url: url.to_string(),
    })
    .await
    .unwrap()
}

pub async fn create_test_state() -> (AppState, Arc<SqliteMappingRepository>) {
    let repo = create_test_repository().await;
    let state = AppState::new(repo.clone(), KeyPolicy::default(), BASE_URL);

    (state, repo)
}

pub fn create_test_server(state: AppState) -> TestServer {
    let app = shortkey::api::routes::routes().with_state(state);
    TestServer::new(app).unwrap()
}

/// Server with the full middleware stack: static files, timeout, path normalisation.
pub fn create_app_server(state: AppState, request_timeout: Duration) -> TestServer {
    let app = shortkey::routes::app_router(state, request_timeout);
    TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
}

pub async fn post_mapping(server: &TestServer, url: &str) -> Value {
    let response = server.post("/url").json(&json!({ "target_url": url })).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
