//! Shared fixtures for router tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tasklane_config::{DatabaseConfig, ServerConfig};
use tasklane_core::TasklaneResult;
use tasklane_repository::{create_pool, DatabasePool, SqliteTaskRepository};
use tasklane_rest::{create_router, AppState};
use tasklane_service::{CacheInterface, TaskListCache, TaskServiceComponent};
use tower::ServiceExt;

/// Process-local cache; entries live until deleted.
#[derive(Default)]
pub struct MapCache(Mutex<HashMap<String, String>>);

impl MapCache {
    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

#[async_trait]
impl CacheInterface for MapCache {
    async fn get_raw(&self, key: &str) -> TasklaneResult<Option<String>> {
        Ok(self.0.lock().unwrap().get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: Duration) -> TasklaneResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> TasklaneResult<bool> {
        Ok(self.0.lock().unwrap().remove(key).is_some())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Router wired to an in-memory database and cache.
pub struct TestApp {
    pub router: Router,
    pub pool: Arc<DatabasePool>,
    pub cache: Arc<MapCache>,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = create_pool(&DatabaseConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        let cache = Arc::new(MapCache::default());
        let repository = Arc::new(SqliteTaskRepository::new(pool.clone()));
        let list_cache = Arc::new(TaskListCache::new(cache.clone(), repository.clone()));
        let service = Arc::new(TaskServiceComponent::new(repository, list_cache));

        let state = AppState::new(service).with_health_check(pool.clone());
        let router = create_router(state, &ServerConfig::default(), None);

        Self {
            router,
            pool,
            cache,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, body).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }
}
