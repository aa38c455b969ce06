//! In-memory stand-in for the database so the HTTP contract can be tested
//! without Postgres.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use models::subscription::{self, Model};
use server::{routes, state::ServerState};
use service::errors::ServiceError;
use service::subscription::{
    domain::{NewSubscription, SubscriptionChanges, SubscriptionFilter},
    repository::SubscriptionRepository,
    SubscriptionService,
};
use tower::ServiceExt;

#[derive(Default)]
pub struct MemoryRepo {
    rows: Mutex<Vec<Model>>,
    /// When set, every call fails like a lost connection.
    pub broken: AtomicBool,
}

impl MemoryRepo {
    fn check(&self) -> Result<(), ServiceError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("connection refused".into()));
        }
        Ok(())
    }

    fn matches(m: &Model, f: &SubscriptionFilter, with_range: bool) -> bool {
        let present = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        let month = m.start_date.format("%Y-%m").to_string();
        present(&f.user_id).map_or(true, |u| m.user_id == u)
            && present(&f.service_name).map_or(true, |s| m.service_name == s)
            && (!with_range || present(&f.start).map_or(true, |s| month >= s))
            && (!with_range || present(&f.end).map_or(true, |e| month <= e))
    }
}

#[async_trait]
impl SubscriptionRepository for MemoryRepo {
    async fn create(&self, new: NewSubscription) -> Result<Model, ServiceError> {
        self.check()?;
        let m = Model {
            id: subscription::new_id(),
            service_name: new.service_name,
            price: new.price,
            user_id: new.user_id,
            start_date: new.start_date,
            end_date: new.end_date,
        };
        self.rows.lock().unwrap().push(m.clone());
        Ok(m)
    }

    async fn list(&self, filter: &SubscriptionFilter) -> Result<Vec<Model>, ServiceError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|m| Self::matches(m, filter, false)).cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Model>, ServiceError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id == id).cloned())
    }

    async fn update(&self, id: &str, changes: SubscriptionChanges) -> Result<Option<Model>, ServiceError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(m) = rows.iter_mut().find(|m| m.id == id) else { return Ok(None) };
        m.service_name = changes.service_name;
        m.price = changes.price;
        m.start_date = changes.start_date;
        m.end_date = changes.end_date;
        Ok(Some(m.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        Ok(rows.len() < before)
    }

    async fn total_price(&self, filter: &SubscriptionFilter) -> Result<i64, ServiceError> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|m| Self::matches(m, filter, true)).map(|m| i64::from(m.price)).sum())
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryRepo>,
}

pub fn app() -> TestApp {
    let repo = Arc::new(MemoryRepo::default());
    let state = ServerState::new(SubscriptionService::new(repo.clone()));
    let router = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    TestApp { router, repo }
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&v).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(req).await
    }

    pub async fn send_raw(&self, method: &str, uri: &str, raw: &'static str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(raw))
            .unwrap();
        self.send_request(req).await
    }

    async fn send_request(&self, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { serde_json::Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null) };
        (status, body)
    }
}
