#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, Response},
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use docvault_api::auth::JwtSessionAuthenticator;
use docvault_api::database::{Document, ExtractedData, MemoryDocumentStore};
use docvault_api::{routes, AppState};

pub const COOKIE_NAME: &str = "docvault_session";

/// Router over an in-memory store, plus handles to seed it and mint sessions
pub struct TestApp {
    pub store: Arc<MemoryDocumentStore>,
    pub authenticator: JwtSessionAuthenticator,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryDocumentStore::new());
        let authenticator = JwtSessionAuthenticator::new("integration-secret", 1, COOKIE_NAME);
        let state = AppState::new(store.clone(), Arc::new(authenticator.clone()));

        Self {
            store,
            authenticator,
            router: routes(state),
        }
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.authenticator
            .issue_token(user_id, None)
            .expect("failed to issue test token")
    }

    /// Store a document owned by `owner` and return its key
    pub async fn seed(&self, owner: Uuid, file_name: &str, file_type: &str, data: Vec<u8>) -> String {
        let id = format!("doc_{}", Uuid::new_v4().simple());
        self.store
            .insert_document(Document::new(id.clone(), owner, file_name, file_type, data))
            .await;
        id
    }

    pub async fn seed_extracted(&self, document_id: &str, count: usize) -> Result<()> {
        for i in 0..count {
            self.store
                .insert_extracted_data(ExtractedData::new(
                    document_id,
                    format!("field_{}", i),
                    Some(format!("value_{}", i)),
                ))
                .await?;
        }
        Ok(())
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        Ok(self.router.clone().oneshot(request).await?)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response<Body>> {
        self.send(request(Method::GET, path, token)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Response<Body>> {
        self.send(request(Method::DELETE, path, token)).await
    }
}

pub fn request(method: Method, path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub async fn body_bytes(response: Response<Body>) -> Result<Vec<u8>> {
    Ok(to_bytes(response.into_body(), usize::MAX).await?.to_vec())
}

pub async fn body_json(response: Response<Body>) -> Result<serde_json::Value> {
    Ok(serde_json::from_slice(&body_bytes(response).await?)?)
}
