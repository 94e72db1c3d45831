mod common;

use anyhow::Result;
use axum::http::StatusCode;

use common::{body_json, TestApp};

#[tokio::test]
async fn health_reports_store_status() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/health", None).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await?["data"]["status"], "ok");

    app.store.set_offline(true);
    let res = app.get("/health", None).await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(res).await?["data"]["status"], "degraded");
    Ok(())
}

#[tokio::test]
async fn root_is_public() -> Result<()> {
    let app = TestApp::new();

    let res = app.get("/", None).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await?["success"], true);
    Ok(())
}
