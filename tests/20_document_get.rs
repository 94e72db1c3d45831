mod common;

use anyhow::Result;
use axum::http::{header, StatusCode};
use uuid::Uuid;

use common::{body_bytes, body_json, TestApp};

#[tokio::test]
async fn owner_receives_payload_with_headers() -> Result<()> {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let payload: Vec<u8> = (0..1234u32).map(|i| (i % 251) as u8).collect();
    let id = app.seed(owner, "report.pdf", "application/pdf", payload.clone()).await;

    let res = app
        .get(&format!("/documents/{}", id), Some(&app.token_for(owner)))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(headers[header::CONTENT_DISPOSITION], "inline; filename=\"report.pdf\"");
    assert_eq!(headers[header::CONTENT_LENGTH], "1234");

    assert_eq!(body_bytes(res).await?, payload);
    Ok(())
}

#[tokio::test]
async fn other_user_gets_404_not_payload() -> Result<()> {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let id = app.seed(owner, "salary.csv", "text/csv", b"name,amount".to_vec()).await;

    let res = app
        .get(&format!("/documents/{}", id), Some(&app.token_for(intruder)))
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = body_json(res).await?;
    assert_eq!(body["message"], "Document not found or access denied");
    assert!(!body.to_string().contains("name,amount"));
    Ok(())
}

#[tokio::test]
async fn foreign_and_missing_documents_look_identical() -> Result<()> {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let id = app.seed(owner, "a.txt", "text/plain", b"x".to_vec()).await;
    let token = app.token_for(intruder);

    let foreign = app.get(&format!("/documents/{}", id), Some(&token)).await?;
    let missing = app.get("/documents/does-not-exist", Some(&token)).await?;

    assert_eq!(foreign.status(), missing.status());
    assert_eq!(body_json(foreign).await?, body_json(missing).await?);
    Ok(())
}

#[tokio::test]
async fn store_failure_returns_generic_500() -> Result<()> {
    let app = TestApp::new();
    let owner = Uuid::new_v4();
    let id = app.seed(owner, "a.txt", "text/plain", b"x".to_vec()).await;
    app.store.set_offline(true);

    let res = app
        .get(&format!("/documents/{}", id), Some(&app.token_for(owner)))
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(res).await?;
    assert_eq!(body["message"], "Failed to retrieve document");
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR");
    assert!(!body.to_string().contains("offline"));
    Ok(())
}

#[tokio::test]
async fn undecodable_key_with_session_is_404() -> Result<()> {
    let app = TestApp::new();
    let token = app.token_for(Uuid::new_v4());

    for res in [
        app.get("/documents/%FF", Some(&token)).await?,
        app.delete("/documents/%FF", Some(&token)).await?,
    ] {
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = body_json(res).await?;
        assert_eq!(body["message"], "Document not found or access denied");
        assert_eq!(body["code"], "NOT_FOUND");
    }
    Ok(())
}
