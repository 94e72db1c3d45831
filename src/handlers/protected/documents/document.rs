use axum::{
    body::Body,
    extract::{rejection::PathRejection, Extension, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::database::Document;
use crate::error::ApiError;
use crate::middleware::Session;
use crate::services::GatewayError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// GET /documents/:id - return the payload of a document the caller owns
pub async fn get(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    let failure = "Failed to retrieve document";
    let id = document_key(&session, path, failure)?;

    let document = state
        .documents
        .retrieve(session.user(), &id)
        .await
        .map_err(|e| ApiError::from_gateway(e, failure))?;

    binary_response(document)
}

/// DELETE /documents/:id - permanently delete a document the caller owns
pub async fn delete(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let failure = "Failed to delete document";
    let id = document_key(&session, path, failure)?;

    state
        .documents
        .delete(session.user(), &id)
        .await
        .map_err(|e| ApiError::from_gateway(e, failure))?;

    Ok(Json(json!({ "message": "Document deleted successfully" })))
}

/// Decoded document key from the path.
///
/// A key axum cannot decode can never match a stored document, so it is
/// answered like any other miss, after the session check.
fn document_key(
    session: &Session,
    path: Result<Path<String>, PathRejection>,
    failure: &str,
) -> Result<String, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Undecodable document key: {}", rejection);
            let err = match session.user() {
                None => GatewayError::Unauthorized,
                Some(_) => GatewayError::NotFoundOrForbidden,
            };
            Err(ApiError::from_gateway(err, failure))
        }
    }
}

fn binary_response(document: Document) -> Result<Response, ApiError> {
    // Content-Length follows the bytes actually sent; a drifted file_size is only reported
    if document.size_mismatch() {
        tracing::warn!(
            "Document {} declares file_size {} but payload is {} bytes",
            document.id,
            document.file_size,
            document.payload_len()
        );
    }

    let content_type = content_type(&document);
    let disposition = content_disposition(&document.file_name);
    let length = document.payload_len();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header(header::CONTENT_LENGTH, length.to_string())
        .body(Body::from(document.file_data))
        .map_err(|e| {
            tracing::error!("Failed to build document response: {}", e);
            ApiError::internal_server_error("Failed to retrieve document")
        })
}

fn content_type(document: &Document) -> HeaderValue {
    match HeaderValue::from_str(document.file_type.trim()) {
        Ok(value) if !value.is_empty() => value,
        _ => {
            tracing::warn!(
                "Document {} has unusable content type {:?}, serving as {}",
                document.id,
                document.file_type,
                FALLBACK_CONTENT_TYPE
            );
            HeaderValue::from_static(FALLBACK_CONTENT_TYPE)
        }
    }
}

/// `inline; filename="<name>"` with quotes and backslashes escaped
fn content_disposition(file_name: &str) -> HeaderValue {
    let mut escaped = String::with_capacity(file_name.len());
    for c in file_name.chars().filter(|c| !c.is_control()) {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    HeaderValue::from_bytes(format!("inline; filename=\"{}\"", escaped).as_bytes())
        .unwrap_or_else(|_| {
            tracing::warn!(
                "Filename {:?} is not a valid header value, serving as plain inline",
                file_name
            );
            HeaderValue::from_static("inline")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn disposition_wraps_plain_name() {
        assert_eq!(
            content_disposition("report.pdf"),
            HeaderValue::from_static("inline; filename=\"report.pdf\"")
        );
    }

    #[test]
    fn disposition_escapes_quotes_and_strips_controls() {
        let value = content_disposition("evil\"\r\nSet-Cookie: x\\.pdf");
        assert_eq!(
            value.as_bytes(),
            b"inline; filename=\"evil\\\"Set-Cookie: x\\\\.pdf\""
        );
    }

    #[test]
    fn disposition_keeps_utf8_names() {
        let value = content_disposition("résumé.pdf");
        assert_eq!(value.as_bytes(), "inline; filename=\"résumé.pdf\"".as_bytes());
    }

    #[test]
    fn disposition_keeps_filename_for_any_character() {
        for code in 0u32..=0x2FF {
            let Some(c) = char::from_u32(code) else { continue };
            let value = content_disposition(&format!("a{}b.txt", c));
            assert!(
                value.as_bytes().starts_with(b"inline; filename=\""),
                "fell back to bare inline for U+{:04X}",
                code
            );
        }
    }

    #[test]
    fn invalid_content_type_falls_back() {
        let document = Document::new("doc", Uuid::new_v4(), "a.bin", "text/\u{1}plain", vec![1]);
        assert_eq!(content_type(&document), FALLBACK_CONTENT_TYPE);

        let document = Document::new("doc", Uuid::new_v4(), "a.bin", "", vec![1]);
        assert_eq!(content_type(&document), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn content_length_uses_payload() {
        let mut document = Document::new("doc", Uuid::new_v4(), "a.txt", "text/plain", b"abc".to_vec());
        document.file_size = 99;

        let response = binary_response(document).unwrap();
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "3");
    }
}
