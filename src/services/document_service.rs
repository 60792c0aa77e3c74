// ============================================================================
// DOCUMENTS - Documentos médicos por paciente (lista, alta, subida de fichero)
// ============================================================================

use chrono::Utc;

use super::api_client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{Document, Upload};

const FILE_FIELD: &str = "file";

#[derive(Clone)]
pub struct DocumentService {
    client: ApiClient,
}

impl DocumentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Newest first.
    pub async fn list(&self, patient_id: i64) -> Result<Vec<Document>, ApiError> {
        self.client.get_json(&format!("/documents/{}", patient_id)).await
    }

    /// Metadata only (title, type, external URL).
    pub async fn create(&self, patient_id: i64, document: &Document) -> Result<Document, ApiError> {
        self.client.post_json(&format!("/documents/{}", patient_id), document).await
    }

    /// Sends the file as the `file` field of a `multipart/form-data` body.
    pub async fn upload(&self, patient_id: i64, upload: &Upload) -> Result<Document, ApiError> {
        let boundary = format!("AetherisBoundary{:x}", Utc::now().timestamp_micros());
        let request = ApiRequest::post(format!("/documents/upload/{}", patient_id))
            .header("Content-Type", format!("multipart/form-data; boundary={}", boundary))
            .body(multipart_body(&boundary, FILE_FIELD, upload));

        log::info!("📤 Subiendo {} ({} bytes) para paciente {}", upload.filename, upload.bytes.len(), patient_id);
        self.client.fetch_json(request).await
    }
}

/// Quotes and line breaks would end the header early.
fn header_safe(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .map(|c| if c == '"' { '\'' } else { c })
        .collect()
}

fn multipart_body(boundary: &str, field: &str, upload: &Upload) -> Vec<u8> {
    let head = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        boundary,
        field,
        header_safe(&upload.filename),
        header_safe(&upload.content_type),
    );
    let tail = format!("\r\n--{}--\r\n", boundary);

    let mut body = Vec::with_capacity(head.len() + upload.bytes.len() + tail.len());
    body.extend_from_slice(head.as_bytes());
    body.extend_from_slice(&upload.bytes);
    body.extend_from_slice(tail.as_bytes());
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::services::Method;
    use crate::testing::MockTransport;
    use futures::executor::block_on;
    use serde_json::json;
    use std::rc::Rc;

    #[test]
    fn multipart_body_wraps_the_file() {
        let upload = Upload::new("scan \"thorax\".pdf", "application/pdf", b"%PDF-1.4".to_vec());
        let body = multipart_body("XYZ", "file", &upload);
        let text = String::from_utf8(body).unwrap();

        assert!(text.starts_with("--XYZ\r\n"));
        assert!(text.contains("name=\"file\"; filename=\"scan 'thorax'.pdf\"\r\n"));
        assert!(text.contains("Content-Type: application/pdf\r\n\r\n%PDF-1.4\r\n--XYZ--\r\n"));
    }

    #[test]
    fn upload_overrides_json_content_type() {
        let transport = Rc::new(MockTransport::new());
        transport.on_json(
            Method::Post,
            "/documents/upload/4",
            200,
            json!({"id": 17, "patient_id": 4, "titre": "compte-rendu.pdf"}),
        );
        let service = DocumentService::new(ApiClient::new(&ClientConfig::default(), transport.clone()));

        let upload = Upload::new("compte-rendu.pdf", "application/pdf", vec![1, 2, 3]);
        let stored = block_on(service.upload(4, &upload)).unwrap();
        assert_eq!(stored.id, Some(17));

        let request = &transport.requests()[0];
        let content_type = request.header("Content-Type").unwrap();
        let boundary = content_type.strip_prefix("multipart/form-data; boundary=").unwrap();
        let body = request.body.as_deref().unwrap();
        assert!(body.starts_with(format!("--{}\r\n", boundary).as_bytes()));
        assert!(body.ends_with(format!("\r\n--{}--\r\n", boundary).as_bytes()));
        assert_eq!(
            request.headers.iter().filter(|(name, _)| name.eq_ignore_ascii_case("content-type")).count(),
            1
        );
    }

    #[test]
    fn documents_are_listed_per_patient() {
        let transport = Rc::new(MockTransport::new());
        transport.on_json(
            Method::Get,
            "/documents/4",
            200,
            json!([{"id": 17, "titre": "IRM", "type_document": "radiologie", "created_at": "2025-10-01T08:00:00"}]),
        );
        let service = DocumentService::new(ApiClient::new(&ClientConfig::default(), transport));

        let documents = block_on(service.list(4)).unwrap();
        assert_eq!(documents[0].type_document.as_deref(), Some("radiologie"));
        assert!(documents[0].created_at.is_some());
    }
}
