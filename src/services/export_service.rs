// ============================================================================
// EXPORT SERVICE - Descarga de PDFs como bytes opacos
// ============================================================================

use super::api_client::ApiClient;
use super::transport::HttpResponse;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Analysis(i64),
    AnalysisHistory(i64),
    Invoice(i64),
    Synthesis(i64),
    Dossier(i64),
}

impl ExportKind {
    pub fn path(&self) -> String {
        match self {
            ExportKind::Analysis(id) => format!("/pdf/analysis/{}/export", id),
            ExportKind::AnalysisHistory(id) => format!("/pdf/analysis/{}/export-history", id),
            ExportKind::Invoice(id) => format!("/pdf/facture/{}", id),
            ExportKind::Synthesis(id) => format!("/pdf/synthese/{}/export", id),
            ExportKind::Dossier(id) => format!("/dossiers/{}/export-pdf", id),
        }
    }

    /// Name used when the server sends no `Content-Disposition`.
    pub fn fallback_filename(&self) -> String {
        match self {
            ExportKind::Analysis(id) => format!("Analyse_Aetheris_{}.pdf", id),
            ExportKind::AnalysisHistory(id) => format!("Historique_Aetheris_{}.pdf", id),
            ExportKind::Invoice(id) => format!("facture_{}.pdf", id),
            ExportKind::Synthesis(id) => format!("Synthese_Aetheris_Patient_{}.pdf", id),
            ExportKind::Dossier(id) => format!("Dossier_{}.pdf", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Download {
    fn from_response(response: HttpResponse, fallback: String) -> Self {
        let filename = response
            .header("Content-Disposition")
            .and_then(filename_from_disposition)
            .unwrap_or(fallback);
        let content_type = response
            .header("Content-Type")
            .unwrap_or("application/pdf")
            .to_string();
        Self {
            filename,
            content_type,
            bytes: response.body,
        }
    }
}

/// `attachment; filename="x.pdf"` → `x.pdf`. `filename*=UTF-8''...` wins when present.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if key == "filename*" {
            let encoded = value.rsplit("''").next().unwrap_or(value);
            if let Some(name) = percent_decode(encoded).filter(|name| !name.is_empty()) {
                return Some(name);
            }
        } else if key == "filename" {
            let name = value.trim_matches('"').trim();
            if !name.is_empty() {
                plain = Some(name.to_string());
            }
        }
    }
    plain
}

fn percent_decode(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = raw.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

#[derive(Clone)]
pub struct ExportService {
    client: ApiClient,
}

impl ExportService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, kind: ExportKind) -> Result<Download, ApiError> {
        let response = self.client.get_bytes(&kind.path()).await?;
        let download = Download::from_response(response, kind.fallback_filename());
        log::info!("📄 Export {} ({} bytes)", download.filename, download.bytes.len());
        Ok(download)
    }
}

/// Hands the bytes to the browser as a file download (object URL + anchor click).
#[cfg(target_arch = "wasm32")]
pub fn save_download(download: &Download) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(download.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(&download.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&download.filename);
    let body = document.body().ok_or("no body")?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)?;
    Ok(())
}
