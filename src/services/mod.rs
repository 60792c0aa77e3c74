// ============================================================================
// SERVICES - Solo comunicación con el backend
// ============================================================================

pub mod analysis_service;
pub mod api_client;
pub mod appointment_service;
pub mod auth_service;
pub mod document_service;
pub mod endpoints;
pub mod export_service;
pub mod feed;
pub mod notification_service;
pub mod patient_service;
pub mod synthesis_service;
pub mod transport;
pub mod user_service;

#[cfg(target_arch = "wasm32")]
pub mod fetch_transport;

pub use analysis_service::AnalysisService;
pub use api_client::{ApiClient, ApiRequest, AuthFailure};
pub use appointment_service::AppointmentService;
pub use auth_service::AuthApi;
pub use document_service::DocumentService;
pub use endpoints::{Cadence, ResourceSpec};
pub use export_service::{filename_from_disposition, Download, ExportKind, ExportService};
pub use feed::{FeedResult, FeedSubscription, PollingFeed, ResourceFeed};
pub use notification_service::NotificationService;
pub use patient_service::PatientService;
pub use synthesis_service::SynthesisService;
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
pub use user_service::UserService;

#[cfg(target_arch = "wasm32")]
pub use export_service::save_download;
#[cfg(target_arch = "wasm32")]
pub use fetch_transport::FetchTransport;
