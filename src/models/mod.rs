pub mod analysis;
pub mod auth;
pub mod billing;
pub mod clinical;
pub mod document;
pub mod patient;
pub mod pharmacy;
pub mod session;
pub mod snapshot;
pub mod synthesis;
pub mod timestamp;
pub mod vitals;

pub use analysis::{AiAnalysis, ServerMessage};
pub use auth::{LoginRequest, LoginResponse, Profile, RegisterRequest, Role, Specialty};
pub use billing::{Invoice, InvoiceStatus};
pub use clinical::{
    CardiacReading, ClinicalReading, DigestiveReading, MetabolicReading, NeurologicalReading,
    PulmonaryReading, RenalReading,
};
pub use document::{Document, Upload};
pub use patient::{Appointment, Patient};
pub use pharmacy::Medication;
pub use session::Session;
pub use snapshot::Snapshot;
pub use synthesis::{AiSynthesis, Notification};
pub use vitals::Severity;
