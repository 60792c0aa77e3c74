// ============================================================================
// ENDPOINTS - Catálogo de recursos consultados por las vistas
// ============================================================================

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ApiError;

const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// `ClientConfig::poll_interval`
    Standard,
    /// `ClientConfig::fast_poll_interval` (vehicle positions and the like)
    RealTime,
}

/// A polled resource: a path template (optionally with `{id}`) and its cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSpec {
    pub template: &'static str,
    pub cadence: Cadence,
}

impl ResourceSpec {
    pub const fn standard(template: &'static str) -> Self {
        Self { template, cadence: Cadence::Standard }
    }

    pub const fn real_time(template: &'static str) -> Self {
        Self { template, cadence: Cadence::RealTime }
    }

    pub fn requires_identifier(&self) -> bool {
        self.template.contains(ID_PLACEHOLDER)
    }

    /// `Ok(None)` when the template needs an identifier and none (or a blank one) is given.
    pub fn path_for(&self, identifier: Option<&str>) -> Result<Option<String>, ApiError> {
        if !self.requires_identifier() {
            return Ok(Some(self.template.to_string()));
        }
        match identifier.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Ok(Some(self.template.replace(ID_PLACEHOLDER, path_segment(id)?))),
            None => Ok(None),
        }
    }

    pub fn every(&self, config: &ClientConfig) -> Duration {
        match self.cadence {
            Cadence::Standard => config.poll_interval(),
            Cadence::RealTime => config.fast_poll_interval(),
        }
    }
}

/// One path segment; anything that would leave it (`/`, query, fragment, dot segments) is refused.
pub fn path_segment(id: &str) -> Result<&str, ApiError> {
    let escapes = id.contains(['/', '\\', '?', '#', '%']) || id == "." || id == "..";
    if escapes || id.chars().any(char::is_control) {
        return Err(ApiError::InvalidIdentifier(id.to_string()));
    }
    Ok(id)
}

pub const PATIENTS: ResourceSpec = ResourceSpec::standard("/patients");
pub const PATIENT: ResourceSpec = ResourceSpec::standard("/patients/{id}");
pub const CRITICAL_PATIENTS: ResourceSpec = ResourceSpec::standard("/dashboard/patients-critiques");
pub const CARDIAC: ResourceSpec = ResourceSpec::standard("/cardiaque/{id}/latest");
pub const PULMONARY: ResourceSpec = ResourceSpec::standard("/pulmonaire/{id}/latest");
pub const RENAL: ResourceSpec = ResourceSpec::standard("/renal/{id}/latest");
pub const METABOLIC: ResourceSpec = ResourceSpec::standard("/metabolique/{id}/latest");
pub const NEUROLOGICAL: ResourceSpec = ResourceSpec::standard("/neurologique/{id}/latest");
pub const DIGESTIVE: ResourceSpec = ResourceSpec::standard("/digestive/{id}/latest");
pub const DOSSIER: ResourceSpec = ResourceSpec::standard("/dossiers/{id}");
pub const INVOICE: ResourceSpec = ResourceSpec::standard("/factures/{id}");
pub const INVOICES: ResourceSpec = ResourceSpec::standard("/factures");
pub const PHARMACY: ResourceSpec = ResourceSpec::standard("/pharmacie");
pub const PHARMACY_ALERTS: ResourceSpec = ResourceSpec::standard("/pharmacie/alertes");
pub const APPOINTMENTS: ResourceSpec = ResourceSpec::standard("/rendezvous");
pub const STAFF: ResourceSpec = ResourceSpec::standard("/rh");
pub const RADIOLOGY: ResourceSpec = ResourceSpec::standard("/radiologie");
pub const AI_SYNTHESIS: ResourceSpec = ResourceSpec::standard("/synthese-ia/{id}/latest");
pub const CROSS_ANALYSIS: ResourceSpec = ResourceSpec::standard("/aetheris/analysis/{id}");
pub const NOTIFICATIONS: ResourceSpec = ResourceSpec::standard("/notifications");
pub const AMBULANCES: ResourceSpec = ResourceSpec::real_time("/ambulances/positions");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_is_required_only_by_templates() {
        assert_eq!(PATIENTS.path_for(None), Ok(Some("/patients".to_string())));
        assert_eq!(CARDIAC.path_for(None), Ok(None));
        assert_eq!(CARDIAC.path_for(Some("  ")), Ok(None));
        assert_eq!(CARDIAC.path_for(Some("42")), Ok(Some("/cardiaque/42/latest".to_string())));
    }

    #[test]
    fn identifiers_cannot_leave_their_segment() {
        for id in ["1/../rh", "1?x=y", "1#top", "..", "1%2F2", "a\\b", "a\tb"] {
            assert_eq!(
                PATIENT.path_for(Some(id)),
                Err(ApiError::InvalidIdentifier(id.to_string())),
                "{:?}",
                id
            );
        }
        assert_eq!(PATIENT.path_for(Some("P-12")), Ok(Some("/patients/P-12".to_string())));
    }

    #[test]
    fn cadence_picks_configured_interval() {
        let config = ClientConfig::default();
        assert_eq!(AMBULANCES.every(&config), Duration::from_secs(10));
        assert_eq!(RENAL.every(&config), Duration::from_secs(15));
    }
}
