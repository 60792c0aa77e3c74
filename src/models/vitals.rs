//! Colour coding of displayed values; the only clinical logic the screens carry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Attention,
    Critical,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Normal => "severity-normal",
            Severity::Attention => "severity-attention",
            Severity::Critical => "severity-critical",
        }
    }
}

pub fn spo2(percent: f64) -> Severity {
    if percent >= 95.0 {
        Severity::Normal
    } else if percent >= 90.0 {
        Severity::Attention
    } else {
        Severity::Critical
    }
}

pub fn heart_rate(bpm: f64) -> Severity {
    if (50.0..=120.0).contains(&bpm) {
        Severity::Normal
    } else {
        Severity::Critical
    }
}

pub fn temperature(celsius: f64) -> Severity {
    if (35.0..=39.0).contains(&celsius) {
        Severity::Normal
    } else {
        Severity::Critical
    }
}

/// eGFR in mL/min/1.73m²
pub fn glomerular_filtration(gfr: f64) -> Severity {
    if gfr < 60.0 {
        Severity::Critical
    } else if gfr < 90.0 {
        Severity::Attention
    } else {
        Severity::Normal
    }
}

/// mg/dL
pub fn creatinine(level: f64) -> Severity {
    if level > 1.3 {
        Severity::Critical
    } else if level > 1.1 {
        Severity::Attention
    } else {
        Severity::Normal
    }
}

/// Worst of the known values; missing values do not count.
pub fn worst<const N: usize>(values: [Option<Severity>; N]) -> Severity {
    values.into_iter().flatten().max().unwrap_or(Severity::Normal)
}
