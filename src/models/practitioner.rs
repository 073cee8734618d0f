use serde::{Deserialize, Serialize};

use super::enums::ConsultationMode;

/// Name shown when the source record carries none.
pub const UNKNOWN_NAME: &str = "Unknown";
/// Image reference used when the source record has no photo.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const HOSPITAL_NOT_SPECIFIED: &str = "Hospital not specified";
pub const LOCATION_NOT_SPECIFIED: &str = "Location not specified";

/// Canonical practitioner record. Every field is populated after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub id: String,
    pub name: String,
    /// Source order, duplicates kept.
    pub specialties: Vec<String>,
    pub experience_years: u32,
    pub fee: u32,
    /// Ordered `Video Consult` then `In Clinic`, each at most once.
    pub consultation_modes: Vec<ConsultationMode>,
    pub degree: String,
    pub availability: String,
    pub rating: f64,
    pub rating_count: u32,
    pub image_url: String,
    pub hospital_name: String,
    pub location_label: String,
}

impl Practitioner {
    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_modes.contains(&mode)
    }

    pub fn fee_label(&self) -> String {
        format!("₹{}", self.fee)
    }

    pub fn experience_label(&self) -> String {
        format!("{} years exp", self.experience_years)
    }

    pub fn consultation_label(&self) -> String {
        self.consultation_modes
            .iter()
            .map(ConsultationMode::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

/// Heading for a result list: "1 Doctor Found", "12 Doctors Found".
pub fn results_heading(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} Doctor{plural} Found")
}
