use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use super::raw::{RawPayload, RawRecord};
use crate::models::{
    ConsultationMode, Practitioner, HOSPITAL_NOT_SPECIFIED, LOCATION_NOT_SPECIFIED,
    PLACEHOLDER_IMAGE, UNKNOWN_NAME,
};

static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

/// Namespace for ids derived from record content when the source omits one.
const FALLBACK_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6b1f_52d4_3c0e_4a8e_9d27_51c4_0a3e_b7f1);

/// Normalize a fetched payload into canonical practitioners.
///
/// A payload that is not an array yields an empty list and an error event.
/// Individual records never fail: each field falls back to its default.
pub fn normalize(payload: &Value) -> Vec<Practitioner> {
    match RawPayload::from_value(payload) {
        RawPayload::Records(records) => records
            .iter()
            .enumerate()
            .map(|(index, raw)| normalize_record(raw, index))
            .collect(),
        RawPayload::NotAnArray(found) => {
            tracing::error!(found, "Practitioner payload is not an array");
            Vec::new()
        }
    }
}

/// Normalize one narrowed record. `index` is its position in the payload.
pub fn normalize_record(raw: &RawRecord, index: usize) -> Practitioner {
    let name = raw.name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let id = raw
        .id
        .clone()
        .unwrap_or_else(|| fallback_id(&name, index));

    let mut consultation_modes = Vec::with_capacity(2);
    if raw.video_consult {
        consultation_modes.push(ConsultationMode::VideoConsult);
    }
    if raw.in_clinic {
        consultation_modes.push(ConsultationMode::InClinic);
    }

    Practitioner {
        id,
        specialties: raw.specialities.iter().flatten().cloned().collect(),
        experience_years: raw.experience.as_deref().map(parse_experience).unwrap_or(0),
        fee: raw.fees.as_deref().map(parse_fee).unwrap_or(0),
        consultation_modes,
        degree: raw.degree.clone().unwrap_or_default(),
        availability: raw.availability.clone().unwrap_or_default(),
        rating: raw.rating.filter(|r| *r >= 0.0).unwrap_or(0.0),
        rating_count: raw.rating_count.map(non_negative_count).unwrap_or(0),
        image_url: raw
            .photo
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        hospital_name: raw
            .clinic_name
            .clone()
            .unwrap_or_else(|| HOSPITAL_NOT_SPECIFIED.to_string()),
        location_label: location_label(raw),
        name,
    }
}

/// First run of digits anywhere in the text; 0 when there is none.
pub fn parse_experience(text: &str) -> u32 {
    DIGIT_RUN
        .find(text)
        .map(|m| saturating_digits(m.as_str()))
        .unwrap_or(0)
}

/// Every digit in the text concatenated, e.g. `"₹ 1,500"` → 1500.
pub fn parse_fee(text: &str) -> u32 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        0
    } else {
        saturating_digits(&digits)
    }
}

/// `locality, city` → address line → clinic name → sentinel.
fn location_label(raw: &RawRecord) -> String {
    let composite = [raw.locality.as_deref(), raw.city.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    if !composite.is_empty() {
        return composite;
    }

    raw.address_line1
        .clone()
        .or_else(|| raw.clinic_name.clone())
        .unwrap_or_else(|| LOCATION_NOT_SPECIFIED.to_string())
}

fn fallback_id(name: &str, index: usize) -> String {
    Uuid::new_v5(&FALLBACK_ID_NAMESPACE, format!("{index}:{name}").as_bytes()).to_string()
}

// Input is all ASCII digits, so the only parse failure is overflow.
fn saturating_digits(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

fn non_negative_count(n: f64) -> u32 {
    if n <= 0.0 {
        0
    } else if n >= u32::MAX as f64 {
        u32::MAX
    } else {
        n.trunc() as u32
    }
}

/// Every specialty across the list, deduplicated and sorted ascending.
pub fn unique_specialties(practitioners: &[Practitioner]) -> Vec<String> {
    practitioners
        .iter()
        .flat_map(|p| p.specialties.iter())
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
