//! Bidirectional mapping between `FilterSpec` and a URL query string.
//!
//! Parameters are always emitted in the order consultationType, specialties,
//! sortBy, searchQuery. Absent fields are omitted, never written empty.

use std::borrow::Cow;

use url::form_urlencoded;

use crate::models::{ConsultationMode, FilterSpec, SortBy};

pub const PARAM_CONSULTATION_TYPE: &str = "consultationType";
pub const PARAM_SPECIALTIES: &str = "specialties";
pub const PARAM_SORT_BY: &str = "sortBy";
pub const PARAM_SEARCH_QUERY: &str = "searchQuery";

/// Encode `spec` as `?a=b&…`, or `""` when nothing is set.
pub fn encode(spec: &FilterSpec) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    let mut any = false;

    if let Some(mode) = spec.consultation_type {
        params.append_pair(PARAM_CONSULTATION_TYPE, mode.as_str());
        any = true;
    }
    if !spec.specialties.is_empty() {
        params.append_pair(PARAM_SPECIALTIES, &spec.specialties.join(","));
        any = true;
    }
    if let Some(sort) = spec.sort_by {
        params.append_pair(PARAM_SORT_BY, sort.as_str());
        any = true;
    }
    if let Some(query) = spec.effective_search() {
        params.append_pair(PARAM_SEARCH_QUERY, query);
        any = true;
    }

    if any {
        format!("?{}", params.finish())
    } else {
        String::new()
    }
}

/// Decode a query string, with or without the leading `?`.
///
/// Unknown parameters are ignored. Missing, empty or unrecognized values
/// decode to absent; a missing or empty `specialties` decodes to an empty
/// list. Segments of a non-empty `specialties` are kept verbatim, blanks included.
pub fn decode(query: &str) -> FilterSpec {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs: Vec<(Cow<'_, str>, Cow<'_, str>)> =
        form_urlencoded::parse(query.as_bytes()).collect();

    FilterSpec {
        consultation_type: first(&pairs, PARAM_CONSULTATION_TYPE)
            .and_then(parse_known::<ConsultationMode>),
        specialties: first(&pairs, PARAM_SPECIALTIES)
            .map(|v| v.split(',').map(str::to_string).collect())
            .unwrap_or_default(),
        sort_by: first(&pairs, PARAM_SORT_BY).and_then(parse_known::<SortBy>),
        search_query: first(&pairs, PARAM_SEARCH_QUERY).map(str::to_string),
    }
}

/// Value of the first `key` pair; `None` when missing or empty.
fn first<'a>(pairs: &'a [(Cow<'_, str>, Cow<'_, str>)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_ref())
        .filter(|v| !v.is_empty())
}

fn parse_known<T>(value: &str) -> Option<T>
where
    T: std::str::FromStr<Err = crate::models::ParseEnumError>,
{
    match value.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unrecognized query parameter value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_encodes_to_empty_string() {
        assert_eq!(encode(&FilterSpec::default()), "");
    }

    #[test]
    fn sort_only_scenario() {
        let spec = FilterSpec {
            sort_by: Some(SortBy::Experience),
            ..Default::default()
        };
        assert_eq!(encode(&spec), "?sortBy=experience");

        let decoded = decode("?sortBy=experience");
        assert_eq!(
            decoded,
            FilterSpec {
                consultation_type: None,
                specialties: vec![],
                sort_by: Some(SortBy::Experience),
                search_query: None,
            }
        );
    }

    #[test]
    fn full_spec_has_fixed_parameter_order() {
        let spec = FilterSpec {
            consultation_type: Some(ConsultationMode::VideoConsult),
            specialties: vec!["Dentist".into(), "General Physician".into()],
            sort_by: Some(SortBy::Fees),
            search_query: Some("dr. rao".into()),
        };
        assert_eq!(
            encode(&spec),
            "?consultationType=Video+Consult&specialties=Dentist%2CGeneral+Physician&sortBy=fees&searchQuery=dr.+rao"
        );
    }

    #[test]
    fn full_spec_round_trips() {
        let spec = FilterSpec {
            consultation_type: Some(ConsultationMode::InClinic),
            specialties: vec!["Ear-Nose-Throat (ENT) Specialist".into(), "Dentist".into()],
            sort_by: Some(SortBy::Experience),
            search_query: Some("Ravi & Sons 100%".into()),
        };
        assert_eq!(decode(&encode(&spec)), spec);
    }

    #[test]
    fn empty_search_is_omitted() {
        let spec = FilterSpec::default().with_search("");
        assert_eq!(encode(&spec), "");
        assert_eq!(decode(&encode(&spec)).search_query, None);

        let spec = FilterSpec::default().with_search("   ");
        assert_eq!(encode(&spec), "");
    }

    #[test]
    fn decode_without_leading_question_mark() {
        let spec = decode("consultationType=In%20Clinic&specialties=Dentist");
        assert_eq!(spec.consultation_type, Some(ConsultationMode::InClinic));
        assert_eq!(spec.specialties, vec!["Dentist"]);
    }

    #[test]
    fn decode_accepts_literal_comma() {
        let spec = decode("?specialties=Dentist,Cardiology");
        assert_eq!(spec.specialties, vec!["Dentist", "Cardiology"]);
    }

    #[test]
    fn decode_empty_and_unknown() {
        assert_eq!(decode(""), FilterSpec::default());
        assert_eq!(decode("?"), FilterSpec::default());
        assert_eq!(decode("?page=2&utm_source=mail"), FilterSpec::default());
    }

    #[test]
    fn empty_values_decode_to_absent() {
        let spec = decode("?consultationType=&specialties=&sortBy=&searchQuery=");
        assert_eq!(spec, FilterSpec::default());
    }

    #[test]
    fn unrecognized_enum_values_decode_to_absent() {
        let spec = decode("?consultationType=Home+Visit&sortBy=rating");
        assert_eq!(spec.consultation_type, None);
        assert_eq!(spec.sort_by, None);
    }

    #[test]
    fn empty_specialty_segments_are_kept() {
        let spec = decode("?specialties=Dentist,,Cardiology,");
        assert_eq!(spec.specialties, vec!["Dentist", "", "Cardiology", ""]);
    }

    #[test]
    fn blank_specialty_round_trips() {
        let spec = FilterSpec {
            specialties: vec!["".into(), "Dentist".into()],
            ..Default::default()
        };
        assert_eq!(encode(&spec), "?specialties=%2CDentist");
        assert_eq!(decode(&encode(&spec)), spec);
    }

    #[test]
    fn first_repeated_parameter_wins() {
        let spec = decode("?sortBy=fees&sortBy=experience");
        assert_eq!(spec.sort_by, Some(SortBy::Fees));
    }
}
