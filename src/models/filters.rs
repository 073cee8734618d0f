use serde::{Deserialize, Serialize};

use super::enums::{ConsultationMode, SortBy};

/// Active query over the practitioner list.
///
/// `None` on a scalar field means "no constraint on this dimension".
/// `specialties` is always concrete; an empty list means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub consultation_type: Option<ConsultationMode>,
    pub specialties: Vec<String>,
    pub sort_by: Option<SortBy>,
    pub search_query: Option<String>,
}

impl FilterSpec {
    /// The search text, if it constrains anything once trimmed.
    pub fn effective_search(&self) -> Option<&str> {
        self.search_query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
    }

    pub fn is_unconstrained(&self) -> bool {
        self.consultation_type.is_none()
            && self.specialties.is_empty()
            && self.sort_by.is_none()
            && self.effective_search().is_none()
    }

    /// Selecting the already-selected mode clears it.
    pub fn toggle_consultation(mut self, mode: ConsultationMode) -> Self {
        self.consultation_type = if self.consultation_type == Some(mode) {
            None
        } else {
            Some(mode)
        };
        self
    }

    /// Selecting the already-selected order clears it.
    pub fn toggle_sort(mut self, sort: SortBy) -> Self {
        self.sort_by = if self.sort_by == Some(sort) {
            None
        } else {
            Some(sort)
        };
        self
    }

    pub fn set_specialty(mut self, name: &str, checked: bool) -> Self {
        if checked {
            if !self.specialties.iter().any(|s| s == name) {
                self.specialties.push(name.to_string());
            }
        } else {
            self.specialties.retain(|s| s != name);
        }
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }
}
