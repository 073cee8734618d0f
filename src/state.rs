//! Directory screen state as an explicit value with pure transitions.
//!
//! `reduce` consumes the current state and an `Action` and returns the next
//! state. Every list it holds is derived from `practitioners`, which is only
//! replaced by a new load. The `location` field is the encoded query string
//! the router should show; the router feeds it back via `LocationChanged`.

use serde::Serialize;

use crate::config::SUGGESTION_LIMIT;
use crate::directory::unique_specialties;
use crate::filtering::{apply, suggestions};
use crate::models::{FilterSpec, Practitioner};
use crate::query_codec::{decode, encode};

/// Message shown when the list cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load doctor data";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch finished with a normalized list.
    Loaded(Vec<Practitioner>),
    /// Fetch failed; the detail is logged only.
    LoadFailed(String),
    /// The URL query string changed (initial load, back/forward, navigation).
    LocationChanged(String),
    /// Text typed into the search box, not yet committed.
    SearchTyped(String),
    /// A suggestion was picked; commits its name as the search.
    SuggestionSelected(String),
    /// A filter control changed; commits the whole spec.
    FiltersChanged(FilterSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryState {
    pub practitioners: Vec<Practitioner>,
    pub visible: Vec<Practitioner>,
    pub specialties: Vec<String>,
    pub filters: FilterSpec,
    pub suggestions: Vec<Practitioner>,
    pub status: LoadStatus,
    pub location: String,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            practitioners: Vec::new(),
            visible: Vec::new(),
            specialties: Vec::new(),
            filters: FilterSpec::default(),
            suggestions: Vec::new(),
            status: LoadStatus::Loading,
            location: String::new(),
        }
    }
}

impl DirectoryState {
    /// Initial state for a page opened at `location`.
    pub fn at_location(location: &str) -> Self {
        reduce(Self::default(), Action::LocationChanged(location.to_string()))
    }

    pub fn is_empty_result(&self) -> bool {
        self.status == LoadStatus::Ready && self.visible.is_empty()
    }

    fn refilter(mut self) -> Self {
        self.visible = apply(&self.practitioners, &self.filters);
        self
    }

    fn commit(mut self, filters: FilterSpec) -> Self {
        self.location = encode(&filters);
        self.filters = filters;
        self.refilter()
    }
}

pub fn reduce(state: DirectoryState, action: Action) -> DirectoryState {
    match action {
        Action::Loaded(practitioners) => {
            tracing::debug!(count = practitioners.len(), "Directory loaded");
            DirectoryState {
                specialties: unique_specialties(&practitioners),
                practitioners,
                suggestions: Vec::new(),
                status: LoadStatus::Ready,
                ..state
            }
            .refilter()
        }
        Action::LoadFailed(detail) => {
            tracing::error!(error = %detail, "Directory failed to load");
            DirectoryState {
                practitioners: Vec::new(),
                visible: Vec::new(),
                specialties: Vec::new(),
                suggestions: Vec::new(),
                status: LoadStatus::Failed(LOAD_FAILED_MESSAGE.to_string()),
                ..state
            }
        }
        Action::LocationChanged(location) => DirectoryState {
            filters: decode(&location),
            location,
            ..state
        }
        .refilter(),
        Action::SearchTyped(text) => {
            if text.trim().is_empty() {
                return DirectoryState {
                    suggestions: Vec::new(),
                    ..state
                };
            }
            let found = suggestions(&state.practitioners, &text, SUGGESTION_LIMIT);
            let filters = state.filters.clone().with_search(text);
            DirectoryState {
                suggestions: found,
                filters,
                ..state
            }
        }
        Action::SuggestionSelected(name) => {
            let filters = state.filters.clone().with_search(name);
            DirectoryState {
                suggestions: Vec::new(),
                ..state
            }
            .commit(filters)
        }
        Action::FiltersChanged(filters) => state.commit(filters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::normalize;
    use crate::models::{ConsultationMode, SortBy};
    use serde_json::json;

    fn loaded() -> DirectoryState {
        let list = normalize(&json!([
            {"id": "1", "name": "Dr. Kavya Menon", "fees": "₹ 700", "experience": "9 Years",
             "video_consult": true, "specialities": [{"name": "Dentist"}]},
            {"id": "2", "name": "Dr. Karan Malhotra", "fees": "₹ 400", "experience": "21 Years",
             "in_clinic": true, "specialities": [{"name": "Cardiologist"}]},
            {"id": "3", "name": "Dr. Kabir Das", "fees": "₹ 550", "experience": "3 Years",
             "in_clinic": true, "video_consult": true, "specialities": [{"name": "Dentist"}, {"name": "Ayurveda"}]},
            {"id": "4", "name": "Dr. Ka Lee", "fees": "₹ 900", "experience": "1 Years"}
        ]));
        reduce(DirectoryState::default(), Action::Loaded(list))
    }

    fn ids(list: &[Practitioner]) -> Vec<&str> {
        list.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn starts_loading() {
        let state = DirectoryState::default();
        assert_eq!(state.status, LoadStatus::Loading);
        assert!(state.visible.is_empty());
    }

    #[test]
    fn loaded_shows_everything_and_collects_specialties() {
        let state = loaded();
        assert_eq!(state.status, LoadStatus::Ready);
        assert_eq!(ids(&state.visible), vec!["1", "2", "3", "4"]);
        assert_eq!(state.specialties, vec!["Ayurveda", "Cardiologist", "Dentist"]);
    }

    #[test]
    fn location_before_load_applies_after_load() {
        let state = DirectoryState::at_location("?sortBy=fees");
        assert_eq!(state.filters.sort_by, Some(SortBy::Fees));
        assert!(state.visible.is_empty());

        let list = loaded().practitioners;
        let state = reduce(state, Action::Loaded(list));
        assert_eq!(ids(&state.visible), vec!["2", "3", "1", "4"]);
    }

    #[test]
    fn reload_drops_stale_suggestions() {
        let old = normalize(&json!([{"id": "old", "name": "Dr. Old"}]));
        let state = reduce(DirectoryState::default(), Action::Loaded(old));
        let state = reduce(state, Action::SearchTyped("old".into()));
        assert_eq!(ids(&state.suggestions), vec!["old"]);

        let new = normalize(&json!([{"id": "new", "name": "Dr. New"}]));
        let state = reduce(state, Action::Loaded(new));
        assert!(state.suggestions.is_empty());
        assert!(state
            .suggestions
            .iter()
            .all(|s| state.practitioners.contains(s)));
        assert_eq!(ids(&state.visible), vec!["new"]);
    }

    #[test]
    fn load_failure_sets_message_and_clears_lists() {
        let state = reduce(loaded(), Action::LoadFailed("HTTP 500".into()));
        assert_eq!(state.status, LoadStatus::Failed(LOAD_FAILED_MESSAGE.into()));
        assert!(state.practitioners.is_empty());
        assert!(state.visible.is_empty());
        assert!(state.specialties.is_empty());
        assert!(!state.is_empty_result());
    }

    #[test]
    fn location_change_decodes_and_filters() {
        let state = reduce(
            loaded(),
            Action::LocationChanged("?consultationType=In+Clinic&sortBy=experience".into()),
        );
        assert_eq!(state.filters.consultation_type, Some(ConsultationMode::InClinic));
        assert_eq!(ids(&state.visible), vec!["2", "3"]);
        assert_eq!(state.location, "?consultationType=In+Clinic&sortBy=experience");
    }

    #[test]
    fn typing_suggests_without_committing() {
        let state = reduce(loaded(), Action::SearchTyped("ka".into()));
        assert_eq!(ids(&state.suggestions), vec!["1", "2", "3"]);
        assert_eq!(state.filters.search_query.as_deref(), Some("ka"));
        assert_eq!(state.location, "");
        assert_eq!(state.visible.len(), 4);
    }

    #[test]
    fn typing_blank_clears_suggestions_only() {
        let state = reduce(loaded(), Action::SearchTyped("kab".into()));
        assert_eq!(state.suggestions.len(), 1);

        let state = reduce(state, Action::SearchTyped("  ".into()));
        assert!(state.suggestions.is_empty());
        assert_eq!(state.filters.search_query.as_deref(), Some("kab"));
    }

    #[test]
    fn selecting_suggestion_commits_search() {
        let state = reduce(loaded(), Action::SearchTyped("kab".into()));
        let state = reduce(state, Action::SuggestionSelected("Dr. Kabir Das".into()));

        assert!(state.suggestions.is_empty());
        assert_eq!(state.location, "?searchQuery=Dr.+Kabir+Das");
        assert_eq!(ids(&state.visible), vec!["3"]);
    }

    #[test]
    fn filter_change_round_trips_through_location() {
        let filters = FilterSpec::default()
            .set_specialty("Dentist", true)
            .toggle_sort(SortBy::Fees);
        let state = reduce(loaded(), Action::FiltersChanged(filters.clone()));

        assert_eq!(state.location, "?specialties=Dentist&sortBy=fees");
        assert_eq!(ids(&state.visible), vec!["3", "1"]);

        let replayed = reduce(state.clone(), Action::LocationChanged(state.location.clone()));
        assert_eq!(replayed.filters, filters);
        assert_eq!(replayed.visible, state.visible);
    }

    #[test]
    fn no_match_is_empty_result() {
        let filters = FilterSpec::default().with_search("zzz");
        let state = reduce(loaded(), Action::FiltersChanged(filters));
        assert!(state.is_empty_result());
    }

    #[test]
    fn status_serializes_tagged() {
        let value = serde_json::to_value(LoadStatus::Failed("x".into())).unwrap();
        assert_eq!(value, json!({"state": "failed", "message": "x"}));
    }
}
