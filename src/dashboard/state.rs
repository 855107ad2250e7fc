//! Dashboard state snapshots
//!
//! A `DashboardState` is never mutated: every transition returns a new
//! snapshot, so the list and the selection always change together.
//!
//! Invariant: when `selected` is present it equals a record in `patients`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::loader::Loaded;
use crate::records::Patient;

/// Where the dashboard is in its load lifecycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    /// Initial fetch has not completed yet
    Loading,
    /// Records are loaded
    Ready { loaded_at: DateTime<Utc> },
    /// Latest fetch failed; whatever was loaded before is kept
    Failed {
        reason: String,
        failed_at: DateTime<Utc>,
    },
}

/// Errors from selection transitions
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// The record is not one of the currently loaded records
    #[error("Patient is not in the current list: {0}")]
    NotInList(String),

    /// No loaded record has this name
    #[error("Patient not found: {0}")]
    NotFound(String),
}

/// Immutable snapshot of the dashboard's list and selection
#[derive(Debug, Clone)]
pub struct DashboardState {
    status: LoadStatus,
    patients: Arc<Vec<Patient>>,
    selected: Option<Patient>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// Empty snapshot at view start
    pub fn new() -> Self {
        Self {
            status: LoadStatus::Loading,
            patients: Arc::new(Vec::new()),
            selected: None,
        }
    }

    /// Transition: a load succeeded
    ///
    /// The list is replaced wholesale. A previous selection survives only
    /// if an equal record is in the new list; otherwise the loader's
    /// default selection is used.
    pub fn loaded(&self, loaded: Loaded) -> Self {
        let Loaded { patients, selected } = loaded;

        let selected = match &self.selected {
            Some(current) if patients.contains(current) => Some(current.clone()),
            _ => selected.filter(|p| patients.contains(p)),
        };

        Self {
            status: LoadStatus::Ready {
                loaded_at: Utc::now(),
            },
            patients: Arc::new(patients),
            selected,
        }
    }

    /// Transition: the user picked `patient`
    ///
    /// The list is shared with the previous snapshot, not copied.
    pub fn selected(&self, patient: &Patient) -> Result<Self, SelectionError> {
        if !self.patients.contains(patient) {
            return Err(SelectionError::NotInList(patient.name.clone()));
        }

        Ok(Self {
            status: self.status.clone(),
            patients: Arc::clone(&self.patients),
            selected: Some(patient.clone()),
        })
    }

    /// Transition: select the first record with this exact name
    pub fn select_by_name(&self, name: &str) -> Result<Self, SelectionError> {
        let patient = self
            .patients
            .iter()
            .find(|p| p.has_name(name))
            .ok_or_else(|| SelectionError::NotFound(name.to_string()))?;

        self.selected(patient)
    }

    /// Transition: the load failed
    ///
    /// A failed fetch publishes nothing, so the list and selection from the
    /// last successful load stay in place (empty if there was none).
    pub fn failed(&self, reason: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::Failed {
                reason: reason.into(),
                failed_at: Utc::now(),
            },
            patients: Arc::clone(&self.patients),
            selected: self.selected.clone(),
        }
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn selected_patient(&self) -> Option<&Patient> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.status, LoadStatus::Ready { .. })
    }

    /// No records and not loading: the "no patient data" view
    pub fn is_empty(&self) -> bool {
        !self.is_loading() && self.patients.is_empty()
    }

    /// Whether `patient` is the current selection (compared by name, as
    /// the list panel highlights it)
    pub fn is_selected(&self, patient: &Patient) -> bool {
        self.selected
            .as_ref()
            .map(|s| s.name == patient.name)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::testing::sample_patients;
    use crate::loader::{select_default, DEFAULT_PATIENT_NAME};

    fn loaded(patients: Vec<Patient>) -> Loaded {
        let selected = select_default(&patients, DEFAULT_PATIENT_NAME);
        Loaded { patients, selected }
    }

    #[test]
    fn test_initial_state() {
        let state = DashboardState::new();

        assert!(state.is_loading());
        assert!(!state.is_empty());
        assert!(state.patients().is_empty());
        assert!(state.selected_patient().is_none());
    }

    #[test]
    fn test_loaded_transition() {
        let state = DashboardState::new().loaded(loaded(sample_patients()));

        assert!(state.is_ready());
        assert_eq!(state.patients(), sample_patients().as_slice());
        assert_eq!(state.selected_patient().map(|p| p.name.as_str()), Some("Jessica Taylor"));
    }

    #[test]
    fn test_select_keeps_list() {
        let state = DashboardState::new().loaded(loaded(sample_patients()));
        let ryan = state.patients()[2].clone();

        let next = state.selected(&ryan).unwrap();

        assert_eq!(next.selected_patient(), Some(&ryan));
        assert_eq!(next.patients(), state.patients());
        // Previous snapshot is untouched
        assert_eq!(state.selected_patient().map(|p| p.name.as_str()), Some("Jessica Taylor"));
    }

    #[test]
    fn test_select_unknown_record() {
        let state = DashboardState::new().loaded(loaded(sample_patients()));
        let stranger = Patient::new("Jessica Taylor").age(99);

        let err = state.selected(&stranger).unwrap_err();
        assert_eq!(err, SelectionError::NotInList("Jessica Taylor".to_string()));
    }

    #[test]
    fn test_select_by_name() {
        let state = DashboardState::new().loaded(loaded(sample_patients()));

        let next = state.select_by_name("Emily Williams").unwrap();
        assert!(next.is_selected(&state.patients()[0]));

        let err = state.select_by_name("Nobody").unwrap_err();
        assert_eq!(err, SelectionError::NotFound("Nobody".to_string()));
    }

    #[test]
    fn test_reload_keeps_present_selection() {
        let state = DashboardState::new()
            .loaded(loaded(sample_patients()))
            .select_by_name("Ryan Johnson")
            .unwrap();

        let reloaded = state.loaded(loaded(sample_patients()));
        assert_eq!(reloaded.selected_patient().map(|p| p.name.as_str()), Some("Ryan Johnson"));
    }

    #[test]
    fn test_reload_drops_dangling_selection() {
        let state = DashboardState::new()
            .loaded(loaded(sample_patients()))
            .select_by_name("Ryan Johnson")
            .unwrap();

        let smaller: Vec<Patient> = sample_patients().into_iter().take(2).collect();
        let reloaded = state.loaded(loaded(smaller));

        assert_eq!(reloaded.selected_patient().map(|p| p.name.as_str()), Some("Jessica Taylor"));
        assert!(reloaded
            .patients()
            .contains(reloaded.selected_patient().unwrap()));
    }

    #[test]
    fn test_loaded_without_default() {
        let state = DashboardState::new().loaded(loaded(vec![Patient::new("John Doe").id(2)]));

        assert_eq!(state.patients().len(), 1);
        assert!(state.selected_patient().is_none());
        assert!(!state.is_empty());
    }

    #[test]
    fn test_failed_transition() {
        let state = DashboardState::new().failed("Network response was not ok (HTTP 401): ");

        assert!(matches!(state.status(), LoadStatus::Failed { .. }));
        assert!(state.is_empty());
        assert!(state.selected_patient().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failed_after_load_keeps_data() {
        let before = DashboardState::new()
            .loaded(loaded(sample_patients()))
            .select_by_name("Ryan Johnson")
            .unwrap();

        let state = before.failed("Request timeout");

        assert!(matches!(state.status(), LoadStatus::Failed { .. }));
        assert!(!state.is_ready());
        assert_eq!(state.patients(), before.patients());
        assert_eq!(state.selected_patient().map(|p| p.name.as_str()), Some("Ryan Johnson"));
        assert!(!state.is_empty());
    }
}
