//! Dashboard view models
//!
//! Pure projections of a [`DashboardState`] into the three panels. Nothing
//! here fetches or mutates; the API serializes these directly and the CLI
//! renders them as text.

use serde::Serialize;

use crate::dashboard::DashboardState;
use crate::records::{DiagnosisHistoryEntry, Patient, Reading};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No patient data available.";
pub const NO_LAB_RESULTS_MESSAGE: &str = "No lab results available.";

/// Label shared by both blood-pressure series
pub const BLOOD_PRESSURE_LABEL: &str = "Blood Pressure";

/// What the dashboard shows for a given snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    Loading { message: String },
    Empty { message: String },
    Ready(Panels),
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        if state.is_loading() {
            return DashboardView::Loading {
                message: LOADING_MESSAGE.to_string(),
            };
        }

        if state.is_empty() {
            return DashboardView::Empty {
                message: EMPTY_MESSAGE.to_string(),
            };
        }

        DashboardView::Ready(Panels::from_state(state))
    }
}

/// The three dashboard columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panels {
    pub patients: Vec<PatientListItem>,
    /// Present only when a patient is selected
    pub diagnosis: Option<DiagnosisPanel>,
    /// Present only when a patient is selected
    pub detail: Option<DetailPanel>,
}

impl Panels {
    pub fn from_state(state: &DashboardState) -> Self {
        let selected = state.selected_patient();

        Self {
            patients: patient_list(state),
            diagnosis: selected.map(DiagnosisPanel::from_patient),
            detail: selected.map(DetailPanel::from_patient),
        }
    }
}

/// One row of the patient list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientListItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    /// "gender, age"
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub selected: bool,
}

/// Patient list panel, in load order
pub fn patient_list(state: &DashboardState) -> Vec<PatientListItem> {
    state
        .patients()
        .iter()
        .map(|p| PatientListItem {
            id: p.id,
            name: p.name.clone(),
            summary: p.summary(),
            profile_picture: p.profile_picture.clone(),
            selected: state.is_selected(p),
        })
        .collect()
}

/// Middle column: chart, vitals cards and diagnosis list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisPanel {
    pub chart: BloodPressureChart,
    pub vitals: Vec<VitalCard>,
    pub diagnostics: Vec<DiagnosticRow>,
}

impl DiagnosisPanel {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            chart: BloodPressureChart::from_history(&patient.diagnosis_history),
            vitals: VitalCard::latest(patient.latest_entry()),
            diagnostics: patient
                .diagnostic_list
                .iter()
                .map(|d| DiagnosticRow {
                    problem: d.name.clone(),
                    description: d.description.clone(),
                    status: d.status.clone(),
                })
                .collect(),
        }
    }
}

/// Which blood-pressure component a series plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureComponent {
    Diastolic,
    Systolic,
}

/// One plotted line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub component: PressureComponent,
    pub values: Vec<f64>,
}

/// Blood-pressure history, oldest month first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodPressureChart {
    /// "<month> <year>" per point
    pub labels: Vec<String>,
    /// Diastolic series, then systolic
    pub series: Vec<ChartSeries>,
}

impl BloodPressureChart {
    /// Build the chart from history stored most-recent-first
    pub fn from_history(history: &[DiagnosisHistoryEntry]) -> Self {
        let labels = history.iter().rev().map(|e| e.label()).collect();
        let diastolic = history
            .iter()
            .rev()
            .map(|e| e.blood_pressure.diastolic.as_f64())
            .collect();
        let systolic = history
            .iter()
            .rev()
            .map(|e| e.blood_pressure.systolic.as_f64())
            .collect();

        Self {
            labels,
            series: vec![
                ChartSeries {
                    label: BLOOD_PRESSURE_LABEL.to_string(),
                    component: PressureComponent::Diastolic,
                    values: diastolic,
                },
                ChartSeries {
                    label: BLOOD_PRESSURE_LABEL.to_string(),
                    component: PressureComponent::Systolic,
                    values: systolic,
                },
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn values(&self, component: PressureComponent) -> &[f64] {
        self.series
            .iter()
            .find(|s| s.component == component)
            .map(|s| s.values.as_slice())
            .unwrap_or(&[])
    }
}

/// One vitals card under the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalCard {
    pub label: String,
    pub unit: String,
    /// Missing when there is no history or the entry lacks this vital
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub levels: Option<String>,
}

impl VitalCard {
    fn new(label: &str, unit: &str, reading: Option<&Reading>) -> Self {
        Self {
            label: label.to_string(),
            unit: unit.to_string(),
            value: reading.map(Reading::as_f64),
            levels: reading.and_then(|r| r.levels.clone()),
        }
    }

    /// Respiratory rate, temperature and heart rate from the latest entry
    pub fn latest(entry: Option<&DiagnosisHistoryEntry>) -> Vec<Self> {
        vec![
            Self::new(
                "Respiratory Rate",
                "bpm",
                entry.and_then(|e| e.respiratory_rate.as_ref()),
            ),
            Self::new(
                "Temperature",
                "°F",
                entry.and_then(|e| e.temperature.as_ref()),
            ),
            Self::new(
                "Heart Rate",
                "bpm",
                entry.and_then(|e| e.heart_rate.as_ref()),
            ),
        ]
    }
}

/// One row of the diagnosis list table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticRow {
    pub problem: String,
    pub description: String,
    pub status: String,
}

/// Right column: profile and lab results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPanel {
    pub name: String,
    pub profile_picture: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub contact_info: Option<String>,
    pub emergency_contacts: Option<String>,
    pub insurance_provider: Option<String>,
    pub lab_results: Vec<String>,
}

impl DetailPanel {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            profile_picture: patient.profile_picture.clone(),
            date_of_birth: patient.date_of_birth.clone(),
            gender: patient.gender.clone(),
            contact_info: patient.phone_number.clone(),
            emergency_contacts: patient.emergency_contact.clone(),
            insurance_provider: patient.insurance_type.clone(),
            lab_results: patient.lab_results.clone(),
        }
    }
}
