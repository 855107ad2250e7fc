//! Dashboard View Layer
//!
//! Turns a dashboard snapshot into the three panels:
//!
//! - **Patients**: the loaded list with the selection highlighted
//! - **Diagnosis**: blood-pressure chart series, vitals cards, diagnosis list
//! - **Detail**: profile fields and lab results
//!
//! The models are serialized by the API and rendered as text by the CLI.

mod panels;
mod text;

pub use panels::{
    patient_list, BloodPressureChart, ChartSeries, DashboardView, DetailPanel, DiagnosisPanel,
    DiagnosticRow, Panels, PatientListItem, PressureComponent, VitalCard, BLOOD_PRESSURE_LABEL,
    EMPTY_MESSAGE, LOADING_MESSAGE, NO_LAB_RESULTS_MESSAGE,
};
pub use text::{render_detail, render_diagnosis, render_patient_list, render_text};
