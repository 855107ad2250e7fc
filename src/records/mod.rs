//! Patient Records
//!
//! Typed model of the JSON served by the remote patient endpoint.

mod types;

pub use types::{BloodPressure, DiagnosisHistoryEntry, Diagnostic, Patient, Reading, ReadingValue};
