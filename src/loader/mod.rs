//! Patient Data Loader
//!
//! Fetches the patient list from the remote service and designates the
//! default selection.
//!
//! ## Data Flow
//!
//! 1. Caller obtains a Basic-Auth token from [`crate::credentials`]
//! 2. [`PatientSource::fetch`] performs one GET and parses the JSON array
//! 3. [`select_default`] scans for the default patient by exact name
//! 4. The list and selection are returned ([`load_patients`]) or assigned
//!    into a [`LoadSink`] ([`get_patient_data`])
//!
//! Failures are never retried; callers log them and move the dashboard to
//! its failed state.

mod client;
mod error;
mod load;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    parse_patients, HttpPatientSource, PatientSource, SourceConfig, DEFAULT_PATIENT_NAME,
    DEFAULT_SOURCE_URL,
};
pub use error::{LoadError, LoadResult};
pub use load::{get_patient_data, load_patients, select_default, LoadSink, Loaded};
