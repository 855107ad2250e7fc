//! Load-and-select workflow
//!
//! Fetches the list once and picks the default selection by name. The
//! selection rule is kept as a pure function so it can be tested without
//! a network.

use super::client::PatientSource;
use super::error::LoadResult;
use crate::records::Patient;

/// Outcome of a successful load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded {
    /// Records in service order
    pub patients: Vec<Patient>,
    /// Default selection, if a record matched by name
    pub selected: Option<Patient>,
}

/// Destination for a successful load, assigned callback-style
pub trait LoadSink {
    fn set_patients(&mut self, patients: Vec<Patient>);
    fn set_selected(&mut self, selected: Option<Patient>);
}

/// Stages a load for a later `DashboardState::loaded` transition
impl LoadSink for Loaded {
    fn set_patients(&mut self, patients: Vec<Patient>) {
        self.patients = patients;
    }

    fn set_selected(&mut self, selected: Option<Patient>) {
        self.selected = selected;
    }
}

/// First record whose name equals `name` exactly
pub fn select_default(records: &[Patient], name: &str) -> Option<Patient> {
    records.iter().find(|p| p.has_name(name)).cloned()
}

/// Fetch the patient list and compute the default selection
pub async fn load_patients(
    source: &dyn PatientSource,
    token: &str,
    default_name: &str,
) -> LoadResult<Loaded> {
    tracing::info!(endpoint = %source.endpoint(), "Loading patient records");

    let patients = source.fetch(token).await?;
    let selected = select_default(&patients, default_name);

    match &selected {
        Some(p) => tracing::info!(
            count = patients.len(),
            selected = %p.name,
            "Patient records loaded"
        ),
        None => tracing::info!(
            count = patients.len(),
            default_name = %default_name,
            "Patient records loaded, default patient not present"
        ),
    }

    Ok(Loaded { patients, selected })
}

/// Load and publish into `sink`; the sink is only touched on success
pub async fn get_patient_data<S: LoadSink + ?Sized>(
    source: &dyn PatientSource,
    token: &str,
    default_name: &str,
    sink: &mut S,
) -> LoadResult<()> {
    let loaded = load_patients(source, token, default_name).await?;
    sink.set_patients(loaded.patients);
    sink.set_selected(loaded.selected);
    Ok(())
}
