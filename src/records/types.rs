//! Patient record types
//!
//! Mirrors the JSON shape served by the remote patient endpoint:
//! - `Patient`: One patient's full profile
//! - `DiagnosisHistoryEntry`: A monthly vitals snapshot
//! - `BloodPressure` and `Reading`: Measured values with an optional level
//! - `Diagnostic`: One row of the diagnosis list
//!
//! Optional profile fields are skipped on serialization when absent, so a
//! parsed list serializes back to an equal list.

use serde::{Deserialize, Serialize};

/// A patient's full profile as returned by the remote service
///
/// `name`, `diagnosis_history`, `diagnostic_list` and `lab_results` are
/// required; a payload missing any of them fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Identifier (not every deployment of the service sends one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Full display name, also the key used for default selection
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Date of birth as sent by the service (e.g. "08/23/1996")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_type: Option<String>,
    /// URL of the profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Monthly history, most recent entry first
    pub diagnosis_history: Vec<DiagnosisHistoryEntry>,
    pub diagnostic_list: Vec<Diagnostic>,
    /// Opaque lab result references (e.g. "Blood Tests")
    pub lab_results: Vec<String>,
}

impl Patient {
    /// Create a patient with only a name and empty histories
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            gender: None,
            age: None,
            date_of_birth: None,
            phone_number: None,
            emergency_contact: None,
            insurance_type: None,
            profile_picture: None,
            diagnosis_history: Vec::new(),
            diagnostic_list: Vec::new(),
            lab_results: Vec::new(),
        }
    }

    /// Builder method: set identifier
    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Builder method: set gender
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Builder method: set age
    pub fn age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Builder method: set date of birth
    pub fn date_of_birth(mut self, date: impl Into<String>) -> Self {
        self.date_of_birth = Some(date.into());
        self
    }

    /// Builder method: set phone number
    pub fn phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Builder method: set emergency contact
    pub fn emergency_contact(mut self, phone: impl Into<String>) -> Self {
        self.emergency_contact = Some(phone.into());
        self
    }

    /// Builder method: set insurance type
    pub fn insurance_type(mut self, insurance: impl Into<String>) -> Self {
        self.insurance_type = Some(insurance.into());
        self
    }

    /// Builder method: set profile picture URL
    pub fn profile_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture = Some(url.into());
        self
    }

    /// Builder method: append a history entry (most recent first)
    pub fn history(mut self, entry: DiagnosisHistoryEntry) -> Self {
        self.diagnosis_history.push(entry);
        self
    }

    /// Builder method: append a diagnosis-list row
    pub fn diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic_list.push(diagnostic);
        self
    }

    /// Builder method: append a lab result reference
    pub fn lab_result(mut self, result: impl Into<String>) -> Self {
        self.lab_results.push(result.into());
        self
    }

    /// Most recent history entry, if any
    pub fn latest_entry(&self) -> Option<&DiagnosisHistoryEntry> {
        self.diagnosis_history.first()
    }

    /// "gender, age" line shown under the name in the patient list
    pub fn summary(&self) -> String {
        match (self.gender.as_deref(), self.age) {
            (Some(gender), Some(age)) => format!("{}, {}", gender, age),
            (Some(gender), None) => gender.to_string(),
            (None, Some(age)) => age.to_string(),
            (None, None) => String::new(),
        }
    }

    /// Check if this patient has a specific name
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }
}

/// One month of recorded vitals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosisHistoryEntry {
    /// Month name (e.g. "March")
    pub month: String,
    pub year: i32,
    pub blood_pressure: BloodPressure,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<Reading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<Reading>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Reading>,
}

impl DiagnosisHistoryEntry {
    /// Create an entry with just a blood-pressure reading
    pub fn new(
        month: impl Into<String>,
        year: i32,
        systolic: impl Into<ReadingValue>,
        diastolic: impl Into<ReadingValue>,
    ) -> Self {
        Self {
            month: month.into(),
            year,
            blood_pressure: BloodPressure {
                systolic: Reading::new(systolic),
                diastolic: Reading::new(diastolic),
            },
            heart_rate: None,
            respiratory_rate: None,
            temperature: None,
        }
    }

    /// Builder method: set heart rate (bpm)
    pub fn heart_rate(mut self, bpm: impl Into<ReadingValue>) -> Self {
        self.heart_rate = Some(Reading::new(bpm));
        self
    }

    /// Builder method: set respiratory rate (bpm)
    pub fn respiratory_rate(mut self, bpm: impl Into<ReadingValue>) -> Self {
        self.respiratory_rate = Some(Reading::new(bpm));
        self
    }

    /// Builder method: set temperature (°F)
    pub fn temperature(mut self, degrees: impl Into<ReadingValue>) -> Self {
        self.temperature = Some(Reading::new(degrees));
        self
    }

    /// Chart label, "<month> <year>"
    pub fn label(&self) -> String {
        format!("{} {}", self.month, self.year)
    }
}

/// Systolic and diastolic pressure pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodPressure {
    pub systolic: Reading,
    pub diastolic: Reading,
}

/// A measured value with the service's qualitative level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub value: ReadingValue,
    /// e.g. "Higher than Average", "Normal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<String>,
}

impl Reading {
    pub fn new(value: impl Into<ReadingValue>) -> Self {
        Self {
            value: value.into(),
            levels: None,
        }
    }

    /// Builder method: set level
    pub fn levels(mut self, levels: impl Into<String>) -> Self {
        self.levels = Some(levels.into());
        self
    }

    pub fn as_f64(&self) -> f64 {
        self.value.as_f64()
    }
}

/// Numeric reading in the form the service sent it
///
/// The service mixes whole numbers (`160`) and decimals (`98.6`); keeping
/// the distinction means a parsed record serializes back unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ReadingValue {
    Integer(i64),
    Float(f64),
}

impl ReadingValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            ReadingValue::Integer(v) => v as f64,
            ReadingValue::Float(v) => v,
        }
    }
}

impl From<i64> for ReadingValue {
    fn from(value: i64) -> Self {
        ReadingValue::Integer(value)
    }
}

impl From<i32> for ReadingValue {
    fn from(value: i32) -> Self {
        ReadingValue::Integer(value.into())
    }
}

impl From<f64> for ReadingValue {
    fn from(value: f64) -> Self {
        ReadingValue::Float(value)
    }
}

/// One row of the diagnosis list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    pub name: String,
    pub description: String,
    /// e.g. "Under Observation", "Cured", "Inactive"
    pub status: String,
}

impl Diagnostic {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: status.into(),
        }
    }
}
