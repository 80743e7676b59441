//! Vital-sign input handling.
//!
//! Holds the five editable fields, validates them in a fixed order and
//! produces the typed request body sent to the inference server.

mod form;
mod request;

pub use form::*;
pub use request::*;

use std::fmt;
use thiserror::Error;

/// The five user-editable fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VitalsField {
    Age,
    SpO2,
    HeartRate,
    BloodPressure,
    Symptoms,
}

impl VitalsField {
    /// Numeric fields in validation order. The first failure wins.
    pub const NUMERIC: [VitalsField; 4] = [
        VitalsField::Age,
        VitalsField::SpO2,
        VitalsField::HeartRate,
        VitalsField::BloodPressure,
    ];

    pub const ALL: [VitalsField; 5] = [
        VitalsField::Age,
        VitalsField::SpO2,
        VitalsField::HeartRate,
        VitalsField::BloodPressure,
        VitalsField::Symptoms,
    ];

    /// Label as used on the wire and in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            VitalsField::Age => "Age",
            VitalsField::SpO2 => "SpO2",
            VitalsField::HeartRate => "Heart Rate (BPM)",
            VitalsField::BloodPressure => "Blood Pressure (Systolic)",
            VitalsField::Symptoms => "Symptoms",
        }
    }

    /// Resolve a short name (`age`, `spo2`, `hr`, `bp`, `symptoms`) or a full label.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "age" => Some(VitalsField::Age),
            "spo2" => Some(VitalsField::SpO2),
            "hr" | "heart_rate" | "heart rate (bpm)" => Some(VitalsField::HeartRate),
            "bp" | "blood_pressure" | "blood pressure (systolic)" => Some(VitalsField::BloodPressure),
            "symptoms" => Some(VitalsField::Symptoms),
            _ => None,
        }
    }
}

impl fmt::Display for VitalsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Client-side validation failures. Only the first failing field is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid number for {0}")]
    InvalidNumber(VitalsField),
    #[error("Please enter symptoms (comma-separated)")]
    MissingSymptoms,
}

impl ValidationError {
    /// The field the message is about.
    pub fn field(&self) -> VitalsField {
        match self {
            ValidationError::InvalidNumber(field) => *field,
            ValidationError::MissingSymptoms => VitalsField::Symptoms,
        }
    }
}
