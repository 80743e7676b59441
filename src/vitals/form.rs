//! Raw form values and their validation.

use super::{AnalysisRequest, ValidationError, VitalsField};

/// Raw text of the five fields exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VitalsInput {
    pub age: String,
    pub spo2: String,
    pub heart_rate: String,
    pub blood_pressure: String,
    pub symptoms: String,
}

impl VitalsInput {
    pub fn get(&self, field: VitalsField) -> &str {
        match field {
            VitalsField::Age => &self.age,
            VitalsField::SpO2 => &self.spo2,
            VitalsField::HeartRate => &self.heart_rate,
            VitalsField::BloodPressure => &self.blood_pressure,
            VitalsField::Symptoms => &self.symptoms,
        }
    }

    pub fn set(&mut self, field: VitalsField, value: impl Into<String>) {
        let slot = match field {
            VitalsField::Age => &mut self.age,
            VitalsField::SpO2 => &mut self.spo2,
            VitalsField::HeartRate => &mut self.heart_rate,
            VitalsField::BloodPressure => &mut self.blood_pressure,
            VitalsField::Symptoms => &mut self.symptoms,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        VitalsField::ALL.iter().all(|f| self.get(*f).is_empty())
    }

    /// Symptoms split on commas, trimmed, blanks dropped.
    pub fn symptom_list(&self) -> Vec<&str> {
        self.symptoms
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validate the numeric fields in fixed order, then the symptoms.
    ///
    /// Values are not range checked: a negative age is forwarded as-is.
    pub fn validate(&self) -> Result<AnalysisRequest, ValidationError> {
        let mut values = [0.0_f64; 4];
        for (slot, field) in values.iter_mut().zip(VitalsField::NUMERIC) {
            *slot = parse_number(self.get(field)).ok_or(ValidationError::InvalidNumber(field))?;
        }

        if self.symptoms.trim().is_empty() {
            return Err(ValidationError::MissingSymptoms);
        }

        let [age, spo2, heart_rate, blood_pressure] = values;
        Ok(AnalysisRequest {
            age,
            spo2,
            heart_rate,
            blood_pressure,
            symptoms: self.symptoms.clone(),
        })
    }
}

/// Parse a field as a finite number. Blank counts as missing.
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The editable form. Owned by the orchestrating [`crate::app::AppState`].
#[derive(Debug, Clone, Default)]
pub struct VitalsForm {
    input: VitalsInput,
}

impl VitalsForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &VitalsInput {
        &self.input
    }

    pub fn set_field(&mut self, field: VitalsField, value: impl Into<String>) {
        self.input.set(field, value);
    }

    pub fn validate(&self) -> Result<AnalysisRequest, ValidationError> {
        self.input.validate()
    }

    /// Reset all five fields to empty.
    pub fn clear(&mut self) {
        self.input = VitalsInput::default();
    }
}
