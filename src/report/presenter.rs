//! Display-only derivations over an [`AnalysisResult`].
//!
//! Everything here is a pure function of the result: no I/O, no state.

use super::{AnalysisResult, Category, CategoryMap};
use std::fmt;

const HIGH_SEVERITY: [&str; 2] = ["Pneumonia", "COPD"];
const MEDIUM_SEVERITY: [&str; 2] = ["Asthma", "Bronchitis"];

/// Label the server uses for a healthy result.
pub const NORMAL_LABEL: &str = "Normal";

pub const DISCLAIMER: &str = "Note: This analysis is provided for informational purposes only \
and should not replace professional medical advice.";

/// Severity of the predicted disease, looked up from a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual tier of a confidence score. Variants are ordered by visual weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceBand {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl ConfidenceBand {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceBand::Poor => "poor",
            ConfidenceBand::Moderate => "moderate",
            ConfidenceBand::Good => "good",
            ConfidenceBand::Excellent => "excellent",
        }
    }
}

impl fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a disease label. Anything outside the two fixed sets is low.
pub fn severity_class(disease: &str) -> Severity {
    if HIGH_SEVERITY.contains(&disease) {
        Severity::High
    } else if MEDIUM_SEVERITY.contains(&disease) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Band a confidence score. Defined for any f64; NaN is `Poor`.
pub fn confidence_band(value: f64) -> ConfidenceBand {
    if value >= 90.0 {
        ConfidenceBand::Excellent
    } else if value >= 70.0 {
        ConfidenceBand::Good
    } else if value >= 50.0 {
        ConfidenceBand::Moderate
    } else {
        ConfidenceBand::Poor
    }
}

fn recommendation_label(category: Category) -> Option<&'static str> {
    match category {
        Category::DiseaseType => None,
        Category::Doctor => Some("Consult"),
        Category::Medicines => Some("Medicines"),
        Category::FoodsToInclude => Some("Diet - Include"),
        Category::FoodsToAvoid => Some("Diet - Avoid"),
        Category::Treatment => Some("Treatment"),
    }
}

/// One line per non-disease category: doctor, medicines, foods to include,
/// foods to avoid, treatment.
pub fn build_recommendations(predictions: &CategoryMap<String>) -> Vec<String> {
    predictions
        .iter()
        .filter_map(|(category, text)| {
            recommendation_label(category).map(|label| format!("{}: {}", label, text))
        })
        .collect()
}

/// Format a confidence the way it is shown next to each item.
pub fn format_confidence(value: f64) -> String {
    format!("{}%", value)
}

const METER_WIDTH: usize = 20;

/// One rendered (prediction, confidence) line item.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportItem {
    pub category: Category,
    pub text: String,
    pub confidence: f64,
    pub band: ConfidenceBand,
}

impl ReportItem {
    /// Confidence clamped to [0, 100] for meter display.
    pub fn meter(&self) -> f64 {
        if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence.clamp(0.0, 100.0)
        }
    }

    /// Fixed-width text bar filled in proportion to [`ReportItem::meter`].
    pub fn meter_bar(&self) -> String {
        let filled = ((self.meter() / 100.0) * METER_WIDTH as f64).round() as usize;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(METER_WIDTH - filled))
    }
}

/// Fully derived view of an analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub disease: String,
    /// False only for the literal `Normal` label.
    pub flagged: bool,
    pub severity: Severity,
    pub items: Vec<ReportItem>,
    pub recommendations: Vec<String>,
    pub status: String,
}

/// Derive the report for a result.
pub fn render(result: &AnalysisResult) -> Report {
    let items = result
        .entries()
        .map(|p| ReportItem {
            category: p.category,
            text: p.text.to_string(),
            confidence: p.confidence,
            band: confidence_band(p.confidence),
        })
        .collect();

    Report {
        disease: result.disease().to_string(),
        flagged: result.disease() != NORMAL_LABEL,
        severity: severity_class(result.disease()),
        items,
        recommendations: build_recommendations(&result.predictions),
        status: result.status.clone(),
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.flagged { "!" } else { " " };
        writeln!(f, "Analysis Results [{}] {}", self.disease, marker)?;
        writeln!(f, "Prediction Details:")?;
        for item in &self.items {
            writeln!(
                f,
                "  {:<36} {} {:>7} ({})",
                item.category.wire_key(),
                item.meter_bar(),
                format_confidence(item.confidence),
                item.band
            )?;
            writeln!(f, "      {}", item.text)?;
        }
        writeln!(f, "Severity: {}", self.severity)?;
        writeln!(f, "Recommendations:")?;
        for rec in &self.recommendations {
            writeln!(f, "  - {}", rec)?;
        }
        if !self.status.is_empty() {
            writeln!(f, "Status: {}", self.status)?;
        }
        write!(f, "{}", DISCLAIMER)
    }
}
