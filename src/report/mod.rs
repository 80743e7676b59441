//! Analysis results and their presentation.
//!
//! The inference server answers with six parallel (prediction, confidence)
//! pairs keyed by fixed category names. [`AnalysisResult`] keeps them in
//! that fixed order; the presenter derives everything shown to the user.

mod presenter;

pub use presenter::*;

use serde::{Deserialize, Serialize};

/// The six result categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    DiseaseType,
    Doctor,
    Medicines,
    FoodsToInclude,
    FoodsToAvoid,
    Treatment,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::DiseaseType,
        Category::Doctor,
        Category::Medicines,
        Category::FoodsToInclude,
        Category::FoodsToAvoid,
        Category::Treatment,
    ];

    /// Key used by the inference server.
    pub fn wire_key(self) -> &'static str {
        match self {
            Category::DiseaseType => "What type of disease",
            Category::Doctor => "Which doctor to consult",
            Category::Medicines => "What medicines we have to take",
            Category::FoodsToInclude => "What foods we have to take",
            Category::FoodsToAvoid => "What foods we have to avoid",
            Category::Treatment => "What treatment we have to undergo",
        }
    }
}

/// One value per category, serialized under the server's keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap<T> {
    #[serde(rename = "What type of disease")]
    pub disease_type: T,
    #[serde(rename = "Which doctor to consult")]
    pub doctor: T,
    #[serde(rename = "What medicines we have to take")]
    pub medicines: T,
    #[serde(rename = "What foods we have to take")]
    pub foods_to_include: T,
    #[serde(rename = "What foods we have to avoid")]
    pub foods_to_avoid: T,
    #[serde(rename = "What treatment we have to undergo")]
    pub treatment: T,
}

impl<T> CategoryMap<T> {
    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::DiseaseType => &self.disease_type,
            Category::Doctor => &self.doctor,
            Category::Medicines => &self.medicines,
            Category::FoodsToInclude => &self.foods_to_include,
            Category::FoodsToAvoid => &self.foods_to_avoid,
            Category::Treatment => &self.treatment,
        }
    }

    /// Values paired with their category, in [`Category::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// A successful analysis as returned by `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub predictions: CategoryMap<String>,
    pub confidences: CategoryMap<f64>,
    #[serde(default)]
    pub status: String,
}

/// A single (prediction, confidence) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction<'a> {
    pub category: Category,
    pub text: &'a str,
    pub confidence: f64,
}

impl AnalysisResult {
    pub fn prediction(&self, category: Category) -> Prediction<'_> {
        Prediction {
            category,
            text: self.predictions.get(category),
            confidence: *self.confidences.get(category),
        }
    }

    /// All six pairs in category order.
    pub fn entries(&self) -> impl Iterator<Item = Prediction<'_>> + '_ {
        Category::ALL.into_iter().map(move |c| self.prediction(c))
    }

    pub fn disease(&self) -> &str {
        &self.predictions.disease_type
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_deserialize_server_body() {
        let result = sample_result();
        assert_eq!(result.disease(), "Pneumonia");
        assert_eq!(result.predictions.doctor, "Pulmonologist");
        assert_eq!(result.confidences.foods_to_avoid, 49.9);
        assert_eq!(result.confidences.doctor, 88.0);
        assert_eq!(result.status, "success");
    }

    #[test]
    fn test_entries_follow_category_order() {
        let result = sample_result();
        let keys: Vec<&str> = result.entries().map(|p| p.category.wire_key()).collect();
        assert_eq!(
            keys,
            vec![
                "What type of disease",
                "Which doctor to consult",
                "What medicines we have to take",
                "What foods we have to take",
                "What foods we have to avoid",
                "What treatment we have to undergo",
            ]
        );

        let treatment = result.prediction(Category::Treatment);
        assert_eq!(treatment.text, "Chest physiotherapy");
        assert_eq!(treatment.confidence, 90.0);
    }

    #[test]
    fn test_missing_status_defaults_to_empty() {
        let mut body = sample_body();
        body.as_object_mut().unwrap().remove("status");
        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.status, "");
    }

    #[test]
    fn test_missing_category_is_rejected() {
        let mut body = sample_body();
        body["predictions"]
            .as_object_mut()
            .unwrap()
            .remove("What treatment we have to undergo");
        assert!(serde_json::from_value::<AnalysisResult>(body).is_err());
    }

    #[test]
    fn test_serialize_uses_server_keys() {
        let value = serde_json::to_value(sample_result()).unwrap();
        for category in Category::ALL {
            assert!(value["predictions"][category.wire_key()].is_string());
            assert!(value["confidences"][category.wire_key()].is_number());
        }
        let back: AnalysisResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, sample_result());
    }
}
