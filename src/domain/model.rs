use serde::{Deserialize, Serialize};

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub name: String,
    pub foods_to_eat: Vec<String>,
    pub foods_to_avoid: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl DiseaseRecord {
    pub fn eat_text(&self) -> String {
        self.foods_to_eat.join(", ")
    }

    pub fn avoid_text(&self) -> String {
        self.foods_to_avoid.join(", ")
    }
}

/// Dietary preferences chosen by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub low_sugar: bool,
    #[serde(default)]
    pub low_sodium: bool,
}

impl PreferenceSet {
    pub fn new(vegetarian: bool, low_sugar: bool, low_sodium: bool) -> Self {
        Self {
            vegetarian,
            low_sugar,
            low_sodium,
        }
    }

    pub fn any(&self) -> bool {
        self.vegetarian || self.low_sugar || self.low_sodium
    }
}

/// A record after preference redaction, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredRecord {
    pub name: String,
    pub foods_to_eat: String,
    pub foods_to_avoid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum LookupOutcome {
    EmptyQuery,
    NoMatch,
    Found(Vec<FilteredRecord>),
}

impl LookupOutcome {
    pub fn records(&self) -> &[FilteredRecord] {
        match self {
            LookupOutcome::Found(records) => records,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub suitable_for: Vec<String>,
}
