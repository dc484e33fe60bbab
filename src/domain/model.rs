use serde::{Deserialize, Serialize};

/// Field names submitted by the passenger form.
pub mod fields {
    pub const TICKET_CLASS: &str = "pclass";
    pub const SEX: &str = "sexo";
    pub const AGE: &str = "edad";
    pub const SIBLINGS_SPOUSES: &str = "sibsp";
    pub const PARENTS_CHILDREN: &str = "parch";
    pub const FARE: &str = "tarifa";
    pub const EMBARK_PORT: &str = "embarcado";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    const FEMALE_SYNONYMS: [&'static str; 4] = ["femenino", "mujer", "female", "f"];

    /// Anything outside the female synonym set is treated as male.
    pub fn from_form(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if Self::FEMALE_SYNONYMS.contains(&normalized.as_str()) {
            Sex::Female
        } else {
            Sex::Male
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Sex::Female => 1,
            Sex::Male => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbarkPort {
    Cherbourg,
    Queenstown,
    Southampton,
}

impl EmbarkPort {
    /// Unrecognized and empty values fall back to Southampton.
    pub fn from_form(raw: &str) -> Self {
        match raw.trim().to_uppercase().as_str() {
            "C" | "CHERBURGO" | "CHERBOURGH" => EmbarkPort::Cherbourg,
            "Q" | "QUEENSTOWN" => EmbarkPort::Queenstown,
            _ => EmbarkPort::Southampton,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            EmbarkPort::Cherbourg => 0,
            EmbarkPort::Queenstown => 1,
            EmbarkPort::Southampton => 2,
        }
    }
}

/// How absent optional numeric fields are handled during encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MissingValuePolicy {
    /// Every field except `sexo` and `embarcado` must be present.
    #[default]
    Strict,
    /// Missing age, relatives and fare default to zero.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerQuery {
    pub ticket_class: u8,
    pub sex: Sex,
    pub age: f64,
    pub siblings_spouses: u32,
    pub parents_children: u32,
    pub fare: f64,
    pub embark_port: EmbarkPort,
}

/// Classifier input, in the column order the model was trained on:
/// `[pclass, sex, age, sibsp, parch, fare, embarked]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FeatureVector::LEN]);

impl FeatureVector {
    pub const LEN: usize = 7;

    pub const SCHEMA: [&'static str; FeatureVector::LEN] =
        ["pclass", "sex", "age", "sibsp", "parch", "fare", "embarked"];

    pub fn new(values: [f64; FeatureVector::LEN]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FeatureVector::LEN] {
        &self.0
    }

    pub fn ticket_class(&self) -> f64 {
        self.0[0]
    }

    pub fn sex_code(&self) -> f64 {
        self.0[1]
    }

    pub fn age(&self) -> f64 {
        self.0[2]
    }

    pub fn embark_code(&self) -> f64 {
        self.0[6]
    }
}

impl From<&PassengerQuery> for FeatureVector {
    fn from(query: &PassengerQuery) -> Self {
        Self([
            f64::from(query.ticket_class),
            f64::from(query.sex.code()),
            query.age,
            f64::from(query.siblings_spouses),
            f64::from(query.parents_children),
            query.fare,
            f64::from(query.embark_port.code()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub survived: bool,
    pub confidence_percent: Option<f64>,
    pub rationale: Vec<String>,
}

impl PredictionResult {
    pub fn verdict(&self) -> &'static str {
        if self.survived {
            "You would survive!"
        } else {
            "You would not survive..."
        }
    }

    pub fn confidence_label(&self) -> String {
        match self.confidence_percent {
            Some(percent) => format!("{:.1}%", percent),
            None => "N/A".to_string(),
        }
    }

    pub fn explanation(&self) -> String {
        self.rationale.join(", ")
    }
}
