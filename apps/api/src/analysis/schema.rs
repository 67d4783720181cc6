//! Typed shape of the visa analysis and the optional validation step.
//!
//! Validation is opt-in (`ANALYSIS_SCHEMA_VALIDATION`). With it off, any JSON
//! the model returns is passed through as the analysis.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The six visa categories, keyed as they appear under `"visas"`.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VisaCategory {
    H1B,
    O1A,
    O1B,
    EB2,
    EB3,
    L1,
}

impl VisaCategory {
    pub const ALL: [VisaCategory; 6] = [
        VisaCategory::H1B,
        VisaCategory::O1A,
        VisaCategory::O1B,
        VisaCategory::EB2,
        VisaCategory::EB3,
        VisaCategory::L1,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            VisaCategory::H1B => "H1B",
            VisaCategory::O1A => "O1A",
            VisaCategory::O1B => "O1B",
            VisaCategory::EB2 => "EB2",
            VisaCategory::EB3 => "EB3",
            VisaCategory::L1 => "L1",
        }
    }
}

impl fmt::Display for VisaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eligibility {
    Yes,
    Maybe,
    No,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisaAssessment {
    pub eligible: Eligibility,
    pub confidence: u8, // 1 – 10
    pub reasoning: String,
    pub requirements_met: Vec<String>,
    pub requirements_missing: Vec<String>,
    pub next_steps: Vec<String>,
    pub timeline: String,
    pub estimated_cost: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub visas: BTreeMap<VisaCategory, VisaAssessment>,
    pub recommended_path: String,
    pub overall_assessment: String,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("AI response does not match the analysis shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("AI response is missing visa category {0}")]
    MissingVisa(VisaCategory),

    #[error("AI response has confidence {confidence} for {visa}; expected 1-10")]
    ConfidenceOutOfRange { visa: VisaCategory, confidence: u8 },
}

/// Checks a parsed reply against the analysis shape: field types, the
/// `eligible` domain, all six visa keys, and confidence within 1–10.
pub fn validate_analysis(value: &Value) -> Result<AnalysisResult, SchemaError> {
    let result = AnalysisResult::deserialize(value)?;

    for visa in VisaCategory::ALL {
        let assessment = result
            .visas
            .get(&visa)
            .ok_or(SchemaError::MissingVisa(visa))?;
        if !(1..=10).contains(&assessment.confidence) {
            return Err(SchemaError::ConfidenceOutOfRange {
                visa,
                confidence: assessment.confidence,
            });
        }
    }

    Ok(result)
}
