use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback option ceiling for tests whose fixtures carry no option data.
pub const DEFAULT_MAX_OPTION_VALUE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDefinition {
    pub text: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: String,
    pub text: String,
    pub domain: String,
    #[serde(default)]
    pub reverse_scored: bool,
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    /// Inclusive `[low, high]` total-score range.
    pub range: [u32; 2],
    pub result: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_score_ranges: Option<BTreeMap<String, [u32; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_cutoffs: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_cutoffs: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub interpretation: Vec<Interpretation>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("no interpretation ranges defined")]
    Empty,
    #[error("interpretation range {index} is inverted ({low} > {high})")]
    Inverted { index: usize, low: u32, high: u32 },
    #[error("interpretation ranges {prev} and {next} overlap")]
    Overlapping { prev: usize, next: usize },
    #[error("gap between interpretation ranges {prev} and {next}")]
    Gap { prev: usize, next: usize },
}

impl ScoringRules {
    /// Interpretation ranges must be sorted ascending, contiguous and
    /// non-overlapping. The generator rejects artifacts that violate this;
    /// the scorer assumes it holds.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.interpretation.is_empty() {
            return Err(RulesError::Empty);
        }

        for (index, rule) in self.interpretation.iter().enumerate() {
            let [low, high] = rule.range;
            if low > high {
                return Err(RulesError::Inverted { index, low, high });
            }
        }

        for (prev, pair) in self.interpretation.windows(2).enumerate() {
            let (Some(a), Some(b)) = (pair.first(), pair.get(1)) else {
                continue;
            };
            let next = prev + 1;
            if b.range[0] <= a.range[1] {
                return Err(RulesError::Overlapping { prev, next });
            }
            if b.range[0] > a.range[1] + 1 {
                return Err(RulesError::Gap { prev, next });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestMetadata {
    pub assessment_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub normative_data: String,
}

/// A fully loaded test: the shape of one generated quiz fixture, minus the
/// presentation fields the scorer does not consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<QuestionDefinition>,
    pub scoring: ScoringRules,
    #[serde(default)]
    pub metadata: Option<TestMetadata>,
}

impl TestDefinition {
    pub fn question_count(&self) -> usize {
        self.items.len()
    }

    /// The per-test option ceiling N. Derived from the loaded options rather
    /// than hardcoded so reverse-scoring and denominators stay correct for
    /// any scale the generator emits.
    pub fn max_option_value(&self) -> u32 {
        self.items
            .iter()
            .flat_map(|q| q.options.iter().map(|o| o.value))
            .max()
            .unwrap_or(DEFAULT_MAX_OPTION_VALUE)
    }
}
