use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::TestDefinition;

pub const UNINTERPRETED_RESULT: &str = "Score could not be interpreted";
pub const UNINTERPRETED_RECOMMENDATION: &str = "No recommendation available";

// Fixed breakdown cut points. Fixtures also carry symptom_cutoffs and
// dimension_cutoffs, which are retained on ScoringRules but not consulted
// here; see DESIGN.md.
const LOW_CUTOFF: f32 = 0.3;
const MODERATE_CUTOFF: f32 = 0.7;

/// Question id -> selected option value, as collected by the test screen.
pub type AnswerSet = HashMap<String, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_normalized(score: f32) -> Self {
        if score < LOW_CUTOFF {
            Self::Low
        } else if score < MODERATE_CUTOFF {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainScore {
    pub name: String,
    pub score: f32,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: u32,
    pub normalized: f32,
    pub interpretation: String,
    pub recommendation: String,
    pub breakdown: Vec<DomainScore>,
}

/// Score an answer set against a loaded test definition.
///
/// Questions are visited in definition order. A missing answer contributes 0
/// without shrinking the denominator, a reverse-scored question contributes
/// `max - value`, and answer ids that match no question are ignored. The
/// interpretation is the first rule whose inclusive range contains the total;
/// a total outside every range yields the uninterpreted sentinel rather than
/// an error.
pub fn score(definition: &TestDefinition, answers: &AnswerSet) -> ScoreResult {
    let max = definition.max_option_value();

    let mut total = 0u32;
    let mut domains: Vec<(String, u32, u32)> = Vec::new();

    for question in &definition.items {
        let value = answers.get(&question.id).copied().unwrap_or(0).min(max);
        let contribution = if question.reverse_scored {
            max - value
        } else {
            value
        };

        total += contribution;
        match domains.iter_mut().find(|(name, _, _)| name == &question.domain) {
            Some((_, sum, count)) => {
                *sum += contribution;
                *count += 1;
            }
            None => domains.push((question.domain.clone(), contribution, 1)),
        }
    }

    let denominator = definition.question_count() as u32 * max;
    let normalized = if denominator == 0 {
        0.0
    } else {
        total as f32 / denominator as f32
    };

    let (interpretation, recommendation) = definition
        .scoring
        .interpretation
        .iter()
        .find(|rule| rule.range[0] <= total && total <= rule.range[1])
        .map(|rule| (rule.result.clone(), rule.recommendation.clone()))
        .unwrap_or_else(|| {
            (
                UNINTERPRETED_RESULT.to_string(),
                UNINTERPRETED_RECOMMENDATION.to_string(),
            )
        });

    let breakdown = domains
        .into_iter()
        .map(|(name, sum, count)| {
            let span = count * max;
            let domain_score = if span == 0 {
                0.0
            } else {
                sum as f32 / span as f32
            };
            DomainScore {
                name,
                score: domain_score,
                level: RiskLevel::from_normalized(domain_score),
            }
        })
        .collect();

    ScoreResult {
        total,
        normalized,
        interpretation,
        recommendation,
        breakdown,
    }
}
