use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::model::{RulesError, TestDefinition};
use crate::scoring::{score, AnswerSet, ScoreResult};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("fixture decode error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid scoring rules in test {test_id}: {source}")]
    InvalidRules {
        test_id: String,
        #[source]
        source: RulesError,
    },
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("unknown test: {0}")]
    UnknownTest(String),
}

/// The static test-definition store: every quiz fixture from a directory,
/// validated once at load and immutable afterwards.
#[derive(Debug, Default)]
pub struct TestRegistry {
    tests: HashMap<String, TestDefinition>,
}

impl TestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*_quiz.json` fixture under `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let path = entry?.path();
            let is_quiz = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("_quiz.json"));
            if !is_quiz {
                continue;
            }
            let bytes = fs::read(&path)?;
            let definition: TestDefinition = serde_json::from_slice(&bytes)?;
            registry.insert(definition)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, definition: TestDefinition) -> Result<(), RegistryError> {
        definition
            .scoring
            .validate()
            .map_err(|source| RegistryError::InvalidRules {
                test_id: definition.id.clone(),
                source,
            })?;
        self.tests.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn get(&self, test_id: &str) -> Option<&TestDefinition> {
        self.tests.get(test_id)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn score(&self, test_id: &str, answers: &AnswerSet) -> Result<ScoreResult, ScoreError> {
        let definition = self
            .tests
            .get(test_id)
            .ok_or_else(|| ScoreError::UnknownTest(test_id.to_string()))?;
        Ok(score(definition, answers))
    }
}
