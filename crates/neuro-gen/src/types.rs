use neuro_core::{QuestionDefinition, ScoringRules, TestMetadata};
use serde::{Deserialize, Serialize};

use crate::config::SamplingParams;

/// One chat-completion call: a system role, a user prompt and the fixed
/// sampling profile for the artifact kind.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub sampling: SamplingParams,
}

/// Request spec for one psychological test.
#[derive(Debug, Clone)]
pub struct TestSpec {
    pub id: String,
    pub title: String,
    pub domain: String,
    pub description: String,
    pub image: String,
}

/// Request spec for one book summary.
#[derive(Debug, Clone)]
pub struct BookSpec {
    pub title: String,
    pub author: String,
    pub genres: Vec<String>,
    pub index: u32,
}

impl BookSpec {
    pub fn is_self_help(&self) -> bool {
        self.genres.iter().any(|g| g == "Self Help")
    }
}

/// A generated, normalized quiz fixture. Serializes to the shape the app's
/// test registry loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedTest {
    pub id: String,
    pub title: String,
    pub image: String,
    /// Question count, kept alongside `items` for list screens.
    pub questions: u32,
    /// Estimated minutes to complete.
    pub duration: u32,
    pub description: String,
    pub metadata: TestMetadata,
    pub items: Vec<QuestionDefinition>,
    pub scoring: ScoringRules,
}

impl GeneratedTest {
    pub fn summary(&self) -> TestSummary {
        TestSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            image: self.image.clone(),
            questions: self.questions,
            duration: self.duration,
            description: self.description.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

/// Aggregate-metadata entry for the test list the app renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSummary {
    pub id: String,
    pub title: String,
    pub image: String,
    pub questions: u32,
    pub duration: u32,
    pub description: String,
    pub metadata: TestMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub chapter_number: u32,
    pub title: String,
    pub summary: String,
}

/// A generated, normalized book-summary fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedBook {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub rating: String,
    pub num_ratings: String,
    pub publication_year: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub image_url: String,
    pub genres: Vec<String>,
    pub author_description: String,
    pub source_list: String,
    pub index: u32,
    pub is_self_help: bool,
    pub chapters: Vec<Chapter>,
}

impl GeneratedBook {
    /// Word count across the abstract and chapter summaries, for run logs.
    pub fn word_count(&self) -> usize {
        self.abstract_text.split_whitespace().count()
            + self
                .chapters
                .iter()
                .map(|c| c.summary.split_whitespace().count())
                .sum::<usize>()
    }
}
