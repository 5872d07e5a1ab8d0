use std::sync::Arc;

use tracing::info;

use crate::error::GenerateError;
use crate::extract::extract_json;
use crate::normalize::{normalize_book, normalize_test};
use crate::prompt;
use crate::traits::ChatProvider;
use crate::types::{BookSpec, GeneratedBook, GeneratedTest, TestSpec};

/// Turns request specs into normalized artifacts by delegating content
/// creation to a chat provider.
#[derive(Clone)]
pub struct Generator {
    provider: Arc<dyn ChatProvider>,
}

impl Generator {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self { provider }
    }

    pub async fn generate_test(&self, spec: TestSpec) -> Result<GeneratedTest, GenerateError> {
        info!(test = %spec.title, domain = %spec.domain, "generating test");
        let content = self.provider.complete(prompt::test_request(&spec)).await?;
        let value = extract_json(&content)?;
        let test = normalize_test(value, &spec)?;
        info!(test = %test.title, questions = test.questions, "test generated");
        Ok(test)
    }

    pub async fn generate_book(&self, spec: BookSpec) -> Result<GeneratedBook, GenerateError> {
        info!(book = %spec.title, author = %spec.author, "generating book summary");
        let content = self.provider.complete(prompt::book_request(&spec)).await?;
        let value = extract_json(&content)?;
        let book = normalize_book(value, &spec)?;
        info!(
            book = %book.title,
            chapters = book.chapters.len(),
            words = book.word_count(),
            "book summary generated"
        );
        Ok(book)
    }
}
