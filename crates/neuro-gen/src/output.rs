use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::error::OutputError;
use crate::types::{GeneratedBook, GeneratedTest, TestSummary};

/// Lowercased title with whitespace runs collapsed to underscores.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn write_pretty(path: &Path, value: &impl Serialize) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// One `<slug>_quiz.json` fixture per test, plus the aggregate metadata file
/// the app's test list reads.
pub fn write_test_fixtures(
    output_dir: impl AsRef<Path>,
    metadata_file: impl AsRef<Path>,
    tests: &[GeneratedTest],
) -> Result<(), OutputError> {
    for test in tests {
        let path = output_dir
            .as_ref()
            .join(format!("{}_quiz.json", slugify(&test.title)));
        write_pretty(&path, test)?;
        info!(test = %test.title, path = %path.display(), "saved test fixture");
    }

    let summaries: Vec<TestSummary> = tests.iter().map(GeneratedTest::summary).collect();
    write_pretty(metadata_file.as_ref(), &summaries)?;
    info!(
        count = summaries.len(),
        path = %metadata_file.as_ref().display(),
        "saved test metadata"
    );
    Ok(())
}

/// One `<slug>_book.json` fixture per book, plus the full book list file.
pub fn write_book_fixtures(
    output_dir: impl AsRef<Path>,
    list_file: impl AsRef<Path>,
    books: &[GeneratedBook],
) -> Result<(), OutputError> {
    for book in books {
        let path = output_dir
            .as_ref()
            .join(format!("{}_book.json", slugify(&book.title)));
        write_pretty(&path, book)?;
        info!(book = %book.title, path = %path.display(), "saved book fixture");
    }

    write_pretty(list_file.as_ref(), &books)?;
    info!(
        count = books.len(),
        path = %list_file.as_ref().display(),
        "saved book list"
    );
    Ok(())
}

pub fn fixture_path(output_dir: impl AsRef<Path>, title: &str, suffix: &str) -> PathBuf {
    output_dir
        .as_ref()
        .join(format!("{}_{suffix}.json", slugify(title)))
}
