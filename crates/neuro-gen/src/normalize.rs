use neuro_core::{OptionDefinition, QuestionDefinition, ScoringRules, TestMetadata};
use serde::Deserialize;
use serde_json::Value;

use crate::error::GenerateError;
use crate::types::{BookSpec, Chapter, GeneratedBook, GeneratedTest, TestSpec};

const DEFAULT_LIKERT: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

/// Options as models actually return them: either bare strings or full
/// text/value objects. Decoded once; everything downstream sees
/// `OptionDefinition`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOption {
    Text(String),
    Full {
        text: String,
        #[serde(default)]
        value: Option<u32>,
    },
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    id: Option<String>,
    text: String,
    #[serde(default)]
    domain: Option<String>,
    #[serde(default)]
    reverse_scored: Option<bool>,
    #[serde(default)]
    options: Option<Vec<RawOption>>,
}

#[derive(Debug, Deserialize)]
struct RawQuiz {
    #[serde(default)]
    metadata: Option<TestMetadata>,
    #[serde(default)]
    items: Option<Vec<RawItem>>,
    #[serde(default)]
    scoring: Option<ScoringRules>,
}

/// Normalize a parsed quiz payload into a fixture-ready artifact.
pub fn normalize_test(value: Value, spec: &TestSpec) -> Result<GeneratedTest, GenerateError> {
    let raw: RawQuiz =
        serde_json::from_value(value).map_err(|e| GenerateError::SchemaViolation(e.to_string()))?;

    let items = raw
        .items
        .filter(|items| !items.is_empty())
        .ok_or_else(|| GenerateError::SchemaViolation("quiz has no items".to_string()))?;
    let scoring = raw
        .scoring
        .ok_or_else(|| GenerateError::SchemaViolation("quiz has no scoring section".to_string()))?;
    scoring
        .validate()
        .map_err(|e| GenerateError::SchemaViolation(e.to_string()))?;

    let questions: Vec<QuestionDefinition> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| normalize_item(item, index, &spec.domain))
        .collect();

    let metadata = raw.metadata.unwrap_or_else(|| TestMetadata {
        assessment_type: spec.title.clone(),
        version: "1.0".to_string(),
        normative_data: String::new(),
    });

    let count = questions.len() as u32;
    Ok(GeneratedTest {
        id: spec.id.clone(),
        title: spec.title.clone(),
        image: spec.image.clone(),
        questions: count,
        duration: count.div_ceil(2), // ~30 seconds per question
        description: spec.description.clone(),
        metadata,
        items: questions,
        scoring,
    })
}

fn normalize_item(item: RawItem, index: usize, fallback_domain: &str) -> QuestionDefinition {
    let domain = item
        .domain
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| fallback_domain.to_string());
    let id = item
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| synthesize_id(&domain, index));
    let reverse_scored = item.reverse_scored.unwrap_or(false);

    let options = match item.options {
        Some(raw_options) if !raw_options.is_empty() => {
            normalize_options(raw_options, reverse_scored)
        }
        _ => default_options(reverse_scored),
    };

    QuestionDefinition {
        id,
        text: item.text,
        domain,
        reverse_scored,
        options,
    }
}

/// Uppercase two-letter domain prefix plus a zero-padded 1-based index.
fn synthesize_id(domain: &str, index: usize) -> String {
    let prefix: String = domain
        .chars()
        .filter(|c| c.is_alphabetic())
        .take(2)
        .collect::<String>()
        .to_uppercase();
    format!("{prefix}{:02}", index + 1)
}

fn normalize_options(raw: Vec<RawOption>, reverse_scored: bool) -> Vec<OptionDefinition> {
    let last = raw.len().saturating_sub(1);
    raw.into_iter()
        .enumerate()
        .map(|(position, option)| match option {
            RawOption::Text(text) => OptionDefinition {
                text,
                value: positional_value(position, last, reverse_scored),
            },
            RawOption::Full { text, value } => OptionDefinition {
                text: strip_value_annotation(&text),
                value: value.unwrap_or_else(|| positional_value(position, last, reverse_scored)),
            },
        })
        .collect()
}

fn positional_value(position: usize, last: usize, reverse_scored: bool) -> u32 {
    if reverse_scored {
        (last - position) as u32
    } else {
        position as u32
    }
}

fn default_options(reverse_scored: bool) -> Vec<OptionDefinition> {
    let last = DEFAULT_LIKERT.len() - 1;
    DEFAULT_LIKERT
        .iter()
        .enumerate()
        .map(|(position, text)| OptionDefinition {
            text: (*text).to_string(),
            value: positional_value(position, last, reverse_scored),
        })
        .collect()
}

/// Strip trailing "(4)"-style scoring annotations the prompt's example
/// format tends to leak into option text.
fn strip_value_annotation(text: &str) -> String {
    let trimmed = text.trim_end();
    if let Some(open) = trimmed.rfind(" (") {
        let tail = &trimmed[open + 2..];
        if let Some(inner) = tail.strip_suffix(')') {
            if !inner.is_empty() && inner.chars().all(|c| c.is_ascii_digit()) {
                return trimmed[..open].trim_end().to_string();
            }
        }
    }
    trimmed.to_string()
}

#[derive(Debug, Deserialize)]
struct RawChapter {
    #[serde(default)]
    chapter_number: Option<u32>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBook {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    num_ratings: Option<String>,
    #[serde(default)]
    publication_year: Option<String>,
    #[serde(default, rename = "abstract")]
    abstract_text: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    genres: Option<Vec<String>>,
    #[serde(default)]
    author_description: Option<String>,
    #[serde(default)]
    source_list: Option<String>,
    #[serde(default)]
    chapters: Option<Vec<RawChapter>>,
}

/// Normalize a parsed book payload, filling documented defaults for every
/// optional field. A missing or empty chapters array is structural and fails
/// the item.
pub fn normalize_book(value: Value, spec: &BookSpec) -> Result<GeneratedBook, GenerateError> {
    let raw: RawBook =
        serde_json::from_value(value).map_err(|e| GenerateError::SchemaViolation(e.to_string()))?;

    let chapters = raw
        .chapters
        .filter(|chapters| !chapters.is_empty())
        .ok_or_else(|| GenerateError::SchemaViolation("book has no chapters".to_string()))?;

    let chapters: Vec<Chapter> = chapters
        .into_iter()
        .enumerate()
        .map(|(index, chapter)| Chapter {
            chapter_number: chapter.chapter_number.unwrap_or(index as u32 + 1),
            title: chapter
                .title
                .unwrap_or_else(|| format!("Chapter {}", index + 1)),
            summary: chapter
                .summary
                .unwrap_or_else(|| "No summary available".to_string()),
        })
        .collect();

    let title = raw.title.unwrap_or_else(|| spec.title.clone());
    let image_url = raw.image_url.unwrap_or_else(|| placeholder_cover(&title));
    let author_description = raw
        .author_description
        .unwrap_or_else(|| format!("Author of {title} and other works."));

    Ok(GeneratedBook {
        subtitle: raw.subtitle.unwrap_or_else(|| "Not available".to_string()),
        author: raw.author.unwrap_or_else(|| spec.author.clone()),
        rating: raw.rating.unwrap_or_else(|| "4.0".to_string()),
        num_ratings: raw.num_ratings.unwrap_or_else(|| "1000".to_string()),
        publication_year: raw.publication_year.unwrap_or_else(|| "2023".to_string()),
        abstract_text: raw
            .abstract_text
            .unwrap_or_else(|| "Not available".to_string()),
        image_url,
        genres: raw.genres.unwrap_or_default(),
        author_description,
        source_list: raw
            .source_list
            .unwrap_or_else(|| "Best Self Help Books".to_string()),
        index: spec.index,
        is_self_help: spec.is_self_help(),
        chapters,
        title,
    })
}

fn placeholder_cover(title: &str) -> String {
    let encoded = title.replace(' ', "+");
    format!("https://via.placeholder.com/400x600.png?text={encoded}")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn test_spec() -> TestSpec {
        TestSpec {
            id: "2".to_string(),
            title: "ADHD Assessment".to_string(),
            domain: "Attention".to_string(),
            description: "Evaluate symptoms.".to_string(),
            image: "../assets/images/adhd_screening.png".to_string(),
        }
    }

    fn book_spec() -> BookSpec {
        BookSpec {
            title: "Atomic Habits".to_string(),
            author: "James Clear".to_string(),
            genres: vec!["Self Help".to_string(), "Productivity".to_string()],
            index: 0,
        }
    }

    fn scoring_json() -> Value {
        json!({
            "interpretation": [
                {"range": [0, 10], "result": "Low", "recommendation": "r1"},
                {"range": [11, 20], "result": "High", "recommendation": "r2"}
            ]
        })
    }

    #[test]
    fn bare_string_options_get_positional_values() {
        let value = json!({
            "items": [
                {"text": "q", "options": ["Never", "Sometimes", "Often"]},
                {"text": "r", "reverse_scored": true, "options": ["Never", "Sometimes", "Often"]}
            ],
            "scoring": scoring_json()
        });

        let test = normalize_test(value, &test_spec()).expect("normalize");
        let plain = test.items.first().expect("first item");
        let values: Vec<u32> = plain.options.iter().map(|o| o.value).collect();
        assert_eq!(values, [0, 1, 2]);

        let reversed = test.items.get(1).expect("second item");
        let values: Vec<u32> = reversed.options.iter().map(|o| o.value).collect();
        assert_eq!(values, [2, 1, 0]);
    }

    #[test]
    fn missing_ids_are_synthesized_from_the_domain() {
        let value = json!({
            "items": [
                {"text": "q1"},
                {"text": "q2", "id": "KEEP"}
            ],
            "scoring": scoring_json()
        });

        let test = normalize_test(value, &test_spec()).expect("normalize");
        assert_eq!(test.items.first().expect("item").id, "AT01");
        assert_eq!(test.items.get(1).expect("item").id, "KEEP");
    }

    #[test]
    fn missing_options_default_to_the_likert_scale() {
        let value = json!({
            "items": [{"text": "q", "reverse_scored": true}],
            "scoring": scoring_json()
        });

        let test = normalize_test(value, &test_spec()).expect("normalize");
        let item = test.items.first().expect("item");
        assert_eq!(item.options.len(), 5);
        assert_eq!(item.options.first().expect("option").text, "Strongly Disagree");
        assert_eq!(item.options.first().expect("option").value, 4);
        assert_eq!(item.options.last().expect("option").value, 0);
    }

    #[test]
    fn value_annotations_are_stripped_from_option_text() {
        let value = json!({
            "items": [{
                "text": "q",
                "options": [
                    {"text": "Strongly agree (4)", "value": 4},
                    {"text": "Disagree (no change)", "value": 1}
                ]
            }],
            "scoring": scoring_json()
        });

        let test = normalize_test(value, &test_spec()).expect("normalize");
        let item = test.items.first().expect("item");
        assert_eq!(item.options.first().expect("option").text, "Strongly agree");
        assert_eq!(
            item.options.get(1).expect("option").text,
            "Disagree (no change)"
        );
    }

    #[test]
    fn missing_items_are_a_schema_violation() {
        let value = json!({"scoring": scoring_json()});
        let err = normalize_test(value, &test_spec()).unwrap_err();
        assert!(matches!(err, GenerateError::SchemaViolation(_)));
    }

    #[test]
    fn missing_scoring_is_a_schema_violation() {
        let value = json!({"items": [{"text": "q"}]});
        let err = normalize_test(value, &test_spec()).unwrap_err();
        assert!(matches!(err, GenerateError::SchemaViolation(_)));
    }

    #[test]
    fn overlapping_interpretation_ranges_fail_the_item() {
        let value = json!({
            "items": [{"text": "q"}],
            "scoring": {
                "interpretation": [
                    {"range": [0, 10], "result": "Low", "recommendation": "r1"},
                    {"range": [10, 20], "result": "High", "recommendation": "r2"}
                ]
            }
        });
        let err = normalize_test(value, &test_spec()).unwrap_err();
        assert!(matches!(err, GenerateError::SchemaViolation(_)));
    }

    #[test]
    fn metadata_and_counts_are_enriched() {
        let value = json!({
            "items": [{"text": "q1"}, {"text": "q2"}, {"text": "q3"}],
            "scoring": scoring_json()
        });

        let test = normalize_test(value, &test_spec()).expect("normalize");
        assert_eq!(test.id, "2");
        assert_eq!(test.questions, 3);
        assert_eq!(test.duration, 2);
        assert_eq!(test.metadata.assessment_type, "ADHD Assessment");
    }

    #[test]
    fn book_defaults_fill_missing_fields() {
        let value = json!({
            "chapters": [
                {"summary": "First chapter."},
                {"chapter_number": 7, "title": "Kept", "summary": "Second chapter."}
            ]
        });

        let book = normalize_book(value, &book_spec()).expect("normalize");
        assert_eq!(book.title, "Atomic Habits");
        assert_eq!(book.author, "James Clear");
        assert_eq!(book.rating, "4.0");
        assert_eq!(book.subtitle, "Not available");
        assert!(book.is_self_help);
        assert!(book.image_url.contains("Atomic+Habits"));

        let first = book.chapters.first().expect("chapter");
        assert_eq!(first.chapter_number, 1);
        assert_eq!(first.title, "Chapter 1");
        let second = book.chapters.get(1).expect("chapter");
        assert_eq!(second.chapter_number, 7);
        assert_eq!(second.title, "Kept");
    }

    #[test]
    fn book_without_chapters_is_a_schema_violation() {
        let value = json!({"title": "Atomic Habits", "chapters": []});
        let err = normalize_book(value, &book_spec()).unwrap_err();
        assert!(matches!(err, GenerateError::SchemaViolation(_)));
    }
}
