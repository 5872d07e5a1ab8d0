use crate::types::{BookSpec, TestSpec};

/// The five assessments the app ships with.
pub fn builtin_tests() -> Vec<TestSpec> {
    fn spec(id: &str, title: &str, domain: &str, description: &str, image: &str) -> TestSpec {
        TestSpec {
            id: id.to_string(),
            title: title.to_string(),
            domain: domain.to_string(),
            description: description.to_string(),
            image: image.to_string(),
        }
    }

    vec![
        spec(
            "1",
            "Emotional Intelligence Quiz",
            "Emotional Intelligence",
            "Assess your ability to recognize and manage emotions in yourself and others.",
            "../assets/images/main_banner_tests.png",
        ),
        spec(
            "2",
            "ADHD Assessment",
            "Attention",
            "Evaluate symptoms related to attention deficit hyperactivity disorder.",
            "../assets/images/adhd_screening.png",
        ),
        spec(
            "3",
            "Anxiety Self-check",
            "Anxiety",
            "Measure your current anxiety levels and identify potential triggers.",
            "../assets/images/anxiety_check.png",
        ),
        spec(
            "4",
            "Temperament Type",
            "Personality",
            "Discover your personality type and how it influences your behavior.",
            "../assets/images/Depression_screening.png",
        ),
        spec(
            "5",
            "IQ Test",
            "Cognitive Ability",
            "Assess your cognitive abilities and problem-solving skills.",
            "../assets/images/Charisma_level.png",
        ),
    ]
}

/// The book list the Learn tab ships with.
pub fn builtin_books() -> Vec<BookSpec> {
    fn spec(index: u32, title: &str, author: &str, genres: &[&str]) -> BookSpec {
        BookSpec {
            title: title.to_string(),
            author: author.to_string(),
            genres: genres.iter().map(|g| (*g).to_string()).collect(),
            index,
        }
    }

    vec![
        spec(
            0,
            "Atomic Habits",
            "James Clear",
            &["Self Help", "Productivity", "Psychology"],
        ),
        spec(
            1,
            "12 Rules for Life",
            "Jordan B. Peterson",
            &["Self Help", "Philosophy", "Psychology"],
        ),
        spec(
            2,
            "Thinking, Fast and Slow",
            "Daniel Kahneman",
            &["Psychology", "Behavioral Economics", "Self Help"],
        ),
        spec(
            3,
            "The Power of Now",
            "Eckhart Tolle",
            &["Spirituality", "Self Help", "Philosophy"],
        ),
        spec(
            4,
            "48 Laws Of Confidence",
            "Ricky St Julien II",
            &["Self Help", "Psychology", "Personal Development"],
        ),
    ]
}
