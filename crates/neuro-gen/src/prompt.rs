use crate::config::{BOOK_SAMPLING, TEST_SAMPLING};
use crate::types::{BookSpec, ChatRequest, TestSpec};

const TEST_SYSTEM_PROMPT: &str = "You are a clinical psychologist with expertise in psychometric test design. You specialize in creating valid and reliable psychological assessments that follow best practices in test construction.";

const BOOK_SYSTEM_PROMPT: &str = "You are a professional literary analyst and content creator specializing in book summaries. Your expertise is in creating unique, engaging summaries that capture the essence of books while maintaining distinctive writing styles across different sections.";

pub fn test_request(spec: &TestSpec) -> ChatRequest {
    ChatRequest {
        system: TEST_SYSTEM_PROMPT.to_string(),
        user: test_prompt(&spec.title, &spec.domain),
        sampling: TEST_SAMPLING,
    }
}

pub fn book_request(spec: &BookSpec) -> ChatRequest {
    ChatRequest {
        system: BOOK_SYSTEM_PROMPT.to_string(),
        user: book_prompt(spec),
        sampling: BOOK_SAMPLING,
    }
}

fn test_prompt(title: &str, domain: &str) -> String {
    let mut prompt = format!(
        r#"
Create a comprehensive psychological assessment for "{title}" focused on measuring {domain}.

The output must be valid JSON in the following format (no explanations outside the JSON):
{{
  "metadata": {{
    "assessment_type": "{title}",
    "version": "1.0",
    "normative_data": "A brief description of the normative data source or theoretical framework"
  }},
  "items": [
    {{
      "id": "Q01",
      "text": "A well-crafted question that measures an aspect of {domain}",
      "domain": "{domain}",
      "reverse_scored": false,
      "options": [
        {{ "text": "Option A with brief description (4)", "value": 4 }},
        {{ "text": "Option B with brief description (3)", "value": 3 }},
        {{ "text": "Option C with brief description (2)", "value": 2 }},
        {{ "text": "Option D with brief description (1)", "value": 1 }},
        {{ "text": "Option E with brief description (0)", "value": 0 }}
      ]
    }}
  ],
  "scoring": {{
    "symptom_cutoffs": {{
      "domain_name": 12
    }},
    "interpretation": [
      {{
        "range": [0, 10],
        "result": "Low Level Result",
        "recommendation": "A personalized recommendation for this score range"
      }},
      {{
        "range": [11, 20],
        "result": "Moderate Level Result",
        "recommendation": "A personalized recommendation for this score range"
      }},
      {{
        "range": [21, 40],
        "result": "High Level Result",
        "recommendation": "A personalized recommendation for this score range"
      }}
    ]
  }}
}}

CRITICAL REQUIREMENTS:
1. Create exactly 20-30 psychologically sound questions that appropriately measure {domain}.
2. Include at least 2-3 reverse-scored items to detect response patterns.
3. Ensure questions are subtle and don't have obvious "right" answers.
4. Use varied question formats and contexts to comprehensively assess the construct.
5. Structure the assessment to gradually progress from general to more specific aspects.
6. Include multiple relevant domains/dimensions if appropriate for this type of assessment.
7. Create a valid scoring system with appropriate cutoffs and interpretations.
8. The interpretation ranges must be contiguous and non-overlapping, covering every reachable total.
9. All content must be in perfect JSON format without any extra text.
"#
    );

    if let Some(addendum) = construct_addendum(title) {
        prompt.push('\n');
        prompt.push_str(addendum);
    }

    prompt
}

fn construct_addendum(title: &str) -> Option<&'static str> {
    let lowered = title.to_lowercase();
    if lowered.contains("adhd") {
        Some(
            "For ADHD assessment, include items that measure both inattention and hyperactivity/impulsivity domains. Include questions about functioning in different contexts (work, home, social).",
        )
    } else if lowered.contains("anxiety") {
        Some(
            "For anxiety assessment, include items measuring physical symptoms, cognitive patterns, and behavioral responses to anxiety. Cover various anxiety contexts.",
        )
    } else if lowered.contains("iq") || lowered.contains("intelligence") {
        Some(
            "For IQ assessment, include a variety of question types: logical reasoning, pattern recognition, verbal comprehension, numerical reasoning, spatial visualization, and problem-solving.",
        )
    } else if lowered.contains("emotional intelligence") {
        Some(
            "For emotional intelligence assessment, include items measuring self-awareness, self-regulation, motivation, empathy, and social skills. Balance items between self-perception and interpersonal dimensions.",
        )
    } else if lowered.contains("temperament") || lowered.contains("personality") {
        Some(
            "For temperament assessment, include items measuring sociability, emotionality, activity level, and attention span/persistence. Consider both behaviors and tendencies across different situations.",
        )
    } else {
        None
    }
}

fn book_prompt(spec: &BookSpec) -> String {
    let title = &spec.title;
    let author = &spec.author;
    let index = spec.index;
    let is_self_help = spec.is_self_help();

    format!(
        r#"
As a literary expert with deep knowledge of book analysis, your task is to create a comprehensive, unique summary for "{title}" by {author}.

I need a detailed JSON output with the following structure:
{{
  "title": "{title}",
  "subtitle": "A compelling and relevant subtitle that captures the essence of the book",
  "author": "{author}",
  "rating": "A realistic rating out of 5 (e.g., '4.34')",
  "num_ratings": "A realistic number of ratings (e.g., '104854')",
  "publication_year": "The year this book was published",
  "abstract": "A 150-200 word compelling overview of the book that captures its main thesis, approach, and value proposition. This should be written in a professional, publisher-quality style.",
  "image_url": "A valid URL to an image of the book cover (placeholder or actual)",
  "genres": ["Primary Genre", "Secondary Genre", "Tertiary Genre"],
  "author_description": "A 3-4 sentence biography of the author, highlighting their credentials, background, and notable achievements relevant to the book's subject matter.",
  "source_list": "Best Self Help Books",
  "index": {index},
  "is_self_help": {is_self_help},
  "chapters": [
    {{
      "chapter_number": 1,
      "title": "Chapter 1 Title - Capturing Key Concept",
      "summary": "A 120-150 word detailed summary of this chapter's core concepts, with specific insights, examples, and takeaways from this section of the book, written in a tone that matches the book's style."
    }}
  ]
}}

CRITICAL REQUIREMENTS:
1. Produce exactly 5 chapters. Each chapter summary MUST be unique in tone, sentence structure, and phrasing. Avoid repetitive patterns or templated language across chapters.
2. Total content should be approximately 600 words across all chapter summaries.
3. Chapter titles should reflect actual content from the book, not generic placeholders.
4. Match the writing style to the book's genre and author's voice.
5. Ensure accuracy of information - only include verifiable content from the book.
6. Create content that feels like it was written by a human literary expert, not AI-generated.
7. Use natural language with varied sentence structures, avoiding formulaic writing.
"#
    )
}
