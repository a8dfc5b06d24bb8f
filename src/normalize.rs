//! Record normalization.
//!
//! Turns the loosely-typed `google_scholar_author` response into fixed-shape
//! [`PublicationRecord`]s. Every output record carries all ten fields, with a
//! default for anything the source left out. One malformed article never
//! aborts the run: it is reported and skipped.

use crate::error::{OptionExt, Result, ScholarError};
use crate::report::Reporter;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One publication in the simplified output schema
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Article title
    pub title: String,
    /// Publication year, 0 when unknown
    pub date: i64,
    /// Link to the Scholar citation page
    pub link: String,
    /// Author fragments, split on `,` and left untrimmed
    pub authors: Vec<String>,
    /// Journal/conference, from `publication`
    pub journal: String,
    pub volume: String,
    pub pages: String,
    pub publisher: String,
    /// Text snippet, from `snippet`
    pub description: String,
    /// Cited-by count, 0 when unknown
    pub citations: i64,
}

/// Output of one normalization pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    /// Author display name, when the response carries one
    pub author_name: Option<String>,
    /// Normalized records in input order
    pub records: Vec<PublicationRecord>,
    /// Number of records in `records`
    pub total: usize,
    /// Articles dropped because they were malformed
    pub skipped: usize,
}

impl RunResult {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Normalize every article of a raw response, preserving order.
///
/// An absent or null `articles` field is treated as an empty list. Zero
/// articles is reported as a warning and yields an empty result.
///
/// # Errors
///
/// Returns [`ScholarError::Parse`] if the response is not an object or its
/// `articles` field is not an array. Per-article problems are never errors.
pub fn normalize_response(raw: &Value, reporter: &dyn Reporter) -> Result<RunResult> {
    let root = raw.as_object().ok_or_parse("response is not a JSON object")?;

    let author_name = root
        .get("author")
        .and_then(|author| author.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let articles: &[Value] = match root.get("articles") {
        None | Some(Value::Null) => &[],
        Some(Value::Array(articles)) => articles.as_slice(),
        Some(other) => {
            return Err(ScholarError::Parse(format!(
                "'articles' is {} instead of an array",
                type_name(other)
            )))
        }
    };

    if let Some(name) = &author_name {
        reporter.info(&format!("Author profile: {}", name));
    }

    if articles.is_empty() {
        reporter.warn("No articles found. Check your Scholar ID.");
        return Ok(RunResult {
            author_name,
            ..Default::default()
        });
    }

    reporter.info(&format!("Processing {} articles", articles.len()));

    let mut records = Vec::with_capacity(articles.len());
    let mut skipped = 0;

    for (index, article) in articles.iter().enumerate() {
        match normalize_article(article) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                let title = article.get("title").and_then(Value::as_str).unwrap_or("<untitled>");
                reporter.error(&format!(
                    "Error processing article #{} ({}): {}",
                    index + 1,
                    title,
                    e
                ));
            }
        }
    }

    Ok(RunResult {
        author_name,
        total: records.len(),
        records,
        skipped,
    })
}

/// Normalize a single raw article.
///
/// # Errors
///
/// Returns [`ScholarError::Parse`] if the article is not an object or one of
/// its fields has a type that cannot be coerced into the output schema.
pub fn normalize_article(article: &Value) -> Result<PublicationRecord> {
    let article = article.as_object().ok_or_parse("article is not a JSON object")?;

    Ok(PublicationRecord {
        title: text_field(article, "title")?,
        // Only the year survives; month and day are dropped.
        date: nested_integer(article, "publication_date", "year")?,
        link: text_field(article, "link")?,
        authors: authors_field(article)?,
        journal: text_field(article, "publication")?,
        volume: text_field(article, "volume")?,
        pages: text_field(article, "pages")?,
        publisher: text_field(article, "publisher")?,
        description: text_field(article, "snippet")?,
        citations: nested_integer(article, "cited_by", "value")?,
    })
}

/// Read a text field; null counts as absent, scalars are rendered as text
fn text_field(article: &Map<String, Value>, key: &str) -> Result<String> {
    match article.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(ScholarError::Parse(format!(
            "field '{}' is {} instead of text",
            key,
            type_name(other)
        ))),
    }
}

/// Read `article[outer][inner]` as an integer.
///
/// A missing, null or non-object `outer`, or a missing/null `inner`, gives 0.
fn nested_integer(article: &Map<String, Value>, outer: &str, inner: &str) -> Result<i64> {
    let Some(Value::Object(container)) = article.get(outer) else {
        return Ok(0);
    };

    match container.get(inner) {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(integral_f64))
            .ok_or_else(|| {
                ScholarError::Parse(format!("field '{}.{}' is not an integer: {}", outer, inner, n))
            }),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
            ScholarError::Parse(format!("field '{}.{}' is not an integer: {:?}", outer, inner, s))
        }),
        Some(other) => Err(ScholarError::Parse(format!(
            "field '{}.{}' is {} instead of an integer",
            outer,
            inner,
            type_name(other)
        ))),
    }
}

/// Integral floats inside the `i64` range; `as` would saturate anything else
fn integral_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// Split the comma-separated `authors` text without trimming the fragments
fn authors_field(article: &Map<String, Value>) -> Result<Vec<String>> {
    match article.get("authors") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s.split(',').map(str::to_string).collect()),
        Some(other) => Err(ScholarError::Parse(format!(
            "field 'authors' is {} instead of text",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Level, MemoryReporter};
    use serde_json::json;

    fn full_article(title: &str, year: i64) -> Value {
        json!({
            "title": title,
            "link": format!("https://scholar.google.com/citations?view_op=view_citation&citation_for_view={}", title),
            "citation_id": "61Ou1P8AAAAJ:u5HHmVD_uO8C",
            "authors": "J Doe, A Smith",
            "publication": "Nature 615 (7950), 1-10",
            "volume": "615",
            "pages": "1-10",
            "publisher": "Nature Publishing Group",
            "snippet": "We study things.",
            "cited_by": { "value": 7, "link": "https://scholar.google.com/scholar?cites=1" },
            "publication_date": { "year": year, "month": 3, "day": 14 }
        })
    }

    #[test]
    fn test_empty_article_gives_defaults() {
        let record = normalize_article(&json!({})).expect("empty object is valid");
        assert_eq!(record, PublicationRecord::default());
        assert_eq!(
            serde_json::to_value(&record).expect("serialize"),
            json!({
                "title": "", "date": 0, "link": "", "authors": [], "journal": "",
                "volume": "", "pages": "", "publisher": "", "description": "", "citations": 0
            })
        );
    }

    #[test]
    fn test_full_article() {
        let record = normalize_article(&full_article("Deep Things", 2021)).expect("valid article");
        assert_eq!(record.title, "Deep Things");
        assert_eq!(record.date, 2021);
        assert_eq!(record.authors, vec!["J Doe", " A Smith"]);
        assert_eq!(record.journal, "Nature 615 (7950), 1-10");
        assert_eq!(record.volume, "615");
        assert_eq!(record.pages, "1-10");
        assert_eq!(record.publisher, "Nature Publishing Group");
        assert_eq!(record.description, "We study things.");
        assert_eq!(record.citations, 7);
    }

    #[test]
    fn test_authors_split_untrimmed() {
        let record = normalize_article(&json!({ "authors": "A, B, C" })).expect("valid article");
        assert_eq!(record.authors, vec!["A", " B", " C"]);

        let record = normalize_article(&json!({ "authors": "" })).expect("valid article");
        assert!(record.authors.is_empty());
    }

    #[test]
    fn test_year_extraction() {
        let record = normalize_article(&json!({ "publication_date": { "year": 2023 } })).expect("valid");
        assert_eq!(record.date, 2023);

        let record = normalize_article(&json!({ "publication_date": { "year": "2019" } })).expect("valid");
        assert_eq!(record.date, 2019);

        let record = normalize_article(&json!({ "publication_date": { "month": 5 } })).expect("valid");
        assert_eq!(record.date, 0);

        let record = normalize_article(&json!({ "publication_date": "2023" })).expect("valid");
        assert_eq!(record.date, 0);

        let record = normalize_article(&json!({ "title": "x" })).expect("valid");
        assert_eq!(record.date, 0);
    }

    #[test]
    fn test_citation_extraction() {
        let record = normalize_article(&json!({ "cited_by": { "value": 42 } })).expect("valid");
        assert_eq!(record.citations, 42);

        let record = normalize_article(&json!({ "cited_by": { "link": "x" } })).expect("valid");
        assert_eq!(record.citations, 0);

        let record = normalize_article(&json!({ "cited_by": null })).expect("valid");
        assert_eq!(record.citations, 0);
    }

    #[test]
    fn test_integers_outside_i64_rejected() {
        let huge: Value = serde_json::from_str(r#"{ "cited_by": { "value": 18446744073709551615 } }"#)
            .expect("valid JSON");
        assert!(matches!(normalize_article(&huge), Err(ScholarError::Parse(_))));

        let huge = json!({ "publication_date": { "year": 1e20 } });
        assert!(matches!(normalize_article(&huge), Err(ScholarError::Parse(_))));

        let record = normalize_article(&json!({ "publication_date": { "year": 2021.0 } })).expect("valid");
        assert_eq!(record.date, 2021);

        let record = normalize_article(&json!({ "cited_by": { "value": i64::MAX } })).expect("valid");
        assert_eq!(record.citations, i64::MAX);
    }

    #[test]
    fn test_numeric_text_fields_rendered() {
        let record = normalize_article(&json!({ "volume": 12, "pages": null })).expect("valid");
        assert_eq!(record.volume, "12");
        assert_eq!(record.pages, "");
    }

    #[test]
    fn test_malformed_articles_rejected() {
        assert!(matches!(normalize_article(&json!("just a string")), Err(ScholarError::Parse(_))));
        assert!(matches!(normalize_article(&json!({ "title": ["a"] })), Err(ScholarError::Parse(_))));
        assert!(matches!(normalize_article(&json!({ "authors": 3 })), Err(ScholarError::Parse(_))));
        assert!(matches!(
            normalize_article(&json!({ "cited_by": { "value": "many" } })),
            Err(ScholarError::Parse(_))
        ));
    }

    #[test]
    fn test_response_preserves_order() {
        let articles: Vec<Value> = (0..5)
            .map(|i| full_article(&format!("Paper {}", i), 2020 + i))
            .collect();
        let raw = json!({ "author": { "name": "Jane Doe" }, "articles": articles });
        let reporter = MemoryReporter::new();

        let result = normalize_response(&raw, &reporter).expect("valid response");
        assert_eq!(result.total, 5);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.author_name.as_deref(), Some("Jane Doe"));
        let titles: Vec<&str> = result.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Paper 0", "Paper 1", "Paper 2", "Paper 3", "Paper 4"]);
        assert!(reporter.at(Level::Warn).is_empty());
    }

    #[test]
    fn test_zero_articles_warns() {
        let reporter = MemoryReporter::new();
        let result = normalize_response(&json!({ "author": {}, "articles": [] }), &reporter)
            .expect("empty list is not an error");
        assert!(result.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(reporter.at(Level::Warn).len(), 1);
        assert!(reporter.at(Level::Error).is_empty());
    }

    #[test]
    fn test_missing_articles_field_warns() {
        let reporter = MemoryReporter::new();
        let result = normalize_response(&json!({ "author": { "name": "X" } }), &reporter)
            .expect("missing list is not an error");
        assert!(result.is_empty());
        assert_eq!(reporter.at(Level::Warn).len(), 1);
    }

    #[test]
    fn test_bad_article_skipped_and_reported() {
        let raw = json!({
            "articles": [
                full_article("First", 2020),
                { "title": "Broken", "authors": ["not", "text"] },
                42,
                full_article("Last", 2022)
            ]
        });
        let reporter = MemoryReporter::new();

        let result = normalize_response(&raw, &reporter).expect("valid response");
        assert_eq!(result.total, 2);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.records[0].title, "First");
        assert_eq!(result.records[1].title, "Last");

        let errors = reporter.at(Level::Error);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("Broken"));
        assert!(errors[0].contains("#2"));
        assert!(errors[1].contains("#3"));
    }

    #[test]
    fn test_articles_not_array_is_fatal() {
        let reporter = MemoryReporter::new();
        let result = normalize_response(&json!({ "articles": { "title": "x" } }), &reporter);
        assert!(matches!(result, Err(ScholarError::Parse(_))));

        let result = normalize_response(&json!([1, 2]), &reporter);
        assert!(matches!(result, Err(ScholarError::Parse(_))));
    }
}
