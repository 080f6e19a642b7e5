//! Entity extraction: price range, category and author mentions. Three independent
//! pattern groups; absence of a match leaves the field unset, which is a valid outcome.

use std::sync::OnceLock;

use regex::Regex;
use storebot_core::{Entities, PriceRange};

/// Price forms, tried in order; the first structural match wins. Single-bound forms
/// populate `max` only, range forms populate both bounds.
const PRICE_FORMS: &[&str] = &[
    r"under \$?(\d+)",
    r"less than \$?(\d+)",
    r"below \$?(\d+)",
    r"\$?(\d+) to \$?(\d+)",
    r"between \$?(\d+) and \$?(\d+)",
];

/// Keyword-to-category table, searched in declaration order; first match wins.
const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("fiction", "Fiction"),
    ("novel", "Fiction"),
    ("textbook", "Education"),
    ("academic", "Education"),
    ("history", "History"),
    ("science", "Science"),
    ("biology", "Science"),
    ("physics", "Science"),
    ("chemistry", "Science"),
    ("biography", "Biography"),
    ("memoir", "Biography"),
];

fn price_forms() -> &'static [Regex] {
    static FORMS: OnceLock<Vec<Regex>> = OnceLock::new();
    FORMS.get_or_init(|| {
        PRICE_FORMS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("invalid price form pattern"))
            .collect()
    })
}

fn author_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bby\s+([A-Za-z][A-Za-z\s]*)").expect("invalid author pattern")
    })
}

fn bare_number() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)").expect("invalid number pattern"))
}

fn extract_price_range(message: &str) -> Option<PriceRange> {
    for form in price_forms() {
        if let Some(captures) = form.captures(message) {
            let first: f64 = captures[1].parse().ok()?;
            return Some(match captures.get(2) {
                Some(second) => PriceRange {
                    min: Some(first),
                    max: second.as_str().parse().ok(),
                },
                None => PriceRange {
                    min: None,
                    max: Some(first),
                },
            });
        }
    }
    None
}

fn extract_category(message: &str) -> Option<String> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, category)| (*category).to_string())
}

fn extract_author(message: &str) -> Option<String> {
    author_pattern()
        .captures(message)
        .map(|captures| captures[1].trim().to_string())
        .filter(|author| !author.is_empty())
}

/// Pulls price range, category and author mentions out of a raw message. Total
/// function; unmatched fields stay `None`. `specific_terms` is reserved and always
/// empty.
pub fn extract(message: &str) -> Entities {
    let lowered = message.to_lowercase();
    Entities {
        price_range: extract_price_range(&lowered),
        category: extract_category(&lowered),
        author: extract_author(message),
        specific_terms: Vec::new(),
    }
}

/// First bare integer in the message, if any. Used as a soft max-price hint by callers
/// when no structured price phrase was found.
pub fn numeric_mention(message: &str) -> Option<f64> {
    bare_number()
        .captures(message)
        .and_then(|captures| captures[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_bound_forms_set_max_only() {
        for message in ["books under 20", "novels under $20", "less than 20", "below $20"] {
            let entities = extract(message);
            let range = entities.price_range.expect(message);
            assert_eq!(range.max, Some(20.0), "{message}");
            assert_eq!(range.min, None, "{message}");
        }
    }

    #[test]
    fn test_range_forms_set_both_bounds() {
        let entities = extract("books between 10 and 50");
        assert_eq!(
            entities.price_range,
            Some(PriceRange {
                min: Some(10.0),
                max: Some(50.0)
            })
        );

        let entities = extract("anything from 15 to 30 works");
        assert_eq!(
            entities.price_range,
            Some(PriceRange {
                min: Some(15.0),
                max: Some(30.0)
            })
        );
    }

    #[test]
    fn test_no_price_match_leaves_range_unset() {
        assert_eq!(extract("show me fiction").price_range, None);
    }

    #[test]
    fn test_category_first_match_wins() {
        assert_eq!(extract("a fiction novel").category.as_deref(), Some("Fiction"));
        assert_eq!(extract("physics textbooks").category.as_deref(), Some("Education"));
        assert_eq!(extract("chemistry books").category.as_deref(), Some("Science"));
        assert_eq!(extract("a memoir please").category.as_deref(), Some("Biography"));
        assert_eq!(extract("anything good").category, None);
    }

    #[test]
    fn test_author_capture_is_trimmed_and_keeps_case() {
        let entities = extract("books by J K Rowling");
        assert_eq!(entities.author.as_deref(), Some("J K Rowling"));

        let entities = extract("Written BY Orwell");
        assert_eq!(entities.author.as_deref(), Some("Orwell"));
    }

    #[test]
    fn test_who_wrote_is_not_an_author_mention() {
        // The author pattern requires "by <name>".
        assert_eq!(extract("who wrote Dune").author, None);
    }

    #[test]
    fn test_specific_terms_reserved_empty() {
        assert!(extract("sci-fi classics by Herbert under 20").specific_terms.is_empty());
    }

    #[test]
    fn test_numeric_mention() {
        assert_eq!(numeric_mention("books around 25 dollars"), Some(25.0));
        assert_eq!(numeric_mention("no numbers here"), None);
    }
}
