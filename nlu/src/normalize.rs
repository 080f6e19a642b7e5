//! Token normalization: lowercase, word segmentation, stop-word removal and
//! lemmatization. The stop-word set and lemma dictionary are fixed const tables, so the
//! whole pipeline is deterministic.

use unicode_segmentation::UnicodeSegmentation;

/// English stop-word set. Tokens matching one of these are dropped before
/// lemmatization.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just",
    "me", "more", "most", "my", "no", "nor", "not", "now", "of", "off", "on", "once",
    "only", "or", "other", "our", "ours", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "very", "was", "we", "were", "what", "when", "where", "which", "while", "who",
    "whom", "why", "will", "with", "you", "your", "yours",
];

/// Irregular plural forms the suffix rules cannot reach.
const IRREGULAR_LEMMAS: &[(&str, &str)] = &[
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("men", "man"),
    ("mice", "mouse"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("wives", "wife"),
    ("women", "woman"),
];

/// Reduces a lowercase token to its dictionary form: irregulars first, then plural
/// suffix stripping.
fn lemmatize(token: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR_LEMMAS.iter().find(|(form, _)| *form == token) {
        return (*lemma).to_string();
    }

    if token.len() > 4 && token.ends_with("ies") {
        return format!("{}y", &token[..token.len() - 3]);
    }
    if token.len() > 4
        && ["sses", "shes", "ches", "xes", "zes"]
            .iter()
            .any(|suffix| token.ends_with(suffix))
    {
        return token[..token.len() - 2].to_string();
    }
    if token.len() > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return token[..token.len() - 1].to_string();
    }

    token.to_string()
}

/// Normalizes a raw message into content tokens: lowercased, segmented into words,
/// stop-words removed, lemmatized, and filtered to length > 2. Order is preserved.
pub fn normalize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .unicode_words()
        .filter(|word| !STOP_WORDS.contains(word))
        .map(lemmatize)
        .filter(|token| token.len() > 2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_drops_stop_words() {
        let tokens = normalize("Show me THE best Fiction books");
        assert_eq!(tokens, vec!["show", "best", "fiction", "book"]);
    }

    #[test]
    fn test_lemmatizes_plurals() {
        assert_eq!(lemmatize("books"), "book");
        assert_eq!(lemmatize("stories"), "story");
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("classes"), "class");
        assert_eq!(lemmatize("children"), "child");
    }

    #[test]
    fn test_keeps_short_suffix_words_intact() {
        // "is"/"us"/"ss" endings are not plural markers.
        assert_eq!(lemmatize("class"), "class");
        assert_eq!(lemmatize("thesis"), "thesis");
        assert_eq!(lemmatize("campus"), "campus");
    }

    #[test]
    fn test_drops_short_tokens() {
        // "30" and "to" fall below the length cutoff; "under" is a stop word.
        let tokens = normalize("fiction books under 30");
        assert_eq!(tokens, vec!["fiction", "book"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize("").is_empty());
        assert!(normalize("   ").is_empty());
    }
}
