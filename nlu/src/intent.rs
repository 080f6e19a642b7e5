//! Intent classification over an immutable, ordered trigger table.
//!
//! Price patterns are tested first, unconditionally: numeric-threshold phrasing is more
//! specific than keyword overlap, so "fiction books under $20" is a price query even
//! though it also mentions books. Recommendation triggers are tested next, ahead of the
//! generic product vocabulary, so "recommend me a book" resolves to a recommendation.
//! The remaining intents are tested in fixed declaration order, first match wins; no
//! match is `General`.

use std::sync::OnceLock;

use regex::Regex;
use storebot_core::Intent;

/// Numeric-threshold and cost vocabulary. Checked before every other intent.
const PRICE_TRIGGERS: &[&str] = &[
    r"\bprice",
    r"\bcost",
    r"\bhow much\b",
    r"\baffordable\b",
    r"\bbudget\b",
    r"\bdiscount",
    r"\boffers?\b",
    r"\bdeals?\b",
    r"\bsale\b",
    r"under \$?\d+",
    r"less than \$?\d+",
    r"below \$?\d+",
    r"cheaper than \$?\d+",
    r"maximum \$?\d+",
];

/// Ordered trigger table for the non-price intents. Tested top to bottom; the order is
/// a disambiguation policy, not an implementation detail.
const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (
        Intent::Greeting,
        &[
            r"\bhello\b",
            r"\bhi\b",
            r"\bhey\b",
            r"\bgreetings\b",
            r"\bgood morning\b",
            r"\bgood afternoon\b",
            r"\bgood evening\b",
        ],
    ),
    (
        Intent::Recommendation,
        &[
            r"\brecommend",
            r"\bsuggest",
            r"\bbest\b",
            r"\bbestsellers?\b",
            r"\bpopular\b",
            r"\btop\b",
            r"\btrending\b",
            r"\bmost read\b",
            r"\baward winning\b",
        ],
    ),
    (
        Intent::ProductSearch,
        &[
            r"\bbooks?\b",
            r"\bnovels?\b",
            r"\bfiction\b",
            r"\btextbooks?\b",
            r"\bauthors?\b",
            r"\btitles?\b",
            r"\breading\b",
            r"\bliterature\b",
            r"\bstor(y|ies)\b",
        ],
    ),
    (
        Intent::CategorySearch,
        &[
            r"\bcategor(y|ies)\b",
            r"\bgenres?\b",
            r"\btypes?\b",
            r"\bsections?\b",
            r"\bclassification\b",
            r"\bcollections?\b",
        ],
    ),
    (
        Intent::Availability,
        &[
            r"\bavailable\b",
            r"\bavailability\b",
            r"\bin stock\b",
            r"\bstock\b",
            r"\bshipping\b",
            r"\bdeliver(y|ies)?\b",
        ],
    ),
    (
        Intent::Checkout,
        &[
            r"\bcheckout\b",
            r"\bbuy\b",
            r"\bpurchase\b",
            r"\bcart\b",
            r"\bbasket\b",
            r"\borders?\b",
            r"\bpayment\b",
            r"\bpay\b",
        ],
    ),
    (
        Intent::Help,
        &[
            r"\bhelp\b",
            r"\bsupport\b",
            r"\bassist",
            r"\bguide\b",
            r"\bhow to\b",
            r"\bexplain\b",
            r"\bwhat can you do\b",
        ],
    ),
    (
        Intent::AuthorSearch,
        &[r"\bauthors?\b", r"\bwriters?\b", r"\bwho wrote\b", r"\bwritten by\b"],
    ),
    (Intent::Thanks, &[r"\bthank", r"\bappreciate"]),
];

fn price_rules() -> &'static [Regex] {
    static RULES: OnceLock<Vec<Regex>> = OnceLock::new();
    RULES.get_or_init(|| {
        PRICE_TRIGGERS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("invalid price trigger pattern"))
            .collect()
    })
}

fn intent_rules() -> &'static [(Intent, Vec<Regex>)] {
    static RULES: OnceLock<Vec<(Intent, Vec<Regex>)>> = OnceLock::new();
    RULES.get_or_init(|| {
        INTENT_TRIGGERS
            .iter()
            .map(|(intent, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|pattern| Regex::new(pattern).expect("invalid intent trigger pattern"))
                    .collect();
                (*intent, compiled)
            })
            .collect()
    })
}

/// Maps a raw message to exactly one [`Intent`]. Never fails; an unmatched message is
/// [`Intent::General`].
pub fn classify(message: &str) -> Intent {
    let message = message.to_lowercase();

    if price_rules().iter().any(|rule| rule.is_match(&message)) {
        return Intent::PriceQuery;
    }

    for (intent, rules) in intent_rules() {
        if rules.iter().any(|rule| rule.is_match(&message)) {
            return *intent;
        }
    }

    Intent::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings() {
        for message in ["hello", "Hi there!", "hey, what's up", "Good morning"] {
            assert_eq!(classify(message), Intent::Greeting, "{message}");
        }
    }

    #[test]
    fn test_price_patterns_win_over_keywords() {
        // Priority invariant: any price pattern beats co-occurring keywords.
        for message in [
            "Show me fiction books under $20",
            "novels less than 15",
            "books below 30",
            "how much is The Alchemist",
            "what does shipping cost",
        ] {
            assert_eq!(classify(message), Intent::PriceQuery, "{message}");
        }
    }

    #[test]
    fn test_recommendation_beats_product_vocabulary() {
        assert_eq!(classify("recommend me a book"), Intent::Recommendation);
        assert_eq!(classify("what are your bestsellers"), Intent::Recommendation);
    }

    #[test]
    fn test_product_search() {
        assert_eq!(classify("I'm looking for a novel"), Intent::ProductSearch);
        assert_eq!(classify("find books about dragons"), Intent::ProductSearch);
    }

    #[test]
    fn test_author_search_on_who_wrote() {
        assert_eq!(classify("who wrote Dune"), Intent::AuthorSearch);
        assert_eq!(classify("books written by Orwell"), Intent::ProductSearch);
    }

    #[test]
    fn test_thanks_and_checkout() {
        assert_eq!(classify("thanks a lot!"), Intent::Thanks);
        assert_eq!(classify("I want to pay for my cart"), Intent::Checkout);
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(classify("that is too expensive for me"), Intent::General);
        assert_eq!(classify("xyzzy"), Intent::General);
    }

    #[test]
    fn test_word_boundaries() {
        // "shipping" must not trigger greeting via the embedded "hi".
        assert_eq!(classify("is shipping free"), Intent::Availability);
    }
}
