//! Relevance scoring and ranking.
//!
//! Additive integer scores: +5 for a category match, +3 per distinct keyword found in
//! the title, +2 per distinct keyword found in the description, +1 when the price is
//! within the extracted maximum. Items scoring 0 are dropped; the remaining items are
//! sorted by score descending with ties keeping catalog iteration order.

use storebot_core::CatalogItem;

/// Default result cap when a call site has no reason to ask for more.
pub const DEFAULT_LIMIT: usize = 5;

const CATEGORY_WEIGHT: u32 = 5;
const TITLE_WEIGHT: u32 = 3;
const DESCRIPTION_WEIGHT: u32 = 2;
const PRICE_WEIGHT: u32 = 1;

/// One query against the catalog: normalized keywords plus the structured hints pulled
/// out of the same message.
#[derive(Debug, Clone, Default)]
pub struct RelevanceQuery {
    pub keywords: Vec<String>,
    pub category: Option<String>,
    pub max_price: Option<f64>,
}

/// Scores one item against the query. Non-negative by construction; every matching
/// rule adds, none subtracts.
pub fn score_item(item: &CatalogItem, query: &RelevanceQuery) -> u32 {
    let mut score = 0;

    if query
        .category
        .as_deref()
        .map_or(false, |category| item.category == category)
    {
        score += CATEGORY_WEIGHT;
    }

    let title = item.title.to_lowercase();
    let description = item.description.to_lowercase();
    let mut seen: Vec<&str> = Vec::with_capacity(query.keywords.len());
    for keyword in &query.keywords {
        // Count each distinct keyword once, however often it was typed.
        if seen.contains(&keyword.as_str()) {
            continue;
        }
        seen.push(keyword.as_str());
        if title.contains(keyword.as_str()) {
            score += TITLE_WEIGHT;
        }
        if description.contains(keyword.as_str()) {
            score += DESCRIPTION_WEIGHT;
        }
    }

    if query.max_price.map_or(false, |max| item.price <= max) {
        score += PRICE_WEIGHT;
    }

    score
}

/// Scores every item, drops the zero-scored, sorts by score descending (stable — ties
/// keep the input order) and truncates to `limit`. Full scan per call; fine for small
/// catalogs, and the contract an indexed implementation would have to preserve.
pub fn rank(items: &[CatalogItem], query: &RelevanceQuery, limit: usize) -> Vec<CatalogItem> {
    let mut scored: Vec<(u32, &CatalogItem)> = items
        .iter()
        .map(|item| (score_item(item, query), item))
        .filter(|(score, _)| *score > 0)
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(limit)
        .map(|(_, item)| item.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, title: &str, category: &str, description: &str, price: f64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: title.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            price,
            rating: 4.0,
            stock: 5,
        }
    }

    fn query(keywords: &[&str], category: Option<&str>, max_price: Option<f64>) -> RelevanceQuery {
        RelevanceQuery {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category: category.map(str::to_string),
            max_price,
        }
    }

    #[test]
    fn test_scoring_formula() {
        let gatsby = item("1", "The Great Gatsby", "Fiction", "a classic novel", 12.99);

        // category +5, "novel" in description +2, price within bound +1
        let q = query(&["novel"], Some("Fiction"), Some(20.0));
        assert_eq!(score_item(&gatsby, &q), 8);

        // "gatsby" in title +3 only
        let q = query(&["gatsby"], None, None);
        assert_eq!(score_item(&gatsby, &q), 3);

        // no rule matches
        let q = query(&["history"], Some("Science"), Some(10.0));
        assert_eq!(score_item(&gatsby, &q), 0);
    }

    #[test]
    fn test_duplicate_keywords_count_once() {
        let gatsby = item("1", "The Great Gatsby", "Fiction", "a classic novel", 12.99);
        let q = query(&["gatsby", "gatsby"], None, None);
        assert_eq!(score_item(&gatsby, &q), 3);
    }

    #[test]
    fn test_zero_scored_items_are_dropped() {
        let items = vec![
            item("1", "Alpha", "Fiction", "about alpha", 10.0),
            item("2", "Beta", "Science", "about beta", 10.0),
        ];
        let ranked = rank(&items, &query(&["alpha"], None, None), DEFAULT_LIMIT);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].id, "1");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let items = vec![
            item("1", "Space One", "Fiction", "", 10.0),
            item("2", "Space Two", "Fiction", "", 10.0),
            item("3", "Space Three", "Fiction", "", 10.0),
        ];
        let ranked = rank(&items, &query(&["space"], None, None), DEFAULT_LIMIT);
        let ids: Vec<&str> = ranked.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_higher_score_ranks_first_and_limit_truncates() {
        let items = vec![
            item("1", "Plain", "Science", "mentions space once", 10.0),
            item("2", "Space Atlas", "Science", "all about space", 10.0),
            item("3", "Other", "Science", "space here too", 10.0),
        ];
        let ranked = rank(&items, &query(&["space"], None, None), 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].id, "2");
    }
}
