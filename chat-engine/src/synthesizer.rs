//! Response synthesis: one fixed behavior per intent, no cross-turn state. Zero-hit
//! primary queries fall back to secondary catalog queries (top-rated or cheapest) —
//! no-match is content, never an error.

use std::cmp::Ordering;

use catalog::{rank, CatalogError, CatalogStore, RelevanceQuery};
use storebot_core::{
    BotResponse, CatalogItem, Entities, Intent, ResponseType, Sentiment, UserPreferenceProfile,
};
use tracing::debug;

/// Result cap for the primary product branches.
const RESULT_LIMIT: usize = 6;
/// Result cap for apology/sniff fallbacks.
const FALLBACK_LIMIT: usize = 4;
/// Personalized recommendations are drawn from a slightly larger pool, then trimmed.
const PERSONALIZED_POOL: usize = 8;
/// Minimum rating for a personalized recommendation.
const PERSONALIZED_MIN_RATING: f32 = 4.0;

const THANKS_VARIANTS: &[&str] = &[
    "You're very welcome! Happy to help you find great books!",
    "My pleasure! Is there anything else you'd like to explore?",
    "Glad I could help! Feel free to ask about more books anytime!",
];

/// Everything the synthesizer needs about one understood turn.
#[derive(Debug)]
pub struct TurnContext<'a> {
    pub message: &'a str,
    pub intent: Intent,
    pub entities: &'a Entities,
    pub sentiment: Sentiment,
    /// Profile as it was when the request arrived; queries personalize against this.
    pub profile: Option<&'a UserPreferenceProfile>,
    /// Updated profile, present only when this turn changed it.
    pub learned: Option<UserPreferenceProfile>,
}

/// Stable per-message variant selector. FNV-1a rather than the std hasher so the pick
/// does not change across runs or platforms.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn format_price(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("${value:.0}")
    } else {
        format!("${value:.2}")
    }
}

fn by_rating_desc(a: &CatalogItem, b: &CatalogItem) -> Ordering {
    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
}

fn with_products(mut response: BotResponse, products: Vec<CatalogItem>) -> BotResponse {
    if !products.is_empty() {
        response.products = Some(products);
        response.response_type = ResponseType::Product;
    }
    response
}

fn suggestions(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| (*s).to_string()).collect())
}

fn greeting(sentiment: Sentiment) -> BotResponse {
    let text = match sentiment {
        Sentiment::Positive => {
            "Hello! I'm excited to help you find amazing books today! What can I help you discover?"
        }
        _ => "Hi there! I'm here to help you find the perfect books. What are you looking for today?",
    };
    let mut response = BotResponse::text(text);
    response.suggestions = suggestions(&[
        "Browse bestsellers",
        "Find books by genre",
        "Get recommendations",
        "Search by author",
    ]);
    response
}

async fn product_search(
    message: &str,
    entities: &Entities,
    catalog: &dyn CatalogStore,
) -> Result<BotResponse, CatalogError> {
    let mut results: Vec<CatalogItem> = Vec::new();
    let mut text = String::new();

    if let Some(category) = &entities.category {
        let (min, max) = entities
            .price_range
            .map_or((None, None), |range| (range.min, range.max));
        results = catalog.filter(Some(category.as_str()), min, max).await?;
        results.truncate(RESULT_LIMIT);

        text = format!("Here are some great {} books", category.to_lowercase());
        match (min, max) {
            (Some(min), Some(max)) => {
                text.push_str(&format!(
                    " between {} and {}",
                    format_price(min),
                    format_price(max)
                ));
            }
            (None, Some(max)) => text.push_str(&format!(" under {}", format_price(max))),
            _ => {}
        }
        text.push(':');
    } else if let Some(author) = &entities.author {
        results = scan_for_author(catalog, author).await?;
        results.truncate(RESULT_LIMIT);
        text = format!("Here are books by or about {author}:");
    } else {
        let keywords: Vec<String> = nlu::normalize(message).into_iter().take(2).collect();
        if !keywords.is_empty() {
            let term = keywords.join(" ");
            let query = RelevanceQuery {
                keywords,
                category: None,
                max_price: entities
                    .price_range
                    .and_then(|range| range.max)
                    .or_else(|| nlu::numeric_mention(message)),
            };
            let items = catalog.list_all().await?;
            results = rank(&items, &query, RESULT_LIMIT);
            text = format!("Here are books matching '{term}':");
        }
    }

    if results.is_empty() {
        debug!("product search had no hits, falling back to top rated");
        results = catalog.top_rated(RESULT_LIMIT).await?;
        text = "Let me show you some popular books instead:".to_string();
    }

    let mut response = with_products(BotResponse::text(text), results);
    response.suggestions = if response.products.is_some() {
        suggestions(&["Show more", "Filter by price", "Different category", "Add to cart"])
    } else {
        suggestions(&["Browse categories", "Popular books", "New arrivals"])
    };
    Ok(response)
}

async fn recommendation(
    profile: Option<&UserPreferenceProfile>,
    catalog: &dyn CatalogStore,
) -> Result<BotResponse, CatalogError> {
    let mut response = match profile {
        Some(profile) => {
            let mut personalized = personalized_picks(profile, catalog).await?;
            personalized.truncate(RESULT_LIMIT);
            if personalized.is_empty() {
                let top = catalog.top_rated(RESULT_LIMIT).await?;
                with_products(
                    BotResponse::text("Here are our top-rated books:"),
                    top,
                )
            } else {
                with_products(
                    BotResponse::text(
                        "Based on your preferences, here are some books you might love:",
                    ),
                    personalized,
                )
            }
        }
        None => {
            let top = catalog.top_rated(RESULT_LIMIT).await?;
            with_products(BotResponse::text("Here are our highest-rated books:"), top)
        }
    };

    response.suggestions = suggestions(&[
        "More like these",
        "Different genre",
        "Budget options",
        "Add to cart",
    ]);
    Ok(response)
}

/// Preferred categories ∩ budget ∩ rating floor, best-rated first, at most
/// [`PERSONALIZED_POOL`] items. Callers trim further for display.
async fn personalized_picks(
    profile: &UserPreferenceProfile,
    catalog: &dyn CatalogStore,
) -> Result<Vec<CatalogItem>, CatalogError> {
    let items = catalog.list_all().await?;
    let mut picks: Vec<CatalogItem> = items
        .into_iter()
        .filter(|item| {
            profile.preferred_categories.is_empty()
                || profile.preferred_categories.contains(&item.category)
        })
        .filter(|item| profile.budget_range.min.map_or(true, |min| item.price >= min))
        .filter(|item| profile.budget_range.max.map_or(true, |max| item.price <= max))
        .filter(|item| item.rating >= PERSONALIZED_MIN_RATING)
        .collect();
    picks.sort_by(by_rating_desc);
    picks.truncate(PERSONALIZED_POOL);
    Ok(picks)
}

async fn price_query(
    entities: &Entities,
    catalog: &dyn CatalogStore,
) -> Result<BotResponse, CatalogError> {
    let Some(range) = entities.price_range else {
        let mut response =
            BotResponse::text("I can help you find books in any price range! What's your budget?");
        response.suggestions = suggestions(&[
            "Under $15",
            "Between $15 and $25",
            "Between $25 and $50",
            "Show all prices",
        ]);
        return Ok(response);
    };

    let bound_phrase = match (range.min, range.max) {
        (Some(min), Some(max)) => {
            format!("between {} and {}", format_price(min), format_price(max))
        }
        (None, Some(max)) => format!("under {}", format_price(max)),
        (Some(min), None) => format!("over {}", format_price(min)),
        (None, None) => String::new(),
    };

    let mut matches = catalog.filter(None, range.min, range.max).await?;
    matches.sort_by(by_rating_desc);
    matches.truncate(RESULT_LIMIT);

    if matches.is_empty() {
        // The message still names the requested bound, not the fallback's.
        let text = format!(
            "I couldn't find books {bound_phrase}. Here are some affordable options:"
        );
        let cheapest = catalog.cheapest(RESULT_LIMIT).await?;
        return Ok(with_products(BotResponse::text(text), cheapest));
    }

    let mut response = with_products(
        BotResponse::text(format!("Here are highly-rated books {bound_phrase}:")),
        matches,
    );
    response.suggestions = suggestions(&[
        "Show more",
        "Different price range",
        "Filter by category",
    ]);
    Ok(response)
}

async fn category_search(catalog: &dyn CatalogStore) -> Result<BotResponse, CatalogError> {
    let mut categories = catalog.distinct_categories().await?;
    categories.truncate(RESULT_LIMIT);

    let mut response =
        BotResponse::text("We have books in these categories. Which one interests you?");
    response.suggestions = Some(categories);
    response.response_type = ResponseType::Suggestions;
    Ok(response)
}

fn checkout() -> BotResponse {
    let mut response = BotResponse::text(
        "Ready to complete your purchase? I can help you review your cart or proceed to checkout.",
    );
    response.suggestions = suggestions(&[
        "View cart",
        "Proceed to checkout",
        "Continue shopping",
        "Apply coupon",
    ]);
    response
}

fn help() -> BotResponse {
    let mut response = BotResponse::text(
        "I'm your personal book assistant! I can help you:\n\
         • Find books by title, author, or genre\n\
         • Get personalized recommendations\n\
         • Check prices and deals\n\
         • Manage your cart and checkout",
    );
    response.suggestions = suggestions(&[
        "Find a book",
        "Get recommendations",
        "Browse categories",
        "Price search",
    ]);
    response
}

fn thanks(message: &str) -> BotResponse {
    let variant = (fnv1a(message.as_bytes()) % THANKS_VARIANTS.len() as u64) as usize;
    let mut response = BotResponse::text(THANKS_VARIANTS[variant]);
    response.suggestions = suggestions(&["Find more books", "Browse categories", "Check my cart"]);
    response
}

async fn scan_for_author(
    catalog: &dyn CatalogStore,
    author: &str,
) -> Result<Vec<CatalogItem>, CatalogError> {
    let needle = author.to_lowercase();
    let items = catalog.list_all().await?;
    Ok(items
        .into_iter()
        .filter(|item| {
            item.title.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
        .collect())
}

async fn author_search(
    entities: &Entities,
    catalog: &dyn CatalogStore,
) -> Result<BotResponse, CatalogError> {
    let Some(author) = &entities.author else {
        let mut response = BotResponse::text("Which author are you interested in?");
        response.suggestions = suggestions(&[
            "Search by title instead",
            "Browse authors",
            "Popular authors",
        ]);
        return Ok(response);
    };

    let mut hits = scan_for_author(catalog, author).await?;
    hits.truncate(RESULT_LIMIT);

    if hits.is_empty() {
        let text = format!("I couldn't find books by {author}. Here are some popular alternatives:");
        let alternatives = catalog.top_rated(FALLBACK_LIMIT).await?;
        return Ok(with_products(BotResponse::text(text), alternatives));
    }

    Ok(with_products(
        BotResponse::text(format!("Here are books by or about {author}:")),
        hits,
    ))
}

async fn general(message: &str, catalog: &dyn CatalogStore) -> Result<BotResponse, CatalogError> {
    let lowered = message.to_lowercase();

    if lowered.contains("expensive") || lowered.contains("cheap") {
        let budget_picks = catalog.cheapest(FALLBACK_LIMIT).await?;
        return Ok(with_products(
            BotResponse::text("Here are some budget-friendly options:"),
            budget_picks,
        ));
    }

    if ["bestseller", "popular", "trending"]
        .iter()
        .any(|word| lowered.contains(word))
    {
        let popular = catalog.top_rated(FALLBACK_LIMIT).await?;
        return Ok(with_products(
            BotResponse::text("Here are our most popular books:"),
            popular,
        ));
    }

    let mut response =
        BotResponse::text("I'd love to help you find the perfect books! What are you interested in?");
    response.suggestions = suggestions(&[
        "Browse books",
        "Get recommendations",
        "Search by category",
        "Price ranges",
    ]);
    Ok(response)
}

/// Builds the reply payload for one understood turn. Every branch attaches sentiment,
/// entities and — when the turn changed it — the learned profile.
pub async fn synthesize(
    ctx: TurnContext<'_>,
    catalog: &dyn CatalogStore,
) -> Result<BotResponse, CatalogError> {
    let mut response = match ctx.intent {
        Intent::Greeting => greeting(ctx.sentiment),
        Intent::ProductSearch => product_search(ctx.message, ctx.entities, catalog).await?,
        Intent::Recommendation => recommendation(ctx.profile, catalog).await?,
        Intent::PriceQuery => price_query(ctx.entities, catalog).await?,
        Intent::CategorySearch => category_search(catalog).await?,
        Intent::Checkout => checkout(),
        Intent::Help => help(),
        Intent::Thanks => thanks(ctx.message),
        Intent::AuthorSearch => author_search(ctx.entities, catalog).await?,
        Intent::Availability | Intent::General => general(ctx.message, catalog).await?,
    };

    response.sentiment = Some(ctx.sentiment);
    response.entities = Some(ctx.entities.clone());
    response.learned_preferences = ctx.learned;
    Ok(response)
}
