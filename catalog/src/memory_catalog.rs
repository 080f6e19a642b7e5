//! In-memory catalog: a Vec behind an RwLock. Linear scans only — acceptable because
//! the catalog is assumed small; the trait leaves room for an indexed backend.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use storebot_core::CatalogItem;
use tokio::sync::RwLock;

use crate::store::{CatalogError, CatalogStore};

/// Thread-safe in-memory catalog. Insertion order is preserved and is the iteration
/// order that ranking ties fall back to.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Arc<RwLock<Vec<CatalogItem>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from an item list, keeping the given order.
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    /// Appends one item at the end of the iteration order.
    pub async fn add(&self, item: CatalogItem) {
        let mut items = self.items.write().await;
        items.push(item);
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn list_all(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let items = self.items.read().await;
        Ok(items.clone())
    }

    async fn filter(
        &self,
        category: Option<&str>,
        price_min: Option<f64>,
        price_max: Option<f64>,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let items = self.items.read().await;
        let matching = items
            .iter()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .filter(|item| price_min.map_or(true, |min| item.price >= min))
            .filter(|item| price_max.map_or(true, |max| item.price <= max))
            .cloned()
            .collect();
        Ok(matching)
    }

    async fn top_rated(&self, limit: usize) -> Result<Vec<CatalogItem>, CatalogError> {
        let items = self.items.read().await;
        let mut sorted: Vec<CatalogItem> = items.clone();
        sorted.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn cheapest(&self, limit: usize) -> Result<Vec<CatalogItem>, CatalogError> {
        let items = self.items.read().await;
        let mut sorted: Vec<CatalogItem> = items.clone();
        sorted.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal));
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, CatalogError> {
        let items = self.items.read().await;
        let mut categories: Vec<String> = Vec::new();
        for item in items.iter() {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_catalog;

    #[tokio::test]
    async fn test_filter_by_category_and_price() {
        let catalog = InMemoryCatalog::with_items(demo_catalog());

        let fiction = catalog.filter(Some("Fiction"), None, None).await.unwrap();
        assert!(!fiction.is_empty());
        assert!(fiction.iter().all(|item| item.category == "Fiction"));

        let cheap_fiction = catalog
            .filter(Some("Fiction"), None, Some(13.0))
            .await
            .unwrap();
        assert!(cheap_fiction.iter().all(|item| item.price <= 13.0));
    }

    #[tokio::test]
    async fn test_top_rated_is_sorted_descending() {
        let catalog = InMemoryCatalog::with_items(demo_catalog());
        let top = catalog.top_rated(4).await.unwrap();
        assert_eq!(top.len(), 4);
        for pair in top.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
        }
    }

    #[tokio::test]
    async fn test_cheapest_is_sorted_ascending() {
        let catalog = InMemoryCatalog::with_items(demo_catalog());
        let cheap = catalog.cheapest(3).await.unwrap();
        assert_eq!(cheap.len(), 3);
        for pair in cheap.windows(2) {
            assert!(pair[0].price <= pair[1].price);
        }
    }

    #[tokio::test]
    async fn test_distinct_categories_first_seen_order() {
        let catalog = InMemoryCatalog::with_items(demo_catalog());
        let categories = catalog.distinct_categories().await.unwrap();
        assert_eq!(
            categories,
            vec!["Fiction", "Science", "History", "Education", "Biography"]
        );
    }
}
