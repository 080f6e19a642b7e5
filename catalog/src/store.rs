use async_trait::async_trait;
use storebot_core::CatalogItem;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog backend error: {0}")]
    Backend(String),
}

/// Read-only catalog contract consumed by the engine. Implementations decide where the
/// items live; the engine never opens a connection itself.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every item, in catalog iteration order. That order is the ranking tie-break.
    async fn list_all(&self) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Items matching the given category and price bounds; any filter may be absent.
    async fn filter(
        &self,
        category: Option<&str>,
        price_min: Option<f64>,
        price_max: Option<f64>,
    ) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Top `limit` items by rating, descending.
    async fn top_rated(&self, limit: usize) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Top `limit` items by price, ascending.
    async fn cheapest(&self, limit: usize) -> Result<Vec<CatalogItem>, CatalogError>;

    /// Distinct category names in first-seen order.
    async fn distinct_categories(&self) -> Result<Vec<String>, CatalogError>;
}
