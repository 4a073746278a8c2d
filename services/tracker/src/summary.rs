//! Item aggregation
//!
//! Sums the values of the items created under a token and counts them.
//! Values are exact decimals end to end; no floating point touches the
//! money path.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::{models::Item, repositories::ItemRepository};

/// Aggregation result for one token
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSummary {
    pub total: Decimal,
    pub count: i64,
}

/// Fold a slice of items into its summary
///
/// An empty slice yields (0, 0); that is a valid summary, not an error.
pub fn summarize_items(items: &[Item]) -> ItemSummary {
    let total = items.iter().map(|item| item.value).sum();

    ItemSummary {
        total,
        count: items.len() as i64,
    }
}

/// Summarize the items created under a token
pub async fn summarize(items: &ItemRepository, token: &str) -> Result<ItemSummary> {
    let owned = items.find_by_token(token).await?;
    let summary = summarize_items(&owned);

    info!(
        "Summary for token {}: total {} across {} items",
        token, summary.total, summary.count
    );

    Ok(summary)
}
