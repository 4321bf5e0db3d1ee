//! Aggregate statistics over active menu items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuStats {
    pub total_items: i64,
    /// Categories without active items are omitted.
    pub items_by_category: BTreeMap<Category, i64>,
    /// Mean price of active items, 0 when there are none.
    pub average_price: f64,
    pub last_updated: String,
}
