//! Query translation between the HTTP surface and the item stores.
//!
//! Everything here is backend-agnostic: both store variants receive the same
//! validated filters and coerced candidates, so they answer identically.

use serde_json::Value;

use crate::errors::AppError;
use crate::models::{
    Category, CreateMenuItemRequest, MenuItem, NewMenuItem, TagsInput, DEFAULT_DISCOUNT,
    DEFAULT_RATING,
};

pub const SEARCH_MIN_CHARS: usize = 2;
pub const OFFER_MIN_CHARS: usize = 5;

/// Narrowing applied to the active item listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemFilter {
    All,
    Category(Category),
    Search(SearchTerm),
}

/// A validated, case-folded free-text query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    /// Trim and check the query; a missing query counts as empty.
    pub fn parse(q: Option<&str>) -> Result<Self, AppError> {
        let raw = q.unwrap_or_default().trim();
        if raw.chars().count() < SEARCH_MIN_CHARS {
            return Err(AppError::BadRequest(format!(
                "Search query must be at least {SEARCH_MIN_CHARS} characters"
            )));
        }
        Ok(Self {
            raw: raw.to_string(),
            folded: raw.to_lowercase(),
        })
    }

    /// The trimmed query as the client sent it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive substring match across name, description and tags.
    pub fn matches(&self, item: &MenuItem) -> bool {
        let hit = |text: &str| text.to_lowercase().contains(&self.folded);
        hit(&item.name) || hit(&item.description) || item.tags.iter().any(|t| hit(t))
    }
}

impl ItemFilter {
    /// Whether an item is visible through this filter. Inactive items never are.
    pub fn matches(&self, item: &MenuItem) -> bool {
        item.is_active
            && match self {
                ItemFilter::All => true,
                ItemFilter::Category(category) => item.category == *category,
                ItemFilter::Search(term) => term.matches(item),
            }
    }
}

/// Resolve a path segment into one of the fixed menu categories.
pub fn parse_category(raw: &str) -> Result<Category, AppError> {
    Category::parse(raw).ok_or_else(|| AppError::BadRequest(format!("Invalid category: {raw}")))
}

/// Check and normalize replacement banner text.
pub fn validate_offer(offer: Option<&str>) -> Result<String, AppError> {
    let text = offer.unwrap_or_default().trim();
    if text.chars().count() < OFFER_MIN_CHARS {
        return Err(AppError::invalid(format!(
            "Special offer must be at least {OFFER_MIN_CHARS} characters"
        )));
    }
    Ok(text.to_string())
}

/// Interpret a loosely typed JSON value as a number.
///
/// Numbers pass through, numeric strings are parsed, everything else is `None`.
pub fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

/// True for the values a form sends when a field was left blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.trim().is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Coerce a creation request into a storable candidate.
///
/// Applies the defaults (discount 0, rating 4.5) and the integer truncation
/// shared by both backends. Range checks are left to the store.
pub fn build_new_item(request: &CreateMenuItemRequest) -> Result<NewMenuItem, AppError> {
    let category = request
        .category
        .as_deref()
        .and_then(Category::parse)
        .ok_or_else(|| AppError::invalid("Category is not valid"))?;

    let price = request
        .price
        .as_ref()
        .and_then(numeric)
        .map(|p| p.trunc() as i64)
        .ok_or_else(|| AppError::invalid("Price must be a number"))?;

    let discount = request
        .discount
        .as_ref()
        .and_then(numeric)
        .map(|d| d.trunc() as i64)
        .unwrap_or(DEFAULT_DISCOUNT);

    let rating = request
        .rating
        .as_ref()
        .and_then(numeric)
        .filter(|r| *r != 0.0)
        .unwrap_or(DEFAULT_RATING);

    Ok(NewMenuItem {
        name: request.name.as_deref().unwrap_or_default().trim().to_string(),
        description: request
            .description
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        price,
        category,
        discount,
        tags: normalize_tags(request.tags.as_ref()),
        rating,
        image: request
            .image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

fn normalize_tags(tags: Option<&TagsInput>) -> Vec<String> {
    match tags {
        None => Vec::new(),
        Some(TagsInput::List(list)) => list.iter().map(|t| t.trim().to_string()).collect(),
        Some(TagsInput::Csv(csv)) => csv
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    }
}
