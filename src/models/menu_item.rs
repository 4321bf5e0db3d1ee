//! Menu item model matching the frontend MenuItem shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bounds enforced on every stored menu item.
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 500;
pub const PRICE_MIN: i64 = 1_000;
pub const PRICE_MAX: i64 = 1_000_000;
pub const DISCOUNT_MIN: i64 = 0;
pub const DISCOUNT_MAX: i64 = 100;
pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 5.0;

pub const DEFAULT_DISCOUNT: i64 = 0;
pub const DEFAULT_RATING: f64 = 4.5;

/// Menu section an item belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    HotCoffee,
    ColdCoffee,
    Tea,
    Dessert,
    Breakfast,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::HotCoffee,
        Category::ColdCoffee,
        Category::Tea,
        Category::Dessert,
        Category::Breakfast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HotCoffee => "hot-coffee",
            Category::ColdCoffee => "cold-coffee",
            Category::Tea => "tea",
            Category::Dessert => "dessert",
            Category::Breakfast => "breakfast",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored menu item. Deleted items stay stored with `is_active == false`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: Category,
    pub discount: i64,
    pub tags: Vec<String>,
    pub rating: f64,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// A fully coerced item waiting to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: Category,
    pub discount: i64,
    pub tags: Vec<String>,
    pub rating: f64,
    pub image: Option<String>,
}

impl NewMenuItem {
    /// Every stored-field constraint this candidate violates.
    ///
    /// Both store backends run this before writing, so a candidate is either
    /// rejected with the full list or stored as-is.
    pub fn schema_violations(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len < NAME_MIN_CHARS {
            errors.push(format!("Name must be at least {NAME_MIN_CHARS} characters"));
        } else if name_len > NAME_MAX_CHARS {
            errors.push(format!("Name cannot exceed {NAME_MAX_CHARS} characters"));
        }

        let description_len = self.description.chars().count();
        if description_len < DESCRIPTION_MIN_CHARS {
            errors.push(format!(
                "Description must be at least {DESCRIPTION_MIN_CHARS} characters"
            ));
        } else if description_len > DESCRIPTION_MAX_CHARS {
            errors.push(format!(
                "Description cannot exceed {DESCRIPTION_MAX_CHARS} characters"
            ));
        }

        if self.price < PRICE_MIN {
            errors.push(format!("Price must be at least {PRICE_MIN}"));
        } else if self.price > PRICE_MAX {
            errors.push(format!("Price cannot exceed {PRICE_MAX}"));
        }

        if self.discount < DISCOUNT_MIN {
            errors.push("Discount cannot be negative".to_string());
        } else if self.discount > DISCOUNT_MAX {
            errors.push(format!("Discount cannot exceed {DISCOUNT_MAX}%"));
        }

        if !self.rating.is_finite() || self.rating < RATING_MIN {
            errors.push(format!("Rating cannot be less than {RATING_MIN}"));
        } else if self.rating > RATING_MAX {
            errors.push(format!("Rating cannot exceed {RATING_MAX}"));
        }

        errors
    }

    /// Materialize the stored record with server-assigned identity and timestamps.
    pub fn into_menu_item(self, id: String, now: String) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            discount: self.discount,
            tags: self.tags,
            rating: self.rating,
            image: self.image,
            is_active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Tags arrive either as a JSON array or as one comma-separated string.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Csv(String),
}

/// Request body for creating a menu item.
///
/// Numeric fields stay loosely typed: HTML forms post them as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMenuItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub discount: Option<Value>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
}
