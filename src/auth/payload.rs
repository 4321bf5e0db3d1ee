//! Field checks for item creation, run before anything reaches a store.

use crate::errors::AppError;
use crate::models::{
    Category, CreateMenuItemRequest, DESCRIPTION_MIN_CHARS, DISCOUNT_MAX, DISCOUNT_MIN,
    NAME_MIN_CHARS, PRICE_MIN,
};
use crate::query::{is_blank, numeric};

/// Collect every problem with a creation payload instead of stopping at the first.
pub fn validate_new_item(request: &CreateMenuItemRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if trimmed_len(request.name.as_deref()) < NAME_MIN_CHARS {
        errors.push(format!("Name must be at least {NAME_MIN_CHARS} characters"));
    }

    if trimmed_len(request.description.as_deref()) < DESCRIPTION_MIN_CHARS {
        errors.push(format!(
            "Description must be at least {DESCRIPTION_MIN_CHARS} characters"
        ));
    }

    let price_ok = request
        .price
        .as_ref()
        .and_then(numeric)
        .is_some_and(|p| p >= PRICE_MIN as f64);
    if !price_ok {
        errors.push(format!("Price must be a valid number of at least {PRICE_MIN}"));
    }

    if request.category.as_deref().and_then(Category::parse).is_none() {
        errors.push("Category is not valid".to_string());
    }

    if let Some(discount) = request.discount.as_ref().filter(|d| !is_blank(d)) {
        let in_range = numeric(discount)
            .map(|d| d.trunc() as i64)
            .is_some_and(|d| (DISCOUNT_MIN..=DISCOUNT_MAX).contains(&d));
        if !in_range {
            errors.push(format!(
                "Discount must be between {DISCOUNT_MIN} and {DISCOUNT_MAX}"
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn trimmed_len(value: Option<&str>) -> usize {
    value.map_or(0, |v| v.trim().chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> CreateMenuItemRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_payload_passes() {
        let req = request(json!({
            "name": "آمریکانو",
            "description": "اسپرسو با آب داغ",
            "price": 40000,
            "category": "hot-coffee",
            "discount": 5,
            "tags": ["کلاسیک", "ساده"]
        }));
        assert!(validate_new_item(&req).is_ok());
    }

    #[test]
    fn test_empty_payload_reports_all_required_fields() {
        let Err(AppError::Validation(errors)) = validate_new_item(&request(json!({}))) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_every_violation_is_collected() {
        let req = request(json!({
            "name": " a ",
            "description": "too short",
            "price": "cheap",
            "category": "smoothie",
            "discount": 150
        }));
        let Err(AppError::Validation(errors)) = validate_new_item(&req) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_price_below_minimum_is_rejected() {
        let req = request(json!({
            "name": "Tea",
            "description": "A simple black tea",
            "price": 999,
            "category": "tea"
        }));
        let Err(AppError::Validation(errors)) = validate_new_item(&req) else {
            panic!("expected validation error");
        };
        assert_eq!(errors, vec!["Price must be a valid number of at least 1000"]);
    }

    #[test]
    fn test_blank_discount_is_ignored_but_garbage_is_not() {
        let base = json!({
            "name": "Tea",
            "description": "A simple black tea",
            "price": "30000",
            "category": "tea"
        });

        let mut blank = base.clone();
        blank["discount"] = json!("");
        assert!(validate_new_item(&request(blank)).is_ok());

        let mut garbage = base;
        garbage["discount"] = json!("lots");
        assert!(validate_new_item(&request(garbage)).is_err());
    }
}
