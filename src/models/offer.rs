//! Special offer banner model.

use serde::{Deserialize, Serialize};

/// Banner text shown above the menu.
pub const DEFAULT_SPECIAL_OFFER: &str = "قهوه کلد برو با طعم کارامل - ۲۰٪ تخفیف";

/// The current special offer and when it was last set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOffer {
    pub offer: String,
    pub updated_at: String,
}

/// Request body for replacing the special offer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOfferRequest {
    #[serde(default)]
    pub offer: Option<String>,
}
