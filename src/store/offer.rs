//! Process-wide special offer banner. Never persisted.

use tokio::sync::RwLock;

use crate::models::{now_timestamp, SpecialOffer, DEFAULT_SPECIAL_OFFER};

pub struct OfferBoard {
    current: RwLock<SpecialOffer>,
}

impl OfferBoard {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(default_offer()),
        }
    }

    pub async fn get(&self) -> SpecialOffer {
        self.current.read().await.clone()
    }

    /// Overwrite the banner. The previous text is discarded.
    pub async fn replace(&self, offer: String) -> SpecialOffer {
        let mut current = self.current.write().await;
        *current = SpecialOffer {
            offer,
            updated_at: now_timestamp(),
        };
        current.clone()
    }

    /// Restore the startup banner.
    pub async fn reset(&self) {
        *self.current.write().await = default_offer();
    }
}

impl Default for OfferBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn default_offer() -> SpecialOffer {
    SpecialOffer {
        offer: DEFAULT_SPECIAL_OFFER.to_string(),
        updated_at: now_timestamp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_and_reset() {
        let board = OfferBoard::new();
        assert_eq!(board.get().await.offer, DEFAULT_SPECIAL_OFFER);

        let updated = board.replace("New special drink!".to_string()).await;
        assert_eq!(updated.offer, "New special drink!");
        assert_eq!(board.get().await, updated);

        board.reset().await;
        assert_eq!(board.get().await.offer, DEFAULT_SPECIAL_OFFER);
    }
}
