//! Default-data seeding — fills empty collections at startup so a fresh
//! instance serves a presentable portfolio immediately.

use std::sync::Arc;
use tracing::info;

use vitrine_core::document::{GalleryPhoto, Portfolio};
use vitrine_core::error::Result;
use vitrine_core::store::{DocumentStore, collections};

/// Seed the portfolio singleton and placeholder gallery photos if their
/// collections are empty. Idempotent: an already-populated collection is
/// left untouched.
pub async fn seed_defaults(store: &Arc<dyn DocumentStore>) -> Result<()> {
    if store.count(collections::PORTFOLIO, None).await? == 0 {
        let portfolio = Portfolio::default();
        store
            .insert(collections::PORTFOLIO, serde_json::to_value(&portfolio)?)
            .await?;
        info!("Seeded default portfolio document");
    }

    if store.count(collections::GALLERY, None).await? == 0 {
        let placeholders = [
            ("https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=600", "Portrait in Nature"),
            ("https://images.unsplash.com/photo-1524504388940-b1c1722653e1?w=600", "Creative Workspace"),
            ("https://images.unsplash.com/photo-1517841905240-472988babdf9?w=600", "Urban Vibes"),
            ("https://images.unsplash.com/photo-1488426862026-3ee34a7d66df?w=600", "Coffee & Coding"),
            ("https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=600", "Sunset Thoughts"),
            ("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=600", "Tech Conference"),
        ];
        for (index, (url, caption)) in placeholders.iter().enumerate() {
            let photo = GalleryPhoto::new(*url, *caption, index as i64);
            store
                .insert(collections::GALLERY, serde_json::to_value(&photo)?)
                .await?;
        }
        info!(count = placeholders.len(), "Seeded placeholder gallery");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::in_memory::InMemoryStore;

    #[tokio::test]
    async fn seeds_empty_store_once() {
        let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
        seed_defaults(&store).await.unwrap();

        assert_eq!(store.count(collections::PORTFOLIO, None).await.unwrap(), 1);
        assert_eq!(store.count(collections::GALLERY, None).await.unwrap(), 6);

        // Running again must not duplicate anything
        seed_defaults(&store).await.unwrap();
        assert_eq!(store.count(collections::PORTFOLIO, None).await.unwrap(), 1);
        assert_eq!(store.count(collections::GALLERY, None).await.unwrap(), 6);
    }
}
