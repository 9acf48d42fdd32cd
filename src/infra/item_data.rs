//! Builds the per-league item dataset from the injected data sources.

use std::{sync::Arc, time::SystemTime};

use thiserror::Error;

use crate::domain::{
    dedupe_cheapest_variants, merge_items, ItemCategory, ItemDataset, League, MarketQuote,
};
use crate::infra::source::{CatalogueError, PriceSource, PriceSourceError, YieldSource};

#[derive(Debug, Error)]
pub enum ItemDataError {
    #[error("failed to load market prices: {0}")]
    Prices(#[from] PriceSourceError),
    #[error("failed to load dust catalogue: {0}")]
    Catalogue(#[from] CatalogueError),
}

/// Stateless merge engine; cheap to clone and safe to call concurrently.
#[derive(Clone)]
pub struct ItemDataEngine {
    prices: Arc<dyn PriceSource>,
    yields: Arc<dyn YieldSource>,
}

impl ItemDataEngine {
    pub fn new(prices: Arc<dyn PriceSource>, yields: Arc<dyn YieldSource>) -> Self {
        Self { prices, yields }
    }

    /// All unique quotes for a league, one per name, cheapest variant kept.
    pub async fn market_quotes(&self, league: League) -> Result<Vec<MarketQuote>, PriceSourceError> {
        let [weapon, armour, accessory] = ItemCategory::ALL;
        let (weapons, armours, accessories) = tokio::try_join!(
            self.prices.fetch_quotes(league, weapon),
            self.prices.fetch_quotes(league, armour),
            self.prices.fetch_quotes(league, accessory),
        )?;

        let combined = weapons
            .into_iter()
            .chain(armours)
            .chain(accessories)
            .collect::<Vec<_>>();
        Ok(dedupe_cheapest_variants(combined))
    }

    pub async fn load(&self, league: League) -> Result<ItemDataset, ItemDataError> {
        let yields = self.yields.load_yields()?;
        let quotes = self.market_quotes(league).await?;

        let outcome = merge_items(&quotes, &yields);
        for name in &outcome.missing {
            tracing::warn!(league = league.api_name(), item = %name, "no dust data found");
        }
        tracing::info!(
            league = league.api_name(),
            items = outcome.items.len(),
            missing = outcome.missing.len(),
            "merged item data"
        );

        Ok(ItemDataset {
            league,
            items: outcome.items,
            last_updated: SystemTime::now(),
            missing: outcome.missing,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::infra::{catalogue::EmbeddedCatalogue, fixtures::FixturePriceSource};

    fn engine(prices: Arc<StaticPrices>, yields: Vec<crate::domain::YieldRecord>) -> ItemDataEngine {
        ItemDataEngine::new(prices, Arc::new(StaticYields(yields)))
    }

    #[tokio::test]
    async fn merges_all_categories_in_order() {
        let prices = Arc::new(StaticPrices::new(vec![
            quote("Astramentis", 10.0, ItemCategory::Accessory),
            quote("Goldrim", 2.0, ItemCategory::Armour),
            quote("Soul Taker", 100.0, ItemCategory::Weapon),
        ]));
        let engine = engine(
            prices.clone(),
            vec![
                record("Astramentis", "Onyx Amulet", 400.0, 480.0),
                record("Goldrim", "Leather Cap", 100.0, 120.0),
                record("Soul Taker", "Siege Axe", 200.0, 250.0),
            ],
        );

        let dataset = engine.load(League::Mercenaries).await.expect("dataset");
        let names: Vec<_> = dataset.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Soul Taker", "Goldrim", "Astramentis"]);
        assert_eq!(dataset.items[0].dust_per_chaos, 3.0);
        assert_eq!(dataset.items[2].calculated_dust_value, 400.0);
        assert_eq!(dataset.league, League::Mercenaries);
        assert_eq!(prices.call_count(), 3);
    }

    #[tokio::test]
    async fn dedupes_variants_across_the_fetch() {
        let prices = Arc::new(StaticPrices::new(vec![
            quote("Tabula Rasa", 30.0, ItemCategory::Armour),
            quote("Tabula Rasa", 9.0, ItemCategory::Armour),
        ]));
        let engine = engine(prices, vec![record("Tabula Rasa", "Simple Robe", 50.0, 90.0)]);

        let dataset = engine.load(League::Standard).await.expect("dataset");
        assert_eq!(dataset.items.len(), 1);
        assert_eq!(dataset.items[0].chaos, 9.0);
        assert_eq!(dataset.items[0].dust_per_chaos, 10.0);
    }

    #[tokio::test]
    async fn missing_yield_does_not_fail_the_merge() {
        let prices = Arc::new(StaticPrices::new(vec![
            quote("Mystery", 5.0, ItemCategory::Weapon),
            quote("Goldrim", 2.0, ItemCategory::Armour),
            quote("Curio of Decay", 1.0, ItemCategory::Accessory),
        ]));
        let engine = engine(
            prices,
            vec![
                record("Goldrim", "Leather Cap", 100.0, 120.0),
                record("Curio of Decay", "Curio", 10.0, 10.0),
            ],
        );

        let dataset = engine.load(League::Standard).await.expect("dataset");
        assert_eq!(dataset.items.len(), 1);
        assert_eq!(dataset.items[0].name, "Goldrim");
        assert_eq!(dataset.missing, ["Mystery"]);
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let prices = Arc::new(StaticPrices::new(vec![quote("Goldrim", 2.0, ItemCategory::Armour)]));
        prices.set_failing(true);
        let engine = engine(prices, vec![record("Goldrim", "Leather Cap", 100.0, 120.0)]);

        let err = engine.load(League::Standard).await.expect_err("should fail");
        assert!(matches!(err, ItemDataError::Prices(PriceSourceError::Decode { .. })));
    }

    #[tokio::test]
    async fn catalogue_failure_propagates() {
        let engine = ItemDataEngine::new(Arc::new(StaticPrices::default()), Arc::new(BrokenYields));
        let err = engine.load(League::Standard).await.expect_err("should fail");
        assert!(matches!(err, ItemDataError::Catalogue(CatalogueError::Missing(_))));
    }

    #[tokio::test]
    async fn bundled_fixtures_merge_with_bundled_catalogue() {
        let engine = ItemDataEngine::new(Arc::new(FixturePriceSource::new()), Arc::new(EmbeddedCatalogue));
        let dataset = engine.load(League::Mercenaries).await.expect("dataset");

        assert!(!dataset.items.is_empty());
        assert!(dataset
            .items
            .iter()
            .all(|item| !crate::domain::IGNORED_ITEMS.contains(&item.name.as_str())));
        let mut unique_ids: Vec<_> = dataset.items.iter().map(|item| item.unique_id.as_str()).collect();
        let total = unique_ids.len();
        unique_ids.sort_unstable();
        unique_ids.dedup();
        assert_eq!(unique_ids.len(), total);
        assert!(dataset.missing.iter().any(|name| name == "Replica Dreamfeast"));
    }
}
