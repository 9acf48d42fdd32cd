//! Price source backed by recorded poe.ninja payloads bundled with the app.

use async_trait::async_trait;

use crate::domain::{ItemCategory, League, MarketQuote};
use crate::infra::{
    poe_ninja::parse_overview,
    source::{PriceSource, PriceSourceError},
};
use crate::util::assets;

/// Serves the same snapshot for every league.
#[derive(Clone, Debug, Default)]
pub struct FixturePriceSource;

impl FixturePriceSource {
    pub fn new() -> Self {
        Self
    }

    fn fixture_path(category: ItemCategory) -> String {
        format!("fixtures/{}.json", category.api_name())
    }
}

#[async_trait]
impl PriceSource for FixturePriceSource {
    async fn fetch_quotes(
        &self,
        _league: League,
        category: ItemCategory,
    ) -> Result<Vec<MarketQuote>, PriceSourceError> {
        let path = Self::fixture_path(category);
        let Some(raw) = assets::data_file(&path) else {
            tracing::warn!(%path, "no fixture bundled, returning empty data");
            return Ok(Vec::new());
        };
        parse_overview(&raw, category)
    }
}
