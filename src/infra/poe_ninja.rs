//! Thin asynchronous client for the poe.ninja item overview API.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::domain::{ItemCategory, League, MarketQuote};
use crate::infra::source::{PriceSource, PriceSourceError};
use crate::util::version::user_agent;

pub const DEFAULT_BASE_URL: &str = "https://poe.ninja/api/data/";

#[derive(Clone)]
pub struct PoeNinjaClient {
    http: Client,
    base_url: Url,
}

impl PoeNinjaClient {
    pub fn new() -> Result<Self, PriceSourceError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, PriceSourceError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(user_agent()).build()?;
        Ok(Self { http, base_url })
    }

    pub fn overview_url(
        &self,
        league: League,
        category: ItemCategory,
    ) -> Result<Url, PriceSourceError> {
        let mut url = self.base_url.join("itemoverview")?;
        url.query_pairs_mut()
            .append_pair("type", category.api_name())
            .append_pair("league", league.api_name());
        Ok(url)
    }
}

#[async_trait]
impl PriceSource for PoeNinjaClient {
    async fn fetch_quotes(
        &self,
        league: League,
        category: ItemCategory,
    ) -> Result<Vec<MarketQuote>, PriceSourceError> {
        let url = self.overview_url(league, category)?;
        tracing::debug!(%url, "requesting poe.ninja prices");

        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let quotes = parse_overview(&body, category)?;
        tracing::info!(
            league = league.api_name(),
            category = category.api_name(),
            count = quotes.len(),
            "fetched price data"
        );
        Ok(quotes)
    }
}

#[derive(Debug, Deserialize)]
struct OverviewDto {
    #[serde(default)]
    lines: Option<Vec<LineDto>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LineDto {
    name: String,
    chaos_value: f64,
    base_type: String,
}

impl LineDto {
    fn into_quote(self, category: ItemCategory) -> MarketQuote {
        MarketQuote {
            name: self.name,
            chaos_value: self.chaos_value,
            base_type: self.base_type,
            category,
        }
    }
}

/// Decodes an item overview payload; a missing `lines` array is "no data".
pub fn parse_overview(
    body: &[u8],
    category: ItemCategory,
) -> Result<Vec<MarketQuote>, PriceSourceError> {
    let overview: OverviewDto =
        serde_json::from_slice(body).map_err(|source| PriceSourceError::Decode {
            category: category.api_name(),
            source,
        })?;

    let Some(lines) = overview.lines else {
        tracing::warn!(category = category.api_name(), "no price lines returned");
        return Ok(Vec::new());
    };

    Ok(lines
        .into_iter()
        .map(|line| line.into_quote(category))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_url_carries_type_and_league() {
        let client = PoeNinjaClient::new().expect("client");
        let url = client
            .overview_url(League::HardcoreMercenaries, ItemCategory::Accessory)
            .expect("url");
        assert_eq!(url.path(), "/api/data/itemoverview");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("type".to_string(), "UniqueAccessory".to_string()),
                ("league".to_string(), "Hardcore Mercenaries".to_string()),
            ]
        );
    }

    #[test]
    fn parses_lines_and_ignores_extra_fields() {
        let body = br#"{
            "lines": [
                {"id": 1, "name": "Starforge", "baseType": "Infernal Sword", "chaosValue": 95.5, "links": 6},
                {"id": 2, "name": "Starforge", "baseType": "Infernal Sword", "chaosValue": 40.0}
            ],
            "language": {"name": "en"}
        }"#;
        let quotes = parse_overview(body, ItemCategory::Weapon).expect("parsed");
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].chaos_value, 95.5);
        assert_eq!(quotes[1].category, ItemCategory::Weapon);
    }

    #[test]
    fn missing_lines_is_empty() {
        let quotes = parse_overview(b"{}", ItemCategory::Armour).expect("parsed");
        assert!(quotes.is_empty());
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = parse_overview(b"<html>rate limited</html>", ItemCategory::Armour)
            .expect_err("should fail");
        assert!(matches!(
            err,
            PriceSourceError::Decode { category: "UniqueArmour", .. }
        ));

        let wrong_shape = br#"{"lines": [{"name": "Goldrim"}]}"#;
        assert!(parse_overview(wrong_shape, ItemCategory::Armour).is_err());
    }
}
