//! Data-source seams for market quotes and dust yields.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ItemCategory, League, MarketQuote, YieldRecord};
use crate::infra::{fixtures::FixturePriceSource, poe_ninja::PoeNinjaClient};
use crate::util::config::AppConfig;

#[derive(Debug, Error)]
pub enum PriceSourceError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed {category} payload: {source}")]
    Decode {
        category: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("dust catalogue not bundled at {0}")]
    Missing(String),
    #[error("dust catalogue is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("dust catalogue entry {name} has invalid {field}")]
    InvalidValue { name: String, field: &'static str },
    #[error("dust catalogue lists {0} more than once")]
    DuplicateName(String),
}

/// Market prices for one league and category.
///
/// An empty list means "no data"; errors are reserved for transport and
/// payload failures.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_quotes(
        &self,
        league: League,
        category: ItemCategory,
    ) -> Result<Vec<MarketQuote>, PriceSourceError>;
}

/// Static dust yield catalogue.
pub trait YieldSource: Send + Sync {
    fn load_yields(&self) -> Result<Vec<YieldRecord>, CatalogueError>;
}

/// Where market quotes come from, chosen once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    #[default]
    Live,
    Fixture,
}

impl std::str::FromStr for DataSourceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "fixture" | "fixtures" => Ok(Self::Fixture),
            other => Err(format!("unknown data source mode: {other}")),
        }
    }
}

pub fn build_price_source(config: &AppConfig) -> Result<Arc<dyn PriceSource>, PriceSourceError> {
    match config.data_source {
        DataSourceMode::Live => {
            tracing::info!(base_url = %config.poe_ninja_base_url, "using live poe.ninja prices");
            Ok(Arc::new(PoeNinjaClient::with_base_url(
                &config.poe_ninja_base_url,
            )?))
        }
        DataSourceMode::Fixture => {
            tracing::info!("using bundled price fixtures");
            Ok(Arc::new(FixturePriceSource::new()))
        }
    }
}
