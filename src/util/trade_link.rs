//! Deep links into the official trade site.

use serde_json::json;
use url::Url;

use crate::domain::League;

const TRADE_SEARCH_BASE: &str = "https://www.pathofexile.com/trade/search/";

/// Search for online listings of `name`, cheapest first.
pub fn trade_search_url(league: League, name: &str) -> Result<Url, url::ParseError> {
    let query = json!({
        "query": {
            "status": { "option": "online" },
            "name": name,
            "stats": [{ "type": "and", "filters": [] }],
            "filters": {
                "trade_filters": {
                    "filters": { "indexed": { "option": "3days" } }
                }
            }
        },
        "sort": { "price": "asc" }
    });

    let mut url = Url::parse(TRADE_SEARCH_BASE)?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(league.api_name());
    }
    url.query_pairs_mut().append_pair("q", &query.to_string());
    Ok(url)
}
