//! Domain logic for item valuation and filtering lives here.

pub mod app_state;
pub mod entities;
pub mod item_table;
pub mod price_filter;
pub mod valuation;

#[allow(unused_imports)]
pub use app_state::AppState;
#[allow(unused_imports)]
pub use entities::{
    relative_time, Item, ItemCategory, ItemDataset, League, MarketQuote, UnknownCategory,
    UnknownLeague, YieldRecord,
};
#[allow(unused_imports)]
pub use item_table::{sort_items, toggle_sort, visible_items, ItemFilter, ItemSort};
#[allow(unused_imports)]
pub use price_filter::{
    linear_to_log, log_to_linear, reset_filter, InvalidPriceDomain, PriceDomain, PriceFilterValue,
    PriceRange, SLIDER_POSITIONS, UPPER_BOUND_STEP,
};
#[allow(unused_imports)]
pub use valuation::{dedupe_cheapest_variants, merge_items, MergeOutcome, IGNORED_ITEMS};
