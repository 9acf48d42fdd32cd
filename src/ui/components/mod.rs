pub mod item_table;
pub mod last_updated;
pub mod name_filter;
pub mod price_filter;
pub mod toast;
