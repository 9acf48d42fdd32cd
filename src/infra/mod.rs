pub mod cache;
pub mod catalogue;
pub mod fixtures;
pub mod item_data;
pub mod poe_ninja;
pub mod source;
