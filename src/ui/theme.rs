//! Shared class names so pages and components stay visually consistent.

// Buttons
pub const BTN_PRIMARY: &str = "btn btn-primary";
pub const BTN_ACTIVE: &str = "btn btn-active";
pub const BTN_INACTIVE: &str = "btn";
pub const BTN_SMALL: &str = "btn btn-small";

// Inputs
pub const INPUT: &str = "input";
pub const RANGE: &str = "range";

// Panels
pub const PANEL: &str = "panel";
pub const POPOVER: &str = "popover";

// Table
pub const TABLE_CONTAINER: &str = "table-container";
pub const TABLE_HEADER: &str = "table-header";
pub const SORTABLE_HEADER: &str = "sortable";

// Text
pub const TEXT_MUTED: &str = "muted";
pub const TEXT_ACCENT: &str = "accent";
pub const LINK: &str = "link";

pub fn sort_indicator(active: bool, descending: bool) -> &'static str {
    match (active, descending) {
        (false, _) => "",
        (true, true) => " ▼",
        (true, false) => " ▲",
    }
}
