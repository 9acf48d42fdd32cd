//! Filtering and sorting of the item list shown in the table.

use std::cmp::Ordering;

use super::entities::Item;
use super::price_filter::PriceFilterValue;

/// Sortable item columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ItemSort {
    Name,
    Chaos,
    DustValue,
    #[default]
    DustPerChaos,
}

impl ItemSort {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Chaos => "Chaos",
            Self::DustValue => "Dust Value",
            Self::DustPerChaos => "Dust per Chaos",
        }
    }

    /// Direction a column starts in when first selected.
    pub fn default_descending(&self) -> bool {
        !matches!(self, Self::Name)
    }
}

/// Filter options for the item table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemFilter {
    pub name_query: String,
    pub price: Option<PriceFilterValue>,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(price) = &self.price {
            if !price.includes(item.chaos) {
                return false;
            }
        }

        let query = self.name_query.trim();
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        item.name.to_lowercase().contains(&query)
            || item
                .variant
                .as_ref()
                .map(|variant| variant.to_lowercase().contains(&query))
                .unwrap_or(false)
    }

    pub fn is_active(&self) -> bool {
        self.price.is_some() || !self.name_query.trim().is_empty()
    }
}

/// Sort items by the given column. Stable; NaN compares equal.
pub fn sort_items(items: &mut [Item], sort: ItemSort, descending: bool) {
    items.sort_by(|a, b| {
        let ord = match sort {
            ItemSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            ItemSort::Chaos => a.chaos.partial_cmp(&b.chaos).unwrap_or(Ordering::Equal),
            ItemSort::DustValue => a
                .calculated_dust_value
                .partial_cmp(&b.calculated_dust_value)
                .unwrap_or(Ordering::Equal),
            ItemSort::DustPerChaos => a
                .dust_per_chaos
                .partial_cmp(&b.dust_per_chaos)
                .unwrap_or(Ordering::Equal),
        };
        if descending { ord.reverse() } else { ord }
    });
}

pub fn visible_items(
    items: &[Item],
    filter: &ItemFilter,
    sort: ItemSort,
    descending: bool,
) -> Vec<Item> {
    let mut rows: Vec<Item> = items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect();
    sort_items(&mut rows, sort, descending);
    rows
}

/// Header click: flip direction on the active column, otherwise switch.
pub fn toggle_sort(current: ItemSort, descending: bool, clicked: ItemSort) -> (ItemSort, bool) {
    if current == clicked {
        (current, !descending)
    } else {
        (clicked, clicked.default_descending())
    }
}
