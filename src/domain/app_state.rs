use super::entities::{Item, ItemDataset, League};
use super::item_table::{toggle_sort, visible_items, ItemFilter, ItemSort};
use super::price_filter::{PriceDomain, PriceFilterValue};

/// View state shared by the league page and its toolbar.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub league: League,
    pub dataset: Option<ItemDataset>,
    pub price_domain: PriceDomain,
    pub filter: ItemFilter,
    pub sort: ItemSort,
    pub descending: bool,
}

impl AppState {
    pub fn new(league: League, price_domain: PriceDomain) -> Self {
        let sort = ItemSort::default();
        Self {
            league,
            dataset: None,
            price_domain,
            filter: ItemFilter::default(),
            sort,
            descending: sort.default_descending(),
        }
    }

    /// Switching leagues drops the loaded dataset but keeps filters.
    pub fn select_league(&mut self, league: League) {
        if self.league != league {
            self.league = league;
            self.dataset = None;
        }
    }

    pub fn set_price_filter(&mut self, value: Option<PriceFilterValue>) {
        self.filter.price = value;
    }

    pub fn clear_filters(&mut self) {
        self.filter = ItemFilter::default();
    }

    pub fn click_sort(&mut self, column: ItemSort) {
        let (sort, descending) = toggle_sort(self.sort, self.descending, column);
        self.sort = sort;
        self.descending = descending;
    }

    pub fn has_active_price_filter(&self) -> bool {
        self.price_domain.has_active_filter(self.filter.price.as_ref())
    }

    pub fn rows(&self) -> Vec<Item> {
        self.dataset
            .as_ref()
            .map(|dataset| visible_items(&dataset.items, &self.filter, self.sort, self.descending))
            .unwrap_or_default()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(League::default(), PriceDomain::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::domain::entities::ItemCategory;

    fn dataset(league: League) -> ItemDataset {
        let item = |id: usize, name: &str, chaos: f64, dust_per_chaos: f64| Item {
            id,
            unique_id: name.to_string(),
            name: name.to_string(),
            base_type: String::new(),
            chaos,
            variant: None,
            calculated_dust_value: chaos * dust_per_chaos,
            dust_per_chaos,
            category: ItemCategory::Weapon,
        };
        ItemDataset {
            league,
            items: vec![item(0, "Cheap", 2.0, 50.0), item(1, "Pricey", 300.0, 80.0)],
            last_updated: SystemTime::now(),
            missing: Vec::new(),
        }
    }

    #[test]
    fn rows_apply_filter_and_sort() {
        let mut state = AppState::default();
        state.dataset = Some(dataset(League::Mercenaries));
        assert_eq!(state.rows()[0].name, "Pricey");

        state.set_price_filter(Some(PriceFilterValue { min: 0.0, max: Some(100.0) }));
        assert!(state.has_active_price_filter());
        let rows = state.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Cheap");

        state.clear_filters();
        assert_eq!(state.rows().len(), 2);
    }

    #[test]
    fn changing_league_drops_dataset() {
        let mut state = AppState::default();
        state.dataset = Some(dataset(League::Mercenaries));
        state.select_league(League::Mercenaries);
        assert!(state.dataset.is_some());
        state.select_league(League::Hardcore);
        assert!(state.dataset.is_none());
        assert!(state.rows().is_empty());
    }

    #[test]
    fn clicking_headers_updates_sort() {
        let mut state = AppState::default();
        state.click_sort(ItemSort::DustPerChaos);
        assert!(!state.descending);
        state.click_sort(ItemSort::Chaos);
        assert_eq!((state.sort, state.descending), (ItemSort::Chaos, true));
    }
}
