//! Merges market quotes with catalogue dust yields into priced items.

use std::collections::HashMap;

use super::entities::{Item, ItemCategory, MarketQuote, YieldRecord};

/// Uniques that never convert into meaningful dust.
pub const IGNORED_ITEMS: [&str; 4] = [
    "Curio of Consumption",
    "Curio of Absorption",
    "Curio of Potential",
    "Curio of Decay",
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MergeOutcome {
    pub items: Vec<Item>,
    /// Quote names without a matching yield record, in quote order.
    pub missing: Vec<String>,
}

pub fn is_ignored(name: &str) -> bool {
    IGNORED_ITEMS.contains(&name)
}

/// Dust credited to an item of the given category.
///
/// Jewellery is valued at item level 84 without quality, because applying
/// quality to it is prohibitively expensive. Weapons and armour are valued at
/// item level 84 with 20% quality.
pub fn calculated_dust_value(category: ItemCategory, record: &YieldRecord) -> f64 {
    match category {
        ItemCategory::Accessory => record.dust_ilvl84,
        ItemCategory::Weapon | ItemCategory::Armour => record.dust_ilvl84_q20,
    }
}

/// Rounded dust per chaos spent; zero when the price is not positive.
pub fn dust_per_chaos(dust: f64, chaos: f64) -> f64 {
    if chaos > 0.0 {
        (dust / chaos).round()
    } else {
        0.0
    }
}

pub fn unique_id(name: &str, variant: Option<&str>) -> String {
    match variant {
        Some(variant) if !variant.is_empty() => format!("{name}-{variant}"),
        _ => name.to_string(),
    }
}

/// Joins quotes against yield records by name.
///
/// Output follows quote order. Ignored names are skipped silently; quotes
/// without a yield record are reported in [`MergeOutcome::missing`].
pub fn merge_items(quotes: &[MarketQuote], yields: &[YieldRecord]) -> MergeOutcome {
    let by_name: HashMap<&str, &YieldRecord> = yields
        .iter()
        .map(|record| (record.name.as_str(), record))
        .collect();

    let mut outcome = MergeOutcome::default();

    for quote in quotes {
        if is_ignored(&quote.name) {
            continue;
        }

        let Some(record) = by_name.get(quote.name.as_str()) else {
            outcome.missing.push(quote.name.clone());
            continue;
        };

        let calculated = calculated_dust_value(quote.category, record);
        let variant = Some(record.base_type.clone()).filter(|base| !base.is_empty());

        outcome.items.push(Item {
            id: outcome.items.len(),
            unique_id: unique_id(&quote.name, variant.as_deref()),
            name: quote.name.clone(),
            base_type: record.base_type.clone(),
            chaos: quote.chaos_value,
            variant,
            calculated_dust_value: calculated,
            dust_per_chaos: dust_per_chaos(calculated, quote.chaos_value),
            category: quote.category,
        });
    }

    outcome
}

/// Keeps only the cheapest quote per item name.
///
/// Linked and relic variants share a name and a dust yield, so the cheapest
/// one is the only interesting price. The survivor takes the position of the
/// first quote with that name; ties keep the earlier quote.
pub fn dedupe_cheapest_variants(quotes: Vec<MarketQuote>) -> Vec<MarketQuote> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(quotes.len());
    let mut kept: Vec<MarketQuote> = Vec::with_capacity(quotes.len());

    for quote in quotes {
        match slots.get(&quote.name) {
            Some(&index) => {
                if quote.chaos_value < kept[index].chaos_value {
                    kept[index] = quote;
                }
            }
            None => {
                slots.insert(quote.name.clone(), kept.len());
                kept.push(quote);
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(name: &str, chaos: f64, category: ItemCategory) -> MarketQuote {
        MarketQuote {
            name: name.to_string(),
            chaos_value: chaos,
            base_type: "Base".to_string(),
            category,
        }
    }

    fn record(name: &str, base_type: &str, ilvl84: f64, ilvl84_q20: f64) -> YieldRecord {
        YieldRecord {
            name: name.to_string(),
            base_type: base_type.to_string(),
            dust_base: 10.0,
            dust_ilvl84: ilvl84,
            dust_ilvl84_q20: ilvl84_q20,
            dust_per_slot: 1.0,
            width: 1,
            height: 1,
            slots: 1,
            link: String::new(),
        }
    }

    #[test]
    fn weapon_uses_quality_adjusted_yield() {
        let outcome = merge_items(
            &[quote("Soul Taker", 100.0, ItemCategory::Weapon)],
            &[record("Soul Taker", "Siege Axe", 200.0, 250.0)],
        );

        let item = &outcome.items[0];
        assert_eq!(item.calculated_dust_value, 250.0);
        assert_eq!(item.dust_per_chaos, 3.0);
        assert_eq!(item.variant.as_deref(), Some("Siege Axe"));
        assert_eq!(item.unique_id, "Soul Taker-Siege Axe");
        assert_eq!(item.category, ItemCategory::Weapon);
    }

    #[test]
    fn accessory_ignores_quality_adjusted_yield() {
        let outcome = merge_items(
            &[quote("Astramentis", 10.0, ItemCategory::Accessory)],
            &[record("Astramentis", "Onyx Amulet", 400.0, 999_999.0)],
        );

        assert_eq!(outcome.items[0].calculated_dust_value, 400.0);
        assert_eq!(outcome.items[0].dust_per_chaos, 40.0);
    }

    #[test]
    fn zero_or_negative_price_yields_zero_ratio() {
        let outcome = merge_items(
            &[
                quote("Goldrim", 0.0, ItemCategory::Armour),
                quote("Wanderlust", -1.0, ItemCategory::Armour),
            ],
            &[
                record("Goldrim", "Leather Cap", 100.0, 120.0),
                record("Wanderlust", "Wool Shoes", 100.0, 120.0),
            ],
        );

        assert_eq!(outcome.items.len(), 2);
        assert!(outcome.items.iter().all(|item| item.dust_per_chaos == 0.0));
    }

    #[test]
    fn ignored_names_never_appear() {
        let quotes: Vec<_> = IGNORED_ITEMS
            .iter()
            .map(|name| quote(name, 5.0, ItemCategory::Accessory))
            .collect();
        let yields: Vec<_> = IGNORED_ITEMS
            .iter()
            .map(|name| record(name, "Curio", 100.0, 100.0))
            .collect();

        let outcome = merge_items(&quotes, &yields);
        assert!(outcome.items.is_empty());
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn missing_yield_is_dropped_and_reported() {
        let outcome = merge_items(
            &[
                quote("Headhunter", 5000.0, ItemCategory::Accessory),
                quote("Brand New Unique", 3.0, ItemCategory::Weapon),
                quote("Goldrim", 1.0, ItemCategory::Armour),
            ],
            &[
                record("Headhunter", "Leather Belt", 500.0, 600.0),
                record("Goldrim", "Leather Cap", 100.0, 120.0),
            ],
        );

        let names: Vec<_> = outcome.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Headhunter", "Goldrim"]);
        assert_eq!(outcome.missing, ["Brand New Unique"]);
        let ids: Vec<_> = outcome.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, [0, 1]);
    }

    #[test]
    fn ratio_rounds_to_nearest() {
        assert_eq!(dust_per_chaos(250.0, 100.0), 3.0);
        assert_eq!(dust_per_chaos(249.0, 100.0), 2.0);
        assert_eq!(dust_per_chaos(1000.0, 3.0), 333.0);
    }

    #[test]
    fn unique_id_without_variant_is_name() {
        assert_eq!(unique_id("Goldrim", None), "Goldrim");
        assert_eq!(unique_id("Goldrim", Some("")), "Goldrim");
        assert_eq!(unique_id("Goldrim", Some("Leather Cap")), "Goldrim-Leather Cap");
    }

    #[test]
    fn dedupe_keeps_cheapest_in_first_position() {
        let deduped = dedupe_cheapest_variants(vec![
            quote("Tabula Rasa", 20.0, ItemCategory::Armour),
            quote("Goldrim", 1.0, ItemCategory::Armour),
            quote("Tabula Rasa", 8.0, ItemCategory::Armour),
            quote("Tabula Rasa", 8.0, ItemCategory::Armour),
        ]);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name, "Tabula Rasa");
        assert_eq!(deduped[0].chaos_value, 8.0);
        assert_eq!(deduped[1].name, "Goldrim");
    }
}
