use dioxus::prelude::*;

use crate::domain::{Item, ItemSort, League};
use crate::ui::theme;
use crate::util::trade_link::trade_search_url;

const COLUMNS: [ItemSort; 4] = [
    ItemSort::Name,
    ItemSort::Chaos,
    ItemSort::DustValue,
    ItemSort::DustPerChaos,
];

#[component]
pub fn ItemTable(
    rows: Vec<Item>,
    league: League,
    sort: ItemSort,
    descending: bool,
    on_sort: EventHandler<ItemSort>,
) -> Element {
    let is_empty = rows.is_empty();
    let keyed_rows = rows
        .into_iter()
        .map(|row| (row.unique_id.clone(), row))
        .collect::<Vec<_>>();

    rsx! {
        div { class: "{theme::TABLE_CONTAINER}",
            table {
                thead { class: "{theme::TABLE_HEADER}",
                    tr {
                        for column in COLUMNS {
                            th {
                                class: "{theme::SORTABLE_HEADER}",
                                onclick: move |_| on_sort.call(column),
                                "{column.label()}{theme::sort_indicator(sort == column, descending)}"
                            }
                        }
                        th { "Category" }
                    }
                }
                tbody {
                    for (row_key, row) in keyed_rows {
                        ItemRow { key: "{row_key}", row, league }
                    }
                    if is_empty {
                        tr {
                            td {
                                class: "empty {theme::TEXT_MUTED}",
                                colspan: "5",
                                "No items match the current filters."
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ItemRow(row: Item, league: League) -> Element {
    let trade_url = trade_search_url(league, &row.name)
        .map(|url| url.to_string())
        .ok();

    rsx! {
        tr {
            td {
                match trade_url {
                    Some(href) => rsx! {
                        a {
                            class: "{theme::LINK}",
                            href: "{href}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            title: "Search the trade site",
                            "{row.name}"
                        }
                    },
                    None => rsx! { span { "{row.name}" } },
                }
                if let Some(variant) = row.variant.as_ref() {
                    span { class: "variant {theme::TEXT_MUTED}", "{variant}" }
                }
            }
            td { "{format_amount(row.chaos)}" }
            td { "{format_amount(row.calculated_dust_value)}" }
            td { class: "{theme::TEXT_ACCENT}", "{format_amount(row.dust_per_chaos)}" }
            td { class: "{theme::TEXT_MUTED}", "{row.category.label()}" }
        }
    }
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
