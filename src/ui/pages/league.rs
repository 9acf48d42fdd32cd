use dioxus::prelude::*;

use crate::{
    app::Route,
    domain::{AppState, ItemDataset, ItemSort, League, PriceFilterValue},
    infra::{
        cache::{CacheStatus, CachedPayload, ItemCache},
        item_data::ItemDataError,
    },
    ui::{
        components::{
            item_table::ItemTable,
            last_updated::LastUpdated,
            name_filter::NameFilter,
            price_filter::PriceFilter,
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
};

#[component]
pub fn LeaguePage(league: League) -> Element {
    let cache = use_context::<ItemCache>();
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let mut load_error = use_signal(|| None::<String>);
    let mut refreshing = use_signal(|| false);

    let mut initial_load = use_resource({
        let cache = cache.clone();
        move || {
            let cache = cache.clone();
            async move {
                state.with_mut(|st| st.select_league(league));
                let result = cache.get(league).await;
                apply_result(state, toasts, load_error, result)
            }
        }
    });

    let on_refresh = move |_: ()| {
        let cache = cache.clone();
        refreshing.set(true);
        spawn(async move {
            let result = cache.revalidate(league).await;
            if apply_result(state, toasts, load_error, result) {
                push_toast(toasts, ToastKind::Success, format!("{} prices refreshed.", league.name()));
            }
            refreshing.set(false);
        });
    };

    let snapshot = state();
    let dataset = snapshot
        .dataset
        .clone()
        .filter(|dataset| dataset.league == league);

    let Some(dataset) = dataset else {
        return match load_error() {
            Some(message) => rsx! {
                div { class: "{theme::PANEL} error",
                    h2 { "Could not load {league.name()}" }
                    p { class: "{theme::TEXT_MUTED}", "{message}" }
                    button {
                        class: "{theme::BTN_PRIMARY}",
                        onclick: move |_| {
                            load_error.set(None);
                            initial_load.restart();
                        },
                        "Try again"
                    }
                }
            },
            None => rsx! { p { class: "{theme::TEXT_MUTED}", "Loading {league.name()} prices…" } },
        };
    };

    let rows = snapshot.rows();
    let shown = rows.len();
    let total = dataset.items.len();
    let filter_active = snapshot.filter.is_active();

    rsx! {
        section { class: "league-page",
            div { class: "toolbar",
                h2 { "{league.name()}" }
                LastUpdated {
                    dataset: dataset.clone(),
                    refreshing: refreshing(),
                    on_refresh: on_refresh,
                }
            }
            div { class: "toolbar",
                NameFilter {
                    value: snapshot.filter.name_query.clone(),
                    on_change: move |query: String| state.with_mut(|st| st.filter.name_query = query),
                }
                PriceFilter {
                    domain: snapshot.price_domain,
                    value: snapshot.filter.price,
                    on_change: move |value: Option<PriceFilterValue>| state.with_mut(|st| st.set_price_filter(value)),
                }
                if filter_active {
                    button {
                        class: "{theme::BTN_SMALL}",
                        onclick: move |_| state.with_mut(|st| st.clear_filters()),
                        "Clear filters"
                    }
                }
                span { class: "{theme::TEXT_MUTED}", "{shown} of {total} items" }
            }
            ItemTable {
                rows,
                league,
                sort: snapshot.sort,
                descending: snapshot.descending,
                on_sort: move |column: ItemSort| state.with_mut(|st| st.click_sort(column)),
            }
            MissingItems { names: dataset.missing.clone() }
        }
    }
}

#[component]
fn MissingItems(names: Vec<String>) -> Element {
    if names.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        details { class: "{theme::PANEL}",
            summary { class: "{theme::TEXT_MUTED}", "{names.len()} priced items have no dust data" }
            ul { class: "missing-list",
                for name in names {
                    li { key: "{name}", "{name}" }
                }
            }
        }
    }
}

#[component]
pub fn LeagueNotFound(slug: String) -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "{theme::PANEL}",
            h2 { "League not found" }
            p { class: "{theme::TEXT_MUTED}", "\"{slug}\" is not a known league." }
            button {
                class: "{theme::BTN_PRIMARY}",
                onclick: move |_| { nav.push(Route::Home {}); },
                "Go to the default league"
            }
        }
    }
}

/// Stores a cache result in the shared state and reports it. Returns whether
/// fresh data arrived.
fn apply_result(
    mut state: Signal<AppState>,
    toasts: Signal<Vec<ToastMessage>>,
    mut load_error: Signal<Option<String>>,
    result: Result<CachedPayload<ItemDataset>, ItemDataError>,
) -> bool {
    match result {
        Ok(payload) => {
            let status = payload.status;
            let league = payload.data.league;
            load_error.set(None);
            state.with_mut(|st| {
                if st.league == league {
                    st.dataset = Some(payload.data);
                }
            });
            if status == CacheStatus::Stale {
                push_toast(
                    toasts,
                    ToastKind::Warning,
                    "Price refresh failed; showing the last known prices.",
                );
            }
            status == CacheStatus::Fresh
        }
        Err(err) => {
            let message = err.to_string();
            push_toast(toasts, ToastKind::Error, format!("Failed to load prices: {message}"));
            load_error.set(Some(message));
            false
        }
    }
}
