use std::time::Duration;

use dioxus::prelude::*;

use crate::domain::ItemDataset;
use crate::ui::theme;
use crate::util::config::AppConfig;

const RELABEL_INTERVAL: Duration = Duration::from_secs(30);

#[component]
pub fn LastUpdated(dataset: ItemDataset, refreshing: bool, on_refresh: EventHandler<()>) -> Element {
    // Re-render periodically so the relative label keeps moving.
    let mut tick = use_signal(|| 0u64);
    use_future(move || async move {
        loop {
            tokio::time::sleep(RELABEL_INTERVAL).await;
            tick += 1;
        }
    });
    let _ = tick();

    let config = use_context::<AppConfig>();
    let stale = dataset.is_stale(config.cache_ttl());
    let relative = dataset.relative_label();
    let absolute = dataset.absolute_label();
    let age = dataset.age_string();

    rsx! {
        div { class: "last-updated",
            span { class: "{theme::TEXT_MUTED}", title: "{absolute}", "Last updated {relative}" }
            if stale {
                span {
                    class: "stale-badge",
                    title: "Older than the refresh window; refresh for current prices",
                    "{age} old"
                }
            }
            button {
                class: "{theme::BTN_SMALL}",
                disabled: refreshing,
                onclick: move |_| on_refresh.call(()),
                if refreshing { "Refreshing…" } else { "Refresh" }
            }
        }
    }
}
