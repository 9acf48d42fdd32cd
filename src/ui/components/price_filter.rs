//! Price range popover. Every value shown or emitted comes from
//! [`PriceDomain`]; the component only translates input events.

use dioxus::prelude::*;

use crate::domain::{reset_filter, PriceDomain, PriceFilterValue, SLIDER_POSITIONS, UPPER_BOUND_STEP};
use crate::ui::theme;

#[component]
pub fn PriceFilter(
    domain: PriceDomain,
    #[props(!optional)] value: Option<PriceFilterValue>,
    on_change: EventHandler<Option<PriceFilterValue>>,
) -> Element {
    let mut open = use_signal(|| false);

    let range = domain.current_range(value.as_ref());
    let active = domain.has_active_filter(value.as_ref());
    let lower_position = domain.lower_bound_slider_value(range.lower, &range);
    let summary = match value.as_ref() {
        Some(filter) if active => filter.describe(),
        _ => "Any price".to_string(),
    };
    let upper_label = if range.upper_enabled {
        format!("{:.0}", range.upper)
    } else {
        "No limit".to_string()
    };
    let toggle_class = if active {
        theme::BTN_ACTIVE
    } else {
        theme::BTN_INACTIVE
    };

    rsx! {
        div { class: "price-filter",
            button {
                class: "{toggle_class}",
                onclick: move |_| open.toggle(),
                "{summary}"
            }
            if open() {
                div { class: "{theme::POPOVER}",
                    label { class: "{theme::TEXT_MUTED}", "Minimum: {range.lower:.0} chaos" }
                    input {
                        class: "{theme::RANGE}",
                        r#type: "range",
                        min: "0",
                        max: "{SLIDER_POSITIONS}",
                        step: "1",
                        value: "{lower_position}",
                        oninput: move |evt: FormEvent| {
                            let Ok(position) = evt.value().parse::<f64>() else {
                                return;
                            };
                            let price = domain.lower_bound_linear_value(position, &range);
                            let next = domain.update_lower_bound(price, &range);
                            on_change.call(domain.normalized_filter_value(&next));
                        },
                    }
                    label { class: "{theme::TEXT_MUTED}", "Maximum: {upper_label}" }
                    input {
                        class: "{theme::RANGE}",
                        r#type: "range",
                        min: "{range.lower}",
                        max: "{domain.max()}",
                        step: "{UPPER_BOUND_STEP}",
                        value: "{range.upper}",
                        oninput: move |evt: FormEvent| {
                            let Ok(upper) = evt.value().parse::<f64>() else {
                                return;
                            };
                            let next = domain.update_upper_bound(upper, &range);
                            on_change.call(domain.normalized_filter_value(&next));
                        },
                    }
                    div { class: "popover-actions",
                        button {
                            class: "{theme::BTN_SMALL}",
                            disabled: !active,
                            onclick: move |_| on_change.call(reset_filter()),
                            "Reset"
                        }
                        button {
                            class: "{theme::BTN_SMALL}",
                            onclick: move |_| open.set(false),
                            "Done"
                        }
                    }
                }
            }
        }
    }
}
