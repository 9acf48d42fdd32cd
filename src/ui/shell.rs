use dioxus::prelude::*;

use crate::app::Route;
use crate::domain::League;
use crate::ui::theme;
use crate::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(#[props(!optional)] active: Option<League>, children: Element) -> Element {
    let nav = use_navigator();

    rsx! {
        div { class: "app",
            header { class: "app-header",
                div { class: "header-inner",
                    div {
                        h1 { class: "app-title", "{APP_NAME}" }
                        p { class: "muted small", "Uniques worth disenchanting, by dust per chaos" }
                    }
                    nav { class: "league-nav",
                        for league in League::ALL {
                            NavButton {
                                active: active == Some(league),
                                onclick: move |_| { nav.push(Route::league(league)); },
                                label: league.name(),
                            }
                        }
                    }
                    span { class: "muted small", "{version_label()}" }
                }
            }
            main { class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    let class = if active {
        theme::BTN_ACTIVE
    } else {
        theme::BTN_INACTIVE
    };

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
