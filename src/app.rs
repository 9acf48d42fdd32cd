use dioxus::prelude::*;

use crate::{
    domain::{AppState, League},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{LeagueNotFound, LeaguePage},
        shell::Shell,
    },
    util::{assets, config::AppConfig},
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/:league")]
    LeagueView { league: String },
}

impl Route {
    pub fn league(league: League) -> Self {
        Route::LeagueView {
            league: league.slug().to_string(),
        }
    }
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();

    let state = use_signal(|| AppState::new(config.default_league, config.price_domain));
    use_context_provider(|| state);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Home() -> Element {
    let config = use_context::<AppConfig>();
    let nav = use_navigator();
    let target = config.default_league;

    use_effect(move || {
        nav.replace(Route::league(target));
    });

    rsx! { Shell { active: None, p { class: "muted", "Loading…" } } }
}

#[component]
pub fn LeagueView(league: String) -> Element {
    match league.parse::<League>() {
        Ok(parsed) => rsx! {
            Shell { active: Some(parsed),
                LeaguePage { key: "{parsed.slug()}", league: parsed }
            }
        },
        Err(_) => rsx! {
            Shell { active: None, LeagueNotFound { slug: league } }
        },
    }
}
