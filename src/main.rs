#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod app;
mod domain;
mod infra;
mod ui;
mod util;

use std::sync::Arc;

use dioxus::prelude::*;

#[cfg(feature = "desktop")]
use dioxus_desktop::{tao::window::WindowBuilder, Config as DesktopConfig};

use crate::infra::{
    cache::ItemCache, catalogue::EmbeddedCatalogue, item_data::ItemDataEngine,
    source::build_price_source,
};
use crate::util::{config::AppConfig, version::APP_NAME};

fn main() {
    let loaded = AppConfig::load();
    loaded.config.logging.init();
    loaded.report();
    let config = loaded.config;

    let prices = match build_price_source(&config) {
        Ok(prices) => prices,
        Err(err) => {
            tracing::error!(%err, "failed to initialise price source");
            std::process::exit(1);
        }
    };
    let engine = ItemDataEngine::new(prices, Arc::new(EmbeddedCatalogue));
    let cache = ItemCache::new(engine).with_ttl(config.cache_ttl());
    tracing::info!(
        source = ?config.data_source,
        league = config.default_league.slug(),
        ttl_secs = config.cache_ttl_secs,
        "starting {APP_NAME}"
    );

    // Wayland explicit-sync crashes on some drivers; fall back to GL unless the caller opts in.
    if std::env::var("WAYLAND_DISPLAY").is_ok() && std::env::var("WGPU_BACKEND").is_err() {
        std::env::set_var("WGPU_BACKEND", "gl");
    }

    // WebKit's DMABUF renderer opts into explicit sync; disable it unless the user overrides.
    if std::env::var("WAYLAND_DISPLAY").is_ok()
        && std::env::var("WEBKIT_DISABLE_DMABUF_RENDERER").is_err()
    {
        std::env::set_var("WEBKIT_DISABLE_DMABUF_RENDERER", "1");
    }

    let builder = LaunchBuilder::new().with_context(config).with_context(cache);

    #[cfg(feature = "desktop")]
    let builder = {
        let window = desktop! {
            DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(APP_NAME)
            )
        };
        builder.with_cfg(window)
    };

    #[cfg(not(feature = "desktop"))]
    let builder = builder;

    builder.launch(app::App);
}
