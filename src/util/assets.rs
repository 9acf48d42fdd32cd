use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

/// Reference catalogue and recorded price fixtures.
#[derive(RustEmbed)]
#[folder = "data"]
struct EmbeddedData;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css` as a static string.
pub fn main_css() -> &'static str {
    MAIN_CSS
        .get_or_init(|| {
            EmbeddedAssets::get("main.css")
                .and_then(|file| String::from_utf8(file.data.into_owned()).ok())
                .unwrap_or_else(|| {
                    tracing::error!("embedded stylesheet missing or not UTF-8");
                    String::new()
                })
        })
        .as_str()
}

/// Raw bytes of a file under `data/`, if bundled.
pub fn data_file(path: &str) -> Option<Cow<'static, [u8]>> {
    EmbeddedData::get(canonical_data_path(path)).map(|file| file.data)
}

fn canonical_data_path(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    trimmed.strip_prefix("data/").unwrap_or(trimmed)
}
