pub const APP_NAME: &str = "Dust Value Scanner";
pub const APP_REPO_URL: &str = "https://github.com/skynatbs/dust_value_scanner";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

pub fn version_label() -> String {
    if let Some(tag) = GIT_TAG {
        tag.to_string()
    } else {
        format!("v{}", APP_VERSION)
    }
}

/// Sent with every outbound request so API operators can reach us.
pub fn user_agent() -> String {
    format!("{}/{} (+{})", APP_NAME, version_label(), APP_REPO_URL)
}
