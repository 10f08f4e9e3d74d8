pub const DEFAULT_AMO_BASE_URL: &str = "https://addons.mozilla.org";

pub fn get_amo_base_url() -> String {
    std::env::var("AMO_BASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_AMO_BASE_URL.to_string())
}
