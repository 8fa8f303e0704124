use super::*;

#[test]
fn default_config_values() {
    let config = ClientConfig::default();
    assert_eq!(config.api_base, "/api/v1");
    assert_eq!(config.history_limit, 20);
    assert_eq!(config.page_size, 50);
    assert_eq!(config.mapping_save_debounce, Duration::from_millis(600));
}

#[test]
fn api_base_defaults_when_unset_or_blank() {
    assert_eq!(api_base_from(None), "/api/v1");
    assert_eq!(api_base_from(Some("   ")), "/api/v1");
}

#[test]
fn api_base_trims_trailing_slash() {
    assert_eq!(api_base_from(Some("https://stats.example.org/api/v2/")), "https://stats.example.org/api/v2");
}
