use super::*;

#[test]
fn from_values_defaults() {
    let cfg = ClientConfig::from_values(None, None);
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.ml_base_url, DEFAULT_ML_BASE_URL);
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn from_values_trims_trailing_slashes() {
    let cfg = ClientConfig::from_values(Some("https://api.example.test/v1/"), Some(" https://ml.example.test// "));
    assert_eq!(cfg.api_base_url, "https://api.example.test/v1");
    assert_eq!(cfg.ml_base_url, "https://ml.example.test");
}

#[test]
fn from_values_blank_falls_back_to_default() {
    let cfg = ClientConfig::from_values(Some("   "), Some("/"));
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.ml_base_url, DEFAULT_ML_BASE_URL);
}
