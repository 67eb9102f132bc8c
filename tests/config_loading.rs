/// Integration tests for loading configuration files
use std::io::Write;
use std::path::PathBuf;

use flat_prices::config::load_config;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r##"
[model]
path = "models/prices.json"
validate_schema = false

[presentation]
highlight_city = "Gdańsk"
currency = "zł"
highlight_color = "#ff0000"
bar_color = "#00ff00"

[logging]
level = "debug"
format = "json"
file = "flat-prices.log"

[[cities]]
code = 3
name = "Gdańsk"

[[cities]]
code = 13
name = "Warszawa"
"##,
    );

    let cfg = load_config(Some(file.path())).unwrap();

    assert_eq!(cfg.model.path, PathBuf::from("models/prices.json"));
    assert!(!cfg.model.validate_schema);
    assert_eq!(cfg.presentation.highlight_city.as_deref(), Some("Gdańsk"));
    assert_eq!(cfg.presentation.currency, "zł");
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.logging.format, "json");
    assert_eq!(cfg.logging.file, Some(PathBuf::from("flat-prices.log")));

    let catalog = cfg.catalog().unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.name(3).unwrap(), "Gdańsk");
    assert!(!catalog.contains(6));

    let presentation = cfg.presentation().unwrap();
    assert_eq!(presentation.format_price(1500.0), "1,500.00 zł");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let file = write_config(
        r#"
[model]
path = "other_model.json"
"#,
    );

    let cfg = load_config(Some(file.path())).unwrap();

    assert_eq!(cfg.model.path, PathBuf::from("other_model.json"));
    assert!(cfg.model.validate_schema);
    assert_eq!(cfg.cities.len(), 15);
    assert_eq!(cfg.presentation.currency, "PLN");
    assert_eq!(cfg.presentation.highlight_city.as_deref(), Some("Kraków"));
    assert_eq!(cfg.logging.format, "text");
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    assert!(load_config(Some(&missing)).is_err());
}

#[test]
fn test_duplicate_city_codes_are_rejected() {
    let file = write_config(
        r#"
[[cities]]
code = 1
name = "Bydgoszcz"

[[cities]]
code = 1
name = "Toruń"
"#,
    );

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("Duplicate city code 1"));
}

#[test]
fn test_invalid_color_is_rejected() {
    let file = write_config(
        r#"
[presentation]
highlight_color = "pink"
"#,
    );

    assert!(load_config(Some(file.path())).is_err());
}

#[test]
fn test_empty_highlight_city_disables_highlighting() {
    let file = write_config(
        r#"
[presentation]
highlight_city = ""
"#,
    );

    let cfg = load_config(Some(file.path())).unwrap();
    assert_eq!(cfg.presentation().unwrap().highlight_city, None);
}
