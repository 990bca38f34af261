//! Loading coercion settings from an application config file.

use nebula_coerce::prelude::*;
use nebula_coerce::{CoercionSettings, SettingsError};
use pretty_assertions::assert_eq;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct AppConfig {
    #[serde(default)]
    coercion: CoercionSettings,
}

fn load(text: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(text)
}

#[test]
fn section_drives_the_options() {
    let config = load(
        r#"
        [coercion]
        culture = "de-DE"
        fast_numeric_parsing = false
        "#,
    )
    .unwrap();
    let options = CoercionOptions::from_settings(&config.coercion).unwrap();
    assert_eq!(options.culture, Culture::de_de());
    assert!(!options.fast_numeric_parsing);

    let amount = try_coerce(
        &Value::from("1.234,5"),
        &TargetType::Number(NumberKind::F64),
        &options,
    );
    assert_eq!(amount.into_value(), Some(Value::F64(1234.5)));

    let overflow = try_coerce(
        &Value::from("70000"),
        &TargetType::Number(NumberKind::U16),
        &options,
    );
    assert_eq!(overflow.error_code(), ErrorCode::Overflow);
}

#[test]
fn missing_section_uses_defaults() {
    let config = load("").unwrap();
    assert_eq!(config.coercion, CoercionSettings::default());

    let options = CoercionOptions::from_settings(&config.coercion).unwrap();
    assert_eq!(options.culture, Culture::invariant());
    assert!(options.fast_numeric_parsing);
    assert_eq!(options.converters.len(), CoercionOptions::shared().converters.len());
}

#[test]
fn unknown_keys_are_rejected() {
    let err = load(
        r#"
        [coercion]
        fast_numeric = true
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("fast_numeric"), "{err}");
}

#[test]
fn unknown_culture_is_reported() {
    let config = load(
        r#"
        [coercion]
        culture = "xx-YY"
        "#,
    )
    .unwrap();
    let err = CoercionOptions::from_settings(&config.coercion).unwrap_err();
    assert_eq!(err, SettingsError::UnknownCulture("xx-YY".to_owned()));
    assert_eq!(err.to_string(), "unknown culture 'xx-YY'");
}

#[test]
fn settings_round_trip_through_toml() {
    let settings = CoercionSettings {
        culture: "en-GB".to_owned(),
        fast_numeric_parsing: false,
    };
    let text = toml::to_string(&settings).unwrap();
    let back: CoercionSettings = toml::from_str(&text).unwrap();
    assert_eq!(back, settings);
}
