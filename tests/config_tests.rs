//! Option merging and config file loading.

use clockface::config::{DEFAULT_BACKGROUND, DEFAULT_HOURS, DEFAULT_RADIUS_PERCENT};
use clockface::{ClockConfig, ClockError, ClockOptions, Color, ConfigFile, Style, WindowConfig};
use std::io::Write;

// === Merging ===

#[test]
fn no_options_means_defaults() {
    let config = ClockConfig::resolve(None);
    assert_eq!(config, ClockConfig::default());
    assert_eq!(config.radius_percent, DEFAULT_RADIUS_PERCENT);
    assert_eq!(config.style, Style::Classic);
    assert_eq!(config.hours, DEFAULT_HOURS);
    assert_eq!(config.background, DEFAULT_BACKGROUND);
}

#[test]
fn single_override_changes_only_that_field() {
    let options = ClockOptions::builder().hours_color("#fff").build();
    let config = ClockConfig::resolve(Some(&options));

    let mut expected = ClockConfig::default();
    expected.hours.color = Color::new(0xff, 0xff, 0xff);
    assert_eq!(config, expected);
}

#[test]
fn merging_is_idempotent() {
    let options = ClockOptions::builder()
        .style("modern")
        .radius_option(45.0)
        .minutes_size(70.0)
        .bg_color("black")
        .build();
    assert_eq!(
        ClockConfig::resolve(Some(&options)),
        ClockConfig::resolve(Some(&options))
    );
}

#[test]
fn unknown_style_keeps_classic() {
    let options = ClockOptions::builder().style("gothic").build();
    assert_eq!(ClockConfig::resolve(Some(&options)).style, Style::Classic);
}

#[test]
fn every_field_overrides() {
    let options = ClockOptions::builder()
        .radius_option(50.0)
        .style("modern")
        .hours_size(1.0)
        .minutes_size(2.0)
        .seconds_size(3.0)
        .hours_thickness(4.0)
        .minutes_thickness(5.0)
        .seconds_thickness(6.0)
        .hours_color("#010101")
        .minutes_color("#020202")
        .seconds_color("#030303")
        .bg_color("#040404")
        .build();
    let config = ClockConfig::resolve(Some(&options));

    assert_eq!(config.radius_percent, 50.0);
    assert_eq!(config.style, Style::Modern);
    assert_eq!((config.hours.size, config.minutes.size, config.seconds.size), (1.0, 2.0, 3.0));
    assert_eq!(
        (config.hours.thickness, config.minutes.thickness, config.seconds.thickness),
        (4.0, 5.0, 6.0)
    );
    assert_eq!(config.hours.color, Color::new(1, 1, 1));
    assert_eq!(config.minutes.color, Color::new(2, 2, 2));
    assert_eq!(config.seconds.color, Color::new(3, 3, 3));
    assert_eq!(config.background, Color::new(4, 4, 4));
}

// === Config files ===

#[test]
fn toml_uses_camel_case_keys() {
    let file = ConfigFile::from_toml_str(
        r##"
            style = "modern"
            radiusOption = 40
            secondsSize = 90.5
            bgColor = "#000"

            [window]
            title = "Desk clock"
            maxFramerate = 30
        "##,
    )
    .expect("config should parse");

    assert_eq!(file.clock.style.as_deref(), Some("modern"));
    assert_eq!(file.clock.radius_option, Some(40.0));
    assert_eq!(file.clock.seconds_size, Some(90.5));
    assert_eq!(file.clock.bg_color.as_deref(), Some("#000"));
    assert_eq!(file.clock.hours_color, None);

    assert_eq!(file.window.title, "Desk clock");
    assert_eq!(file.window.max_framerate, 30.0);
    assert_eq!(file.window.width, WindowConfig::default().width);
}

#[test]
fn empty_toml_is_all_defaults() {
    let file = ConfigFile::from_toml_str("").unwrap();
    assert_eq!(file, ConfigFile::default());
    assert_eq!(
        ClockConfig::resolve(Some(&file.clock)),
        ClockConfig::default()
    );
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = ConfigFile::from_toml_str("style = ");
    assert!(matches!(result, Err(ClockError::ConfigParse(_))));
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "hoursColor = \"rgb(10, 20, 30)\"").unwrap();

    let loaded = ConfigFile::load(file.path()).unwrap();
    let config = ClockConfig::resolve(Some(&loaded.clock));
    assert_eq!(config.hours.color, Color::new(10, 20, 30));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    match ConfigFile::load(&path) {
        Err(ClockError::ConfigRead { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected read error, got {other:?}"),
    }
}
