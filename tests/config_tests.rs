use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use splitcheck::types::config::Config;
use splitcheck::types::validate_buckets;

const EXAMPLE_CONFIG: &str = include_str!("../example.toml");

#[test]
fn example_config_is_valid() {
    let cfg: Config = toml::from_str(EXAMPLE_CONFIG).expect("example.toml must parse");
    assert_eq!(cfg.sample().count(), 20);
    assert_eq!(cfg.sample().delay_ms(), 100);

    let buckets = cfg.buckets();
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].name, "blue");
    assert_eq!((buckets[0].min, buckets[0].max), (60, 80));
    assert_eq!(buckets[1].name, "green");
    assert_eq!((buckets[1].min, buckets[1].max), (20, 40));
    validate_buckets(buckets).expect("example buckets must validate");
}

#[test]
fn config_written_to_disk_round_trips() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("splitcheck.toml");
    fs::write(&path, EXAMPLE_CONFIG).expect("write config");

    let contents = fs::read_to_string(&path).expect("read config");
    let cfg: Config = toml::from_str(&contents).expect("parse config");
    assert_eq!(cfg.buckets().len(), 2);
}

#[test]
fn unknown_sections_are_tolerated() {
    // forward compatibility: extra keys do not break parsing
    let cfg: Config = toml::from_str(
        r#"
        target = "10.0.1.10"

        [sample]
        count = 5

        [provisioning]
        region = "us-central1"
        "#,
    )
    .unwrap();
    assert_eq!(cfg.resolve_count(None), 5);
    assert_eq!(cfg.resolve_count(Some(9)), 9);
}
