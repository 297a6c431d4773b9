use std::fs;
use std::io::Write;
use tempfile::TempDir;

use notescan_core::config::Config;
use notescan_core::source::JsonlSource;
use notescan_core::traits::RecordSource;
use notescan_core::Error;

#[test]
fn load_single_file_skips_blank_and_malformed_lines() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("notes.json");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, r#"{{"text": "Patient with CHF.", "summary": "chf", "id": 1}}"#).unwrap();
    writeln!(f).unwrap();
    writeln!(f, "{{not json").unwrap();
    writeln!(f, r#"["an", "array"]"#).unwrap();
    writeln!(f, r#"{{"summary": "no text field"}}"#).unwrap();

    let (records, stats) = JsonlSource::new(&path).load_with_stats().expect("load");

    assert_eq!(records.len(), 2, "two object lines survive");
    assert_eq!(stats.skipped, 2, "bad JSON and the array line are skipped");
    assert_eq!(records[0].text().unwrap(), "Patient with CHF.");
    assert_eq!(records[1].text().unwrap(), "", "missing text reads as empty");
}

#[test]
fn load_directory_reads_jsonl_files_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir_all(dir.join("nested")).unwrap();
    fs::write(dir.join("b.jsonl"), "{\"text\": \"second\"}\n").unwrap();
    fs::write(dir.join("a.jsonl"), "{\"text\": \"first\"}\n").unwrap();
    fs::write(dir.join("nested/c.json"), "{\"text\": \"third\"}\n").unwrap();
    fs::write(dir.join("ignored.txt"), "{\"text\": \"nope\"}\n").unwrap();

    let records = JsonlSource::new(dir).load().expect("load");
    let texts: Vec<&str> = records.iter().map(|r| r.text().unwrap()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
}

#[test]
fn missing_input_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = JsonlSource::new(tmp.path().join("absent.jsonl")).load().unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound(_))));
}

#[test]
fn toml_overrides_replace_conditions_and_tune_negation() {
    let config = Config::from_toml_str(
        r#"
        [negation]
        window = 30

        [[conditions]]
        name = "copd"
        label = "COPD"
        limit = 10

        [[conditions.categories]]
        name = "diagnosis"
        weight = 2
        terms = ["copd", "emphysema"]
        "#,
    );
    let settings = config.settings().expect("settings");
    assert_eq!(settings.negation.window, 30);
    assert!(!settings.negation.cues.is_empty(), "cues keep their default");
    assert_eq!(settings.conditions.len(), 1);
    let copd = settings.condition("copd").expect("copd");
    assert_eq!(copd.threshold, 2, "threshold falls back to the default");
    assert_eq!(copd.limit, 10);
}

#[test]
fn negative_weight_or_threshold_is_invalid_configuration() {
    let negative_threshold = Config::from_toml_str(
        r#"
        [[conditions]]
        name = "x"
        threshold = -1
        [[conditions.categories]]
        name = "dx"
        weight = 2
        terms = ["x"]
        "#,
    );
    assert!(matches!(negative_threshold.settings(), Err(Error::InvalidConfig(_))));

    let negative_weight = Config::from_toml_str(
        r#"
        [[conditions]]
        name = "x"
        [[conditions.categories]]
        name = "dx"
        weight = -2
        terms = ["x"]
        "#,
    );
    assert!(matches!(negative_weight.settings(), Err(Error::InvalidConfig(_))));
}

#[test]
fn zero_window_and_zero_limit_are_rejected() {
    let zero_window = Config::from_toml_str("[negation]\nwindow = 0\n");
    assert!(matches!(zero_window.settings(), Err(Error::InvalidConfig(_))));

    let zero_limit = Config::from_toml_str(
        r#"
        [[conditions]]
        name = "x"
        limit = 0
        [[conditions.categories]]
        name = "dx"
        weight = 2
        terms = ["x"]
        "#,
    );
    assert!(matches!(zero_limit.settings(), Err(Error::InvalidConfig(_))));
}

#[test]
fn explicit_config_file_must_exist() {
    let tmp = TempDir::new().unwrap();
    let result = Config::load_with(Some(&tmp.path().join("missing.toml")));
    assert!(result.is_err());

    let path = tmp.path().join("scan.toml");
    fs::write(&path, "[report]\nsamples = 1\n").unwrap();
    let config = Config::load_with(Some(&path)).expect("load");
    assert_eq!(config.settings().expect("settings").report.samples, 1);
}
