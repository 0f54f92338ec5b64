use semantic_log::{LogError, SinkConfig, SinkTarget};
use std::io::Write;

#[test]
fn test_sink_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"show_time": false, "show_level": true, "target": "stderr", "time_format": "%H:%M"}}"#
    )
    .unwrap();

    let config = SinkConfig::from_file(file.path()).unwrap();

    assert!(!config.show_time);
    assert!(config.show_level);
    assert!(config.show_path);
    assert!(config.markup);
    assert_eq!(config.target, SinkTarget::Stderr);
    assert_eq!(config.time_format, "%H:%M");
}

#[test]
fn test_sink_config_missing_file() {
    match SinkConfig::from_file("/nonexistent/semlog.json") {
        Err(LogError::ConfigIo { path, .. }) => assert_eq!(path, "/nonexistent/semlog.json"),
        other => panic!("Expected ConfigIo, got {:?}", other),
    }
}

#[test]
fn test_sink_config_malformed_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    assert!(matches!(
        SinkConfig::from_file(file.path()),
        Err(LogError::InvalidConfig(_))
    ));
}

#[test]
fn test_sink_config_rejects_bad_time_format() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"time_format": "%Q"}}"#).unwrap();

    assert!(matches!(
        SinkConfig::from_file(file.path()),
        Err(LogError::InvalidTimeFormat { .. })
    ));
}

#[test]
fn test_sink_config_file_ignores_unknown_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"markup": false, "tracebacks": false, "rotation": "daily"}}"#
    )
    .unwrap();

    let config = SinkConfig::from_file(file.path()).unwrap();

    assert!(!config.markup);
    assert!(!config.tracebacks);
    assert!(config.show_time);
    assert_eq!(config.target, SinkTarget::Stdout);
}
