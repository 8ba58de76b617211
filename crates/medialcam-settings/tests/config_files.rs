use medialcam_settings::{MachiningConfig, SettingsError};
use std::path::PathBuf;

fn sample() -> MachiningConfig {
    MachiningConfig {
        points_per_curve: 32,
        resolution: 0.4,
        safe_height: 8.0,
        output_directory: PathBuf::from("gcode-out"),
        output_extension: "gecode".to_string(),
        write_preview: false,
        write_tables: true,
        parallel: true,
        coordinate_precision: Some(4),
    }
}

#[test]
fn test_save_and_load_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("medialcam.toml");
    sample().save_to_file(&path).unwrap();
    assert_eq!(MachiningConfig::load_from_file(&path).unwrap(), sample());
}

#[test]
fn test_save_and_load_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medialcam.json");
    sample().save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"points_per_curve\": 32"));
    assert_eq!(MachiningConfig::load_from_file(&path).unwrap(), sample());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("medialcam.yaml");
    assert!(matches!(
        sample().save_to_file(&path),
        Err(SettingsError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        MachiningConfig::load_from_file(&path),
        Err(SettingsError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "resolution = -1.0\n").unwrap();
    assert!(matches!(
        MachiningConfig::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));
}

#[test]
fn test_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("broken.toml");
    std::fs::write(&toml_path, "resolution = [").unwrap();
    assert!(matches!(
        MachiningConfig::load_from_file(&toml_path),
        Err(SettingsError::TomlDe(_))
    ));

    let json_path = dir.path().join("broken.json");
    std::fs::write(&json_path, "{ not json").unwrap();
    assert!(matches!(
        MachiningConfig::load_from_file(&json_path),
        Err(SettingsError::Json(_))
    ));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        MachiningConfig::load_from_file(&missing),
        Err(SettingsError::Io { .. })
    ));
}
