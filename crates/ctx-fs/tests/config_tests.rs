use ctx_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::fs;
use tempfile::tempdir;

#[derive(Debug, Deserialize, PartialEq)]
struct Sample {
    name: String,
    #[serde(default)]
    items: Vec<String>,
}

fn write(dir: &tempfile::TempDir, file: &str, content: &str) -> NormalizedPath {
    let path = dir.path().join(file);
    fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[test]
fn test_load_toml() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "sample.toml", "name = \"app\"\nitems = [\"a.cs\"]\n");

    let loaded: Sample = ConfigStore::new().load(&path).unwrap();
    assert_eq!(
        loaded,
        Sample {
            name: "app".into(),
            items: vec!["a.cs".into()],
        }
    );
}

#[test]
fn test_load_json_and_yaml_agree() {
    let dir = tempdir().unwrap();
    let json = write(&dir, "sample.json", r#"{"name": "app"}"#);
    let yaml = write(&dir, "sample.yml", "name: app\n");

    let store = ConfigStore::new();
    let from_json: Sample = store.load(&json).unwrap();
    let from_yaml: Sample = store.load(&yaml).unwrap();
    assert_eq!(from_json, from_yaml);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "sample.ini", "name=app");

    let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}

#[test]
fn test_parse_error_names_format() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "broken.toml", "name = ");

    let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
    match err {
        Error::ConfigParse { format, .. } => assert_eq!(format, "TOML"),
        other => panic!("expected ConfigParse, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = NormalizedPath::new(dir.path().join("absent.toml"));

    let err = ConfigStore::new().load::<Sample>(&path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
