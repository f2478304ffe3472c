use std::fs;

use vin_engine::{ensure_output_dir, AtomicFileWriter, PersistError};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("exports").join("today");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn file_in_place_of_dir_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(matches!(
        ensure_output_dir(&file_path),
        Err(PersistError::OutputDir(_))
    ));

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("extracted_vins.csv", "data").is_err());
    assert!(!file_path.with_file_name("extracted_vins.csv").exists());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path());

    let first = writer.write("extracted_vins.csv", "Model,Trim\n").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "Model,Trim\n");

    let second = writer.write("extracted_vins.csv", b"VIN\n").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "VIN\n");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}
