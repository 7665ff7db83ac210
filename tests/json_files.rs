//! Loading GYRE output from JSON documents on disk.

use gyre_output::{read_eigfunc, read_eigval, read_eigval_as, Format, GyreError};
use num_complex::Complex64;
use pretty_assertions::assert_eq;

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

const SUMMARY: &str = r#"{
  "attrs": {"n": 1200, "l": 2, "freq_units": "UHZ"},
  "datasets": {
    "freq": [{"re": 2.0, "im": 0.0}, {"re": 1.0, "im": 0.0}, {"re": 1.0, "im": 1.0}],
    "n_p": [5, 3, 3],
    "n_g": [1, 0, 2],
    "E": [9.0, 7.0, 7.0]
  }
}"#;

#[test]
fn summary_file_is_sorted_by_frequency() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "summary.json", SUMMARY);

    let table = read_eigval(&path).unwrap();

    assert_eq!(
        table.freq,
        vec![
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 1.0),
            Complex64::new(2.0, 0.0)
        ]
    );
    assert_eq!(table.n_p, vec![3, 3, 5]);
    assert_eq!(table.n_g, vec![0, 2, 1]);
    assert_eq!(table.e, vec![7.0, 7.0, 9.0]);
    assert_eq!(table.n_cowl, vec![3, 1, 4]);
    assert_eq!(table.l, vec![2, 2, 2]);
}

#[test]
fn explicit_format_ignores_the_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "summary.dat", SUMMARY);

    assert!(matches!(read_eigval(&path), Err(GyreError::UnsupportedFormat(_))));
    assert_eq!(read_eigval_as(&path, Format::Json).unwrap().len(), 3);
}

#[test]
fn mode_file_keeps_grid_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "mode.json",
        r#"{
          "attrs": {
            "n": 4, "n_e": 1, "n_p": 3, "n_g": 1, "lambda_0": 2.0, "l": 1,
            "freq": {"re": 410.5, "im": 0.0}, "freq_units": "UHZ"
          },
          "datasets": {
            "x": [0.0, 0.3, 0.6, 1.0],
            "y": [0.0, {"re": 0.5, "im": 0.1}, -0.25, 1],
            "dE_dx": [0.0, 0.1, 0.4, 0.2]
          }
        }"#,
    );

    let record = read_eigfunc(&path).unwrap();

    assert_eq!(record.n, 4);
    assert_eq!(record.n_cowl, 2);
    assert_eq!(record.x, vec![0.0, 0.3, 0.6, 1.0]);
    assert_eq!(record.de_dx, vec![0.0, 0.1, 0.4, 0.2]);
    assert_eq!(record.y.n_cols(), 1);
    assert_eq!(
        record.y.column(0).unwrap(),
        vec![
            Complex64::new(0.0, 0.0),
            Complex64::new(0.5, 0.1),
            Complex64::new(-0.25, 0.0),
            Complex64::new(1.0, 0.0)
        ]
    );
}

#[test]
fn empty_summary_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "empty.json",
        r#"{"attrs": {"n": 10, "l": 0, "freq_units": "NONE"},
            "datasets": {"freq": [], "n_p": [], "n_g": [], "E": []}}"#,
    );

    let table = read_eigval(&path).unwrap();
    assert!(table.is_empty());
    assert!(table.l.is_empty());
    assert_eq!(table.freq_units, "NONE");
}

#[test]
fn unreadable_files_surface_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    assert!(matches!(read_eigval(&missing), Err(GyreError::Io(_))));

    let garbled = write(&dir, "garbled.json", "{ not json");
    assert!(matches!(read_eigfunc(&garbled), Err(GyreError::Json(_))));
}
