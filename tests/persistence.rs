//! CSV persistence tests.

use std::fs;
use tally::{load_history, save_history, Calculator, HistoryEntry, HistoryStore};
use tempfile::TempDir;

fn entry(op: &str, a: f64, b: f64, result: f64) -> HistoryEntry {
    HistoryEntry {
        operation: op.to_string(),
        a,
        b,
        result,
    }
}

#[test]
fn test_round_trip_preserves_rows_and_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");

    let rows = vec![
        entry("add", 2.0, 3.0, 5.0),
        entry("div", 1.0, 3.0, 1.0 / 3.0),
        entry("pow", 2.0, -1.0, 0.5),
        entry("root", -27.0, 3.0, -3.0000000000000004),
        entry("mul", 1e-12, 4.5e20, 4.5e8),
        entry("add", 2.0, 3.0, 5.0),
    ];
    save_history(&rows, &path).unwrap();

    let fresh = HistoryStore::from_entries(load_history(&path).unwrap());
    assert_eq!(fresh.all(), rows);
}

#[test]
fn test_session_round_trip() {
    let dir = TempDir::new().unwrap();

    let mut calc = Calculator::new(dir.path().join("history.csv"));
    for (op, a, b) in [("add", 0.1, 0.2), ("sub", -1.0, 2.5), ("root", 16.0, 4.0)] {
        calc.execute(op, a, b).unwrap();
    }
    calc.save().unwrap();

    let mut other = Calculator::new(dir.path().join("history.csv"));
    other.load().unwrap();

    assert_eq!(other.history().all(), calc.history().all());
    assert_eq!(other.history_lines(), calc.history_lines());
}

#[test]
fn test_integral_values_written_as_floats() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");

    let mut calc = Calculator::new(&path);
    calc.execute("mul", 6.0, 7.0).unwrap();
    calc.execute("sub", 0.0, 5.0).unwrap();
    calc.save().unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "operation,a,b,result\nmul,6.0,7.0,42.0\nsub,0.0,5.0,-5.0\n"
    );
}

#[test]
fn test_load_accepts_integer_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");
    fs::write(&path, "operation,a,b,result\nadd,2,3,5\n").unwrap();

    assert_eq!(load_history(&path).unwrap(), vec![entry("add", 2.0, 3.0, 5.0)]);
}

#[test]
fn test_load_trusts_stored_result() {
    // A hand-edited file whose result disagrees with its operands is taken
    // as-is; loading never recomputes.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");
    fs::write(&path, "operation,a,b,result\nadd,2.0,2.0,5.0\n").unwrap();

    let mut calc = Calculator::new(&path);
    calc.load().unwrap();

    assert_eq!(calc.history_lines(), vec!["add 2.0 2.0 = 5.0"]);
}

#[test]
fn test_load_does_not_validate_operation_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");
    fs::write(&path, "operation,a,b,result\nmod,7,3,1\n").unwrap();

    assert_eq!(load_history(&path).unwrap(), vec![entry("mod", 7.0, 3.0, 1.0)]);
}

#[test]
fn test_load_tolerates_whitespace_and_quotes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.csv");
    fs::write(
        &path,
        "operation , a , b , result\n\"add\", 1.5 , 2 ,3.5\n",
    )
    .unwrap();

    assert_eq!(load_history(&path).unwrap(), vec![entry("add", 1.5, 2.0, 3.5)]);
}
