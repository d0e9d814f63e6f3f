//! Property-based tests for undo/redo and persistence.

use proptest::prelude::*;
use tally::{load_history, save_history, Calculator, HistoryEntry};
use tempfile::TempDir;

/// Operations that never fail for finite, moderate operands.
fn safe_op() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("add"), Just("sub"), Just("mul")]
}

fn operand() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn calculation() -> impl Strategy<Value = (&'static str, f64, f64)> {
    (safe_op(), operand(), operand())
}

fn entry_strategy() -> impl Strategy<Value = HistoryEntry> {
    ("[a-z]{1,6}", any::<f64>(), any::<f64>(), any::<f64>())
        .prop_filter("finite numbers", |(_, a, b, r)| {
            a.is_finite() && b.is_finite() && r.is_finite()
        })
        .prop_map(|(operation, a, b, result)| HistoryEntry {
            operation,
            a,
            b,
            result,
        })
}

/// Property: N executes followed by N undos return to the initial state,
/// and K redos reach the state after the K-th execute.
#[test]
fn prop_undo_all_then_redo_k() {
    proptest!(|(
        calcs in prop::collection::vec(calculation(), 1..25),
        k_seed in any::<prop::sample::Index>(),
    )| {
        let dir = TempDir::new().unwrap();
        let mut calc = Calculator::new(dir.path().join("history.csv"));

        let mut states = vec![calc.history().all()];
        for (op, a, b) in &calcs {
            calc.execute(op, *a, *b).unwrap();
            states.push(calc.history().all());
        }

        for _ in 0..calcs.len() {
            prop_assert!(calc.undo());
        }
        prop_assert!(!calc.undo());
        prop_assert_eq!(calc.history().all(), states[0].clone());

        let k = k_seed.index(calcs.len() + 1);
        for _ in 0..k {
            prop_assert!(calc.redo());
        }
        prop_assert_eq!(calc.history().all(), states[k].clone());
    });
}

/// Property: any new execute after undo empties the redo stack.
#[test]
fn prop_new_action_clears_redo() {
    proptest!(|(
        calcs in prop::collection::vec(calculation(), 2..15),
        extra in calculation(),
        undos_seed in any::<prop::sample::Index>(),
    )| {
        let dir = TempDir::new().unwrap();
        let mut calc = Calculator::new(dir.path().join("history.csv"));
        for (op, a, b) in &calcs {
            calc.execute(op, *a, *b).unwrap();
        }

        let undos = undos_seed.index(calcs.len()) + 1;
        for _ in 0..undos {
            prop_assert!(calc.undo());
        }
        prop_assert!(calc.can_redo());

        calc.execute(extra.0, extra.1, extra.2).unwrap();
        prop_assert!(!calc.can_redo());
        prop_assert!(!calc.redo());
        prop_assert_eq!(calc.history().len(), calcs.len() - undos + 1);
    });
}

/// Property: save then load reproduces identical rows in the same order.
#[test]
fn prop_save_load_round_trip() {
    proptest!(ProptestConfig::with_cases(64), |(
        rows in prop::collection::vec(entry_strategy(), 0..40),
    )| {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");

        save_history(&rows, &path).unwrap();
        let loaded = load_history(&path).unwrap();

        prop_assert_eq!(loaded, rows);
    });
}
