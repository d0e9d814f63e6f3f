//! # Tally
//!
//! A binary-operation calculator with an undoable session history that can
//! be saved to and loaded from CSV.
//!
//! ## Core Concepts
//!
//! - **Operations**: A fixed set of pure binary functions looked up by name
//! - **History**: Ordered rows of `operation, a, b, result`
//! - **Undo/Redo**: Snapshot stacks taken before every change
//! - **Persistence**: CSV files with a validated four-column schema
//!
//! ## Example
//!
//! ```ignore
//! use tally::Calculator;
//!
//! let mut calc = Calculator::new("history.csv");
//!
//! calc.execute("add", 2.0, 3.0)?;
//! assert_eq!(calc.history_lines(), vec!["add 2.0 3.0 = 5.0"]);
//!
//! // Failed calculations leave history untouched
//! assert!(calc.execute("div", 1.0, 0.0).is_err());
//!
//! calc.undo();
//! calc.redo();
//! calc.save()?;
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod operations;
pub mod persistence;
pub mod repl;
pub mod session;
pub mod strategy;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use config::CalculatorConfig;
pub use error::{CalcError, Result};
pub use history::{HistorySnapshot, HistoryStore, UndoRedo};
pub use operations::{Operation, OperationRegistry};
pub use persistence::{load_history, save_history};
pub use session::Calculator;
pub use strategy::{DirectExecution, ExecutionStrategy};
pub use subscriptions::{
    CalcEvent, DropReason, EventKind, EventLog, EventSink, SubscriptionConfig,
    SubscriptionHandle, SubscriptionId, SubscriptionManager, SubscriptionMessage,
};
pub use types::*;
