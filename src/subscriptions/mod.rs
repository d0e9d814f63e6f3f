//! Change notifications for calculator sessions.
//!
//! After every successful change a session emits a [`CalcEvent`] to each of
//! its sinks, in the order the changes happened:
//! - `calculation_added`, `history_cleared`, `history_loaded`
//! - `undo`, `redo`
//! - `history_saved`
//!
//! Two sinks ship with the crate: [`EventLog`] keeps formatted lines, and
//! [`SubscriptionManager`] fans events out over bounded channels.
//!
//! # Example
//!
//! ```ignore
//! let manager = Arc::new(SubscriptionManager::new());
//! let handle = manager.subscribe(SubscriptionConfig::kinds(vec![EventKind::Undo]));
//!
//! let mut calc = Calculator::new("history.csv");
//! calc.add_sink(Box::new(Arc::clone(&manager)));
//! calc.execute("add", 1.0, 2.0)?;
//! calc.undo();
//!
//! for event in handle.drain_events() {
//!     println!("{}: {:?}", event.name(), event.payload());
//! }
//! ```

mod manager;
mod sink;
mod types;

pub use manager::SubscriptionManager;
pub use sink::{EventLog, EventSink};
pub use types::{
    CalcEvent, DropReason, EventKind, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
    SubscriptionMessage,
};
