//! Calculator session tying all components together.

use crate::config::CalculatorConfig;
use crate::error::Result;
use crate::history::{HistoryStore, UndoRedo};
use crate::input::parse_two_numbers;
use crate::operations::OperationRegistry;
use crate::persistence::{load_history, save_history};
use crate::strategy::{DirectExecution, ExecutionStrategy};
use crate::subscriptions::{CalcEvent, EventSink};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A calculator session.
///
/// Owns everything a session mutates:
/// - the history and its undo/redo stacks
/// - the history file path and auto-save flag
/// - the execution strategy and event sinks
///
/// Every forward change (execute, clear, load) is computed or read in full
/// before the undo snapshot is taken, so a failed action leaves both the
/// history and the stacks exactly as they were.
pub struct Calculator {
    registry: OperationRegistry,
    history: HistoryStore,
    undo: UndoRedo,
    history_path: PathBuf,
    auto_save: bool,
    strategy: Box<dyn ExecutionStrategy>,
    sinks: Vec<Box<dyn EventSink>>,
}

impl Calculator {
    /// Create an empty session saving to `history_path`.
    pub fn new(history_path: impl Into<PathBuf>) -> Self {
        Self {
            registry: OperationRegistry::new(),
            history: HistoryStore::new(),
            undo: UndoRedo::new(),
            history_path: history_path.into(),
            auto_save: false,
            strategy: Box::new(DirectExecution),
            sinks: Vec::new(),
        }
    }

    /// Create an empty session from configuration. Auto-load is left to the
    /// caller (see [`Calculator::auto_load_if_exists`]).
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(config.history_path.clone()).with_auto_save(config.auto_save)
    }

    /// Replace the execution strategy.
    pub fn with_strategy(mut self, strategy: Box<dyn ExecutionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Save to the history path after every change.
    pub fn with_auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }

    /// Register an event sink.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    // --- Accessors ---

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    pub fn history_lines(&self) -> Vec<String> {
        self.history.format_lines()
    }

    pub fn supported_ops_text(&self) -> String {
        self.registry.supported_names().join(", ")
    }

    pub fn help_text(&self) -> String {
        format!(
            "Commands:\n\
             \x20 add | sub | mul | div | pow | root  -> perform arithmetic\n\
             \x20 history                            -> show history\n\
             \x20 clear                              -> clear history\n\
             \x20 undo                               -> undo last change\n\
             \x20 redo                               -> redo last undone change\n\
             \x20 save                               -> save history to CSV\n\
             \x20 load                               -> load history from CSV\n\
             \x20 help                               -> show this help\n\
             \x20 exit | quit                        -> leave the calculator\n\
             \n\
             Usage:\n\
             \x20 <op> <a> <b>\n\
             Supported ops: {}",
            self.supported_ops_text()
        )
    }

    // --- Mutations ---

    /// Compute `name(a, b)` and append it to history.
    pub fn execute(&mut self, name: &str, a: f64, b: f64) -> Result<f64> {
        let calc = self.registry.create(name, a, b)?;
        let result = self.strategy.execute(&calc)?;

        self.undo.before_mutation(&self.history);
        self.history.add(calc.entry(result));
        debug!(operation = calc.operation.name(), a, b, result, "executed");

        self.changed(CalcEvent::CalculationAdded {
            operation: calc.operation.name().to_string(),
            a,
            b,
            result,
        });
        Ok(result)
    }

    /// Parse both operands, then [`Calculator::execute`].
    pub fn execute_text(&mut self, name: &str, a: &str, b: &str) -> Result<f64> {
        let (a, b) = parse_two_numbers(a, b)?;
        self.execute(name, a, b)
    }

    /// Empty the history.
    pub fn clear(&mut self) {
        self.undo.before_mutation(&self.history);
        self.history.clear();
        debug!("history cleared");
        self.changed(CalcEvent::HistoryCleared);
    }

    /// Step back one change. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.undo.undo(&mut self.history) {
            return false;
        }
        self.changed(CalcEvent::Undo {
            rows: self.history.len(),
        });
        true
    }

    /// Replay the last undone change. Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        if !self.undo.redo(&mut self.history) {
            return false;
        }
        self.changed(CalcEvent::Redo {
            rows: self.history.len(),
        });
        true
    }

    // --- Persistence ---

    /// Save history to the configured path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.history_path)
    }

    /// Save history to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        save_history(self.history.entries(), path)?;
        self.emit(&CalcEvent::saved(path, self.history.len()));
        Ok(())
    }

    /// Replace history with the contents of the configured path. Returns
    /// the number of rows loaded. The replacement can be undone.
    pub fn load(&mut self) -> Result<usize> {
        let path = self.history_path.clone();
        self.load_from(&path)
    }

    /// Replace history with the contents of `path`.
    pub fn load_from(&mut self, path: &Path) -> Result<usize> {
        let entries = load_history(path)?;
        let rows = entries.len();

        self.undo.before_mutation(&self.history);
        self.history.replace(entries);

        self.changed(CalcEvent::loaded(path, rows));
        Ok(rows)
    }

    /// Load the configured file at startup if it exists. The load is not
    /// recorded for undo and does not trigger auto-save. Returns whether a
    /// file was loaded.
    pub fn auto_load_if_exists(&mut self) -> Result<bool> {
        if !self.history_path.exists() {
            return Ok(false);
        }
        let entries = load_history(&self.history_path)?;
        let rows = entries.len();
        self.history.replace(entries);
        self.emit(&CalcEvent::loaded(&self.history_path, rows));
        Ok(true)
    }

    // --- Notification ---

    /// Notify sinks of a history change, then auto-save if enabled.
    fn changed(&self, event: CalcEvent) {
        self.emit(&event);

        if self.auto_save && event.kind().mutates_history() {
            if let Err(e) = self.save() {
                warn!(path = %self.history_path.display(), error = %e, "auto-save failed");
            }
        }
    }

    fn emit(&self, event: &CalcEvent) {
        for sink in &self.sinks {
            sink.notify(event);
        }
    }
}
