//! Line-oriented command dispatcher.
//!
//! Turns one input line into a call on a [`Calculator`] and renders the
//! outcome, errors included, as user-facing text.

use crate::error::CalcError;
use crate::session::Calculator;
use crate::types::format_number;

pub use crate::input::{parse_two_numbers, split_command};

/// Greeting printed when the REPL starts.
pub const BANNER: &str = "Calculator REPL. Type 'help' for commands.";

/// Prompt shown before each line.
pub const PROMPT: &str = "> ";

const EMPTY_LINE: &str = "Please enter a command. Type 'help' for options.";
const USAGE: &str = "Invalid format. Use: <op> <a> <b> (example: add 2 3)";
const GOODBYE: &str = "Goodbye.";

/// A parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    History,
    Clear,
    Undo,
    Redo,
    Save,
    Load,
    Exit,
    Calculate { op: String, a: String, b: String },
    Invalid,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let parts = split_command(line);
        match parts.as_slice() {
            [] => Command::Empty,
            [word] => match word.to_lowercase().as_str() {
                "help" => Command::Help,
                "history" => Command::History,
                "clear" => Command::Clear,
                "undo" => Command::Undo,
                "redo" => Command::Redo,
                "save" => Command::Save,
                "load" => Command::Load,
                "exit" | "quit" => Command::Exit,
                _ => Command::Invalid,
            },
            [op, a, b] => Command::Calculate {
                op: op.to_string(),
                a: a.to_string(),
                b: b.to_string(),
            },
            _ => Command::Invalid,
        }
    }
}

/// What the REPL should do after a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and read the next line.
    Continue(String),
    /// Print the text and stop.
    Exit(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Continue(text) | Reply::Exit(text) => text,
        }
    }
}

/// Run one input line against `calc`.
pub fn handle_line(calc: &mut Calculator, line: &str) -> Reply {
    let text = match Command::parse(line) {
        Command::Empty => EMPTY_LINE.to_string(),
        Command::Help => calc.help_text(),
        Command::History => calc.history_lines().join("\n"),
        Command::Clear => {
            calc.clear();
            "History cleared.".to_string()
        }
        Command::Undo => {
            if calc.undo() {
                "Undone.".to_string()
            } else {
                "Nothing to undo.".to_string()
            }
        }
        Command::Redo => {
            if calc.redo() {
                "Redone.".to_string()
            } else {
                "Nothing to redo.".to_string()
            }
        }
        Command::Save => match calc.save() {
            Ok(()) => format!("History saved to {}.", calc.history_path().display()),
            Err(e) => error_text(&e),
        },
        Command::Load => match calc.load() {
            Ok(rows) => format!(
                "Loaded {} calculations from {}.",
                rows,
                calc.history_path().display()
            ),
            Err(e) => error_text(&e),
        },
        Command::Exit => return Reply::Exit(GOODBYE.to_string()),
        Command::Calculate { op, a, b } => match calc.execute_text(&op, &a, &b) {
            Ok(result) => format!("Result: {}", format_number(result)),
            Err(e) => error_text(&e),
        },
        Command::Invalid => USAGE.to_string(),
    };
    Reply::Continue(text)
}

/// Auto-load the history file at startup. Returns a line to show the user,
/// if any. A failed load leaves the session empty and is only reported.
pub fn startup(calc: &mut Calculator, auto_load: bool) -> Option<String> {
    if !auto_load {
        return None;
    }
    match calc.auto_load_if_exists() {
        Ok(true) => Some(format!(
            "Loaded history from {}.",
            calc.history_path().display()
        )),
        Ok(false) => None,
        Err(e) => Some(format!("Warning: could not load history: {}", e)),
    }
}

/// Drive `calc` from a line source until `exit` or end of input.
pub fn run_repl<I, O>(calc: &mut Calculator, lines: I, mut output: O)
where
    I: IntoIterator<Item = String>,
    O: FnMut(&str),
{
    output(BANNER);
    for line in lines {
        match handle_line(calc, &line) {
            Reply::Continue(text) => output(&text),
            Reply::Exit(text) => {
                output(&text);
                return;
            }
        }
    }
    output(GOODBYE);
}

fn error_text(e: &CalcError) -> String {
    format!("Error: {}", e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> Calculator {
        Calculator::new(dir.path().join("history.csv"))
    }

    fn reply(calc: &mut Calculator, line: &str) -> String {
        handle_line(calc, line).text().to_string()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("   "), Command::Empty);
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse(" undo "), Command::Undo);
        assert_eq!(
            Command::parse("add 2 3"),
            Command::Calculate {
                op: "add".into(),
                a: "2".into(),
                b: "3".into()
            }
        );
        assert_eq!(Command::parse("add 2"), Command::Invalid);
        assert_eq!(Command::parse("add 1 2 3"), Command::Invalid);
        assert_eq!(Command::parse("frobnicate"), Command::Invalid);
    }

    #[test]
    fn test_calculation_replies() {
        let dir = TempDir::new().unwrap();
        let mut calc = session(&dir);

        assert_eq!(reply(&mut calc, "add 2 3"), "Result: 5.0");
        assert_eq!(reply(&mut calc, "div 1 0"), "Error: Cannot divide by zero.");
        assert_eq!(reply(&mut calc, "add a b"), "Error: Inputs must be numbers.");
        assert_eq!(reply(&mut calc, "mod 1 2"), "Error: Unsupported operation: mod");
        assert_eq!(reply(&mut calc, "history"), "add 2.0 3.0 = 5.0");
    }

    #[test]
    fn test_invalid_lines_do_not_touch_history() {
        let dir = TempDir::new().unwrap();
        let mut calc = session(&dir);

        assert_eq!(
            reply(&mut calc, "add 2"),
            "Invalid format. Use: <op> <a> <b> (example: add 2 3)"
        );
        assert_eq!(
            reply(&mut calc, ""),
            "Please enter a command. Type 'help' for options."
        );
        assert!(calc.history().is_empty());
        assert!(!calc.can_undo());
    }

    #[test]
    fn test_undo_redo_replies() {
        let dir = TempDir::new().unwrap();
        let mut calc = session(&dir);

        assert_eq!(reply(&mut calc, "undo"), "Nothing to undo.");
        reply(&mut calc, "mul 2 4");
        assert_eq!(reply(&mut calc, "undo"), "Undone.");
        assert_eq!(reply(&mut calc, "history"), "(no history)");
        assert_eq!(reply(&mut calc, "redo"), "Redone.");
        assert_eq!(reply(&mut calc, "redo"), "Nothing to redo.");
    }

    #[test]
    fn test_save_and_load_replies() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let mut calc = session(&dir);

        assert!(reply(&mut calc, "load").starts_with("Error: History file not found"));

        reply(&mut calc, "sub 9 4");
        assert_eq!(
            reply(&mut calc, "save"),
            format!("History saved to {}.", path.display())
        );
        assert_eq!(reply(&mut calc, "clear"), "History cleared.");
        assert_eq!(
            reply(&mut calc, "load"),
            format!("Loaded 1 calculations from {}.", path.display())
        );
    }

    #[test]
    fn test_exit() {
        let dir = TempDir::new().unwrap();
        let mut calc = session(&dir);
        assert_eq!(handle_line(&mut calc, "exit"), Reply::Exit("Goodbye.".into()));
    }

    #[test]
    fn test_run_repl() {
        let dir = TempDir::new().unwrap();
        let mut calc = session(&dir);
        let mut out = Vec::new();

        let lines = ["add 1 2", "exit", "add 3 4"].map(String::from);
        run_repl(&mut calc, lines, |text| out.push(text.to_string()));

        assert_eq!(out, vec![BANNER, "Result: 3.0", "Goodbye."]);
        assert_eq!(calc.history().len(), 1);
    }

    #[test]
    fn test_run_repl_end_of_input() {
        let dir = TempDir::new().unwrap();
        let mut calc = session(&dir);
        let mut out = Vec::new();

        run_repl(&mut calc, Vec::<String>::new(), |text| out.push(text.to_string()));

        assert_eq!(out, vec![BANNER, "Goodbye."]);
    }

    #[test]
    fn test_startup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let mut calc = session(&dir);

        assert_eq!(startup(&mut calc, true), None);

        std::fs::write(&path, "operation,a\nadd,1\n").unwrap();
        let warning = startup(&mut calc, true).unwrap();
        assert!(warning.starts_with("Warning: could not load history:"));
        assert!(calc.history().is_empty());

        std::fs::write(&path, "operation,a,b,result\nadd,1,1,2\n").unwrap();
        assert_eq!(startup(&mut calc, false), None);
        assert_eq!(
            startup(&mut calc, true),
            Some(format!("Loaded history from {}.", path.display()))
        );
        assert_eq!(calc.history().len(), 1);
    }
}
