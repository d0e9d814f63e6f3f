//! tally - interactive calculator with undoable, persistent history.

use anyhow::{Context, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tally::config::{history_path, parse_bool};
use tally::repl::{self, PROMPT};
use tally::{Calculator, CalculatorConfig};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Binary-operation calculator with undo/redo and CSV history")]
#[command(long_about = "Binary-operation calculator with undo/redo and CSV history

Enter calculations as `<op> <a> <b>`, e.g. `add 2 3` or `root -8 3`.
Operations: add, sub, mul, div, pow, root.

Settings come from tally.toml, then CALC_HISTORY_PATH, CALC_AUTO_LOAD and
CALC_AUTO_SAVE (a .env file is read first), then these flags.")]
#[command(version)]
struct Cli {
    /// History CSV file
    #[arg(long, value_name = "PATH")]
    history_path: Option<String>,

    /// Load the history file at startup
    #[arg(long, value_name = "BOOL", value_parser = parse_flag)]
    auto_load: Option<bool>,

    /// Save the history file after every change
    #[arg(long, value_name = "BOOL", value_parser = parse_flag)]
    auto_save: Option<bool>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    parse_bool(value).ok_or_else(|| format!("invalid boolean value: {:?}", value))
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Next line from the editor. Ctrl+C discards the current line; Ctrl+D ends
/// input.
fn read_line(editor: &mut DefaultEditor) -> Option<String> {
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                return Some(line);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => return None,
            Err(e) => {
                error!(error = %e, "readline failed");
                return None;
            }
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = CalculatorConfig::load().context("Failed to load configuration")?;
    if let Some(path) = cli.history_path {
        config.history_path = history_path(&path).context("Invalid --history-path")?;
    }
    if let Some(auto_load) = cli.auto_load {
        config.auto_load = auto_load;
    }
    if let Some(auto_save) = cli.auto_save {
        config.auto_save = auto_save;
    }
    info!(
        history_path = %config.history_path.display(),
        auto_load = config.auto_load,
        auto_save = config.auto_save,
        "starting"
    );

    let mut calc = Calculator::from_config(&config);
    if let Some(message) = repl::startup(&mut calc, config.auto_load) {
        println!("{}", message);
    }

    let mut editor = DefaultEditor::new().context("Failed to initialize readline")?;
    let lines = std::iter::from_fn(|| read_line(&mut editor));
    repl::run_repl(&mut calc, lines, |text| println!("{}", text));

    Ok(())
}
