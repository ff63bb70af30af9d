use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{debug, warn, LevelFilter};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use scical::config::Config;
use scical::format::Notation;
use scical::math::AngleMode;
use scical::persistence::{self, history::SavedState};
use scical::repl::{Outcome, Repl, PROMPT};
use scical::session::Session;

#[derive(Parser, Debug)]
#[command(version, about = "Scientific expression calculator", long_about = None)]
struct Cli {
    /// Lines to run in script mode. Without any, an interactive prompt starts.
    #[arg(value_name = "EXPRESSION")]
    expressions: Vec<String>,

    /// Angle unit for this run: degrees or radians.
    #[arg(long, value_name = "MODE")]
    angle: Option<AngleMode>,

    /// Digits after the decimal point for this run.
    #[arg(long, value_name = "N")]
    decimals: Option<usize>,

    /// Result notation for this run: fixed or scientific.
    #[arg(long, value_name = "TYPE")]
    notation: Option<Notation>,

    /// Neither read nor write the config and history files.
    #[arg(long)]
    no_persist: bool,

    /// Log pipeline stages to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn has_overrides(&self) -> bool {
        self.angle.is_some() || self.decimals.is_some() || self.notation.is_some()
    }
}

/// Where config and history live.
struct Paths {
    config: PathBuf,
    history: PathBuf,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = if cli.no_persist {
        None
    } else {
        resolve_paths()
    };

    let (stored, state) = match &paths {
        Some(paths) => (load_config(paths), load_state(paths)),
        None => (Config::default(), SavedState::default()),
    };

    let mut config = stored.clone();
    if let Some(mode) = cli.angle {
        config.angle_mode = mode;
    }
    if let Some(notation) = cli.notation {
        config.notation = notation;
    }
    if let Some(places) = cli.decimals {
        config.decimal_places = scical::config::check_decimal_places(places)?;
    }

    let mut repl = Repl::new(Session::restore(config, state));

    let exit_code = if cli.expressions.is_empty() {
        run_interactive(&mut repl)?;
        0
    } else {
        run_script(&mut repl, &cli.expressions)
    };

    if let Some(paths) = &paths {
        let session = repl.into_session();
        save(paths, &session, &stored, cli.has_overrides());
    }

    Ok(ExitCode::from(exit_code.clamp(0, 255) as u8))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn resolve_paths() -> Option<Paths> {
    let config = persistence::config::config_path();
    let history = persistence::history::history_path();
    match (config, history) {
        (Ok(config), Ok(history)) => Some(Paths { config, history }),
        (Err(err), _) | (_, Err(err)) => {
            warn!("persistence disabled: {}", err);
            None
        }
    }
}

fn load_config(paths: &Paths) -> Config {
    persistence::config::load_config_from(&paths.config).unwrap_or_else(|err| {
        warn!("{}; using default settings", err);
        Config::default()
    })
}

fn load_state(paths: &Paths) -> SavedState {
    persistence::history::load_history_from(&paths.history).unwrap_or_else(|err| {
        warn!("{}; starting with empty history", err);
        SavedState::default()
    })
}

/// Persist history always; persist settings only when they were changed
/// with commands during a run that had no command-line overrides.
fn save(paths: &Paths, session: &Session, stored: &Config, overridden: bool) {
    if let Err(err) = persistence::history::save_history_to(&paths.history, &session.snapshot()) {
        warn!("{}", err);
    }
    if !overridden && session.config() != stored {
        if let Err(err) = persistence::config::save_config_to(&paths.config, session.config()) {
            warn!("{}", err);
        }
    }
}

/// Print an outcome; returns false when the user asked to leave.
fn report(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Silent => true,
        Outcome::Output(text) => {
            println!("{}", text);
            true
        }
        Outcome::Failure { message, .. } => {
            eprintln!("{}", message);
            true
        }
        Outcome::Quit => false,
    }
}

fn run_script(repl: &mut Repl, lines: &[String]) -> i32 {
    let mut exit_code = 0;
    for line in lines {
        println!("{}{}", PROMPT, line);
        let outcome = repl.process_line(line);
        if let Outcome::Failure { exit_code: code, .. } = &outcome {
            exit_code = *code;
        }
        if !report(&outcome) {
            break;
        }
    }
    debug!("script finished with exit code {}", exit_code);
    exit_code
}

fn run_interactive(repl: &mut Repl) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    for entry in repl.session().history(None) {
        let _ = editor.add_history_entry(entry.expression.as_str());
    }

    println!(
        "scical {}  (type 'help' for commands, 'quit' to exit)",
        env!("CARGO_PKG_VERSION")
    );
    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if !report(&repl.process_line(&line)) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
