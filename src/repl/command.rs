use thiserror::Error;

use crate::config::ConfigError;
use crate::format::Notation;
use crate::math::AngleMode;

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Help,
    Quit,
    /// `history` / `history N`
    History(Option<usize>),
    Search(String),
    ClearHistory,
    ShowMemory,
    /// `m+` / `m+ v`; no value means the last result.
    MemoryAdd(Option<f64>),
    MemorySubtract(Option<f64>),
    MemoryStore(f64),
    MemoryClear,
    MemoryRecall,
    ShowConfig,
    SetAngle(AngleMode),
    SetDecimals(usize),
    SetNotation(Notation),
    /// Anything that is not a command.
    Evaluate(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Command {
    /// Classify a line. Command words are case-insensitive; everything
    /// unrecognised is handed to the evaluator untouched.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Command::Empty);
        }

        let (head, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => (head.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        let cmd = match (head.as_str(), rest.is_empty()) {
            ("help", true) => Command::Help,
            ("quit", true) | ("exit", true) => Command::Quit,
            ("history", true) => Command::History(None),
            ("history", false) => Command::History(Some(
                rest.parse()
                    .map_err(|_| CommandError::Usage("history [count]"))?,
            )),
            ("search", true) => return Err(CommandError::Usage("search <text>")),
            ("search", false) => Command::Search(rest.to_string()),
            ("clear_history", true) => Command::ClearHistory,
            ("memory", true) => Command::ShowMemory,
            ("m+", true) => Command::MemoryAdd(None),
            ("m+", false) => Command::MemoryAdd(Some(parse_value(rest, "m+ [value]")?)),
            ("m-", true) => Command::MemorySubtract(None),
            ("m-", false) => Command::MemorySubtract(Some(parse_value(rest, "m- [value]")?)),
            ("ms", true) => return Err(CommandError::Usage("ms <value>")),
            ("ms", false) => Command::MemoryStore(parse_value(rest, "ms <value>")?),
            ("mc", true) => Command::MemoryClear,
            ("mr", true) => Command::MemoryRecall,
            ("config", true) => Command::ShowConfig,
            ("angle", true) => return Err(CommandError::Usage("angle <degrees|radians>")),
            ("angle", false) => Command::SetAngle(rest.parse()?),
            ("decimal", true) => return Err(CommandError::Usage("decimal <places>")),
            ("decimal", false) => Command::SetDecimals(
                rest.parse()
                    .map_err(|_| CommandError::Usage("decimal <places>"))?,
            ),
            ("notation", true) => return Err(CommandError::Usage("notation <fixed|scientific>")),
            ("notation", false) => Command::SetNotation(rest.parse()?),
            _ => Command::Evaluate(trimmed.to_string()),
        };
        Ok(cmd)
    }
}

fn parse_value(text: &str, usage: &'static str) -> Result<f64, CommandError> {
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CommandError::Usage(usage)),
    }
}
