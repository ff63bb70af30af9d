//! Line-oriented front end shared by the interactive loop and script mode.

pub mod command;
pub mod help;

use log::debug;

use crate::lang::error::CalcError;
use crate::session::history::HistoryEntry;
use crate::session::Session;
use command::{Command, CommandError};

pub const PROMPT: &str = "calc> ";

/// Exit code for a misused command (bad argument, unknown mode).
pub const USAGE_EXIT_CODE: i32 = 1;

/// What the front end should do after one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Silent,
    Output(String),
    Failure { message: String, exit_code: i32 },
    Quit,
}

pub struct Repl {
    session: Session,
}

impl Repl {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Process one line: run a command or evaluate an expression.
    pub fn process_line(&mut self, line: &str) -> Outcome {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => return usage_failure(err),
        };
        debug!("command: {:?}", command);

        match command {
            Command::Empty => Outcome::Silent,
            Command::Help => Outcome::Output(help::help_text()),
            Command::Quit => Outcome::Quit,
            Command::History(limit) => {
                let entries = self.session.history(limit);
                if entries.is_empty() {
                    return Outcome::Output("History is empty".to_string());
                }
                let first = self.session.history_len() - entries.len() + 1;
                Outcome::Output(self.list_entries(&entries, first))
            }
            Command::Search(needle) => {
                let entries = self.session.search_history(&needle);
                if entries.is_empty() {
                    return Outcome::Output(format!("No calculations contain \"{}\"", needle));
                }
                Outcome::Output(self.list_entries(&entries, 1))
            }
            Command::ClearHistory => {
                self.session.clear_history();
                Outcome::Output("History cleared".to_string())
            }
            Command::ShowMemory | Command::MemoryRecall => Outcome::Output(format!(
                "Memory = {}",
                self.session.format(self.session.memory_recall())
            )),
            Command::MemoryAdd(value) => {
                let value = value.unwrap_or_else(|| self.session.last_result());
                match self.session.memory_add(value) {
                    Ok(()) => self.memory_report(),
                    Err(err) => calc_failure(&err),
                }
            }
            Command::MemorySubtract(value) => {
                let value = value.unwrap_or_else(|| self.session.last_result());
                match self.session.memory_subtract(value) {
                    Ok(()) => self.memory_report(),
                    Err(err) => calc_failure(&err),
                }
            }
            Command::MemoryStore(value) => {
                self.session.memory_set(value);
                self.memory_report()
            }
            Command::MemoryClear => {
                self.session.memory_clear();
                Outcome::Output("Memory cleared".to_string())
            }
            Command::ShowConfig => Outcome::Output(self.config_report()),
            Command::SetAngle(mode) => {
                self.session.set_angle_mode(mode);
                Outcome::Output(format!("Angle mode set to: {}", mode))
            }
            Command::SetDecimals(places) => match self.session.set_decimal_places(places) {
                Ok(()) => Outcome::Output(format!("Decimal places set to: {}", places)),
                Err(err) => usage_failure(err.into()),
            },
            Command::SetNotation(notation) => {
                self.session.set_notation(notation);
                Outcome::Output(format!("Notation set to: {}", notation))
            }
            // Evaluate the raw line so error spans line up with what was typed.
            Command::Evaluate(_) => match self.session.evaluate(line) {
                Ok(value) => Outcome::Output(self.session.format(value)),
                Err(err) => calc_failure(&err),
            },
        }
    }

    fn memory_report(&self) -> Outcome {
        Outcome::Output(format!(
            "Memory = {}",
            self.session.format(self.session.memory_recall())
        ))
    }

    fn list_entries(&self, entries: &[HistoryEntry], first: usize) -> String {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let stamp = if self.session.show_timestamps() {
                    format!("[{}] ", entry.timestamp_display())
                } else {
                    String::new()
                };
                format!(
                    "{:>4}. {}{} = {}",
                    first + i,
                    stamp,
                    entry.expression,
                    self.session.format(entry.result)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn config_report(&self) -> String {
        let config = self.session.config();
        format!(
            "angle_mode:      {}\n\
             decimal_places:  {}\n\
             notation:        {}\n\
             max_history:     {}\n\
             show_timestamps: {}",
            config.angle_mode,
            config.decimal_places,
            config.notation,
            config.max_history,
            config.show_timestamps,
        )
    }
}

fn usage_failure(err: CommandError) -> Outcome {
    Outcome::Failure {
        message: format!("error: {}", err),
        exit_code: USAGE_EXIT_CODE,
    }
}

fn calc_failure(err: &CalcError) -> Outcome {
    Outcome::Failure {
        message: render_error(err),
        exit_code: err.kind.exit_code(),
    }
}

/// Error text, preceded by a marker under the offending input when the
/// error has a span. The marker assumes the line was shown after [`PROMPT`].
fn render_error(err: &CalcError) -> String {
    match err.span {
        Some(span) => {
            let width = span.end.saturating_sub(span.start).max(1);
            format!(
                "{}{}\nerror: {}",
                " ".repeat(PROMPT.len() + span.start),
                "^".repeat(width),
                err
            )
        }
        None => format!("error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn repl() -> Repl {
        Repl::new(Session::new(Config {
            show_timestamps: false,
            ..Config::default()
        }))
    }

    fn output(repl: &mut Repl, line: &str) -> String {
        match repl.process_line(line) {
            Outcome::Output(text) => text,
            other => panic!("{:?} gave {:?}", line, other),
        }
    }

    fn failure(repl: &mut Repl, line: &str) -> (String, i32) {
        match repl.process_line(line) {
            Outcome::Failure { message, exit_code } => (message, exit_code),
            other => panic!("{:?} gave {:?}", line, other),
        }
    }

    #[test]
    fn test_evaluation_is_formatted() {
        let mut repl = repl();
        assert_eq!(output(&mut repl, "5 + 3"), "8");
        assert_eq!(output(&mut repl, "ans / 3"), "2.6666666667");
        assert_eq!(output(&mut repl, "2 ** 8"), "256");
        assert_eq!(repl.process_line(""), Outcome::Silent);
        assert_eq!(repl.process_line("quit"), Outcome::Quit);
    }

    #[test]
    fn test_failures_carry_exit_codes() {
        let mut repl = repl();
        assert_eq!(failure(&mut repl, "2 ++ 3").1, 2);
        assert_eq!(failure(&mut repl, "foo").1, 3);
        assert_eq!(failure(&mut repl, "1 / 0").1, 4);
        assert_eq!(failure(&mut repl, "angle grad").1, USAGE_EXIT_CODE);
        assert_eq!(repl.session().history_len(), 0);
    }

    #[test]
    fn test_error_marker_points_at_span() {
        let mut repl = repl();
        let (message, _) = failure(&mut repl, "1 + sqrt(-4)");
        let mut lines = message.lines();
        assert_eq!(lines.next(), Some("          ^^^^^^^^"));
        assert_eq!(
            lines.next(),
            Some("error: domain error: cannot take the square root of a negative number")
        );
    }

    #[test]
    fn test_memory_commands() {
        let mut repl = repl();
        output(&mut repl, "6 * 7");
        assert_eq!(output(&mut repl, "m+"), "Memory = 42");
        assert_eq!(output(&mut repl, "m- 2"), "Memory = 40");
        assert_eq!(output(&mut repl, "ms 1.5"), "Memory = 1.5");
        assert_eq!(output(&mut repl, "mr"), "Memory = 1.5");
        assert_eq!(output(&mut repl, "mc"), "Memory cleared");
        assert_eq!(output(&mut repl, "memory"), "Memory = 0");
    }

    #[test]
    fn test_memory_overflow_is_a_failure() {
        let mut repl = repl();
        output(&mut repl, "2 + 2");
        assert!(output(&mut repl, "m+ 1e308").starts_with("Memory = 1000"));
        let (message, code) = failure(&mut repl, "m+ 1e308");
        assert_eq!(message, "error: overflow: memory value is too large to represent");
        assert_eq!(code, 4);
        assert_eq!(repl.session().memory_recall(), 1e308);
        assert!(repl.session().snapshot().memory.is_finite());
    }

    #[test]
    fn test_history_commands() {
        let mut repl = repl();
        assert_eq!(output(&mut repl, "history"), "History is empty");
        output(&mut repl, "1 + 1");
        output(&mut repl, "sin(30)");
        output(&mut repl, "2 * 3");
        assert_eq!(
            output(&mut repl, "history 2"),
            "   2. sin(30) = 0.5\n   3. 2 * 3 = 6"
        );
        assert_eq!(output(&mut repl, "search sin"), "   1. sin(30) = 0.5");
        assert_eq!(output(&mut repl, "clear_history"), "History cleared");
        assert_eq!(repl.session().history_len(), 0);
    }

    #[test]
    fn test_settings_commands() {
        let mut repl = repl();
        assert_eq!(output(&mut repl, "angle radians"), "Angle mode set to: radians");
        assert_eq!(output(&mut repl, "cos(pi)"), "-1");
        assert_eq!(output(&mut repl, "decimal 2"), "Decimal places set to: 2");
        assert_eq!(output(&mut repl, "1 / 3"), "0.33");
        assert_eq!(output(&mut repl, "notation sci"), "Notation set to: scientific");
        assert_eq!(output(&mut repl, "12345"), "1.23e+04");
        assert_eq!(failure(&mut repl, "decimal 30").1, USAGE_EXIT_CODE);
        assert!(output(&mut repl, "config").contains("decimal_places:  2"));
    }

    #[test]
    fn test_help() {
        let mut repl = repl();
        assert!(output(&mut repl, "help").contains("MEMORY"));
    }
}
