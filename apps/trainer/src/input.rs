//! Parsing of typed commands into host events.
//!
//! The trainer is line-oriented: every prompt reads one line and maps it to
//! a session call. Card selections are `l<N>` / `r<N>` (1-based, as printed
//! on the board); everything else is a keyword.

use drill_core::Side;

/// One turn of input in the pairing game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairsCommand {
    /// Select card N (0-based) in one pool.
    Select(Side, usize),
    Hint,
    New,
    Quit,
}

/// Parse a pairing-game command line. `None` means unrecognized input.
pub fn parse_pairs_command(line: &str) -> Option<PairsCommand> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "hint" | "h" => return Some(PairsCommand::Hint),
        "new" | "restart" => return Some(PairsCommand::New),
        "quit" | "q" | "exit" => return Some(PairsCommand::Quit),
        _ => {}
    }

    let side = match line.chars().next()? {
        'l' => Side::Left,
        'r' => Side::Right,
        _ => return None,
    };
    let number: usize = line[1..].trim().parse().ok()?;
    // Board numbering starts at 1.
    number.checked_sub(1).map(|slot| PairsCommand::Select(side, slot))
}

/// One turn of input in the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    /// Anything that is not a keyword is an answer submission.
    Answer(String),
    Previous,
    Next,
    Finish,
    Restart,
    Quit,
}

/// Parse a quiz command line. Keywords are checked first so answers can be
/// arbitrary text.
pub fn parse_quiz_command(line: &str) -> QuizCommand {
    match line.trim().to_lowercase().as_str() {
        "/prev" | "/p" => QuizCommand::Previous,
        "/next" | "/n" => QuizCommand::Next,
        "/done" | "/finish" => QuizCommand::Finish,
        "/restart" => QuizCommand::Restart,
        "/quit" | "/q" => QuizCommand::Quit,
        _ => QuizCommand::Answer(line.to_string()),
    }
}
