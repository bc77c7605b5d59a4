//! Terminal rendering for the trainer.
//!
//! All output is plain line-based text; the session state machines are
//! queried through their read-only projections after every call.

use drill_core::{
    AnsweredRecord, GamePhase, GameSummary, Grade, PairingSession, QuizSession, QuizSummary, Side,
};

/// Format elapsed seconds as m:ss.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Print the two card pools with match/selection markers.
pub fn render_board(session: &PairingSession, elapsed_seconds: i64) {
    println!();
    println!(
        "Score: {}   Pairs left: {}   Time: {}",
        session.score(),
        session.pairs_left(),
        format_elapsed(elapsed_seconds)
    );
    if session.phase() == GamePhase::MismatchPending {
        println!("No match - try again!");
    }
    println!();

    let left = session.slots(Side::Left);
    let right = session.slots(Side::Right);
    let width = left
        .iter()
        .map(|card| card.text.chars().count())
        .max()
        .unwrap_or(0)
        .max(12);

    for i in 0..left.len() {
        let l = &left[i];
        let r = &right[i];
        println!(
            "  l{:<2} {}{:<width$}   r{:<2} {}{}",
            i + 1,
            marker(l.matched, session.selected(Side::Left) == Some(i)),
            l.text,
            i + 1,
            marker(r.matched, session.selected(Side::Right) == Some(i)),
            r.text,
            width = width,
        );
    }
    println!();
    println!("Pick cards with l<N> / r<N>, or: hint, new, quit");
}

fn marker(matched: bool, selected: bool) -> &'static str {
    if matched {
        "[x] "
    } else if selected {
        "[>] "
    } else {
        "[ ] "
    }
}

/// Print the completion screen of a pairing game.
pub fn render_game_summary(summary: &GameSummary) {
    println!();
    println!("All pairs matched!");
    println!(
        "Final score: {}   Time: {}",
        summary.score,
        format_elapsed(summary.elapsed_seconds)
    );
    println!("Type new to play again, or quit to leave.");
}

/// Print the current question with its position and running score.
pub fn render_question(session: &QuizSession) {
    let question = session.current_question();
    println!();
    println!(
        "Question {} of {}   Score: {}",
        session.current_index() + 1,
        session.len(),
        session.score()
    );
    println!("  {}", question.prompt);
    if let Some(record) = session.record(session.current_index()) {
        render_record(record, &question.canonical_answer);
        println!("Navigate with /prev and /next, finish with /done.");
    } else {
        println!("Type your answer (or /prev, /quit).");
    }
}

/// Print the stored verdict for an answered question.
pub fn render_record(record: &AnsweredRecord, canonical_answer: &str) {
    if record.is_correct {
        println!("  Your answer: {} - correct!", record.submitted_text);
    } else {
        println!(
            "  Your answer: {} - incorrect. The correct answer is: {}",
            record.submitted_text, canonical_answer
        );
    }
}

/// Print the final results screen with the per-question review.
pub fn render_quiz_summary(summary: &QuizSummary, session: &QuizSession) {
    println!();
    println!(
        "Finished: {}/{} correct ({}%)",
        summary.score, summary.total, summary.percentage
    );
    println!("{}", grade_message(summary.grade));
    println!();
    for record in &summary.records {
        let verdict = if record.is_correct { " ok" } else { "  X" };
        let prompt = session
            .question(record.question_index)
            .map(|q| q.prompt.as_str())
            .unwrap_or("?");
        if record.is_correct {
            println!("{verdict} Q{}: {prompt}  -> {}", record.question_index + 1, record.submitted_text);
        } else {
            let canonical = session
                .question(record.question_index)
                .map(|q| q.canonical_answer.as_str())
                .unwrap_or("?");
            println!(
                "{verdict} Q{}: {prompt}  -> {} (correct: {})",
                record.question_index + 1,
                record.submitted_text,
                canonical
            );
        }
    }
}

fn grade_message(grade: Grade) -> &'static str {
    match grade {
        Grade::Excellent => "Excellent work!",
        Grade::Good => "Good job - keep going!",
        Grade::NeedsPractice => "Keep practicing, you'll get there.",
    }
}
