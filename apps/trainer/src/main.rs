//! quizdrill - quiz and pairing-game drills in the terminal.
//!
//! Hosts the drill-core session state machines: reads line commands, forwards
//! them as session calls, and re-renders from the session projections. All
//! timing (the elapsed clock, the mismatch display delay) lives here; the
//! core never sleeps.

mod content;
mod display;
mod input;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::bail;
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drill_core::{
    Direction, GameOptions, HintOutcome, MatchingMode, Pair, PairingSession, Question,
    QuizOptions, QuizSession, ReselectBehavior, SelectOutcome, Side, SubmitOutcome,
};

use input::{PairsCommand, QuizCommand};

#[derive(Parser, Debug)]
#[command(name = "quizdrill")]
#[command(about = "Multiplication-table and vocabulary drills in the terminal")]
struct Args {
    /// RNG seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Two-column pairing game: match each prompt card to its answer card
    Pairs {
        /// JSON deck file with prompt/answer entries
        #[arg(long, conflicts_with_all = ["table", "mixed"])]
        deck: Option<PathBuf>,

        /// Drill one times table (1-12)
        #[arg(long, conflicts_with = "mixed")]
        table: Option<u32>,

        /// Draw this many random problems from all tables
        #[arg(long)]
        mixed: Option<usize>,

        /// Deduct 2 points on a mismatched pair
        #[arg(long)]
        penalty: bool,

        /// Re-clicking a selected card deselects it instead of keeping it
        #[arg(long)]
        toggle: bool,

        /// How long a mismatched pair stays highlighted, in milliseconds
        #[arg(long, default_value_t = 800)]
        mismatch_delay_ms: u64,
    },
    /// Typed-answer quiz with forward/backward navigation
    Quiz {
        /// JSON deck file with prompt/answer entries
        #[arg(long, conflicts_with = "table")]
        deck: Option<PathBuf>,

        /// Drill one times table (1-12)
        #[arg(long)]
        table: Option<u32>,

        /// Shuffle the question order
        #[arg(long)]
        shuffle: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    match args.command {
        Command::Pairs {
            deck,
            table,
            mixed,
            penalty,
            toggle,
            mismatch_delay_ms,
        } => {
            let pairs = pairs_catalog(deck.as_deref(), table, mixed, &mut rng)?;
            let options = GameOptions {
                mismatch_penalty: penalty,
                reselect: if toggle {
                    ReselectBehavior::Toggle
                } else {
                    ReselectBehavior::Replace
                },
            };
            run_pairs(
                pairs,
                options,
                Duration::from_millis(mismatch_delay_ms),
                &mut rng,
            )
        }
        Command::Quiz {
            deck,
            table,
            shuffle,
        } => {
            let (questions, matching) = quiz_catalog(deck.as_deref(), table)?;
            run_quiz(questions, QuizOptions { shuffle, matching }, &mut rng)
        }
    }
}

fn pairs_catalog(
    deck: Option<&Path>,
    table: Option<u32>,
    mixed: Option<usize>,
    rng: &mut StdRng,
) -> anyhow::Result<Vec<Pair>> {
    if let Some(path) = deck {
        let entries = content::load_deck(path)?;
        return Ok(content::deck_pairs(&entries));
    }
    if let Some(table) = table {
        validate_table(table)?;
        return Ok(content::times_table_pairs(table));
    }
    if let Some(count) = mixed {
        anyhow::ensure!(count > 0, "--mixed needs at least one problem");
        return Ok(content::mixed_table_pairs(count, rng));
    }
    Ok(content::builtin_vocab_pairs())
}

fn quiz_catalog(
    deck: Option<&Path>,
    table: Option<u32>,
) -> anyhow::Result<(Vec<Question>, MatchingMode)> {
    if let Some(path) = deck {
        let entries = content::load_deck(path)?;
        return Ok((content::deck_questions(&entries), MatchingMode::CaseInsensitive));
    }
    if let Some(table) = table {
        validate_table(table)?;
        // Numeral answers: compare exactly.
        return Ok((content::times_table_questions(table), MatchingMode::Exact));
    }
    Ok((
        content::builtin_vocab_questions(),
        MatchingMode::CaseInsensitive,
    ))
}

fn validate_table(table: u32) -> anyhow::Result<()> {
    if !(1..=12).contains(&table) {
        bail!("--table must be between 1 and 12, got {table}");
    }
    Ok(())
}

fn run_pairs(
    pairs: Vec<Pair>,
    options: GameOptions,
    mismatch_delay: Duration,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let catalog = pairs.clone();
    let mut session = PairingSession::new(pairs, options, rng, Utc::now())?;
    tracing::info!(pairs = session.pair_count(), "pairing session started");

    let stdin = io::stdin();
    loop {
        match session.summary() {
            Some(summary) => display::render_game_summary(summary),
            None => display::render_board(&session, session.elapsed_seconds(Utc::now())),
        }

        let Some(line) = prompt(&stdin)? else { break };
        match input::parse_pairs_command(&line) {
            Some(PairsCommand::Select(side, slot)) => {
                match session.select(side, slot, Utc::now()) {
                    SelectOutcome::Matched { completed, .. } => {
                        println!("Perfect match!");
                        if completed {
                            tracing::info!(score = session.score(), "pairing session completed");
                        }
                    }
                    SelectOutcome::Mismatched { penalty_applied } => {
                        display::render_board(&session, session.elapsed_seconds(Utc::now()));
                        if penalty_applied {
                            tracing::debug!("mismatch penalty applied");
                        }
                        thread::sleep(mismatch_delay);
                        session.clear_mismatch();
                    }
                    SelectOutcome::Ignored => println!("That card is not in play."),
                    SelectOutcome::Selected { .. } | SelectOutcome::Deselected { .. } => {}
                }
            }
            Some(PairsCommand::Hint) => match session.use_hint() {
                HintOutcome::Revealed { side, slot } => {
                    let prefix = match side {
                        Side::Left => 'l',
                        Side::Right => 'r',
                    };
                    println!("Hint: the match is card {}{}.", prefix, slot + 1);
                }
                HintOutcome::NoSelection => {
                    println!("Select one card first to get a hint.");
                }
                HintOutcome::Unavailable => println!("The game is already finished."),
            },
            Some(PairsCommand::New) => {
                session.reset(catalog.clone(), rng, Utc::now())?;
                tracing::info!("pairing session reset");
            }
            Some(PairsCommand::Quit) => break,
            None => println!("Unrecognized input. Pick cards with l<N> / r<N>."),
        }
    }
    Ok(())
}

fn run_quiz(
    questions: Vec<Question>,
    options: QuizOptions,
    rng: &mut StdRng,
) -> anyhow::Result<()> {
    let catalog = questions.clone();
    let mut session = QuizSession::new(questions, options, rng)?;
    tracing::info!(total = session.len(), "quiz session started");

    let stdin = io::stdin();
    loop {
        if !session.is_completed() {
            display::render_question(&session);
        }

        let Some(line) = prompt(&stdin)? else { break };
        match input::parse_quiz_command(&line) {
            QuizCommand::Answer(text) => match session.submit(&text) {
                SubmitOutcome::Graded {
                    is_correct,
                    canonical_answer,
                    is_last,
                } => {
                    if is_correct {
                        println!("Correct! Well done!");
                    } else {
                        println!("Incorrect. The correct answer is: {canonical_answer}");
                    }
                    if is_last {
                        println!("That was the last question - type /done for your results.");
                    }
                }
                SubmitOutcome::EmptyAnswer => println!("Please enter an answer!"),
                SubmitOutcome::AlreadyAnswered(record) => {
                    let canonical = session
                        .question(record.question_index)
                        .map(|q| q.canonical_answer.as_str())
                        .unwrap_or("?");
                    display::render_record(&record, canonical);
                }
                SubmitOutcome::SessionOver => {
                    println!("The quiz is finished - /restart to go again, /quit to leave.");
                }
            },
            QuizCommand::Previous => {
                if let Err(error) = session.navigate(Direction::Previous) {
                    println!("{error}");
                }
            }
            QuizCommand::Next => {
                if let Err(error) = session.navigate(Direction::Next) {
                    println!("{error}");
                }
            }
            QuizCommand::Finish => match session.finalize() {
                Ok(summary) => {
                    tracing::info!(
                        score = summary.score,
                        percentage = summary.percentage,
                        "quiz finalized"
                    );
                    display::render_quiz_summary(&summary, &session);
                    println!("Type /restart to go again, or /quit to leave.");
                }
                Err(error) => println!("{error}"),
            },
            QuizCommand::Restart => {
                session.restart(catalog.clone(), rng)?;
                tracing::info!("quiz session restarted");
            }
            QuizCommand::Quit => break,
        }
    }
    Ok(())
}

/// Print the prompt marker and read one line; `None` on EOF.
fn prompt(stdin: &io::Stdin) -> io::Result<Option<String>> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    if stdin.lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
