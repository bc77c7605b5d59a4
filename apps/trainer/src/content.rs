//! Built-in drill catalogs and JSON deck loading.
//!
//! Times tables cover 1-12 with both multiplication and division rows, the
//! way the classroom sheets are laid out. Vocabulary sets are
//! Hungarian-English word lists; extra decks load from JSON files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use rand::Rng;
use serde::Deserialize;

use drill_core::{sample_pairs, Pair, Question};

const TABLE_MAX: u32 = 12;

/// Quiz questions for one times table: 12 multiplication rows followed by
/// the 12 matching division rows, all with exact numeral answers.
pub fn times_table_questions(table: u32) -> Vec<Question> {
    let mut questions = Vec::with_capacity(2 * TABLE_MAX as usize);
    for i in 1..=TABLE_MAX {
        questions.push(Question::new(
            format!("{table} × {i} = ?"),
            (table * i).to_string(),
        ));
    }
    for i in 1..=TABLE_MAX {
        questions.push(Question::new(
            format!("{} ÷ {table} = ?", table * i),
            i.to_string(),
        ));
    }
    questions
}

/// Pairing-game catalog for one times table (problem on the left, product on
/// the right).
pub fn times_table_pairs(table: u32) -> Vec<Pair> {
    (1..=TABLE_MAX)
        .map(|i| {
            Pair::new(
                i64::from(i),
                format!("{table} × {i}"),
                (table * i).to_string(),
            )
        })
        .collect()
}

/// Random subset of problems drawn from every table.
///
/// Skips the ×1 rows; duplicate products (6 × 7 and 7 × 6) stay distinct
/// pairs since matching is by id, not by text.
pub fn mixed_table_pairs(count: usize, rng: &mut impl Rng) -> Vec<Pair> {
    let mut all = Vec::new();
    let mut id = 0;
    for table in 1..=TABLE_MAX {
        for i in 2..=TABLE_MAX {
            all.push(Pair::new(id, format!("{table} × {i}"), (table * i).to_string()));
            id += 1;
        }
    }
    sample_pairs(&all, count, rng)
}

/// The built-in Hungarian-English vocabulary catalog for the pairing game.
pub fn builtin_vocab_pairs() -> Vec<Pair> {
    [
        ("életfolyamat", "life process"),
        ("nélkül", "without"),
        ("történik", "take place"),
        ("táplálkozás", "nutrition"),
        ("mozgás", "movement"),
        ("növekedés", "growth"),
        ("reagál a változásokra", "respond to changes"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (hu, en))| Pair::new(i as i64, *hu, *en))
    .collect()
}

/// The built-in vocabulary quiz (Hungarian prompt, English answer).
pub fn builtin_vocab_questions() -> Vec<Question> {
    [
        ("játékok", "toys"),
        ("labda", "ball"),
        ("baba", "doll"),
        ("számítógépes játék", "computer game"),
        ("szörnyeteg", "monster"),
        ("robot", "robot"),
        ("papír sárkány", "kite"),
    ]
    .iter()
    .map(|(hu, en)| Question::new(*hu, *en))
    .collect()
}

/// One entry of a JSON deck file.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckEntry {
    pub prompt: String,
    pub answer: String,
    #[serde(default)]
    pub accepted: Vec<String>,
}

/// Load a deck from a JSON file (an array of `{prompt, answer, accepted?}`
/// objects).
pub fn load_deck(path: &Path) -> anyhow::Result<Vec<DeckEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading deck file {}", path.display()))?;
    let entries: Vec<DeckEntry> = serde_json::from_str(&content)
        .with_context(|| format!("parsing deck file {}", path.display()))?;
    anyhow::ensure!(!entries.is_empty(), "deck file {} is empty", path.display());
    Ok(entries)
}

/// Deck entries as a pairing-game catalog.
pub fn deck_pairs(entries: &[DeckEntry]) -> Vec<Pair> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| Pair::new(i as i64, entry.prompt.clone(), entry.answer.clone()))
        .collect()
}

/// Deck entries as quiz questions.
pub fn deck_questions(entries: &[DeckEntry]) -> Vec<Question> {
    entries
        .iter()
        .map(|entry| {
            Question::new(entry.prompt.clone(), entry.answer.clone())
                .with_accepted(entry.accepted.iter().cloned())
        })
        .collect()
}
