pub mod level;

use crate::error::domain_error::DomainError;

pub use self::level::Level;

/// Wrong guesses that lose the round.
pub const MAX_WRONG_GUESSES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Ongoing,
    Won,
    Lost,
}

impl RoundResult {
    pub fn is_decided(&self) -> bool {
        !matches!(self, RoundResult::Ongoing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GuessOutcome {
    /// The letter had already been guessed, nothing changed.
    Unchanged,
    Changed {
        guessed_letters: Vec<char>,
        wrong_count: usize,
        result: RoundResult,
    },
}

/// One play-through of a secret word.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    secret_word: String,
    level: Option<Level>,
    guessed_letters: Vec<char>,
    wrong_count: usize,
}

impl Round {
    /// Starts a fresh round. Nothing is carried over from any previous round.
    pub fn new(word: &str, level: Option<Level>) -> Result<Self, DomainError> {
        let secret_word = word.trim().to_lowercase();
        if secret_word.is_empty() {
            return Err(DomainError::EmptySecretWord);
        }

        Ok(Round {
            secret_word,
            level,
            guessed_letters: Vec::default(),
            wrong_count: 0,
        })
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn guessed_letters(&self) -> &[char] {
        &self.guessed_letters
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong_count
    }

    pub fn word_length(&self) -> usize {
        self.secret_word.chars().count()
    }

    pub fn apply_guess(&mut self, letter: char) -> GuessOutcome {
        if self.guessed_letters.contains(&letter) {
            return GuessOutcome::Unchanged;
        }

        self.guessed_letters.push(letter);
        if !self.secret_word.contains(letter) {
            self.wrong_count += 1;
        }

        GuessOutcome::Changed {
            guessed_letters: self.guessed_letters.clone(),
            wrong_count: self.wrong_count,
            result: self.result(),
        }
    }

    /// Won is checked before Lost, so a round that satisfies both counts as won.
    pub fn result(&self) -> RoundResult {
        if self.is_word_complete() {
            RoundResult::Won
        } else if self.wrong_count >= MAX_WRONG_GUESSES {
            RoundResult::Lost
        } else {
            RoundResult::Ongoing
        }
    }

    fn is_word_complete(&self) -> bool {
        self.secret_word
            .chars()
            .all(|letter| self.guessed_letters.contains(&letter))
    }
}

/// Normalizes a raw guess into a single lowercase character. Surrounding whitespace is
/// trimmed, unless the guess is the whitespace itself, as secret words may contain spaces.
pub fn parse_letter(raw: &str) -> Result<char, DomainError> {
    let trimmed = match raw.trim() {
        "" => raw,
        trimmed => trimmed,
    };
    let mut letters = trimmed.chars().flat_map(char::to_lowercase);
    match (letters.next(), letters.next()) {
        (Some(letter), None) => Ok(letter),
        _ => Err(DomainError::InvalidLetter(raw.to_string())),
    }
}
