use crate::code::Code;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The clue earned by a single guess.
///
/// `exact` counts positions where guess and secret hold the same symbol;
/// `partial` counts further symbols that appear in both codes but in
/// different positions. Two clues are equal iff both components are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Clue {
    /// The number of symbols that are correct and correctly placed.
    pub exact: u8,
    /// The number of remaining symbols that are correct but displaced.
    pub partial: u8,
}

impl Clue {
    pub fn new(exact: u8, partial: u8) -> Clue {
        Clue { exact, partial }
    }

    /// Whether this clue reports a fully matched code of the given length.
    pub fn is_full_match(&self, code_length: usize) -> bool {
        self.partial == 0 && usize::from(self.exact) == code_length
    }
}

/// Indicates that an error occurred while evaluating a guess or breaking a
/// code.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum MastermindError {
    /// Indicates that a code's length differs from the configured length.
    InvalidLength,
    /// Indicates that a symbol falls outside the configured alphabet.
    InvalidSymbol,
    /// Indicates that the recorded guesses and clues rule out every code, so
    /// no next guess has any logical grounding.
    InconsistentHistory,
}

impl fmt::Display for MastermindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MastermindError::InvalidLength => {
                write!(f, "the code has the wrong number of symbols")
            }
            MastermindError::InvalidSymbol => {
                write!(f, "the code contains a symbol outside the alphabet")
            }
            MastermindError::InconsistentHistory => {
                write!(f, "the recorded clues rule out every possible code")
            }
        }
    }
}

impl std::error::Error for MastermindError {}

/// A guess together with the clue it earned.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GuessOutcome {
    pub guess: Code,
    pub clue: Clue,
}

/// Whether the game was won or lost by the guesser.
#[derive(Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Indicates that the guesser found the secret, and provides each turn's
    /// guess and clue.
    Success(Vec<GuessOutcome>),
    /// Indicates that the guesser ran out of turns, and provides each turn's
    /// guess and clue.
    Failure(Vec<GuessOutcome>),
}

/// Determines the clue the given `guess` earns against the given `secret`.
///
/// Positions matched exactly are consumed on both sides before displaced
/// symbols are counted, so a symbol instance is never counted twice and
/// `exact + partial` never exceeds the code length. The computation is
/// symmetric in its arguments and both codes are left untouched; each call
/// returns a freshly constructed [`Clue`].
///
/// ```
/// use rs_mastermind_solver::*;
///
/// let clue = get_clue_for_guess(&Code::from([1, 4, 6, 3]), &Code::from([1, 3, 4, 1])).unwrap();
/// assert_eq!(clue, Clue::new(1, 2));
/// ```
pub fn get_clue_for_guess(secret: &Code, guess: &Code) -> Result<Clue, MastermindError> {
    if secret.len() != guess.len() {
        return Err(MastermindError::InvalidLength);
    }
    let mut exact = 0u8;
    let mut secret_remaining = [0u8; 256];
    for (guess_symbol, secret_symbol) in guess.symbols().iter().zip(secret.symbols()) {
        if guess_symbol == secret_symbol {
            exact += 1;
        } else {
            secret_remaining[usize::from(*secret_symbol)] += 1;
        }
    }
    let mut partial = 0u8;
    for (guess_symbol, secret_symbol) in guess.symbols().iter().zip(secret.symbols()) {
        if guess_symbol != secret_symbol && secret_remaining[usize::from(*guess_symbol)] > 0 {
            secret_remaining[usize::from(*guess_symbol)] -= 1;
            partial += 1;
        }
    }
    Ok(Clue { exact, partial })
}
