use crate::code::{Code, CodeBank};
use crate::results::{get_clue_for_guess, GameResult, GuessOutcome, MastermindError};
use crate::scorers::{CodeScorer, WorstCaseEliminationsScorer};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether to select guesses from the whole bank or only from the codes that
/// can still be the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GuessFrom {
    /// Score every code in the bank. A code that is already ruled out can
    /// still split the remaining candidates better than any candidate does.
    AllCodes,
    /// Score only codes that can still be the secret.
    PossibleCodes,
}

/// Guesses the secret code based on the clues earned by previous guesses.
pub trait Guesser {
    /// Records the clue earned by the latest guess.
    fn update(&mut self, outcome: &GuessOutcome) -> Result<(), MastermindError>;

    /// Selects the next guess, or `None` if the guesser has nothing to play.
    fn select_next_guess(&mut self) -> Option<Code>;
}

/// Attempts to guess the given code within the maximum number of turns, using
/// the default minimax guesser over the given bank.
pub fn play_game(
    secret: &Code,
    max_num_turns: u32,
    bank: &CodeBank,
) -> Result<GameResult, MastermindError> {
    bank.validate_code(secret)?;
    let scorer = WorstCaseEliminationsScorer::new(bank);
    let guesser = MaxScoreGuesser::new(GuessFrom::AllCodes, bank.clone(), scorer);
    play_game_with_guesser(secret, max_num_turns, guesser)
}

/// Attempts to guess the given code within the maximum number of turns, using
/// the given guesser.
///
/// The loop owns termination: it stops on a fully matched clue or once the
/// turn budget is spent, whichever comes first.
pub fn play_game_with_guesser<G: Guesser>(
    secret: &Code,
    max_num_turns: u32,
    mut guesser: G,
) -> Result<GameResult, MastermindError> {
    let mut outcomes: Vec<GuessOutcome> = Vec::new();
    for _ in 1..=max_num_turns {
        let guess = match guesser.select_next_guess() {
            Some(guess) => guess,
            None => return Err(MastermindError::InconsistentHistory),
        };
        let clue = get_clue_for_guess(secret, &guess)?;
        let outcome = GuessOutcome { guess, clue };
        outcomes.push(outcome.clone());
        if clue.is_full_match(secret.len()) {
            return Ok(GameResult::Success(outcomes));
        }
        guesser.update(&outcome)?;
    }
    Ok(GameResult::Failure(outcomes))
}

/// Selects the guess with the maximum score, as computed by the given
/// [`CodeScorer`].
///
/// Before any clue exists the guesser plays a fixed opening guess, the
/// conventional two-pair code (`1122` in the standard game). After each
/// update it retains exactly the codes that would have produced every
/// recorded clue, then scores the guess pool and picks the best entry. Ties
/// resolve toward a code that can still be the secret, then toward the
/// earliest code in the bank, so a full game is reproducible run to run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaxScoreGuesser<S: CodeScorer> {
    guess_from: GuessFrom,
    bank: CodeBank,
    possible_codes: Vec<Code>,
    history: Vec<GuessOutcome>,
    opening_guess: Option<Code>,
    parallelisation_limit: usize,
    scorer: S,
}

impl<S: CodeScorer> MaxScoreGuesser<S> {
    /// Pool size above which the scoring pass moves to the rayon thread pool.
    const PARALLELISATION_LIMIT: usize = 1000;

    pub fn new(guess_from: GuessFrom, bank: CodeBank, scorer: S) -> MaxScoreGuesser<S> {
        MaxScoreGuesser::with_parallelisation_limit(
            guess_from,
            bank,
            scorer,
            Self::PARALLELISATION_LIMIT,
        )
    }

    /// As [`MaxScoreGuesser::new`], with an explicit threshold for switching
    /// the scoring pass to the rayon thread pool. The selected guess does not
    /// depend on the threshold, only the wall-clock time does.
    pub fn with_parallelisation_limit(
        guess_from: GuessFrom,
        bank: CodeBank,
        scorer: S,
        parallelisation_limit: usize,
    ) -> MaxScoreGuesser<S> {
        let opening_guess = default_opening_guess(&bank);
        let possible_codes = bank.to_vec();
        MaxScoreGuesser {
            guess_from,
            bank,
            possible_codes,
            history: Vec::new(),
            opening_guess,
            parallelisation_limit,
            scorer,
        }
    }

    /// Replaces the opening guess played before any clue exists, or disables
    /// it entirely so that even the first guess comes from scoring.
    pub fn with_opening_guess(
        mut self,
        opening_guess: Option<Code>,
    ) -> Result<MaxScoreGuesser<S>, MastermindError> {
        if let Some(code) = &opening_guess {
            self.bank.validate_code(code)?;
        }
        self.opening_guess = opening_guess;
        Ok(self)
    }

    /// The codes that can still be the secret, given the clues so far.
    pub fn possible_codes(&self) -> &[Code] {
        &self.possible_codes
    }

    /// Every guess made so far, with the clue it earned.
    pub fn history(&self) -> &[GuessOutcome] {
        &self.history
    }
}

impl<S: CodeScorer + Sync> Guesser for MaxScoreGuesser<S> {
    fn update(&mut self, outcome: &GuessOutcome) -> Result<(), MastermindError> {
        self.possible_codes.retain(|code| {
            get_clue_for_guess(code, &outcome.guess)
                .map_or(false, |candidate_clue| candidate_clue == outcome.clue)
        });
        if self.possible_codes.is_empty() {
            return Err(MastermindError::InconsistentHistory);
        }
        self.history.push(outcome.clone());
        self.scorer.update(outcome, &self.possible_codes)
    }

    fn select_next_guess(&mut self) -> Option<Code> {
        if self.possible_codes.is_empty() {
            return None;
        }
        if self.history.is_empty() {
            if let Some(code) = &self.opening_guess {
                return Some(code.clone());
            }
        }
        if self.possible_codes.len() == 1 {
            return self.possible_codes.first().cloned();
        }
        let pool: &[Code] = match self.guess_from {
            GuessFrom::AllCodes => &self.bank,
            GuessFrom::PossibleCodes => &self.possible_codes,
        };
        let still_possible: HashSet<&Code> = self.possible_codes.iter().collect();
        let scorer = &self.scorer;
        // The key is a total order over the pool: best score first, then any
        // code that can still be the secret, then the earliest bank entry.
        // Scoring in parallel cannot change the winner.
        let score_entry = move |index: usize, code: &Code| {
            (
                scorer.score_code(code),
                still_possible.contains(code),
                Reverse(index),
            )
        };
        let best = if pool.len() < self.parallelisation_limit {
            pool.iter()
                .enumerate()
                .max_by_key(|&(index, code)| score_entry(index, code))
        } else {
            pool.par_iter()
                .enumerate()
                .max_by_key(|&(index, code)| score_entry(index, code))
        };
        best.map(|(_, code)| code.clone())
    }
}

/// Forwards externally chosen guesses, validating them first.
///
/// This lets the surrounding game loop treat a human player and the
/// automated guessers uniformly: it depends only on [`Guesser`], while the
/// input layer feeds each turn's code through [`ManualGuesser::provide_guess`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ManualGuesser {
    num_symbols: u8,
    code_length: usize,
    pending_guess: Option<Code>,
    history: Vec<GuessOutcome>,
}

impl ManualGuesser {
    pub fn new(bank: &CodeBank) -> ManualGuesser {
        ManualGuesser {
            num_symbols: bank.num_symbols(),
            code_length: bank.code_length(),
            pending_guess: None,
            history: Vec::new(),
        }
    }

    /// Supplies the code to play on the next turn.
    pub fn provide_guess(&mut self, guess: Code) -> Result<(), MastermindError> {
        if guess.len() != self.code_length {
            return Err(MastermindError::InvalidLength);
        }
        if guess
            .symbols()
            .iter()
            .any(|&symbol| symbol == 0 || symbol > self.num_symbols)
        {
            return Err(MastermindError::InvalidSymbol);
        }
        self.pending_guess = Some(guess);
        Ok(())
    }

    /// Every guess made so far, with the clue it earned.
    pub fn history(&self) -> &[GuessOutcome] {
        &self.history
    }
}

impl Guesser for ManualGuesser {
    fn update(&mut self, outcome: &GuessOutcome) -> Result<(), MastermindError> {
        self.history.push(outcome.clone());
        Ok(())
    }

    fn select_next_guess(&mut self) -> Option<Code> {
        self.pending_guess.take()
    }
}

/// The conventional two-pair opener: the first symbol over the front half of
/// the code, the second symbol over the back half.
fn default_opening_guess(bank: &CodeBank) -> Option<Code> {
    let code_length = bank.code_length();
    if code_length == 0 || bank.num_symbols() < 2 {
        return None;
    }
    let front_half = (code_length + 1) / 2;
    let mut symbols = vec![1u8; code_length];
    for symbol in symbols[front_half..].iter_mut() {
        *symbol = 2;
    }
    Some(Code::from(symbols))
}


#[cfg(all(feature = "unstable", test))]
mod benches {

    extern crate test;

    use super::*;
    use test::Bencher;

    #[bench]
    fn bench_play_game_standard_bank(b: &mut Bencher) {
        let bank = CodeBank::standard();

        b.iter(|| play_game(&Code::from([3, 6, 3, 2]), 12, &bank));
    }

    #[bench]
    fn bench_second_turn_selection(b: &mut Bencher) {
        let bank = CodeBank::standard();
        let secret = Code::from([5, 2, 4, 6]);

        b.iter(|| {
            let scorer = WorstCaseEliminationsScorer::new(&bank);
            let mut guesser = MaxScoreGuesser::new(GuessFrom::AllCodes, bank.clone(), scorer);
            let guess = guesser.select_next_guess().unwrap();
            let clue = get_clue_for_guess(&secret, &guess).unwrap();
            guesser.update(&GuessOutcome { guess, clue }).unwrap();
            guesser.select_next_guess()
        });
    }
}
