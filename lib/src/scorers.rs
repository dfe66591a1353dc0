use crate::code::{Code, CodeBank};
use crate::results::{get_clue_for_guess, GuessOutcome, MastermindError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gives codes a score, where the maximum score indicates the best guess.
pub trait CodeScorer {
    /// Updates the scorer with the latest guess outcome and the updated list
    /// of codes that can still be the secret.
    fn update(
        &mut self,
        latest_outcome: &GuessOutcome,
        possible_codes: &[Code],
    ) -> Result<(), MastermindError>;

    /// Determines a score for the given code. The higher the score, the
    /// better the guess.
    fn score_code(&self, code: &Code) -> i64;
}

/// Scores a code by the number of candidates it is guaranteed to eliminate,
/// whatever the secret turns out to be.
///
/// Playing a code splits the remaining candidates into groups by the clue
/// each one would produce. An adversarial secret sits in the largest group,
/// so the guaranteed eliminations are the candidate count minus that group's
/// size. Maximizing this score minimizes the worst-case search space left
/// after the guess (Knuth's minimax strategy); with the two-pair opener it
/// finds every code in the standard game within five turns, averaging about
/// four and a half.
///
/// ```
/// use rs_mastermind_solver::scorers::WorstCaseEliminationsScorer;
/// use rs_mastermind_solver::*;
///
/// let bank = CodeBank::standard();
/// let scorer = WorstCaseEliminationsScorer::new(&bank);
/// let mut guesser = MaxScoreGuesser::new(GuessFrom::AllCodes, bank, scorer);
///
/// assert!(guesser.select_next_guess().is_some());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorstCaseEliminationsScorer {
    possible_codes: Vec<Code>,
}

impl WorstCaseEliminationsScorer {
    pub fn new(bank: &CodeBank) -> WorstCaseEliminationsScorer {
        WorstCaseEliminationsScorer {
            possible_codes: bank.to_vec(),
        }
    }

    fn largest_clue_group(&self, code: &Code) -> usize {
        // Clues for a code of length L fit in an (L + 1) x (L + 1) table, so
        // group sizes live in a flat bucket list instead of a map.
        let stride = code.len() + 1;
        let mut group_sizes = vec![0usize; stride * stride];
        let mut largest = 0;
        for candidate in &self.possible_codes {
            let clue = get_clue_for_guess(candidate, code)
                .expect("codes in a bank share one length");
            let bucket = usize::from(clue.exact) * stride + usize::from(clue.partial);
            group_sizes[bucket] += 1;
            if group_sizes[bucket] > largest {
                largest = group_sizes[bucket];
            }
        }
        largest
    }
}

impl CodeScorer for WorstCaseEliminationsScorer {
    fn update(
        &mut self,
        _latest_outcome: &GuessOutcome,
        possible_codes: &[Code],
    ) -> Result<(), MastermindError> {
        self.possible_codes = possible_codes.to_vec();
        Ok(())
    }

    fn score_code(&self, code: &Code) -> i64 {
        (self.possible_codes.len() - self.largest_clue_group(code)) as i64
    }
}
