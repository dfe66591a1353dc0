use crate::results::MastermindError;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single Mastermind code: an ordered, fixed-length sequence of symbols.
///
/// Symbols are small integers starting at 1; which values are allowed is
/// decided by the [`CodeBank`] the code is checked against. Codes are
/// immutable and cheap to clone, so the same storage can be shared between a
/// bank, a guesser's candidate list, and a game transcript.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Code(Arc<[u8]>);

impl Code {
    /// The symbols of this code, in order.
    pub fn symbols(&self) -> &[u8] {
        &self.0
    }

    /// The number of symbols in this code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` iff this code has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Code {
    fn from(symbols: Vec<u8>) -> Code {
        Code(symbols.into())
    }
}

impl From<&[u8]> for Code {
    fn from(symbols: &[u8]) -> Code {
        Code(symbols.into())
    }
}

impl<const N: usize> From<[u8; N]> for Code {
    fn from(symbols: [u8; N]) -> Code {
        Code(Arc::from(symbols.as_slice()))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.symbols() {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

/// Contains all the codes the guesser may draw from.
///
/// The bank fixes the game's configuration: every code has `code_length`
/// symbols, each in `1..=num_symbols`. It is constructed once per game and
/// only read afterwards.
///
/// ```
/// use rs_mastermind_solver::CodeBank;
///
/// let bank = CodeBank::standard();
/// assert_eq!(bank.len(), 1296);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CodeBank {
    all_codes: Vec<Code>,
    num_symbols: u8,
    code_length: usize,
}

impl CodeBank {
    /// Enumerates every code of `code_length` symbols drawn from
    /// `1..=num_symbols`, repetition allowed.
    ///
    /// Codes are generated in lexicographic order, so indexes into the bank
    /// are stable across runs. The bank is empty if either dimension is zero.
    pub fn new(num_symbols: u8, code_length: usize) -> CodeBank {
        let mut all_codes = Vec::new();
        if num_symbols > 0 && code_length > 0 {
            let mut current = vec![1u8; code_length];
            'generate: loop {
                all_codes.push(Code::from(current.clone()));
                let mut position = code_length;
                loop {
                    if position == 0 {
                        break 'generate;
                    }
                    position -= 1;
                    if current[position] < num_symbols {
                        current[position] += 1;
                        for later in current[position + 1..].iter_mut() {
                            *later = 1;
                        }
                        break;
                    }
                }
            }
        }
        CodeBank {
            all_codes,
            num_symbols,
            code_length,
        }
    }

    /// The standard game: four symbols per code, drawn from 1 through 6.
    pub fn standard() -> CodeBank {
        CodeBank::new(6, 4)
    }

    /// Constructs a bank from an explicit list of codes over
    /// `1..=num_symbols`.
    ///
    /// All codes must share one length. Duplicates are dropped, keeping the
    /// first occurrence, so indexes remain stable.
    pub fn from_codes<I, C>(codes: I, num_symbols: u8) -> Result<CodeBank, MastermindError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Code>,
    {
        let mut all_codes: Vec<Code> = Vec::new();
        let mut code_length = None;
        for code in codes {
            let code = code.into();
            match code_length {
                None => code_length = Some(code.len()),
                Some(expected) if code.len() != expected => {
                    return Err(MastermindError::InvalidLength)
                }
                Some(_) => {}
            }
            if code
                .symbols()
                .iter()
                .any(|&symbol| symbol == 0 || symbol > num_symbols)
            {
                return Err(MastermindError::InvalidSymbol);
            }
            if !all_codes.contains(&code) {
                all_codes.push(code);
            }
        }
        Ok(CodeBank {
            all_codes,
            num_symbols,
            code_length: code_length.unwrap_or(0),
        })
    }

    /// Parses a code from its digit form, e.g. "1122".
    pub fn parse_code(&self, input: &str) -> Result<Code, MastermindError> {
        if input.chars().count() != self.code_length {
            return Err(MastermindError::InvalidLength);
        }
        let symbols = input
            .chars()
            .map(|ch| match ch.to_digit(10) {
                Some(digit) if digit >= 1 && digit <= u32::from(self.num_symbols) => Ok(digit as u8),
                _ => Err(MastermindError::InvalidSymbol),
            })
            .collect::<Result<Vec<u8>, MastermindError>>()?;
        Ok(Code::from(symbols))
    }

    /// Checks that the given code fits this bank's length and alphabet.
    pub fn validate_code(&self, code: &Code) -> Result<(), MastermindError> {
        if code.len() != self.code_length {
            return Err(MastermindError::InvalidLength);
        }
        if code
            .symbols()
            .iter()
            .any(|&symbol| symbol == 0 || symbol > self.num_symbols)
        {
            return Err(MastermindError::InvalidSymbol);
        }
        Ok(())
    }

    /// Picks a uniformly random code, e.g. to use as a secret.
    pub fn random_code(&self) -> Option<Code> {
        if self.all_codes.is_empty() {
            return None;
        }
        let random: usize = rand::random();
        self.all_codes.get(random % self.all_codes.len()).cloned()
    }

    /// The number of symbols each code is allowed to draw from.
    pub fn num_symbols(&self) -> u8 {
        self.num_symbols
    }

    /// The number of symbols in each code.
    pub fn code_length(&self) -> usize {
        self.code_length
    }
}

impl Deref for CodeBank {
    type Target = [Code];

    fn deref(&self) -> &[Code] {
        &self.all_codes
    }
}
