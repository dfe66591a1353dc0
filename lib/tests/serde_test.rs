#![cfg(feature = "serde")]

#[macro_use]
extern crate assert_matches;

use rs_mastermind_solver::*;

#[test]
fn guess_outcome_serde() {
    let outcome = GuessOutcome {
        guess: Code::from([1, 1, 2, 2]),
        clue: Clue::new(1, 2),
    };

    let ser = ron::to_string(&outcome);
    assert_matches!(ser, Ok(_));

    let deser = ron::from_str::<GuessOutcome>(&ser.unwrap());
    assert_eq!(deser.unwrap(), outcome);
}

#[test]
fn code_bank_serde() {
    let bank = CodeBank::new(3, 2);

    let ser = ron::to_string(&bank).unwrap();
    let deser = ron::from_str::<CodeBank>(&ser).unwrap();

    assert_eq!(deser.to_vec(), bank.to_vec());
    assert_eq!(deser.num_symbols(), bank.num_symbols());
    assert_eq!(deser.code_length(), bank.code_length());
}
