#[macro_use]
extern crate assert_matches;

use rs_mastermind_solver::*;

#[test]
fn clue_counts_exact_and_displaced_symbols() {
    let guess = Code::from([1, 3, 4, 1]);
    let secret = Code::from([1, 4, 6, 3]);

    // Position 0 matches; 3 and 4 appear elsewhere; 6 and the second 1 don't.
    assert_eq!(get_clue_for_guess(&secret, &guess), Ok(Clue::new(1, 2)));
}

#[test]
fn clue_for_identical_codes_is_all_exact() {
    let code = Code::from([2, 2, 5, 6]);

    assert_eq!(get_clue_for_guess(&code, &code), Ok(Clue::new(4, 0)));
}

#[test]
fn clue_for_disjoint_codes_is_empty() {
    let guess = Code::from([1, 1, 2, 2]);
    let secret = Code::from([3, 3, 4, 4]);

    assert_eq!(get_clue_for_guess(&secret, &guess), Ok(Clue::new(0, 0)));
}

#[test]
fn clue_never_counts_a_symbol_instance_twice() {
    let guess = Code::from([1, 1, 2, 3]);
    let secret = Code::from([1, 2, 2, 4]);

    // The leading 1 is consumed by its exact match, and only one of the
    // guessed 2s can pair with a remaining 2 in the secret.
    assert_eq!(get_clue_for_guess(&secret, &guess), Ok(Clue::new(1, 1)));
}

#[test]
fn clue_for_rearranged_repeated_symbols() {
    let guess = Code::from([1, 1, 1, 2]);
    let secret = Code::from([1, 1, 2, 1]);

    assert_eq!(get_clue_for_guess(&secret, &guess), Ok(Clue::new(2, 2)));
}

#[test]
fn clue_is_symmetric_and_bounded_for_every_pair() {
    let bank = CodeBank::new(3, 3);

    for secret in bank.iter() {
        for guess in bank.iter() {
            let clue = get_clue_for_guess(secret, guess).unwrap();
            let mirrored = get_clue_for_guess(guess, secret).unwrap();

            assert_eq!(clue, mirrored, "asymmetric for {} vs {}", guess, secret);
            assert!(
                usize::from(clue.exact) + usize::from(clue.partial) <= bank.code_length(),
                "clue {:?} out of bounds for {} vs {}",
                clue,
                guess,
                secret
            );
            if guess == secret {
                assert!(clue.is_full_match(bank.code_length()));
            }
        }
    }
}

#[test]
fn clue_requires_equal_lengths() {
    let result = get_clue_for_guess(&Code::from([1, 2, 3, 4]), &Code::from([1, 2, 3]));

    assert_matches!(result, Err(MastermindError::InvalidLength));
}

#[test]
fn clue_full_match_requires_every_position() {
    assert!(Clue::new(4, 0).is_full_match(4));
    assert!(!Clue::new(3, 0).is_full_match(4));
    assert!(!Clue::new(3, 1).is_full_match(4));
    assert!(!Clue::new(4, 0).is_full_match(5));
}
