use clap::{Parser, Subcommand};
use rs_mastermind_solver::scorers::WorstCaseEliminationsScorer;
use rs_mastermind_solver::*;
use std::collections::HashMap;
use std::io;
use std::process;
use std::time::Instant;

/// Simple program to play Mastermind, where the computer breaks the code.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Size of the alphabet; codes use digits 1 through this value.
    #[clap(short = 's', long, default_value_t = 6)]
    num_symbols: u8,

    /// Number of digits in a code.
    #[clap(short = 'l', long, default_value_t = 4)]
    code_length: usize,

    /// Maximum number of turns before the code maker wins.
    #[clap(short = 't', long, default_value_t = 12)]
    max_turns: u32,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Benchmark the solver against every code in the enumeration.
    Benchmark,
    /// Run a single game where the solver breaks the given code.
    Single { code: String },
    /// Choose a secret code and score the solver's guesses yourself.
    Break,
    /// Guess a randomly chosen code within the turn limit.
    Play,
}

fn main() -> io::Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    let bank = CodeBank::new(args.num_symbols, args.code_length);
    println!("There are {} possible codes.", bank.len());

    match args.command {
        Command::Benchmark => run_benchmark(&bank, args.max_turns),
        Command::Single { code } => play_single_game(&code, &bank, args.max_turns),
        Command::Break => play_breaker_game(&bank, args.max_turns)?,
        Command::Play => play_guessing_game(&bank, args.max_turns)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn run_benchmark(bank: &CodeBank, max_turns: u32) {
    let mut num_turns_per_game: Vec<u32> = Vec::new();
    for secret in bank.iter() {
        match play_game(secret, max_turns, bank) {
            Ok(GameResult::Success(outcomes)) => num_turns_per_game.push(outcomes.len() as u32),
            Ok(GameResult::Failure(_)) => {
                eprintln!(
                    "Error: code {} was not broken within {} turns.",
                    secret, max_turns
                );
                process::exit(1);
            }
            Err(error) => {
                eprintln!("Error: {}.", error);
                process::exit(1);
            }
        }
    }
    println!("Broke {} codes. Results:", bank.len());

    let mut num_games_per_turns: HashMap<u32, u32> = HashMap::new();
    for num_turns in num_turns_per_game.iter() {
        *(num_games_per_turns.entry(*num_turns).or_insert(0)) += 1;
    }

    println!("|Num turns|Num games|");
    println!("|---------|---------|");
    let mut turn_counts = num_games_per_turns.keys().copied().collect::<Vec<u32>>();
    turn_counts.sort_unstable();
    for turn_count in turn_counts.iter() {
        println!(
            "|{}|{}|",
            turn_count,
            num_games_per_turns.get(turn_count).unwrap()
        );
    }

    let average: f64 = num_games_per_turns
        .iter()
        .fold(0, |acc, (num_turns, num_games)| acc + (num_turns * num_games))
        as f64
        / num_turns_per_game.len() as f64;
    let std_dev: f64 = (num_turns_per_game
        .iter()
        .map(|num_turns| (*num_turns as f64 - average).powi(2))
        .sum::<f64>()
        / num_turns_per_game.len() as f64)
        .sqrt();

    println!(
        "\n**Average number of turns:** {:.2} +/- {:.2}",
        average, std_dev
    );
}

fn play_single_game(code: &str, bank: &CodeBank, max_turns: u32) {
    let secret = match bank.parse_code(code) {
        Ok(secret) => secret,
        Err(error) => {
            eprintln!("Error: {}.", error);
            process::exit(1);
        }
    };
    match play_game(&secret, max_turns, bank) {
        Ok(GameResult::Success(outcomes)) => {
            println!("Broke it! It took me {} turns.", outcomes.len());
            print_outcomes(&outcomes);
        }
        Ok(GameResult::Failure(outcomes)) => {
            println!("I still couldn't break it after {} turns :(", outcomes.len());
            print_outcomes(&outcomes);
        }
        Err(error) => {
            eprintln!("Error: {}.", error);
            process::exit(1);
        }
    }
}

fn play_breaker_game(bank: &CodeBank, max_turns: u32) -> io::Result<()> {
    let scorer = WorstCaseEliminationsScorer::new(bank);
    let mut guesser = MaxScoreGuesser::new(GuessFrom::AllCodes, bank.clone(), scorer);
    println!(
        "Choose a secret code of {} digits between 1 and {}. Press enter once you've chosen.",
        bank.code_length(),
        bank.num_symbols()
    );

    {
        let mut buffer = String::new();
        io::stdin().read_line(&mut buffer)?;
    }

    println!(
        "I will now try to break your code.\n\n\
         For each guess, enter the clue as two digits: first the number of\n\
         digits that are correct and in the right place, then the number of\n\
         digits that are correct but elsewhere.\n\n\
         For example, if your code was \"1463\" and the guess was \"1341\",\n\
         you would enter \"12\"."
    );

    for turn in 1..=max_turns {
        let guess = match guesser.select_next_guess() {
            Some(guess) => guess,
            None => {
                eprintln!("Error: your clues don't match any code.");
                process::exit(1);
            }
        };
        println!("Turn {}: I'm guessing {}. How did I do?", turn, guess);

        let mut clue = read_clue(bank.code_length());
        while clue.is_err() {
            println!("{}", clue.unwrap_err());
            clue = read_clue(bank.code_length());
        }
        let clue = clue.unwrap();

        if clue.is_full_match(bank.code_length()) {
            println!("I did it! It took me {} turns.", turn);
            return Ok(());
        }

        if let Err(error) = guesser.update(&GuessOutcome { guess, clue }) {
            eprintln!("Error: {}.", error);
            process::exit(1);
        }
    }

    println!("I couldn't break it :(");

    Ok(())
}

fn play_guessing_game(bank: &CodeBank, max_turns: u32) -> io::Result<()> {
    let secret = match bank.random_code() {
        Some(secret) => secret,
        None => {
            eprintln!("Error: the code bank is empty.");
            process::exit(1);
        }
    };
    let mut guesser = ManualGuesser::new(bank);
    println!(
        "I have chosen a code of {} digits between 1 and {}. You have {} turns to break it.",
        bank.code_length(),
        bank.num_symbols(),
        max_turns
    );

    for turn in 1..=max_turns {
        println!("Turn {}: enter your guess.", turn);
        loop {
            let mut buffer = String::new();
            io::stdin().read_line(&mut buffer)?;
            match bank
                .parse_code(buffer.trim())
                .and_then(|code| guesser.provide_guess(code))
            {
                Ok(()) => break,
                Err(error) => println!("Sorry, {}. Try again.", error),
            }
        }
        let guess = guesser.select_next_guess().unwrap();
        let clue = get_clue_for_guess(&secret, &guess).unwrap();
        println!("{}  {}", guess, render_clue(&clue));

        if clue.is_full_match(bank.code_length()) {
            println!("Victory! You broke the code in {} turns.", turn);
            return Ok(());
        }

        guesser.update(&GuessOutcome { guess, clue }).unwrap();
    }

    println!("Game over. The code was {}.", secret);

    Ok(())
}

fn print_outcomes(outcomes: &[GuessOutcome]) {
    for outcome in outcomes.iter() {
        println!("\t{}  {}", outcome.guess, render_clue(&outcome.clue));
    }
}

/// Renders a clue as pegs: one filled peg per exact match, one empty peg per
/// displaced symbol.
fn render_clue(clue: &Clue) -> String {
    let mut pegs = String::new();
    for _ in 0..clue.exact {
        pegs.push('●');
    }
    for _ in 0..clue.partial {
        pegs.push('○');
    }
    pegs
}

fn read_clue(code_length: usize) -> io::Result<Clue> {
    let mut buffer = String::new();
    io::stdin().read_line(&mut buffer)?;

    let mut digits = buffer.trim().chars().filter(|ch| !ch.is_whitespace());
    let exact = digits.next().and_then(|ch| ch.to_digit(10));
    let partial = digits.next().and_then(|ch| ch.to_digit(10));
    let (exact, partial) = match (exact, partial, digits.next()) {
        (Some(exact), Some(partial), None) => (exact as u8, partial as u8),
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Enter exactly two digits, e.g. \"12\". Try again.",
            ));
        }
    };
    if usize::from(exact) + usize::from(partial) > code_length {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "The two digits can't add up to more than the code length. Try again.",
        ));
    }

    Ok(Clue { exact, partial })
}
