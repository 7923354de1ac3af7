//! Human players that read their moves from the terminal.
use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use once_cell::sync::Lazy;
use regex::Regex;

use codenames::{
    board::{CellIdentity, Coordinate, Team},
    game::OperativeView,
    player::{Operative, PlayerError, Spymaster},
    Clue, Game,
};

use crate::display::{show_key, show_words, TeamName};

/// Terminal input shared by every human player at the table.
pub type SharedInput = Rc<RefCell<InputReader<Box<dyn BufRead>>>>;

/// Spymaster controlled from the terminal.
pub struct HumanSpymaster {
    team: Team,
    input: SharedInput,
}

impl HumanSpymaster {
    /// Create a spymaster for the team reading from the shared input.
    pub fn new(team: Team, input: SharedInput) -> Self {
        Self { team, input }
    }
}

impl Spymaster for HumanSpymaster {
    fn team(&self) -> Team {
        self.team
    }

    fn prefix_turn(&mut self, game: &Game) -> Result<(), PlayerError> {
        println!();
        println!("{} spymaster, it is your turn!", TeamName(self.team));
        println!("Current board:");
        show_key(game);
        println!();

        let show = self.input.borrow_mut().read_input_lower(
            "Do you want to see your team's remaining words? (y/N)",
            |input| match input {
                "yes" | "y" => Some(true),
                "no" | "n" | "" => Some(false),
                _ => {
                    println!("Invalid selection.");
                    None
                }
            },
        )?;
        if show {
            let identity = CellIdentity::from(self.team);
            for (coord, card) in game.board().cards().iter() {
                if !card.is_revealed() && game.key()[coord] == identity {
                    println!("  {} at {}", card.word(), coord);
                }
            }
        }
        Ok(())
    }

    fn offer_clue(&mut self) -> Result<Clue, PlayerError> {
        let mut reader = self.input.borrow_mut();
        let text = reader.read_input("Clue:", |input| {
            if input.is_empty() {
                println!("The clue cannot be empty.");
                None
            } else {
                Some(input.to_owned())
            }
        })?;
        let num_guesses = reader.read_input("Number of related words:", |input| {
            match input.parse::<u32>() {
                Ok(num) => Some(num),
                Err(_) => {
                    println!("Invalid number: {}", input);
                    None
                }
            }
        })?;
        Ok(Clue::new(text, num_guesses))
    }
}

/// Operative controlled from the terminal.
pub struct HumanOperative {
    team: Team,
    input: SharedInput,
}

impl HumanOperative {
    /// Create an operative for the team reading from the shared input.
    pub fn new(team: Team, input: SharedInput) -> Self {
        Self { team, input }
    }
}

impl Operative for HumanOperative {
    fn team(&self) -> Team {
        self.team
    }

    fn prefix_turn(&mut self, view: &OperativeView) -> Result<(), PlayerError> {
        println!();
        println!("{} operative, it is your turn!", TeamName(self.team));
        if let Some(clue) = view.current_turn.clue() {
            println!("Your clue is \"{}\" for {}.", clue.text, clue.num_guesses);
        }
        Ok(())
    }

    fn guess_word(&mut self, view: &OperativeView) -> Result<Option<Coordinate>, PlayerError> {
        /// Matcher for `x,y` guesses.
        static GUESS: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^(?P<x>[0-9]+)(?:\s*,\s*|\s+)(?P<y>[0-9]+)$").unwrap());

        println!();
        show_words(&view.words);
        if let Some(clue) = view.current_turn.clue() {
            println!(
                "Clue \"{}\": you have made {} of {} guesses.",
                clue.text,
                view.current_turn.guesses_made(),
                clue.allowance(),
            );
        }
        let side = view.words.side();
        let guess = self.input.borrow_mut().read_input_lower(
            "Guess a word as <x>,<y>, or type forfeit to end your turn:",
            |input| match input {
                "forfeit" | "pass" | "done" => Some(None),
                other => {
                    let captures = match GUESS.captures(other) {
                        Some(captures) => captures,
                        None => {
                            println!("Invalid guess \"{}\".", other);
                            return None;
                        }
                    };
                    let x = parse_index(&captures["x"], "x", side)?;
                    let y = parse_index(&captures["y"], "y", side)?;
                    let coord = Coordinate::new(x, y);
                    match view.words.get(&coord) {
                        Some(card) if card.is_revealed() => {
                            println!("{} has already been revealed.", card.word());
                            None
                        }
                        _ => Some(Some(coord)),
                    }
                }
            },
        )?;
        Ok(guess)
    }
}

/// Parse one half of a coordinate, printing why it was rejected.
fn parse_index(raw: &str, name: &str, side: usize) -> Option<usize> {
    match raw.parse() {
        Ok(val) if val < side => Some(val),
        Ok(val) => {
            println!("{} must be in range [0,{}], got {}", name, side - 1, val);
            None
        }
        Err(_) => {
            println!("invalid {}: {}", name, raw);
            None
        }
    }
}

/// Helper to read input from the player.
pub struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    /// Wrap the given input.
    pub fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    pub fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Repeatedly tries to read input until the input checker returns `Some`.
    pub fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. End of input
    /// is reported as an error.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(())
    }
}
