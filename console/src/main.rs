use std::{
    cell::RefCell,
    io::{self, BufRead, BufReader},
    path::PathBuf,
    rc::Rc,
};

use anyhow::Context;
use clap::{value_t, App, Arg, ArgMatches};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use codenames::{
    game::{
        runner::{self, Seat},
        DEFAULT_BOARD_SIDE,
    },
    store::{DirectoryStore, GameStore, WordFile},
    Game, GameConfig, Team,
};

use crate::{
    display::{show_key, TeamName},
    players::{HumanOperative, HumanSpymaster, InputReader, SharedInput},
};

mod display;
mod players;

/// Name of the word list inside the data directory.
const CARD_WORDS_FILE: &str = "card_words.txt";

fn main() -> anyhow::Result<()> {
    let matches = App::new("Codenames")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Command line codenames for two teams sharing a terminal.")
        .arg(
            Arg::with_name("data_dir")
                .short("d")
                .long("data-dir")
                .value_name("DIR")
                .help("directory holding card_words.txt and saved games")
                .takes_value(true)
                .default_value("data"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed for a reproducible board")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("size")
                .short("s")
                .long("size")
                .value_name("SIDE")
                .help("number of cards along each side of the board")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("save")
                .long("save")
                .help("save the finished game under <DIR>/games"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let data_dir = PathBuf::from(matches.value_of("data_dir").unwrap_or("data"));
    let config = game_config(&matches)?;
    let words = WordFile::new(data_dir.join(CARD_WORDS_FILE));
    let mut game = Game::new(&words, &config)
        .with_context(|| format!("could not start a game from {}", data_dir.display()))?;
    debug!(id = %game.id(), ?config, "started game");

    let stdin: Box<dyn BufRead> = Box::new(BufReader::new(io::stdin()));
    let input: SharedInput = Rc::new(RefCell::new(InputReader::new(stdin)));
    let mut red = human_seat(Team::Red, &input);
    let mut blue = human_seat(Team::Blue, &input);

    println!(
        "{} team starts. Spymasters, don't let the operatives see your board!",
        TeamName(game.current_turn().team())
    );
    let winner = runner::play(&mut game, &mut red, &mut blue)?;

    println!();
    println!("Winner is: {}! Congratulations!", TeamName(winner));
    show_key(&game);

    if matches.is_present("save") {
        let mut store = DirectoryStore::open(&data_dir)?;
        store.save(game.id(), &game)?;
        info!(id = %game.id(), root = %store.root().display(), "saved finished game");
        println!("Game saved as {}", game.id());
    }
    Ok(())
}

/// Build the game configuration from the command line arguments.
fn game_config(matches: &ArgMatches) -> anyhow::Result<GameConfig> {
    let seed = if matches.is_present("seed") {
        Some(value_t!(matches, "seed", u64).context("invalid seed")?)
    } else {
        None
    };
    let board_side = if matches.is_present("size") {
        value_t!(matches, "size", usize).context("invalid board size")?
    } else {
        DEFAULT_BOARD_SIDE
    };
    Ok(GameConfig { board_side, seed })
}

/// Seat a human spymaster and operative for the team.
fn human_seat(team: Team, input: &SharedInput) -> Seat {
    Seat::new(
        HumanSpymaster::new(team, Rc::clone(input)),
        HumanOperative::new(team, Rc::clone(input)),
    )
}
