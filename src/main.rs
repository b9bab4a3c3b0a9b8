//! Pokemon Card Game CLI
//!
//! Browse PokeAPI's Pokemon list, look up a single Pokemon, or play the
//! six-round card battle against the PC from the terminal.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use pokemon_card_game::errors::{AppResult, RunnerError};
use pokemon_card_game::game::ai::{Behavior, RandomPick, ScoringPick};
use pokemon_card_game::game::runner::play_match;
use pokemon_card_game::game::session::GameSession;
use pokemon_card_game::game::setup::deal_match;
use pokemon_card_game::{interface, logging, Catalog, GameConfig, PokeApiClient};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::watch;

/// Pokemon card battles and catalog browsing, backed by PokeAPI
#[derive(Parser)]
#[command(name = "pokemon-card-game")]
#[command(about = "Pokemon card battles backed by PokeAPI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List Pokemon a page at a time
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Only list Pokemon of this type (e.g. fire, water)
        #[arg(short, long = "type", value_name = "TYPE")]
        type_name: Option<String>,
    },

    /// Show sprite, types and base stats of one Pokemon
    Show { name: String },

    /// List every Pokemon type
    Types,

    /// Play a match, picking each card yourself
    Play {
        /// Seed for dealing and the PC's draws
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the computer play a whole match for you
    Autoplay {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, value_enum, default_value_t = Strategy::Scoring)]
        strategy: Strategy,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Strategy {
    /// Play a random remaining card
    Random,
    /// Play the card with the best expected record
    Scoring,
}

/// Reads the player's card choice from stdin.
struct StdinPick;

impl Behavior for StdinPick {
    fn choose_card(&mut self, session: &GameSession) -> Option<usize> {
        let remaining = session.user_deck().len();
        println!("\n{}", interface::render_status(session));
        tokio::task::block_in_place(|| {
            let stdin = io::stdin();
            loop {
                print!("Choose a card (1-{}): ", remaining);
                io::stdout().flush().ok()?;

                let mut line = String::new();
                match stdin.lock().read_line(&mut line) {
                    Ok(0) | Err(_) => return None,
                    Ok(_) => {}
                }
                match interface::parse_card_number(&line, remaining) {
                    Ok(index) => return Some(index),
                    Err(message) => println!("{}", message),
                }
            }
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    let cli = Cli::parse();
    let config = GameConfig::load()?;
    tracing::debug!(?config, "configuration loaded");

    run(cli.command, &config).await?;
    Ok(())
}

async fn run(command: Command, config: &GameConfig) -> AppResult<()> {
    let client = PokeApiClient::from_config(config)?;

    match command {
        Command::List { page, type_name } => {
            let catalog = Catalog::new(client, config.page_size);
            let page = match type_name {
                Some(type_name) => catalog.page_of_type(&type_name, page).await?,
                None => catalog.page(page).await?,
            };
            print!("{}", interface::render_catalog_page(&page));
        }
        Command::Show { name } => {
            let catalog = Catalog::new(client, config.page_size);
            let creature = catalog.details(&name).await?;
            print!("{}", interface::render_details(&creature));
        }
        Command::Types => {
            let catalog = Catalog::new(client, config.page_size);
            let names = catalog.type_names().await?;
            print!("{}", interface::render_type_list(&names));
        }
        Command::Play { seed } => {
            play(&client, config, seed, &mut StdinPick).await?;
        }
        Command::Autoplay { seed, strategy } => {
            let mut chooser: Box<dyn Behavior> = match strategy {
                Strategy::Random => Box::new(RandomPick::new(match seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
                    None => StdRng::from_rng(&mut rand::rng()),
                })),
                Strategy::Scoring => Box::new(ScoringPick::new()),
            };
            play(&client, config, seed, chooser.as_mut()).await?;
        }
    }
    Ok(())
}

async fn play(
    client: &PokeApiClient,
    config: &GameConfig,
    seed: Option<u64>,
    chooser: &mut dyn Behavior,
) -> AppResult<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    println!("Dealing cards...");
    let dealt = deal_match(client, config, &mut rng).await?;
    let mut session = dealt.into_session(config.rules.clone())?;
    let mut shutdown = spawn_interrupt_watch();

    let result = play_match(&mut session, chooser, &mut rng, &mut shutdown, |_, report| {
        println!("\n{}", interface::render_round(report));
    })
    .await;

    match result {
        Ok(summary) => {
            println!("\n{}", interface::render_summary(&summary));
            Ok(())
        }
        Err(RunnerError::Cancelled { round }) => {
            println!("\nMatch abandoned in round {}.", round);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Flips the returned flag on the first Ctrl-C. A second Ctrl-C exits
/// immediately, which is the only way out of a blocked stdin read.
fn spawn_interrupt_watch() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping the match");
            let _ = tx.send(true);
        }
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
    rx
}
