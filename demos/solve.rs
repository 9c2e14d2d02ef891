use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;

use cluedo_rs::deducer::deduce;
use cluedo_rs::game::{Card, CardCategory, GameObjects, Owner, Player, Suggestion, Suggestions};
use cluedo_rs::knowledge::{Knowledge, Mark};
use cluedo_rs::predict::{Prediction, Predictor, PredictorOptions};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of worker threads for the predictor.
    #[clap(long, value_name = "INT")]
    threads: Option<usize>,

    /// Maximum number of knowledge branches.
    #[clap(long, value_name = "INT", default_value = "100000")]
    max_branches: usize,

    /// Log level.
    #[clap(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

fn suspect(name: &str) -> Card {
    Card::new(CardCategory::new("Suspect"), name)
}

fn weapon(name: &str) -> Card {
    Card::new(CardCategory::new("Weapon"), name)
}

fn room(name: &str) -> Card {
    Card::new(CardCategory::new("Room"), name)
}

fn print_knowledge(game: &GameObjects, knowledge: &Knowledge) {
    let owners: Vec<Owner> = game.owners().collect();
    print!("{:<16}", "");
    for owner in &owners {
        print!(" {:>10}", owner.to_string());
    }
    println!();
    for card in game.cards() {
        print!("{:<16}", card.name());
        for owner in &owners {
            let cell = match knowledge.mark(owner, card) {
                Some(Mark::Yes) => "Y",
                Some(Mark::No) => "N",
                None => ".",
            };
            print!(" {:>10}", cell);
        }
        println!();
    }
}

fn print_prediction(game: &GameObjects, prediction: &Prediction) {
    let owners: Vec<Owner> = game.owners().collect();
    print!("{:<16}", "");
    for owner in &owners {
        print!(" {:>10}", owner.to_string());
    }
    println!();
    for card in game.cards() {
        print!("{:<16}", card.name());
        for owner in &owners {
            match prediction.get(owner, card) {
                Some(p) => print!(" {:>10}", p.to_string()),
                None => print!(" {:>10}", "?"),
            }
        }
        println!();
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level.into(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    let mut options = PredictorOptions::default().with_max_branches(args.max_branches);
    if let Some(threads) = args.threads {
        options = options.with_threads(threads);
    }

    // We are Anisha, playing a classic game against Bob and Cho.
    let anisha = Player::new("Anisha");
    let bob = Player::new("Bob");
    let cho = Player::new("Cho");
    let game = GameObjects::classic([anisha.clone(), bob.clone(), cho.clone()]);

    let mut knowledge = Knowledge::new();
    for player in game.players() {
        knowledge = knowledge.with_hand_size(&game, player, 6)?;
    }
    for card in [
        suspect("Miss Scarlet"),
        suspect("Mrs. White"),
        weapon("Knife"),
        weapon("Revolver"),
        room("Kitchen"),
        room("Ballroom"),
    ] {
        knowledge = knowledge.with_player_mark(&anisha, &card, Mark::Yes)?;
    }

    let suggestions: Suggestions = [
        // Bob showed us the Wrench.
        Suggestion::new(
            anisha.clone(),
            [suspect("Mr. Green"), weapon("Wrench"), room("Study")],
            Vec::<Player>::new(),
            Some(bob.clone()),
            Some(weapon("Wrench")),
        )?,
        // Cho refuted Bob, we didn't see what.
        Suggestion::new(
            bob.clone(),
            [suspect("Prof. Plum"), weapon("Rope"), room("Hall")],
            [anisha.clone()],
            Some(cho.clone()),
            None,
        )?,
        // Nobody could refute Cho.
        Suggestion::new(
            cho.clone(),
            [suspect("Col. Mustard"), weapon("Candlestick"), room("Library")],
            [anisha.clone(), bob.clone()],
            None,
            None,
        )?,
    ]
    .into_iter()
    .collect();
    println!("Recorded {} suggestion(s)", suggestions.len());

    let deduced = deduce(&game, &suggestions, &knowledge)?;
    println!(
        "Deduced {} of {} cells:",
        deduced.known_cells(),
        game.owners().count() * game.total_cards()
    );
    print_knowledge(&game, &deduced);

    let predictor = Predictor::with_options(game.clone(), options);
    println!("options = {:?}", predictor.options());
    let prediction = predictor.predict(&suggestions, &knowledge)?;
    println!("Prediction:");
    print_prediction(&game, &prediction);

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
