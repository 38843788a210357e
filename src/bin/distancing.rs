//! Terminal walkthrough: household ages, dice rolls, then the kill count

use clap::{ArgAction, Parser};
use distancing_core::ages::DEFAULT_VISITOR_AGE;
use distancing_core::{
    format_rate, parse_ages, GrowthSession, InfectionView, Result, SimulationConfig,
};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const MAX_SKULLS: usize = 200;

#[derive(Parser, Debug)]
#[command(name = "distancing", version, about = "How your actions affect your household and community")]
struct Cli {
    /// Household ages, e.g. "23,45,67" or "?ages=23,45,67"
    #[arg(long)]
    ages: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible dice rolls
    #[arg(long)]
    seed: Option<u64>,

    /// Print this many weeks of the kill count and exit
    #[arg(long)]
    weeks: Option<u32>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

enum Flow {
    Next,
    Quit,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    SimpleLogger::new().with_level(level).init()?;

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;

    if let Some(weeks) = cli.weeks {
        return print_weeks(&config, weeks);
    }

    let ages = match &cli.ages {
        Some(input) => parse_ages(input)?,
        None => vec![DEFAULT_VISITOR_AGE],
    };

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    if let Flow::Quit = dice_step(&ages, &config, &mut input).await? {
        return Ok(());
    }
    kill_count_step(&config, &mut input).await
}

fn print_weeks(config: &SimulationConfig, weeks: u32) -> Result<()> {
    let params = config.growth_params()?;
    let start = distancing_core::GrowthState::initial(&params);
    for snapshot in start.periods(params).take(weeks as usize) {
        println!(
            "week {:>3}  infected {:>24.0}  killed {:>22}",
            snapshot.period, snapshot.infected, snapshot.killed
        );
    }
    Ok(())
}

fn print_household(view: &InfectionView) {
    for (id, session) in view.sessions() {
        println!("  [{}] {}", id + 1, session);
    }
}

async fn dice_step(ages: &[i32], config: &SimulationConfig, input: &mut Input) -> Result<Flow> {
    let mut view = InfectionView::new(ages, config)?;

    println!("In case you're infected");
    println!("Let's roll the dice and see if it kills any of your family. It probably won't.");
    print_household(&view);
    println!("commands: roll <n> | roll all | status | next | quit");

    loop {
        tokio::select! {
            resolution = view.next_resolution(), if view.pending_count() > 0 => {
                if let Some(resolution) = resolution {
                    if let Some(session) = view.session(resolution.person) {
                        println!("  [{}] {}", resolution.person + 1, session);
                    }
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(Flow::Quit);
                };
                let words: Vec<&str> = line.split_whitespace().collect();
                match words.as_slice() {
                    ["roll", "all"] => {
                        let started = view.roll_all()?;
                        println!("rolling for {} people", started);
                    }
                    ["roll", n] => match n.parse::<usize>() {
                        Ok(n) if n >= 1 => {
                            if !view.roll(n - 1)? {
                                println!("  [{}] can't roll right now", n);
                            }
                        }
                        _ => println!("unknown person {:?}", n),
                    },
                    ["status"] => print_household(&view),
                    ["next"] => break,
                    ["quit"] => return Ok(Flow::Quit),
                    [] => {}
                    _ => println!("commands: roll <n> | roll all | status | next | quit"),
                }
            }
        }
    }

    view.cancel_all();
    let highest = view
        .sessions()
        .map(|(_, session)| session.rate())
        .fold(0.0, f64::max);
    println!(
        "Statistically, you and your family will probably be fine (highest rate {}).",
        format_rate(highest)
    );
    println!("But it's not about you. Let's look at your kill count.");
    Ok(Flow::Next)
}

async fn kill_count_step(config: &SimulationConfig, input: &mut Input) -> Result<()> {
    let mut session = GrowthSession::new(config.growth_params()?);

    println!();
    println!("Your Kill Count");
    println!("{}", session.snapshot());
    println!("press enter to live another week, type quit to stop");

    while let Some(line) = input.next_line().await? {
        if line.trim() == "quit" {
            break;
        }
        let snapshot = session.advance();
        println!("{}", snapshot.skulls(MAX_SKULLS));
        println!("{}", snapshot);
    }

    println!("So please, stay home.");
    Ok(())
}
